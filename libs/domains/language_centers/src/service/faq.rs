use directory_rules::{AuditContext, ReorderRequest, next_display_order};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_center, validation_error};
use crate::error::{LanguageCenterError, LanguageCenterResult, Resource};
use crate::models::{CreateLanguageCenterFaq, LanguageCenterFaq, UpdateLanguageCenterFaq};
use crate::repository::{LanguageCenterFaqRepository, LanguageCenterRepository};

pub struct LanguageCenterFaqService<U: ?Sized, R: ?Sized> {
    centers: Arc<U>,
    repository: Arc<R>,
}

impl<U: ?Sized, R: ?Sized> Clone for LanguageCenterFaqService<U, R> {
    fn clone(&self) -> Self {
        Self {
            centers: Arc::clone(&self.centers),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<U, R> LanguageCenterFaqService<U, R>
where
    U: LanguageCenterRepository + ?Sized,
    R: LanguageCenterFaqRepository + ?Sized,
{
    pub fn new(centers: Arc<U>, repository: Arc<R>) -> Self {
        Self {
            centers,
            repository,
        }
    }

    /// Appends after the last FAQ unless a position is given
    pub async fn create(
        &self,
        ctx: &AuditContext,
        language_center_id: Uuid,
        input: CreateLanguageCenterFaq,
    ) -> LanguageCenterResult<LanguageCenterFaq> {
        input.validate().map_err(validation_error)?;
        ensure_center(self.centers.as_ref(), language_center_id).await?;

        let display_order = match input.display_order {
            Some(order) => order,
            None => next_display_order(
                self.repository
                    .max_faq_display_order(language_center_id)
                    .await?,
            ),
        };

        let faq = LanguageCenterFaq::new(language_center_id, input, display_order, ctx);
        self.repository.insert_faq(faq).await
    }

    pub async fn get(&self, id: Uuid) -> LanguageCenterResult<LanguageCenterFaq> {
        self.repository
            .get_faq(id)
            .await?
            .ok_or(LanguageCenterError::NotFound(Resource::Faq, id))
    }

    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateLanguageCenterFaq,
    ) -> LanguageCenterResult<LanguageCenterFaq> {
        input.validate().map_err(validation_error)?;

        let mut faq = self.get(id).await?;
        faq.apply_update(input, ctx);
        self.repository.update_faq(faq).await
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> LanguageCenterResult<()> {
        if !self.repository.soft_delete_faq(id, ctx).await? {
            return Err(LanguageCenterError::NotFound(Resource::Faq, id));
        }
        Ok(())
    }

    pub async fn list_by_center(
        &self,
        language_center_id: Uuid,
        published_only: bool,
    ) -> LanguageCenterResult<Vec<LanguageCenterFaq>> {
        ensure_center(self.centers.as_ref(), language_center_id).await?;
        self.repository
            .list_faqs(language_center_id, published_only)
            .await
    }

    pub async fn reorder(
        &self,
        ctx: &AuditContext,
        language_center_id: Uuid,
        request: ReorderRequest,
    ) -> LanguageCenterResult<()> {
        request.validate().map_err(validation_error)?;
        ensure_center(self.centers.as_ref(), language_center_id).await?;
        self.repository
            .reorder_faqs(language_center_id, &request.items, ctx)
            .await
    }

    pub async fn toggle_published(
        &self,
        ctx: &AuditContext,
        id: Uuid,
    ) -> LanguageCenterResult<LanguageCenterFaq> {
        let mut faq = self.get(id).await?;
        faq.is_published = !faq.is_published;
        faq.touch(ctx);
        self.repository.update_faq(faq).await
    }
}
