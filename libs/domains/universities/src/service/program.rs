use directory_rules::{AuditContext, ReorderRequest, next_display_order};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_university, validation_error};
use crate::error::{Resource, UniversityError, UniversityResult};
use crate::models::{CreateUniversityProgram, UniversityProgram, UpdateUniversityProgram};
use crate::repository::{UniversityProgramRepository, UniversityRepository};

pub struct UniversityProgramService<U: ?Sized, R: ?Sized> {
    universities: Arc<U>,
    repository: Arc<R>,
}

impl<U: ?Sized, R: ?Sized> Clone for UniversityProgramService<U, R> {
    fn clone(&self) -> Self {
        Self {
            universities: Arc::clone(&self.universities),
            repository: Arc::clone(&self.repository),
        }
    }
}

fn check_tuition(fee: Option<Decimal>) -> UniversityResult<()> {
    match fee {
        Some(fee) if fee < Decimal::ZERO => Err(UniversityError::Validation(
            "tuition_fee must not be negative".to_string(),
        )),
        _ => Ok(()),
    }
}

impl<U, R> UniversityProgramService<U, R>
where
    U: UniversityRepository + ?Sized,
    R: UniversityProgramRepository + ?Sized,
{
    pub fn new(universities: Arc<U>, repository: Arc<R>) -> Self {
        Self {
            universities,
            repository,
        }
    }

    pub async fn create(
        &self,
        ctx: &AuditContext,
        university_id: Uuid,
        input: CreateUniversityProgram,
    ) -> UniversityResult<UniversityProgram> {
        input.validate().map_err(validation_error)?;
        check_tuition(input.tuition_fee)?;
        ensure_university(self.universities.as_ref(), university_id).await?;

        let display_order = match input.display_order {
            Some(order) => order,
            None => next_display_order(
                self.repository
                    .max_program_display_order(university_id)
                    .await?,
            ),
        };

        let program = UniversityProgram::new(university_id, input, display_order, ctx);
        self.repository.insert_program(program).await
    }

    pub async fn get(&self, id: Uuid) -> UniversityResult<UniversityProgram> {
        self.repository
            .get_program(id)
            .await?
            .ok_or(UniversityError::NotFound(Resource::Program, id))
    }

    pub async fn update(
        &self,
        ctx: &AuditContext,
        id: Uuid,
        input: UpdateUniversityProgram,
    ) -> UniversityResult<UniversityProgram> {
        input.validate().map_err(validation_error)?;
        check_tuition(input.tuition_fee)?;

        let mut program = self.get(id).await?;
        program.apply_update(input, ctx);
        self.repository.update_program(program).await
    }

    pub async fn delete(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<()> {
        if !self.repository.soft_delete_program(id, ctx).await? {
            return Err(UniversityError::NotFound(Resource::Program, id));
        }
        Ok(())
    }

    pub async fn list_by_university(
        &self,
        university_id: Uuid,
        active_only: bool,
    ) -> UniversityResult<Vec<UniversityProgram>> {
        ensure_university(self.universities.as_ref(), university_id).await?;
        self.repository
            .list_programs(university_id, active_only)
            .await
    }

    pub async fn reorder(
        &self,
        ctx: &AuditContext,
        university_id: Uuid,
        request: ReorderRequest,
    ) -> UniversityResult<()> {
        request.validate().map_err(validation_error)?;
        ensure_university(self.universities.as_ref(), university_id).await?;
        self.repository
            .reorder_programs(university_id, &request.items, ctx)
            .await
    }

    pub async fn toggle_active(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<UniversityProgram> {
        let mut program = self.get(id).await?;
        program.is_active = !program.is_active;
        program.touch(ctx);
        self.repository.update_program(program).await
    }

    pub async fn toggle_featured(&self, ctx: &AuditContext, id: Uuid) -> UniversityResult<UniversityProgram> {
        let mut program = self.get(id).await?;
        program.is_featured = !program.is_featured;
        program.touch(ctx);
        self.repository.update_program(program).await
    }
}
