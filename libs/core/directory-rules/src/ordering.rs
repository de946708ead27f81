//! Display ordering of child records (FAQs, content sections, programs, courses).

use crate::audit::AuditContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DisplayOrderItem {
    pub id: Uuid,
    pub display_order: i32,
}

/// New positions for some or all children of one parent. Applied atomically.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ReorderRequest {
    #[validate(length(min = 1, max = 500), custom(function = "validate_distinct_ids"))]
    pub items: Vec<DisplayOrderItem>,
}

fn validate_distinct_ids(items: &[DisplayOrderItem]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(items.len());
    if items.iter().all(|item| seen.insert(item.id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_id"))
    }
}

/// Position for a new child appended after the current maximum.
pub fn next_display_order(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max.saturating_add(1))
}

/// A soft-deletable record positioned under a parent.
///
/// Implemented by the child models so in-memory stores can share the
/// ordering logic that PostgreSQL does with `ORDER BY` and transactions.
pub trait OrderedChild {
    fn id(&self) -> Uuid;
    fn parent_id(&self) -> Uuid;
    fn display_order(&self) -> i32;
    fn created_at(&self) -> DateTime<Utc>;
    fn is_deleted(&self) -> bool;
    fn reposition(&mut self, display_order: i32, ctx: &AuditContext);
}

/// Highest display order among the live children of `parent_id`.
pub fn max_display_order<'a, T, I>(rows: I, parent_id: Uuid) -> Option<i32>
where
    T: OrderedChild + 'a,
    I: IntoIterator<Item = &'a T>,
{
    rows.into_iter()
        .filter(|row| row.parent_id() == parent_id && !row.is_deleted())
        .map(OrderedChild::display_order)
        .max()
}

/// Live children of `parent_id`, by display order and then creation time.
pub fn live_children<'a, T, I>(rows: I, parent_id: Uuid) -> Vec<T>
where
    T: OrderedChild + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut children: Vec<T> = rows
        .into_iter()
        .filter(|row| row.parent_id() == parent_id && !row.is_deleted())
        .cloned()
        .collect();
    children.sort_by_key(|row| (row.display_order(), row.created_at()));
    children
}

/// Applies `items` to `rows` all-or-nothing.
///
/// Every id must be a live child of `parent_id`. On the first one that is
/// not, nothing is changed and that id is returned as the error.
pub fn apply_reorder<T: OrderedChild>(
    rows: &mut HashMap<Uuid, T>,
    parent_id: Uuid,
    items: &[DisplayOrderItem],
    ctx: &AuditContext,
) -> Result<(), Uuid> {
    if let Some(missing) = items.iter().find(|item| {
        !rows
            .get(&item.id)
            .is_some_and(|row| row.parent_id() == parent_id && !row.is_deleted())
    }) {
        return Err(missing.id);
    }

    for item in items {
        if let Some(row) = rows.get_mut(&item.id) {
            row.reposition(item.display_order, ctx);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_display_order() {
        assert_eq!(next_display_order(None), 0);
        assert_eq!(next_display_order(Some(4)), 5);
        assert_eq!(next_display_order(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn test_reorder_rejects_repeated_ids() {
        let id = Uuid::now_v7();
        let request = ReorderRequest {
            items: vec![
                DisplayOrderItem { id, display_order: 1 },
                DisplayOrderItem { id, display_order: 2 },
            ],
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[derive(Debug, Clone)]
    struct Row {
        id: Uuid,
        parent_id: Uuid,
        display_order: i32,
        created_at: DateTime<Utc>,
        deleted: bool,
    }

    impl OrderedChild for Row {
        fn id(&self) -> Uuid {
            self.id
        }
        fn parent_id(&self) -> Uuid {
            self.parent_id
        }
        fn display_order(&self) -> i32 {
            self.display_order
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn is_deleted(&self) -> bool {
            self.deleted
        }
        fn reposition(&mut self, display_order: i32, _ctx: &AuditContext) {
            self.display_order = display_order;
        }
    }

    fn rows(parent_id: Uuid, orders: &[i32]) -> HashMap<Uuid, Row> {
        orders
            .iter()
            .map(|&display_order| {
                let id = Uuid::now_v7();
                (
                    id,
                    Row {
                        id,
                        parent_id,
                        display_order,
                        created_at: Utc::now(),
                        deleted: false,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_apply_reorder_swaps_positions() {
        let parent = Uuid::now_v7();
        let mut map = rows(parent, &[0, 1]);
        let before = live_children(map.values(), parent);
        let (first, second) = (before[0].id, before[1].id);

        apply_reorder(
            &mut map,
            parent,
            &[
                DisplayOrderItem { id: first, display_order: 1 },
                DisplayOrderItem { id: second, display_order: 0 },
            ],
            &AuditContext::system(),
        )
        .unwrap();

        let after: Vec<Uuid> = live_children(map.values(), parent).iter().map(|r| r.id).collect();
        assert_eq!(after, vec![second, first]);
    }

    #[test]
    fn test_apply_reorder_is_all_or_nothing() {
        let parent = Uuid::now_v7();
        let mut map = rows(parent, &[0, 1]);
        let known = live_children(map.values(), parent)[0].id;
        let unknown = Uuid::now_v7();

        let err = apply_reorder(
            &mut map,
            parent,
            &[
                DisplayOrderItem { id: known, display_order: 9 },
                DisplayOrderItem { id: unknown, display_order: 0 },
            ],
            &AuditContext::system(),
        )
        .unwrap_err();

        assert_eq!(err, unknown);
        assert_eq!(map[&known].display_order, 0);
    }

    #[test]
    fn test_apply_reorder_rejects_other_parents_children() {
        let parent = Uuid::now_v7();
        let mut map = rows(Uuid::now_v7(), &[0]);
        let foreign = *map.keys().next().unwrap();

        let result = apply_reorder(
            &mut map,
            parent,
            &[DisplayOrderItem { id: foreign, display_order: 3 }],
            &AuditContext::system(),
        );
        assert_eq!(result, Err(foreign));
    }

    #[test]
    fn test_max_display_order_ignores_deleted() {
        let parent = Uuid::now_v7();
        let mut map = rows(parent, &[2, 7]);
        assert_eq!(max_display_order(map.values(), parent), Some(7));

        for row in map.values_mut().filter(|r| r.display_order == 7) {
            row.deleted = true;
        }
        assert_eq!(max_display_order(map.values(), parent), Some(2));
        assert_eq!(max_display_order(map.values(), Uuid::now_v7()), None);
    }

    #[test]
    fn test_reorder_rejects_empty_batch() {
        assert!(ReorderRequest { items: vec![] }.validate().is_err());
    }
}
