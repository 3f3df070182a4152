//! The persistence seam of the users module.
//!
//! [`UserStore`] is what [`UserService`](super::service::UserService) talks
//! to. Two implementations exist:
//!
//! - [`PgUserStore`](super::postgres::PgUserStore), backed by a `users`
//!   table through sqlx
//! - [`InMemoryUserStore`](super::memory::InMemoryUserStore), an in-process
//!   store for tests and local runs
//!
//! Both read list directives through [`ListQuery`], which maps the
//! translator's free-form sort string and filters onto [`UserField`]s and
//! rejects anything else as a client error.

use std::fmt::Debug;

use anyhow::anyhow;
use async_trait::async_trait;
use userbase_core::{AppError, ListOptions};
use uuid::Uuid;

use crate::modules::users::model::{NewUser, User, UserChanges, UserDocument, UserField};

#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Persists a new user and returns the stored document.
    async fn insert(&self, user: NewUser) -> Result<UserDocument, AppError>;

    async fn find(&self, query: &ListQuery) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Overwrites the user's fields. Returns `None` when no user has `id`.
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, AppError>;

    /// Returns whether a user was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: UserField,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: UserField,
    pub value: String,
}

/// A list directive resolved against the user schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub offset: i64,
    pub limit: i64,
    pub sort: Vec<SortKey>,
    pub filters: Vec<FieldFilter>,
}

impl ListQuery {
    pub fn from_options(options: &ListOptions) -> Result<Self, AppError> {
        let sort = match options.order.as_deref() {
            Some(order) => parse_sort(order)?,
            None => Vec::new(),
        };

        let filters = options
            .filter
            .iter()
            .map(|clause| -> Result<FieldFilter, AppError> {
                let field = UserField::parse(&clause.field).ok_or_else(|| {
                    AppError::bad_request(anyhow!("Cannot filter on unknown field `{}`", clause.field))
                })?;
                let value = clause.value.clone().ok_or_else(|| {
                    AppError::bad_request(anyhow!("Filter on `{}` is missing a value", clause.field))
                })?;
                Ok(FieldFilter { field, value })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            offset: options.offset,
            limit: options.limit,
            sort,
            filters,
        })
    }
}

fn parse_sort(order: &str) -> Result<Vec<SortKey>, AppError> {
    order
        .split_whitespace()
        .map(|token| -> Result<SortKey, AppError> {
            let (name, descending) = match token.strip_prefix('-') {
                Some(name) => (name, true),
                None => (token, false),
            };
            let field = UserField::parse(name).ok_or_else(|| {
                AppError::bad_request(anyhow!("Cannot sort on unknown field `{}`", name))
            })?;
            Ok(SortKey { field, descending })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use userbase_core::{FilterClause, ListOptionsQuery};

    fn options(o: Option<&str>, f: Option<&str>) -> ListOptions {
        ListOptions::from(ListOptionsQuery {
            o: o.map(String::from),
            f: f.map(String::from),
            ..ListOptionsQuery::default()
        })
    }

    #[test]
    fn test_default_query() {
        let query = ListQuery::from_options(&ListOptions::default()).unwrap();

        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 10);
        assert!(query.sort.is_empty());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_sort_tokens() {
        let query = ListQuery::from_options(&options(Some("lastName,-firstName"), None)).unwrap();

        assert_eq!(
            query.sort,
            vec![
                SortKey {
                    field: UserField::LastName,
                    descending: false
                },
                SortKey {
                    field: UserField::FirstName,
                    descending: true
                },
            ]
        );
    }

    #[test]
    fn test_unknown_sort_field_is_bad_request() {
        let err = ListQuery::from_options(&options(Some("-passwordHash"), None)).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_filters_resolved() {
        let query = ListQuery::from_options(&options(None, Some("lastName:Doe,_id:abc"))).unwrap();

        assert_eq!(
            query.filters,
            vec![
                FieldFilter {
                    field: UserField::LastName,
                    value: "Doe".to_string()
                },
                FieldFilter {
                    field: UserField::Id,
                    value: "abc".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_filter_without_value_is_bad_request() {
        let mut opts = ListOptions::default();
        opts.filter.push(FilterClause::new("lastName", None));

        let err = ListQuery::from_options(&opts).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_filter_field_is_bad_request() {
        let err = ListQuery::from_options(&options(None, Some("age:30"))).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
