use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use userbase_core::AppError;
use uuid::Uuid;

use crate::modules::users::model::{NewUser, User, UserChanges, UserDocument, UserField};
use crate::modules::users::store::{ListQuery, UserStore};

/// [`UserStore`] over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn filter_expr(field: UserField) -> &'static str {
    match field {
        UserField::Id => "id::text",
        other => other.column(),
    }
}

/// Text columns sort bytewise, matching the in-memory store. `uuid` order is
/// already bytewise.
fn sort_expr(field: UserField) -> &'static str {
    match field {
        UserField::Id => "id",
        UserField::FirstName => "first_name COLLATE \"C\"",
        UserField::LastName => "last_name COLLATE \"C\"",
        UserField::Email => "email COLLATE \"C\"",
    }
}

/// Builds the paginated `SELECT` for `query`.
///
/// Column names only ever come from [`UserField::column`]; filter values and
/// paging are bound parameters.
pub fn build_list_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT id, first_name, last_name, email FROM users");

    for (i, filter) in query.filters.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(filter_expr(filter.field));
        builder.push(" = ");
        builder.push_bind(filter.value.clone());
    }

    builder.push(" ORDER BY ");
    for key in &query.sort {
        builder.push(sort_expr(key.field));
        builder.push(if key.descending { " DESC, " } else { " ASC, " });
    }
    // Stable tail so pages never overlap.
    builder.push("created_at ASC, id ASC");

    builder.push(" LIMIT ");
    builder.push_bind(query.limit);
    builder.push(" OFFSET ");
    builder.push_bind(query.offset);

    builder
}

fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::bad_request(anyhow!("A user with this email already exists"));
    }
    AppError::database(anyhow::Error::new(e).context(context))
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip_all)]
    async fn insert(&self, user: NewUser) -> Result<UserDocument, AppError> {
        sqlx::query_as::<_, UserDocument>(
            r#"INSERT INTO users (first_name, last_name, email, password_hash)
               VALUES ($1, $2, $3, $4)
               RETURNING id, first_name, last_name, email, password_hash"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_write_error(e, "Failed to insert user"))
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &ListQuery) -> Result<Vec<User>, AppError> {
        let users = build_list_query(query)
            .build_query_as::<User>()
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET first_name = $2,
                   last_name = $3,
                   email = $4,
                   password_hash = COALESCE($5, password_hash),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, first_name, last_name, email"#,
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::store::{FieldFilter, SortKey};

    fn list_query() -> ListQuery {
        ListQuery {
            offset: 0,
            limit: 10,
            sort: Vec::new(),
            filters: Vec::new(),
        }
    }

    #[test]
    fn test_default_list_sql() {
        let builder = build_list_query(&list_query());

        assert_eq!(
            builder.sql(),
            "SELECT id, first_name, last_name, email FROM users \
             ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_sorted_and_filtered_sql() {
        let query = ListQuery {
            offset: 40,
            limit: 10,
            sort: vec![SortKey {
                field: UserField::FirstName,
                descending: true,
            }],
            filters: vec![
                FieldFilter {
                    field: UserField::LastName,
                    value: "Doe".to_string(),
                },
                FieldFilter {
                    field: UserField::Id,
                    value: Uuid::nil().to_string(),
                },
            ],
        };

        let builder = build_list_query(&query);

        assert_eq!(
            builder.sql(),
            "SELECT id, first_name, last_name, email FROM users \
             WHERE last_name = $1 AND id::text = $2 \
             ORDER BY first_name COLLATE \"C\" DESC, created_at ASC, id ASC LIMIT $3 OFFSET $4"
        );
    }

    #[test]
    fn test_text_sort_keys_are_bytewise() {
        let query = ListQuery {
            sort: vec![
                SortKey {
                    field: UserField::Email,
                    descending: false,
                },
                SortKey {
                    field: UserField::Id,
                    descending: true,
                },
            ],
            ..list_query()
        };

        let builder = build_list_query(&query);

        assert_eq!(
            builder.sql(),
            "SELECT id, first_name, last_name, email FROM users \
             ORDER BY email COLLATE \"C\" ASC, id DESC, created_at ASC, id ASC LIMIT $1 OFFSET $2"
        );
    }
}
