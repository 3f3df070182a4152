use std::cmp::Ordering;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::RwLock;
use userbase_core::AppError;
use uuid::Uuid;

use crate::modules::users::model::{NewUser, User, UserChanges, UserDocument, UserField};
use crate::modules::users::store::{ListQuery, SortKey, UserStore};

/// In-process [`UserStore`].
///
/// Documents are kept in insertion order, which is also the default list
/// order. Email uniqueness is enforced the same way the `users` table does.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserDocument>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored hash for `id`, if the user exists.
    pub async fn password_hash(&self, id: Uuid) -> Option<String> {
        self.users
            .read()
            .await
            .iter()
            .find(|doc| doc.id == id)
            .map(|doc| doc.password_hash.clone())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn duplicate_email() -> AppError {
    AppError::bad_request(anyhow!("A user with this email already exists"))
}

fn field_value(doc: &UserDocument, field: UserField) -> Option<String> {
    match field {
        UserField::Id => Some(doc.id.to_string()),
        UserField::FirstName => doc.first_name.clone(),
        UserField::LastName => doc.last_name.clone(),
        UserField::Email => Some(doc.email.clone()),
    }
}

/// Ascending puts missing values last, descending puts them first.
fn compare(a: &UserDocument, b: &UserDocument, sort: &[SortKey]) -> Ordering {
    for key in sort {
        let ordering = match (field_value(a, key.field), field_value(b, key.field)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        let ordering = if key.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<UserDocument, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|doc| doc.email == user.email) {
            return Err(duplicate_email());
        }

        let doc = UserDocument {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
        };
        users.push(doc.clone());

        Ok(doc)
    }

    async fn find(&self, query: &ListQuery) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;

        let mut matching: Vec<&UserDocument> = users
            .iter()
            .filter(|doc| {
                query
                    .filters
                    .iter()
                    .all(|f| field_value(doc, f.field).as_deref() == Some(f.value.as_str()))
            })
            .collect();
        // Stable, so ties keep insertion order.
        matching.sort_by(|a, b| compare(a, b, &query.sort));

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(UserDocument::to_public)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|doc| doc.id == id)
            .map(UserDocument::to_public))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|doc| doc.id != id && doc.email == changes.email)
        {
            return Err(duplicate_email());
        }

        let Some(doc) = users.iter_mut().find(|doc| doc.id == id) else {
            return Ok(None);
        };

        doc.first_name = changes.first_name;
        doc.last_name = changes.last_name;
        doc.email = changes.email;
        if let Some(hash) = changes.password_hash {
            doc.password_hash = hash;
        }

        Ok(Some(doc.to_public()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|doc| doc.id != id);
        Ok(users.len() < before)
    }
}
