use std::sync::Arc;

use tracing::{debug, instrument};
use userbase_core::{AppError, ListOptions};
use userbase_passwords::PasswordStrategy;
use uuid::Uuid;

use crate::modules::users::model::{
    CreateUserDto, NewUser, UpdateUserDto, User, UserChanges, UserDocument,
};
use crate::modules::users::store::{ListQuery, UserStore};

/// User lifecycle: create, list, fetch, update and delete.
///
/// Absence is never an error here. `get_one` and `update` return `None` and
/// `delete` returns `false` for an unknown id; callers decide whether that
/// is a 404.
#[derive(Clone, Debug)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    passwords: Arc<dyn PasswordStrategy>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, passwords: Arc<dyn PasswordStrategy>) -> Self {
        Self { store, passwords }
    }

    /// Hashes the password and stores the user.
    ///
    /// The returned document still carries `password_hash`; respond with
    /// [`get_one`](Self::get_one) instead.
    #[instrument(skip_all)]
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserDocument, AppError> {
        let password_hash = self.passwords.encrypt(&dto.password).await?;

        let user = self
            .store
            .insert(NewUser {
                first_name: dto.first_name,
                last_name: dto.last_name,
                email: dto.email,
                password_hash,
            })
            .await?;

        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_list(&self, options: &ListOptions) -> Result<Vec<User>, AppError> {
        let query = ListQuery::from_options(options)?;
        self.store.find(&query).await
    }

    #[instrument(skip(self))]
    pub async fn get_one(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.store.find_by_id(id).await
    }

    /// Replaces the user's names and email, and rehashes the password only
    /// when a non-empty one is given.
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: Uuid, dto: UpdateUserDto) -> Result<Option<User>, AppError> {
        if self.get_one(id).await?.is_none() {
            return Ok(None);
        }

        let password_hash = match dto.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.passwords.encrypt(password).await?),
            _ => None,
        };

        let user = self
            .store
            .update(
                id,
                UserChanges {
                    first_name: dto.first_name,
                    last_name: dto.last_name,
                    email: dto.email,
                    password_hash,
                },
            )
            .await?;

        if user.is_some() {
            debug!(user_id = %id, "User updated");
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            debug!(user_id = %id, "User deleted");
        }
        Ok(deleted)
    }
}
