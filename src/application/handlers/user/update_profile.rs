//! UpdateProfileHandler - edits a user's name fields.
//!
//! Profile edits run on the non-locked path; the version-guarded write
//! turns a lost update into a `ConcurrencyConflict` the caller can retry
//! with fresh data.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Command to update profile fields.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
}

/// Handler for profile updates.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        user.update_profile(cmd.first_name, cmd.last_name)?;
        self.users.update(&user).await?;

        info!(user_id = %user.id(), "profile updated");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::domain::foundation::EmailAddress;
    use crate::domain::user::{NewUser, UserRole};

    async fn seed_user(store: &InMemoryBookingStore) -> User {
        UserRepository::insert(
            store,
            NewUser::new(
                "alice",
                EmailAddress::new("alice@example.com").unwrap(),
                "hash",
                "Alice",
                "Smith",
                UserRole::User,
            )
            .unwrap(),
        )
        .await
        .unwrap()
    }

    fn handler(store: &InMemoryBookingStore) -> UpdateProfileHandler {
        UpdateProfileHandler::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn updates_names() {
        let store = InMemoryBookingStore::new();
        let user = seed_user(&store).await;

        let updated = handler(&store)
            .handle(UpdateProfileCommand {
                user_id: user.id(),
                first_name: "Alicia".to_string(),
                last_name: "Jones".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(updated.full_name(), "Alicia Jones");
    }

    #[tokio::test]
    async fn fails_for_unknown_user() {
        let store = InMemoryBookingStore::new();

        let result = handler(&store)
            .handle(UpdateProfileCommand {
                user_id: UserId::new(99),
                first_name: "A".to_string(),
                last_name: "B".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn rejects_empty_names() {
        let store = InMemoryBookingStore::new();
        let user = seed_user(&store).await;

        let result = handler(&store)
            .handle(UpdateProfileCommand {
                user_id: user.id(),
                first_name: " ".to_string(),
                last_name: "Jones".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::RuleViolation { .. })));
    }

    #[tokio::test]
    async fn concurrent_edit_surfaces_conflict() {
        let store = InMemoryBookingStore::new();
        let user = seed_user(&store).await;
        let handler = handler(&store);

        // First edit succeeds and bumps the stored version.
        handler
            .handle(UpdateProfileCommand {
                user_id: user.id(),
                first_name: "Alicia".to_string(),
                last_name: "Jones".to_string(),
            })
            .await
            .unwrap();

        // A writer still holding the original aggregate loses.
        let mut stale = user.clone();
        stale.update_profile("Mallory", "Mallory").unwrap();
        let result = UserRepository::update(&store, &stale).await;

        assert_eq!(
            result.unwrap_err().code,
            crate::domain::foundation::ErrorCode::ConcurrencyConflict
        );

        // The first edit's data is intact.
        let fresh = UserRepository::find_by_id(&store, user.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.full_name(), "Alicia Jones");
    }
}
