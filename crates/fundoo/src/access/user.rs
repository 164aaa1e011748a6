//! User data access: registration, login and profile changes.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use fundoo_core::auth::PasswordHasher;
use fundoo_core::cache::{
    user_deleted, user_email_key, user_keys, user_name_key, user_written, AffectedKeys, Cache,
};
use fundoo_core::notes::{
    is_valid_name, validate_password, validate_registration, LoginRequest, NewUser,
    RegisterUserRequest, User, UserProfile, ValidationError,
};
use fundoo_core::notify::{greeting_email, reset_password_email, welcome_email, Notifier};
use fundoo_core::storage::{
    CollaboratorRepository, LabelRepository, NoteRepository, UserRepository,
};

use super::cached;
use super::error::{conflict_as, missing_as, AccessError, AccessResult, Outcome};
use super::sharing::sharer_ids_for_notes;
use crate::auth::Argon2Hasher;
use crate::notify::{notify_in_background, LogNotifier};

/// Page the reset-password link points at when none is configured.
pub const DEFAULT_RESET_PASSWORD_URL: &str = "http://localhost:5000/resetpassword";

/// Cached user operations.
///
/// Users are cached whole (hash included) under their by-email and
/// by-first-name keys, so login can verify against a cache hit.
pub struct UserAccess<R, C>
where
    R: UserRepository + NoteRepository + LabelRepository + CollaboratorRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn Notifier>,
    reset_url: String,
    ttl: Duration,
}

impl<R, C> UserAccess<R, C>
where
    R: UserRepository + NoteRepository + LabelRepository + CollaboratorRepository,
    C: Cache,
{
    /// Creates the service with an Argon2 hasher and a logging notifier.
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            hasher: Arc::new(Argon2Hasher::new()),
            notifier: Arc::new(LogNotifier),
            reset_url: DEFAULT_RESET_PASSWORD_URL.to_string(),
            ttl,
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_reset_url(mut self, reset_url: impl Into<String>) -> Self {
        self.reset_url = reset_url.into();
        self
    }

    /// Registers a user and sends the welcome email in the background.
    pub async fn register(&self, request: RegisterUserRequest) -> AccessResult<UserProfile> {
        validate_registration(&request)?;

        const TAKEN: &str = "User already exists with this email!";
        if self
            .repository
            .get_user_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AccessError::already_exists(TAKEN));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = self
            .repository
            .create_user(&NewUser {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                password_hash,
            })
            .await
            .map_err(conflict_as(TAKEN))?;

        self.apply(&user_written(None, &user), &user).await;
        notify_in_background(self.notifier.clone(), welcome_email(&user.profile()));

        debug!(user_id = user.id, "User registered");
        Ok(Outcome::ok("User registered successfully", user.profile()))
    }

    /// Looks a user up by first name.
    pub async fn find_by_first_name(&self, first_name: &str) -> AccessResult<UserProfile> {
        let key = user_name_key(first_name);
        let user = match cached::read::<User, _>(&*self.cache, &key).await {
            Some(user) => user,
            None => {
                let user = self
                    .repository
                    .get_user_by_first_name(first_name)
                    .await?
                    .ok_or_else(|| AccessError::not_found("User not found"))?;
                cached::write(&*self.cache, &user_keys(&user), &user, self.ttl).await;
                user
            }
        };
        Ok(Outcome::ok("User found", user.profile()))
    }

    /// Checks credentials against the hash in hand.
    pub async fn login(&self, request: LoginRequest) -> AccessResult<UserProfile> {
        let user = self
            .load_by_email(&request.email)
            .await?
            .ok_or_else(|| AccessError::not_found("User not found!"))?;

        if !self.hasher.verify(&request.password, &user.password_hash)? {
            return Err(AccessError::unauthorized("Invalid password!"));
        }

        debug!(user_id = user.id, "User logged in");
        Ok(Outcome::ok("Login successful", user.profile()))
    }

    /// Replaces the first and last name of the user with `email`.
    pub async fn update_name(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> AccessResult<UserProfile> {
        if !is_valid_name(first_name) {
            return Err(ValidationError::InvalidFirstName.into());
        }
        if !is_valid_name(last_name) {
            return Err(ValidationError::InvalidLastName.into());
        }

        let before = self.stored_user(email).await?;
        let after = User {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..before.clone()
        };
        self.repository
            .update_user(&after)
            .await
            .map_err(missing_as("User not found"))?;

        self.apply(&user_written(Some(&before), &after), &after)
            .await;

        debug!(user_id = after.id, "User renamed");
        Ok(Outcome::ok("User updated successfully", after.profile()))
    }

    /// Changes a password after checking the old one.
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> AccessResult<()> {
        let user = self
            .load_by_email(email)
            .await?
            .ok_or_else(|| AccessError::not_found("User not found"))?;

        if !self.hasher.verify(old_password, &user.password_hash)? {
            return Err(AccessError::unauthorized("Old password is incorrect"));
        }
        validate_password(new_password)?;

        let updated = User {
            password_hash: self.hasher.hash(new_password)?,
            ..user
        };
        self.repository
            .update_user(&updated)
            .await
            .map_err(missing_as("User not found"))?;

        self.apply(&user_written(None, &updated), &updated).await;

        debug!(user_id = updated.id, "Password changed");
        Ok(Outcome::done("Password changed successfully!"))
    }

    /// Deletes a user with everything they own, and drops them from every
    /// note they were a collaborator on.
    pub async fn delete(&self, email: &str) -> AccessResult<()> {
        let user = self.stored_user(email).await?;
        let notes = self.repository.get_notes_for_user(user.id).await?;
        let labels = self.repository.get_labels_for_user(user.id).await?;
        let mut sharers = sharer_ids_for_notes(&*self.repository, &notes).await;
        sharers.retain(|&id| id != user.id);

        let memberships = self
            .repository
            .delete_collaborators_for_email(&user.email)
            .await?;
        self.repository
            .delete_user(user.id)
            .await
            .map_err(missing_as("User not found"))?;

        let affected = user_deleted(&user, &notes, &labels, &sharers, &memberships);
        cached::evict(&*self.cache, &affected.evict).await;

        debug!(
            user_id = user.id,
            notes = notes.len(),
            memberships = memberships.len(),
            "User deleted"
        );
        Ok(Outcome::done("User deleted successfully"))
    }

    /// Sends a reset-password link in the background.
    pub async fn forget_password(&self, email: &str) -> AccessResult<()> {
        let user = self
            .load_by_email(email)
            .await?
            .ok_or_else(|| AccessError::not_found("User not found"))?;

        notify_in_background(
            self.notifier.clone(),
            reset_password_email(&user.email, &self.reset_url),
        );
        Ok(Outcome::done("Reset password link sent to your email!"))
    }

    /// Sends a greeting in the background.
    pub async fn send_email(&self, email: &str) -> AccessResult<()> {
        let user = self
            .load_by_email(email)
            .await?
            .ok_or_else(|| AccessError::not_found("User not found"))?;

        notify_in_background(self.notifier.clone(), greeting_email(&user.profile()));
        Ok(Outcome::done("Email sent successfully!"))
    }

    /// Read-through by email.
    async fn load_by_email(&self, email: &str) -> Result<Option<User>, AccessError> {
        let key = user_email_key(email);
        if let Some(user) = cached::read::<User, _>(&*self.cache, &key).await {
            return Ok(Some(user));
        }

        let user = self.repository.get_user_by_email(email).await?;
        if let Some(ref u) = user {
            cached::write(&*self.cache, &user_keys(u), u, self.ttl).await;
        }
        Ok(user)
    }

    /// Loads the row a mutation starts from, bypassing the cache.
    async fn stored_user(&self, email: &str) -> Result<User, AccessError> {
        self.repository
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| AccessError::not_found("User not found"))
    }

    async fn apply(&self, affected: &AffectedKeys, user: &User) {
        cached::write(&*self.cache, &affected.refresh, user, self.ttl).await;
        cached::evict(&*self.cache, &affected.evict).await;
    }
}

#[cfg(test)]
mod tests {
    use fundoo_core::notes::{CollaboratorRequest, CreateNoteRequest};

    use super::*;
    use crate::access::testing::{alice_request, bob_request, Fixture, UnavailableCache};

    #[tokio::test]
    async fn test_register_then_login() {
        let fx = Fixture::new();

        let registered = fx.users.register(alice_request()).await.unwrap();
        let profile = registered.data.unwrap();
        assert_eq!(registered.message, "User registered successfully");
        assert_eq!(profile.email, "alice@example.com");

        let login = fx
            .users
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "Abcdef1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(login.message, "Login successful");
        assert_eq!(login.data, Some(profile));
    }

    #[tokio::test]
    async fn test_register_caches_both_keys_and_sends_welcome() {
        let mut fx = Fixture::new();

        fx.users.register(alice_request()).await.unwrap();

        assert!(fx.cache.get("user:email:alice@example.com").await.unwrap().is_some());
        assert!(fx.cache.get("user:name:Alice").await.unwrap().is_some());
        let sent = fx.next_email().await;
        assert_eq!(sent.to, "alice@example.com");
        assert_eq!(sent.subject, "🎉 Welcome to Our Platform!");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();

        let result = fx.users.register(alice_request()).await;

        assert_eq!(
            result,
            Err(AccessError::AlreadyExists(
                "User already exists with this email!".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_register_validates_before_store() {
        let fx = Fixture::new();
        let request = RegisterUserRequest {
            password: "short".to_string(),
            ..alice_request()
        };

        let result = fx.users.register(request).await;

        assert!(matches!(result, Err(AccessError::Validation(_))));
        assert!(fx
            .repository
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_login_failures() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();

        let wrong = fx
            .users
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "Wrong12".to_string(),
            })
            .await;
        let unknown = fx
            .users
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "Abcdef1".to_string(),
            })
            .await;

        assert_eq!(
            wrong,
            Err(AccessError::Unauthorized("Invalid password!".to_string()))
        );
        assert_eq!(
            unknown,
            Err(AccessError::NotFound("User not found!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_login_from_cold_cache() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();
        fx.cache.delete("user:email:alice@example.com").await.unwrap();

        let login = fx
            .users
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "Abcdef1".to_string(),
            })
            .await;

        assert!(login.is_ok());
        assert!(fx.cache.get("user:email:alice@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_by_first_name_display() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();

        let found = fx.users.find_by_first_name("Alice").await.unwrap();

        assert_eq!(
            found.data.unwrap().to_string(),
            "Alice Smith, Email: alice@example.com"
        );
        assert_eq!(
            fx.users.find_by_first_name("Zed").await,
            Err(AccessError::NotFound("User not found".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_name_evicts_old_name_key() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();

        let updated = fx
            .users
            .update_name("alice@example.com", "Alicia", "Jones")
            .await
            .unwrap();

        assert_eq!(updated.message, "User updated successfully");
        assert!(fx.cache.get("user:name:Alice").await.unwrap().is_none());
        let found = fx.users.find_by_first_name("Alicia").await.unwrap();
        assert_eq!(found.data.unwrap().last_name, "Jones");
        assert!(fx.users.find_by_first_name("Alice").await.is_err());
    }

    #[tokio::test]
    async fn test_change_password() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();

        let wrong_old = fx
            .users
            .change_password("alice@example.com", "Nope123", "Newpass1")
            .await;
        let changed = fx
            .users
            .change_password("alice@example.com", "Abcdef1", "Newpass1")
            .await
            .unwrap();

        assert_eq!(
            wrong_old,
            Err(AccessError::Unauthorized(
                "Old password is incorrect".to_string()
            ))
        );
        assert_eq!(changed.message, "Password changed successfully!");
        let relogin = fx
            .users
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "Newpass1".to_string(),
            })
            .await;
        assert!(relogin.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_rejects_weak_password() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();

        let result = fx
            .users
            .change_password("alice@example.com", "Abcdef1", "weak")
            .await;

        assert!(matches!(result, Err(AccessError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();

        let first = fx.users.delete("alice@example.com").await.unwrap();
        let second = fx.users.delete("alice@example.com").await;

        assert_eq!(first.message, "User deleted successfully");
        assert_eq!(
            second,
            Err(AccessError::NotFound("User not found".to_string()))
        );
        assert!(fx.cache.get("user:email:alice@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_evicts_cascaded_notes() {
        let fx = Fixture::new();
        let alice = fx.register_alice().await;
        let note = fx
            .notes
            .create(alice.id, CreateNoteRequest::new("Groceries"))
            .await
            .unwrap()
            .data
            .unwrap();
        assert!(fx.cache.get(&format!("note:{}", note.id)).await.unwrap().is_some());

        fx.users.delete("alice@example.com").await.unwrap();

        assert!(fx.cache.get(&format!("note:{}", note.id)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_drops_shared_notes_from_collaborator_list() {
        let fx = Fixture::new();
        let alice = fx.register_alice().await;
        let bob = fx.users.register(bob_request()).await.unwrap().data.unwrap();
        let note = fx
            .notes
            .create(alice.id, CreateNoteRequest::new("Groceries"))
            .await
            .unwrap()
            .data
            .unwrap();
        fx.collabs
            .add(
                alice.id,
                CollaboratorRequest {
                    note_id: note.id,
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        let shared = fx.notes.get_all(bob.id).await.unwrap().data.unwrap();
        assert_eq!(shared, vec![note]);

        fx.users.delete("alice@example.com").await.unwrap();

        let after = fx.notes.get_all(bob.id).await.unwrap();
        assert_eq!(after.message, "Notes retrieved from database!");
        assert_eq!(after.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_forget_password_sends_link() {
        let mut fx = Fixture::new();
        fx.users.register(alice_request()).await.unwrap();
        fx.next_email().await;

        let result = fx.users.forget_password("alice@example.com").await.unwrap();

        assert_eq!(result.message, "Reset password link sent to your email!");
        let sent = fx.next_email().await;
        assert_eq!(sent.subject, "Reset Password");
        assert!(sent.body.contains("?email=alice@example.com"));
    }

    #[tokio::test]
    async fn test_send_email_unknown_user() {
        let fx = Fixture::new();

        assert_eq!(
            fx.users.send_email("nobody@example.com").await,
            Err(AccessError::NotFound("User not found".to_string()))
        );
    }

    #[tokio::test]
    async fn test_user_operations_succeed_without_cache() {
        let fx = Fixture::with_cache(Arc::new(UnavailableCache));

        let registered = fx.users.register(alice_request()).await.unwrap();
        let login = fx
            .users
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "Abcdef1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(login.message, "Login successful");
        assert_eq!(login.data, registered.data);
        fx.users
            .update_name("alice@example.com", "Alicia", "Smith")
            .await
            .unwrap();
        fx.users.delete("alice@example.com").await.unwrap();
        assert!(fx
            .repository
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
