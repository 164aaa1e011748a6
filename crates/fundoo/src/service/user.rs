use fundoo_core::cache::Cache;
use fundoo_core::notes::{LoginRequest, RegisterUserRequest, UserProfile};
use fundoo_core::response::Response;
use fundoo_core::storage::{
    CollaboratorRepository, LabelRepository, NoteRepository, UserRepository,
};

use super::respond;
use crate::access::UserAccess;

/// User operations as response envelopes.
pub struct UserService<R, C>
where
    R: UserRepository + NoteRepository + LabelRepository + CollaboratorRepository,
    C: Cache,
{
    access: UserAccess<R, C>,
}

impl<R, C> UserService<R, C>
where
    R: UserRepository + NoteRepository + LabelRepository + CollaboratorRepository,
    C: Cache,
{
    pub fn new(access: UserAccess<R, C>) -> Self {
        Self { access }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> Response<UserProfile> {
        respond("register", self.access.register(request).await)
    }

    pub async fn login(&self, request: LoginRequest) -> Response<UserProfile> {
        respond("login", self.access.login(request).await)
    }

    pub async fn find_by_first_name(&self, first_name: &str) -> Response<UserProfile> {
        respond(
            "find_by_first_name",
            self.access.find_by_first_name(first_name).await,
        )
    }

    pub async fn update_name(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Response<UserProfile> {
        respond(
            "update_name",
            self.access.update_name(email, first_name, last_name).await,
        )
    }

    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Response<()> {
        respond(
            "change_password",
            self.access
                .change_password(email, old_password, new_password)
                .await,
        )
    }

    pub async fn delete(&self, email: &str) -> Response<()> {
        respond("delete_user", self.access.delete(email).await)
    }

    pub async fn forget_password(&self, email: &str) -> Response<()> {
        respond("forget_password", self.access.forget_password(email).await)
    }

    pub async fn send_email(&self, email: &str) -> Response<()> {
        respond("send_email", self.access.send_email(email).await)
    }
}
