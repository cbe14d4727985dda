use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{generate_jwt, password, Claims};
use crate::database::models::Profile;
use crate::error::ApiError;
use crate::repositories::users::UserRepository;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordInput {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    pub new_password: String,
}

/// Account shape returned to the client; never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub profile: Option<Profile>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Verify credentials and issue a JWT. Unknown email and wrong password
    /// are indistinguishable to the caller.
    pub async fn login(&self, input: &LoginInput) -> Result<LoginResponse, ApiError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

        if !password::verify_password(&input.password, &user.password_hash) {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        let profile = self.users.find_profile(user.id).await?;
        let token = generate_jwt(Claims::new(user.id, user.email.clone()))?;

        Ok(LoginResponse {
            token,
            user: UserView {
                id: user.id,
                email: user.email,
                profile,
            },
        })
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<UserView, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        let profile = self.users.find_profile(user.id).await?;

        Ok(UserView {
            id: user.id,
            email: user.email,
            profile,
        })
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        input: &ChangePasswordInput,
    ) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        if !password::verify_password(&input.current_password, &user.password_hash) {
            return Err(ApiError::unauthorized("Current password is incorrect"));
        }

        let hash = password::hash_password(&input.new_password).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to update password")
        })?;

        self.users.update_password(user.id, &hash).await?;
        Ok(())
    }
}
