use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Token, User, UserCreate, UserLogin, UserUpdate};

impl ApiClient {
    /// Create an account. Does not log in; see `Session::register` for the
    /// register-then-login sequence.
    pub async fn register(&self, user: &UserCreate) -> ApiResult<User> {
        self.post_json("/auth/register", user).await
    }

    /// Exchange credentials for a bearer token. A rejected credential pair
    /// surfaces as `ApiError::Authentication`.
    pub async fn login(&self, credentials: &UserLogin) -> ApiResult<Token> {
        self.post_json("/auth/login", credentials).await
    }

    /// Fetch the user the current token belongs to.
    pub async fn current_user(&self) -> ApiResult<User> {
        self.get_json::<_, ()>("/auth/me", None).await
    }

    pub async fn update_profile(&self, update: &UserUpdate) -> ApiResult<User> {
        self.put_json("/auth/me", update).await
    }
}
