use axum::{extract::FromRequestParts, http::request::Parts};
use kernel::model::{id::UserId, role::Role};
use shared::error::AppError;
use std::str::FromStr;

// 前段のセッションレイヤーが検証済みの利用者識別を
// x-user-id / x-user-role ヘッダーで引き渡してくる。
// セッションの発行・検証自体はこのコアの対象外
#[derive(Debug, Clone, Copy)]
pub struct AuthorizedUser {
    pub user_id: UserId,
    pub role: Role,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user_id
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthorizedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| UserId::from_str(v).ok())
            .ok_or(AppError::UnauthenticatedError)?;
        let role = parts
            .headers
            .get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Role::from_str(v).ok())
            .ok_or(AppError::UnauthenticatedError)?;
        Ok(Self { user_id, role })
    }
}
