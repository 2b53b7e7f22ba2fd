use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use circles_errors::AppError;
use uuid::Uuid;

/// Set by the auth proxy in front of this service.
pub const USER_HEADER: &str = "x-user-id";

/// The signed-in user, if any.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Option<Uuid>);

impl CurrentUser {
    pub fn require(self) -> Result<Uuid, AppError> {
        self.0.ok_or(AppError::Unauthenticated)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_HEADER) else {
            return Ok(Self(None));
        };

        value
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(|id| Self(Some(id)))
            .ok_or_else(|| AppError::InvalidRequest(format!("malformed {USER_HEADER} header")))
    }
}
