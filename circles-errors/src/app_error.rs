use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("You must be signed in to vote")]
    Unauthenticated,

    #[error("A vote on this item is already in flight")]
    VoteInFlight,

    #[error("Stale vote: {0}")]
    StaleVote(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Vote store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unauthenticated => "You must be signed in to vote.",
            Self::VoteInFlight => "Hang on, your last vote is still being saved.",
            Self::StaleVote(_) => "Your vote changed somewhere else. Reload and try again.",
            Self::NotFound(_) => "That post no longer exists.",
            Self::InvalidRequest(_) => "The request could not be understood.",
            Self::Store(_) => "Your vote could not be saved. Try again.",
            Self::Config(_) | Self::Internal(_) => "Something went wrong on our side. Try again later.",
        }
    }

    /// Store failures are the only errors that warrant a retry by the user.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(feature = "axum")]
mod axum_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match &self {
                AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
                AppError::VoteInFlight | AppError::StaleVote(_) => StatusCode::CONFLICT,
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                AppError::Store(_) => StatusCode::BAD_GATEWAY,
                AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let message = self.to_string();
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_unauthenticated() {
        assert_eq!(
            AppError::Unauthenticated.user_message(),
            "You must be signed in to vote."
        );
    }

    #[test]
    fn test_only_store_errors_are_transient() {
        assert!(AppError::Store("connection reset".to_string()).is_transient());
        assert!(!AppError::Unauthenticated.is_transient());
        assert!(!AppError::NotFound("post".to_string()).is_transient());
        assert!(!AppError::StaleVote("stored up".to_string()).is_transient());
    }

    #[test]
    fn test_stale_vote_asks_for_reload() {
        let err = AppError::StaleVote("stored up, caller sent down".to_string());
        assert!(err.user_message().contains("Reload"));
        assert_eq!(err.to_string(), "Stale vote: stored up, caller sent down");
    }
}
