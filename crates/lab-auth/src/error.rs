use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `orchid auth set-token <jwt>`")]
    NotAuthenticated,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),
}
