#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("regulations dataset {path}: {message}")]
    Dataset { path: String, message: String },

    #[error(transparent)]
    Common(#[from] wca_common::error::CommonError),
}
