use crate::client::ApiError;

/// Errors raised while exporting a hosted zone
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("resource name {name} is derived from more than one record set")]
    Collision { name: String },

    #[error("encoding template: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("writing template: {0}")]
    Write(#[from] std::io::Error),
}
