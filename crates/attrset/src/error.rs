use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrsError {
    #[error("Cannot define \"{name}\", it's already defined")]
    NameCollision { name: String },

    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("Invalid token list pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("A global name policy is already installed")]
    PolicyAlreadyInstalled,

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<confique::Error> for AttrsError {
    fn from(err: confique::Error) -> Self {
        AttrsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AttrsError>;
