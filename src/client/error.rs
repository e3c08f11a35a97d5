use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Topic '{topic}' is not bound to this consumer")]
    NotSubscribed { topic: String },

    #[error("Consumer needs at least one topic")]
    NoTopics,

    #[error("Consumer group id must not be empty")]
    EmptyGroupId,

    #[error("Invalid environment variable '{0}'")]
    InvalidEnvVar(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
