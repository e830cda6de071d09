/// Rejected lookup configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("component name must not be empty")]
    EmptyComponentName,

    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("result display threshold must be at least 1")]
    ZeroDisplayThreshold,

    #[error("event capacity must be at least 1")]
    ZeroEventCapacity,

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("invalid configuration document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
