pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The encoding could not be constructed with the given parameters.
    #[error("invalid fanout configuration: {0}")]
    Configuration(String),
    /// A key does not follow the fanout chunk key grammar.
    #[error("malformed chunk key {key:?}: {reason}")]
    MalformedKey { key: String, reason: String },
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn malformed_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_malformed_key(&self) -> bool {
        matches!(self, Self::MalformedKey { .. })
    }
}
