use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected at the configuration boundary; the store keeps its previous
    /// value.
    #[error("invalid emoji scale {emoji_scale}: must be positive and finite")]
    ConfigValidation { emoji_scale: f32 },

    /// A capture implementation could not configure its device or session.
    /// The caller degrades to a no-preview state rather than retrying.
    #[error("capture setup failed: {reason}")]
    CaptureSetupFailed { reason: String },

    /// A recorded session line did not parse.
    #[error("malformed session record on line {line}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read recorded session")]
    Io(#[from] std::io::Error),
}
