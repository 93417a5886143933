/// Result alias that carries the custom [`FigError`] type.
pub type Result<T> = std::result::Result<T, FigError>;

/// Common error type for the core crate.
///
/// Every decode is all-or-nothing: whichever variant is raised aborts the
/// whole load and is handed back to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum FigError {
    /// The bytes are not a valid MAT-file level 5 container.
    #[error("invalid figure container: {0}")]
    Format(String),
    /// The container parsed, but the expected record scaffolding is absent.
    #[error("unexpected container structure: {0}")]
    Structure(String),
    /// A record carries a different type tag than the decoder requires.
    #[error("not {expected} (wrong type `{found}`)")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    /// A required series property is absent from the property bag.
    #[error("missing required property `{field}`")]
    MissingField { field: String },
    /// A property value has a dimensionality the decoder cannot normalise.
    #[error("property `{field}` has an unexpected shape: {reason}")]
    Shape { field: String, reason: String },
    /// Load options could not be parsed.
    #[error("invalid load options: {0}")]
    Config(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl FigError {
    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn structure<T: Into<String>>(msg: T) -> Self {
        Self::Structure(msg.into())
    }

    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn shape<T: Into<String>>(field: &str, reason: T) -> Self {
        Self::Shape {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
