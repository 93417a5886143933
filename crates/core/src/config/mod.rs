use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Variable name MATLAB uses for the handle-graphics tree in a `.fig` file.
pub const DEFAULT_ROOT_KEY: &str = "hgS_070000";

/// How the series decoder treats x, y and error bounds of differing lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthCheck {
    /// Mismatched lengths fail with a shape error.
    #[default]
    Strict,
    /// Lengths are taken as stored.
    Permissive,
}

/// Options for loading and decoding a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub root_key: String,
    pub length_check: LengthCheck,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            root_key: DEFAULT_ROOT_KEY.to_string(),
            length_check: LengthCheck::default(),
        }
    }
}

impl LoadOptions {
    pub fn permissive() -> Self {
        Self {
            length_check: LengthCheck::Permissive,
            ..Self::default()
        }
    }

    /// Reads options from a JSON file. Missing keys fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
