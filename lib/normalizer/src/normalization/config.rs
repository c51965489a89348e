use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::parser::DEFAULT_MAX_DEPTH;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid normalizer configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`max_depth` must be at least 1")]
    ZeroDepth,

    #[error("`max_selections` must be at least 1")]
    ZeroSelections,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Maximum nesting of selection sets, list and object values. Applies to
    /// the parsed input and to the document after fragments are inlined, so
    /// self-referencing fragments fail instead of expanding forever.
    ///
    /// Default: 128.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of tokens accepted when normalizing source text.
    /// Unlimited when not set.
    #[serde(default)]
    pub max_tokens: Option<usize>,

    /// Maximum number of selections an operation may have once fragment
    /// spreads are inlined.
    ///
    /// Default: 100000.
    #[serde(default = "default_max_selections")]
    pub max_selections: usize,

    /// Inside interface-typed selection sets, also move selections that an
    /// inline fragment shares with the selections right after it out of the
    /// fragment.
    ///
    /// Default: false.
    #[serde(default = "default_hoist_lagging_selections")]
    pub hoist_lagging_selections: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_tokens: None,
            max_selections: default_max_selections(),
            hoist_lagging_selections: default_hoist_lagging_selections(),
        }
    }
}

impl NormalizerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: NormalizerConfig = serde_json::from_str(json)?;
        if config.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if config.max_selections == 0 {
            return Err(ConfigError::ZeroSelections);
        }
        Ok(config)
    }

    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(NormalizerConfig)
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_selections() -> usize {
    100_000
}

fn default_hoist_lagging_selections() -> bool {
    false
}
