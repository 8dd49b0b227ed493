use serde::{Deserialize, Serialize};

use crate::scoring::{Lexicon, Rubric, Thresholds};

/// Contents of the config file. Both sections are optional.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<Thresholds>,
    #[serde(default)]
    pub lexicon: Option<Lexicon>,
}

impl Config {
    /// Effective rubric: configured sections over built-in defaults.
    pub fn rubric(&self) -> Rubric {
        Rubric::new(
            self.scoring.clone().unwrap_or_default(),
            self.lexicon.clone().unwrap_or_default(),
        )
    }
}
