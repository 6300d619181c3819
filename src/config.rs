//! Run settings loaded from an optional TOML file.
//!
//! ```toml
//! [alignment]
//! match_score = 2
//! mismatch_score = -1
//! gap_open = 0
//! gap_extend = -2
//!
//! [generation]
//! max_models = 25
//! seed = 1234
//! threads = 4
//! generator = "bio-mutate"
//! ```
//!
//! Every key is optional and unknown keys are rejected.

use crate::ops::{GenerationConfig, Scoring};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read settings file '{path_desc}': {source}", path_desc = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in '{path_desc}': {source}", path_desc = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub alignment: Scoring,
    pub generation: GenerationConfig,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
