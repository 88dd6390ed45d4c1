use serde::{Deserialize, Serialize};
use crate::core::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Facet count above which inserts log a warning. Key fan-out is 2^n - 1,
    /// so this is a tripwire, not a cap.
    pub facet_warn_threshold: usize,
    /// Pre-sizing hint for the record store and composite index.
    pub initial_capacity: usize,
    /// Seed for `search_random`. `None` seeds from OS entropy.
    pub random_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            facet_warn_threshold: 20,
            initial_capacity: 0,
            random_seed: None,
        }
    }
}

impl Config {
    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.facet_warn_threshold == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "facet_warn_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
