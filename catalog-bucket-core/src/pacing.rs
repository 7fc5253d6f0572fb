use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Randomised pause between consecutive page requests, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagePacing {
    pub min_secs: u64,
    pub max_secs: u64,
}

impl Default for PagePacing {
    fn default() -> Self {
        Self {
            min_secs: 1,
            max_secs: 3,
        }
    }
}

impl PagePacing {
    /// Uniform draw from `min_secs..=max_secs`.
    pub fn next_delay(&self) -> Duration {
        let secs = if self.min_secs >= self.max_secs {
            self.min_secs
        } else {
            rand::thread_rng().gen_range(self.min_secs..=self.max_secs)
        };
        Duration::from_secs(secs)
    }
}
