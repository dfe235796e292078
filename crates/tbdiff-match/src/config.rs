use serde::{Deserialize, Serialize};

use crate::cost::COST_SCALE;
use crate::error::{MatchError, MatchResult};

/// Default discount applied to "newly added" / "removed" costs.
pub const DEFAULT_CREATION_WEIGHT: f64 = 0.6;

/// Configuration for one matching run.
///
/// Passed explicitly into every call; the engine keeps no global settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Fraction of a change-set's size charged for declaring it unmatched.
    /// Must lie in `(0, 1]`. Lower values make "new"/"gone" cheaper than a
    /// poor forced pairing.
    pub creation_weight: f64,
    /// Whether `Paired` records carry the interdiff. Classification is the
    /// same either way.
    pub include_interdiff: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            creation_weight: DEFAULT_CREATION_WEIGHT,
            include_interdiff: true,
        }
    }
}

impl MatchConfig {
    /// Short-format configuration: classification only, no interdiff bodies.
    pub fn summary() -> Self {
        Self {
            include_interdiff: false,
            ..Default::default()
        }
    }

    /// Replace the creation weight.
    pub fn with_creation_weight(mut self, weight: f64) -> Self {
        self.creation_weight = weight;
        self
    }

    /// Check that the configuration is usable.
    ///
    /// The weight is resolved to one part in [`COST_SCALE`]; a weight that
    /// rounds to zero would make "unmatched" free and is rejected.
    pub fn validate(&self) -> MatchResult<()> {
        let w = self.creation_weight;
        if !(w.is_finite() && w > 0.0 && w <= 1.0) {
            return Err(MatchError::InvalidConfig(format!(
                "creation_weight must be in (0, 1], got {w}"
            )));
        }
        if self.scaled_weight() == 0 {
            return Err(MatchError::InvalidConfig(format!(
                "creation_weight {w} is below the resolution of 1/{COST_SCALE}"
            )));
        }
        Ok(())
    }

    /// The creation weight in [`COST_SCALE`] units.
    pub(crate) fn scaled_weight(&self) -> i64 {
        (self.creation_weight * COST_SCALE as f64).round() as i64
    }
}
