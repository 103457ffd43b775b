//! Reserved identifiers and scoring configuration.
//!
//! Every field has a default, so a JSON document only needs to name the
//! values it overrides:
//!
//! ```
//! use scene::{Denominator, SceneConfig};
//!
//! let config = SceneConfig::from_json(r#"{ "scoring": { "precision_denominator": "Candidate" } }"#).unwrap();
//! assert_eq!(config.scoring.precision_denominator, Denominator::Candidate);
//! assert_eq!(config.markers.empty, ".");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Identifiers with a reserved meaning inside a scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Reported for squares that were never looked at.
    pub blind: String,
    /// Marks a square as seen and vacant.
    pub empty: String,
    /// The observing agent.
    pub self_id: String,
    /// Row character that leaves a square untouched.
    pub skip: char,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            blind: "null".to_owned(),
            empty: ".".to_owned(),
            self_id: "SELF".to_owned(),
            skip: ' ',
        }
    }
}

impl Markers {
    /// Reject marker sets where two reserved identifiers collide.
    pub fn validate(&self) -> SceneResult<()> {
        let pairs = [
            ("blind", &self.blind, "empty", &self.empty),
            ("blind", &self.blind, "self", &self.self_id),
            ("empty", &self.empty, "self", &self.self_id),
        ];

        for (a, a_value, b, b_value) in pairs {
            if a_value == b_value {
                return Err(SceneError::ConflictingMarkers(format!(
                    "{a} and {b} are both {a_value:?}"
                )));
            }
        }

        let skip = self.skip.to_string();
        if skip == self.empty || skip == self.self_id {
            return Err(SceneError::ConflictingMarkers(format!(
                "skip character {:?} shadows a placeable marker",
                self.skip
            )));
        }

        Ok(())
    }
}

/// Denominator used for precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Denominator {
    /// Items in the reference scene.
    #[default]
    Reference,
    /// Items in the candidate scene.
    Candidate,
}

/// How recall accuracy is scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub precision_denominator: Denominator,
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub markers: Markers,
    pub scoring: ScoringConfig,
}

impl SceneConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(source: &str) -> SceneResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.markers.validate()?;
        Ok(config)
    }
}
