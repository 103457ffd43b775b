//! Recall scoring between a reference scene and a recalled candidate.
//!
//! Both scenes are reduced to the multiset of `(item, col, row)` triples on
//! their occupied squares, in absolute coordinates, with the self marker
//! left out. An item counts as recalled when the candidate places the same
//! identifier on the same square; each reference item can be matched once.
//!
//! Precision divides by the reference item count unless the
//! [`ScoringConfig`] asks for the candidate count. Recall always divides by
//! the reference item count. Either ratio is `0.0` when its denominator is.

use hashbrown::HashMap;
use tracing::debug;

use crate::{
    Scene,
    config::{Denominator, ScoringConfig},
    error::{SceneError, SceneResult},
    square::Frame,
};

/// Item counts shared by all four metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// Items present in both scenes.
    pub matched: usize,
    /// Items in the reference scene.
    pub truth_items: usize,
    /// Items in the candidate scene.
    pub candidate_items: usize,
    denominator: Denominator,
}

impl Comparison {
    /// Compare scenes with the default scoring.
    pub fn new(truth: &Scene, candidate: &Scene) -> SceneResult<Self> {
        Self::new_with(truth, candidate, &ScoringConfig::default())
    }

    /// Compare scenes with explicit scoring.
    pub fn new_with(
        truth: &Scene,
        candidate: &Scene,
        config: &ScoringConfig,
    ) -> SceneResult<Self> {
        if truth.width() != candidate.width() || truth.height() != candidate.height() {
            return Err(SceneError::IncompatibleScenes {
                truth_width: truth.width(),
                truth_height: truth.height(),
                candidate_width: candidate.width(),
                candidate_height: candidate.height(),
            });
        }

        let truth_list = truth.list_items(Frame::Absolute);
        let candidate_list = candidate.list_items(Frame::Absolute);

        let mut unmatched: HashMap<(&str, i32, i32), usize> = HashMap::new();
        let mut truth_items = 0;
        for entry in &truth_list {
            if entry.item == truth.markers().self_id {
                continue;
            }
            *unmatched
                .entry((entry.item.as_str(), entry.col, entry.row))
                .or_default() += 1;
            truth_items += 1;
        }

        let mut matched = 0;
        let mut candidate_items = 0;
        for entry in &candidate_list {
            if entry.item == candidate.markers().self_id {
                continue;
            }
            candidate_items += 1;
            let key = (entry.item.as_str(), entry.col, entry.row);
            if let Some(remaining) = unmatched.get_mut(&key) {
                if *remaining > 0 {
                    *remaining -= 1;
                    matched += 1;
                }
            }
        }

        debug!(
            truth = truth.name(),
            candidate = candidate.name(),
            matched,
            truth_items,
            candidate_items,
            "compared scenes"
        );

        Ok(Self {
            matched,
            truth_items,
            candidate_items,
            denominator: config.precision_denominator,
        })
    }

    /// Candidate items with no counterpart in the reference (false positives).
    #[must_use]
    pub const fn errors_of_commission(&self) -> usize {
        self.candidate_items - self.matched
    }

    /// Reference items the candidate failed to place (false negatives).
    #[must_use]
    pub const fn errors_of_omission(&self) -> usize {
        self.truth_items - self.matched
    }

    /// Fraction of items correctly recalled, over the configured denominator.
    #[must_use]
    pub fn precision(&self) -> f64 {
        match self.denominator {
            Denominator::Reference => ratio(self.matched, self.truth_items),
            Denominator::Candidate => ratio(self.matched, self.candidate_items),
        }
    }

    /// Fraction of reference items the candidate recalled.
    #[must_use]
    pub fn recall(&self) -> f64 {
        ratio(self.matched, self.truth_items)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Count candidate items absent from the reference.
pub fn errors_of_commission(truth: &Scene, candidate: &Scene) -> SceneResult<usize> {
    Ok(Comparison::new(truth, candidate)?.errors_of_commission())
}

/// Count reference items absent from the candidate.
pub fn errors_of_omission(truth: &Scene, candidate: &Scene) -> SceneResult<usize> {
    Ok(Comparison::new(truth, candidate)?.errors_of_omission())
}

/// Precision of `candidate` against `truth` with the default scoring.
pub fn precision(truth: &Scene, candidate: &Scene) -> SceneResult<f64> {
    Ok(Comparison::new(truth, candidate)?.precision())
}

/// Recall of `candidate` against `truth`.
pub fn recall(truth: &Scene, candidate: &Scene) -> SceneResult<f64> {
    Ok(Comparison::new(truth, candidate)?.recall())
}
