use crate::error::{MaturityError, Result};
use crate::types::region::Region;
use serde::Serialize;

pub type Score = f64;

/// Allowed distance of a weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

pub const COMPLEXITY_FOCUSED: &str = "complexity_focused";
pub const EQUAL_WEIGHT: &str = "equal_weight";
pub const BALANCED: &str = "balanced";

/// Component weights. Only constructible through `Weights::new`, so a value
/// in hand is always non-negative and sums to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    collaboration: f64,
    length_efficiency: f64,
    complexity: f64,
}

impl Weights {
    pub fn new(collaboration: f64, length_efficiency: f64, complexity: f64) -> Result<Self> {
        for (name, weight) in [
            ("collaboration", collaboration),
            ("length_efficiency", length_efficiency),
            ("complexity", complexity),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MaturityError::InvalidWeights(format!(
                    "{name} weight must be a non-negative number (found {weight})"
                )));
            }
        }
        let sum = collaboration + length_efficiency + complexity;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MaturityError::InvalidWeights(format!(
                "weights must sum to 1.0 (found {sum})"
            )));
        }
        Ok(Self {
            collaboration,
            length_efficiency,
            complexity,
        })
    }

    pub fn complexity_focused() -> Self {
        Self {
            collaboration: 0.25,
            length_efficiency: 0.25,
            complexity: 0.50,
        }
    }

    pub fn equal_weight() -> Self {
        Self {
            collaboration: 1.0 / 3.0,
            length_efficiency: 1.0 / 3.0,
            complexity: 1.0 / 3.0,
        }
    }

    pub fn balanced() -> Self {
        Self {
            collaboration: 0.40,
            length_efficiency: 0.20,
            complexity: 0.40,
        }
    }

    pub fn collaboration(&self) -> f64 {
        self.collaboration
    }

    pub fn length_efficiency(&self) -> f64 {
        self.length_efficiency
    }

    pub fn complexity(&self) -> f64 {
        self.complexity
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::complexity_focused()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightScheme {
    pub name: String,
    pub weights: Weights,
}

impl WeightScheme {
    pub fn new(name: impl Into<String>, weights: Weights) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    pub fn builtin() -> Vec<WeightScheme> {
        vec![
            WeightScheme::new(BALANCED, Weights::balanced()),
            WeightScheme::new(COMPLEXITY_FOCUSED, Weights::complexity_focused()),
            WeightScheme::new(EQUAL_WEIGHT, Weights::equal_weight()),
        ]
    }
}

/// The three weight-independent components of one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub region_id: Region,
    pub collaboration: Score,
    pub length_efficiency: Score,
    pub complexity: Score,
    pub raw_length_index: f64,
}

/// Weighted share of each component in a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contributions {
    pub collaboration: Score,
    pub length_efficiency: Score,
    pub complexity: Score,
}

impl Contributions {
    pub fn of(components: &ComponentScores, weights: &Weights) -> Self {
        Self {
            collaboration: weights.collaboration() * components.collaboration,
            length_efficiency: weights.length_efficiency() * components.length_efficiency,
            complexity: weights.complexity() * components.complexity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub region_id: Region,
    pub collaboration_score: Score,
    pub length_efficiency_score: Score,
    pub complexity_score: Score,
    pub composite_score: Score,
    pub rank: usize,
    pub raw_length_index: f64,
    pub contributions: Contributions,
}

/// Regions ordered by composite score. Can be iterated any number of times.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    results: Vec<ScoreResult>,
}

impl Ranking {
    pub(crate) fn from_sorted(results: Vec<ScoreResult>) -> Self {
        Self { results }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreResult> {
        self.results.iter()
    }

    pub fn top(&self) -> Option<&ScoreResult> {
        self.results.first()
    }

    pub fn get(&self, region: Region) -> Option<&ScoreResult> {
        self.results.iter().find(|result| result.region_id == region)
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a ScoreResult;
    type IntoIter = std::slice::Iter<'a, ScoreResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
