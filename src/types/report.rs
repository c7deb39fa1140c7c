use crate::types::region::Region;
use crate::types::scoring::{Ranking, WeightScheme};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Region with the highest value of each component, plus the overall leader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaders {
    pub collaboration: Region,
    pub length_efficiency: Region,
    pub complexity: Region,
    pub overall: Region,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaturityReport {
    pub generated_at: DateTime<Utc>,
    pub scheme: WeightScheme,
    /// Set when every region had the same raw length index and length
    /// efficiency fell back to 50 for all of them.
    pub degenerate_length_normalization: bool,
    pub leaders: Option<Leaders>,
    pub results: Ranking,
}

/// Best and worst rank a region reached across the compared schemes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankSpread {
    pub region_id: Region,
    pub best_rank: usize,
    pub worst_rank: usize,
}

impl RankSpread {
    pub fn spread(&self) -> usize {
        self.worst_rank - self.best_rank
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemeRanking {
    pub scheme: WeightScheme,
    pub results: Ranking,
}

#[derive(Debug, Clone, Serialize)]
pub struct SensitivityReport {
    pub generated_at: DateTime<Utc>,
    pub degenerate_length_normalization: bool,
    pub rankings: Vec<SchemeRanking>,
    pub top_region_stable: bool,
    pub rank_spread: Vec<RankSpread>,
}
