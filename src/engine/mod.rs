pub mod collaboration;
pub mod complexity;
pub mod composite;
pub mod length;

use crate::error::{MaturityError, Result};
use crate::types::input::RegionInput;
use crate::types::region::Region;
use crate::types::report::{
    Leaders, MaturityReport, RankSpread, SchemeRanking, SensitivityReport,
};
use crate::types::scoring::{
    ComponentScores, Contributions, Ranking, Score, ScoreResult, WeightScheme, Weights,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

pub use collaboration::compute_collaboration_score;
pub use complexity::compute_complexity_score;
pub use composite::compute_composite_score;
pub use length::compute_length_efficiency_score;

/// Weight-independent components for a whole batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTable {
    pub components: Vec<ComponentScores>,
    pub degenerate_length_normalization: bool,
}

/// A region's components combined under one weighting, not yet ranked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScore {
    pub components: ComponentScores,
    pub composite: Score,
    pub contributions: Contributions,
}

/// Phases 1 and 2: per-region C and X, then batch-wide L.
pub fn compute_components(inputs: &[RegionInput]) -> Result<ComponentTable> {
    if inputs.is_empty() {
        return Err(MaturityError::EmptyInput);
    }
    let mut seen = HashSet::new();
    for input in inputs {
        input.validate()?;
        if !seen.insert(input.region_id) {
            return Err(MaturityError::DuplicateRegion(
                input.region_id.display_name().to_string(),
            ));
        }
    }

    let per_region = inputs
        .iter()
        .map(|input| {
            Ok((
                input.region_id,
                compute_collaboration_score(input)?,
                compute_complexity_score(input)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let length = compute_length_efficiency_score(inputs)?;
    if length.degenerate {
        warn!(
            regions = inputs.len(),
            "raw length indices are identical across regions; length efficiency set to 50 for all"
        );
    }

    let components = per_region
        .into_iter()
        .zip(&length.scores)
        .map(|((region_id, collaboration, complexity), (_, raw, l))| {
            debug!(
                region = region_id.id(),
                collaboration, length_efficiency = l, complexity, "components computed"
            );
            ComponentScores {
                region_id,
                collaboration,
                length_efficiency: *l,
                complexity,
                raw_length_index: *raw,
            }
        })
        .collect();

    Ok(ComponentTable {
        components,
        degenerate_length_normalization: length.degenerate,
    })
}

/// Phase 3: combine precomputed components under `weights`. Components are
/// read, never recomputed.
pub fn apply_weights(table: &ComponentTable, weights: &Weights) -> Vec<WeightedScore> {
    table
        .components
        .iter()
        .map(|components| WeightedScore {
            components: *components,
            composite: compute_composite_score(
                components.collaboration,
                components.length_efficiency,
                components.complexity,
                weights,
            ),
            contributions: Contributions::of(components, weights),
        })
        .collect()
}

/// Composite descending, region id ascending on ties.
pub fn rank_regions(mut scores: Vec<WeightedScore>) -> Ranking {
    scores.sort_by(|a, b| {
        b.composite
            .total_cmp(&a.composite)
            .then_with(|| a.components.region_id.cmp(&b.components.region_id))
    });

    let results = scores
        .into_iter()
        .enumerate()
        .map(|(index, scored)| ScoreResult {
            region_id: scored.components.region_id,
            collaboration_score: scored.components.collaboration,
            length_efficiency_score: scored.components.length_efficiency,
            complexity_score: scored.components.complexity,
            composite_score: scored.composite,
            rank: index + 1,
            raw_length_index: scored.components.raw_length_index,
            contributions: scored.contributions,
        })
        .collect();
    Ranking::from_sorted(results)
}

pub fn leaders(table: &ComponentTable, ranking: &Ranking) -> Option<Leaders> {
    fn leader(
        table: &ComponentTable,
        value: impl Fn(&ComponentScores) -> Score,
    ) -> Option<Region> {
        table
            .components
            .iter()
            .max_by(|a, b| {
                value(a)
                    .total_cmp(&value(b))
                    .then_with(|| b.region_id.cmp(&a.region_id))
            })
            .map(|components| components.region_id)
    }

    Some(Leaders {
        collaboration: leader(table, |c| c.collaboration)?,
        length_efficiency: leader(table, |c| c.length_efficiency)?,
        complexity: leader(table, |c| c.complexity)?,
        overall: ranking.top()?.region_id,
    })
}

pub fn score_regions(inputs: &[RegionInput], scheme: &WeightScheme) -> Result<MaturityReport> {
    let table = compute_components(inputs)?;
    let ranking = rank_regions(apply_weights(&table, &scheme.weights));
    if let Some(top) = ranking.top() {
        info!(
            scheme = %scheme.name,
            leader = top.region_id.id(),
            composite = top.composite_score,
            "regions scored"
        );
    }

    Ok(MaturityReport {
        generated_at: Utc::now(),
        scheme: scheme.clone(),
        degenerate_length_normalization: table.degenerate_length_normalization,
        leaders: leaders(&table, &ranking),
        results: ranking,
    })
}

/// Re-ranks one shared component table under each scheme.
pub fn run_sensitivity_analysis(
    inputs: &[RegionInput],
    schemes: &[WeightScheme],
) -> Result<SensitivityReport> {
    if schemes.is_empty() {
        return Err(MaturityError::InvalidWeights(
            "sensitivity analysis needs at least one weighting scheme".to_string(),
        ));
    }
    let table = compute_components(inputs)?;

    let rankings = schemes
        .iter()
        .map(|scheme| SchemeRanking {
            scheme: scheme.clone(),
            results: rank_regions(apply_weights(&table, &scheme.weights)),
        })
        .collect::<Vec<_>>();

    let tops = rankings
        .iter()
        .filter_map(|ranking| ranking.results.top().map(|top| top.region_id))
        .collect::<HashSet<_>>();
    let top_region_stable = tops.len() == 1;
    if !top_region_stable {
        warn!(
            schemes = schemes.len(),
            distinct_leaders = tops.len(),
            "top region changes with the weighting scheme"
        );
    }

    let mut spread: BTreeMap<Region, (usize, usize)> = BTreeMap::new();
    for ranking in &rankings {
        for result in &ranking.results {
            let entry = spread
                .entry(result.region_id)
                .or_insert((result.rank, result.rank));
            entry.0 = entry.0.min(result.rank);
            entry.1 = entry.1.max(result.rank);
        }
    }
    let rank_spread = spread
        .into_iter()
        .map(|(region_id, (best_rank, worst_rank))| RankSpread {
            region_id,
            best_rank,
            worst_rank,
        })
        .collect();

    Ok(SensitivityReport {
        generated_at: Utc::now(),
        degenerate_length_normalization: table.degenerate_length_normalization,
        rankings,
        top_region_stable,
        rank_spread,
    })
}
