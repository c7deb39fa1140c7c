use crate::types::scoring::{Score, Weights};

pub fn compute_composite_score(
    collaboration: Score,
    length_efficiency: Score,
    complexity: Score,
    weights: &Weights,
) -> Score {
    let composite = weights.collaboration() * collaboration
        + weights.length_efficiency() * length_efficiency
        + weights.complexity() * complexity;
    composite.clamp(0.0, 100.0)
}
