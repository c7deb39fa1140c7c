use crate::error::{MaturityError, Result};
use crate::types::input::RegionInput;
use crate::types::scoring::Score;

/// Share of classified collaboration that is automation-leaning
/// (directive + feedback loop). The unclassified remainder is excluded from
/// the denominator.
pub fn compute_collaboration_score(input: &RegionInput) -> Result<Score> {
    let total = input.total_collaboration_pct();
    if total == 0.0 {
        return Err(MaturityError::UndefinedScore {
            region: input.region_id.display_name().to_string(),
            component: "collaboration".to_string(),
            reason: "no classified collaboration episodes".to_string(),
        });
    }
    let score = 100.0 * (input.pct_directive + input.pct_feedback_loop) / total;
    Ok(score.clamp(0.0, 100.0))
}
