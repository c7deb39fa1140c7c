use crate::error::{MaturityError, Result};
use crate::types::input::RegionInput;
use crate::types::scoring::Score;

pub fn compute_complexity_score(input: &RegionInput) -> Result<Score> {
    if input.pct_software_total == 0.0 {
        return Err(MaturityError::UndefinedScore {
            region: input.region_id.display_name().to_string(),
            component: "complexity".to_string(),
            reason: "no software-development requests observed".to_string(),
        });
    }
    let score = 100.0 * input.pct_level0_software / input.pct_software_total;
    Ok(score.clamp(0.0, 100.0))
}
