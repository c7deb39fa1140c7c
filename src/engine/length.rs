use crate::error::{MaturityError, Result};
use crate::types::input::RegionInput;
use crate::types::region::Region;
use crate::types::scoring::Score;

/// Normalised value assigned to every region when the batch carries no
/// discriminating information.
pub const DEGENERATE_NORMALIZED: Score = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LengthEfficiency {
    /// `(region, raw_index, L)` in input order.
    pub scores: Vec<(Region, f64, Score)>,
    pub degenerate: bool,
}

impl LengthEfficiency {
    pub fn get(&self, region: Region) -> Option<Score> {
        self.scores
            .iter()
            .find(|(id, _, _)| *id == region)
            .map(|(_, _, score)| *score)
    }
}

/// Min-max normalisation of `value` onto [0, 100]. `None` when the range is
/// empty.
pub fn min_max_normalize(value: f64, min: f64, max: f64) -> Option<f64> {
    if max == min {
        return None;
    }
    Some(((value - min) / (max - min) * 100.0).clamp(0.0, 100.0))
}

/// Needs the whole batch: the global min and max are taken once, then every
/// region is placed on the inverted [0, 100] scale.
pub fn compute_length_efficiency_score(inputs: &[RegionInput]) -> Result<LengthEfficiency> {
    if inputs.is_empty() {
        return Err(MaturityError::EmptyInput);
    }

    let raw = inputs
        .iter()
        .map(|input| (input.region_id, input.raw_length_index()))
        .collect::<Vec<_>>();
    let min = raw.iter().map(|(_, value)| *value).fold(f64::INFINITY, f64::min);
    let max = raw
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::NEG_INFINITY, f64::max);
    let degenerate = max == min;

    let scores = raw
        .into_iter()
        .map(|(region, value)| {
            let normalized = min_max_normalize(value, min, max).unwrap_or(DEGENERATE_NORMALIZED);
            (region, value, 100.0 - normalized)
        })
        .collect();

    Ok(LengthEfficiency { scores, degenerate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{region_input, with_indices};
    use proptest::prelude::*;

    fn batch(raw: &[f64]) -> Vec<RegionInput> {
        raw.iter()
            .zip(Region::ALL)
            .map(|(value, region)| {
                with_indices(region_input(region), value / 3.0, value / 3.0, value / 3.0)
            })
            .collect()
    }

    #[test]
    fn cheapest_region_gets_full_score() {
        let inputs = vec![
            with_indices(region_input(Region::NorthAmerica), 1.0, 1.0, 1.0),
            with_indices(region_input(Region::Europe), 2.0, 2.0, 2.0),
            with_indices(region_input(Region::Apac), 1.5, 1.5, 1.5),
        ];
        let length = compute_length_efficiency_score(&inputs).expect("batch should score");
        assert!(!length.degenerate);
        assert_eq!(length.get(Region::NorthAmerica), Some(100.0));
        assert_eq!(length.get(Region::Europe), Some(0.0));
        assert!((length.get(Region::Apac).unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn identical_indices_fall_back_to_midpoint() {
        let inputs = vec![
            with_indices(region_input(Region::NorthAmerica), 1.0, 1.0, 1.0),
            with_indices(region_input(Region::Europe), 1.0, 1.0, 1.0),
        ];
        let length = compute_length_efficiency_score(&inputs).expect("batch should score");
        assert!(length.degenerate);
        assert!(length.scores.iter().all(|(_, _, score)| *score == 50.0));
    }

    #[test]
    fn single_region_is_degenerate() {
        let inputs = vec![region_input(Region::Apac)];
        let length = compute_length_efficiency_score(&inputs).expect("batch should score");
        assert!(length.degenerate);
        assert_eq!(length.get(Region::Apac), Some(50.0));
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(
            compute_length_efficiency_score(&[]),
            Err(MaturityError::EmptyInput)
        ));
    }

    #[test]
    fn huge_finite_indices_normalize_like_small_ones() {
        let small = compute_length_efficiency_score(&batch(&[0.0, 5.0, 10.0]))
            .expect("small batch should score");
        let huge = compute_length_efficiency_score(&batch(&[0.0, 5e306, 1e307]))
            .expect("huge batch should score");

        for region in [Region::Apac, Region::Europe, Region::LatinAmerica] {
            let a = small.get(region).expect("region in small batch");
            let b = huge.get(region).expect("region in huge batch");
            assert!(b.is_finite());
            assert!((a - b).abs() < 1e-9, "{region}: {a} vs {b}");
        }
        assert!((huge.get(Region::Europe).unwrap() - 50.0).abs() < 1e-9);
    }

    fn raw_batch() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0f64..10.0, 2..=5)
    }

    proptest! {
        #[test]
        fn extremes_map_to_bounds(raw in raw_batch()) {
            let inputs = batch(&raw);
            let length = compute_length_efficiency_score(&inputs).unwrap();
            let min = length.scores.iter().map(|(_, r, _)| *r).fold(f64::INFINITY, f64::min);
            let max = length.scores.iter().map(|(_, r, _)| *r).fold(f64::NEG_INFINITY, f64::max);
            prop_assume!(max > min);
            for (_, r, score) in &length.scores {
                if *r == min {
                    prop_assert_eq!(*score, 100.0);
                }
                if *r == max {
                    prop_assert_eq!(*score, 0.0);
                }
                prop_assert!((0.0..=100.0).contains(score));
            }
        }

        #[test]
        fn invariant_under_shift_and_scale(raw in raw_batch(), shift in 0.0f64..5.0, scale in 0.5f64..4.0) {
            let spread = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
                - raw.iter().cloned().fold(f64::INFINITY, f64::min);
            prop_assume!(spread > 1e-3);
            let base = compute_length_efficiency_score(&batch(&raw)).unwrap();
            let moved = raw.iter().map(|v| v * scale + shift).collect::<Vec<_>>();
            let transformed = compute_length_efficiency_score(&batch(&moved)).unwrap();
            for ((_, _, a), (_, _, b)) in base.scores.iter().zip(&transformed.scores) {
                prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
            }
        }
    }
}
