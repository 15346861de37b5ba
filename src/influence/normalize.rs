//! Batch-relative scaling of raw scores to 0..=100 and final ranking order.

use std::cmp::Ordering;

use super::InfluenceScore;

pub const NORMALIZED_MAX: u8 = 100;

/// Scale each `raw` against the batch maximum. The top entity gets 100.
/// An all-zero batch stays at 0.
pub fn normalize_raw(raw: &[f64]) -> Vec<u8> {
    let max = raw.iter().copied().fold(0.0_f64, f64::max);
    let denom = if max > 0.0 { max } else { 1.0 };
    raw.iter()
        .map(|&r| {
            let scaled = (r.max(0.0) / denom * f64::from(NORMALIZED_MAX)).round();
            scaled.clamp(0.0, f64::from(NORMALIZED_MAX)) as u8
        })
        .collect()
}

/// Fill `normalized_score` for a whole batch in place.
pub fn normalize_batch(scores: &mut [InfluenceScore]) {
    let raw: Vec<f64> = scores.iter().map(|s| s.raw_score).collect();
    for (s, n) in scores.iter_mut().zip(normalize_raw(&raw)) {
        s.normalized_score = n;
    }
}

/// normalized desc → raw desc → name asc.
pub fn ranking_order(a: &InfluenceScore, b: &InfluenceScore) -> Ordering {
    b.normalized_score
        .cmp(&a.normalized_score)
        .then_with(|| b.raw_score.total_cmp(&a.raw_score))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Normalize and sort a batch into its ranked form.
pub fn rank(mut scores: Vec<InfluenceScore>) -> Vec<InfluenceScore> {
    normalize_batch(&mut scores);
    scores.sort_by(ranking_order);
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_division() {
        assert_eq!(normalize_raw(&[100.0, 50.0, 25.0]), vec![100, 50, 25]);
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(normalize_raw(&[3.0, 2.0, 1.0]), vec![100, 67, 33]);
    }

    #[test]
    fn small_batches_still_hit_one_hundred() {
        assert_eq!(normalize_raw(&[0.5, 0.25]), vec![100, 50]);
    }

    #[test]
    fn zero_and_empty_batches() {
        assert_eq!(normalize_raw(&[0.0, 0.0]), vec![0, 0]);
        assert!(normalize_raw(&[]).is_empty());
    }
}
