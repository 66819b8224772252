//! Discrete probability helpers shared by parameterization and day sampling.

use rand::Rng;

/// Pick an index with probability proportional to its weight.
///
/// Returns `None` when the weights carry no mass, so callers decide what an
/// empty row means for them.
pub fn pick_index<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return None;
    }

    let mut r = rng.gen::<f64>() * total;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        r -= weight;
        if r < 0.0 {
            return Some(i);
        }
    }

    // Rounding left a sliver of mass; fall back to the last non-empty entry
    weights.iter().rposition(|&w| w > 0.0)
}

/// True when every weight is finite and non-negative.
pub fn is_probability_row(weights: &[f64]) -> bool {
    weights.iter().all(|w| w.is_finite() && *w >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_row_has_no_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pick_index(&[], &mut rng), None);
        assert_eq!(pick_index(&[0.0, 0.0], &mut rng), None);
    }

    #[test]
    fn test_certain_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(pick_index(&[0.0, 1.0, 0.0], &mut rng), Some(1));
        }
    }

    #[test]
    fn test_pick_frequencies_follow_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..30_000 {
            counts[pick_index(&[1.0, 2.0, 7.0], &mut rng).unwrap()] += 1;
        }
        let share = counts[2] as f64 / 30_000.0;
        assert!((share - 0.7).abs() < 0.02, "share of heaviest weight was {}", share);
        assert!(counts[0] < counts[1]);
    }

    #[test]
    fn test_probability_row_check() {
        assert!(is_probability_row(&[0.0, 0.5, 0.5]));
        assert!(!is_probability_row(&[0.5, -0.1]));
        assert!(!is_probability_row(&[f64::NAN]));
    }
}
