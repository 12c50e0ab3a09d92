use rand::Rng;

/// Returns `count` bar heights drawn uniformly from `1..=max_height`.
pub fn random_bars<R: Rng + ?Sized>(count: usize, max_height: u32, rng: &mut R) -> Vec<u32> {
    let max_height = max_height.max(1);
    (0..count).map(|_| rng.gen_range(1..=max_height)).collect()
}

/// Whether `values` is in non-decreasing order.
pub fn is_sorted(values: &[u32]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn bars_stay_within_the_canvas() {
        let mut rng = StdRng::seed_from_u64(11);
        let bars = random_bars(200, 40, &mut rng);
        assert_eq!(bars.len(), 200);
        assert!(bars.iter().all(|&bar| (1..=40).contains(&bar)));
    }

    #[test]
    fn same_seed_same_bars() {
        let first = random_bars(16, 100, &mut StdRng::seed_from_u64(3));
        let second = random_bars(16, 100, &mut StdRng::seed_from_u64(3));
        assert_eq!(first, second);
    }

    #[test]
    fn sortedness_check() {
        assert!(is_sorted(&[]));
        assert!(is_sorted(&[4]));
        assert!(is_sorted(&[1, 1, 2]));
        assert!(!is_sorted(&[2, 1]));
    }
}
