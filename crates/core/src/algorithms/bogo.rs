use rand::{seq::SliceRandom, Rng, RngCore};

use crate::{bars::is_sorted, Result, SortVizError, Stepper};

/// Shuffles the whole sequence until it happens to be sorted.
///
/// Every attempt emits one step highlighting two random positions; the
/// indices carry no meaning beyond giving the frame something to mark.
/// Without `max_attempts` there is no upper bound on the number of shuffles.
pub fn bogo(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    rng: &mut dyn RngCore,
    max_attempts: Option<u64>,
) -> Result<()> {
    let mut attempts = 0_u64;
    while !is_sorted(values) {
        if max_attempts.is_some_and(|limit| attempts >= limit) {
            return Err(SortVizError::AttemptsExhausted { attempts });
        }

        values.shuffle(rng);
        attempts += 1;

        let first = rng.gen_range(0..values.len());
        let second = rng.gen_range(0..values.len());
        steps.emit(values, first, second)?;
    }

    tracing::debug!(attempts, "bogo sort finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{algorithms::testing::seeded, RecordingRenderer, VirtualClock};

    fn run(
        input: &[u32],
        rng: &mut dyn RngCore,
        limit: Option<u64>,
    ) -> (Vec<u32>, Result<()>, usize) {
        let mut values = input.to_vec();
        let mut renderer = RecordingRenderer::new();
        let mut clock = VirtualClock::new();
        let outcome = {
            let mut steps = Stepper::new(&mut renderer, &mut clock, Duration::ZERO);
            bogo(&mut values, &mut steps, rng, limit)
        };
        (values, outcome, renderer.frames().len())
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut first_rng = seeded();
        let mut second_rng = seeded();
        let (first, first_outcome, first_steps) = run(&[3, 1, 2, 0], &mut first_rng, None);
        let (second, second_outcome, second_steps) = run(&[3, 1, 2, 0], &mut second_rng, None);

        assert!(first_outcome.is_ok() && second_outcome.is_ok());
        assert_eq!(first, vec![0, 1, 2, 3]);
        assert_eq!(first, second);
        assert_eq!(first_steps, second_steps);
        assert!(first_steps >= 1);
    }

    #[test]
    fn attempt_cap_stops_the_run() {
        let mut rng = seeded();
        let input: Vec<u32> = (0..12).rev().collect();
        let (values, outcome, steps) = run(&input, &mut rng, Some(3));

        assert!(matches!(outcome, Err(SortVizError::AttemptsExhausted { attempts: 3 })));
        assert_eq!(steps, 3);
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(sorted, (0..12).collect::<Vec<u32>>());
    }

    #[test]
    fn sorted_input_needs_no_shuffle() {
        let mut rng = seeded();
        let (values, outcome, steps) = run(&[1, 2, 3], &mut rng, Some(0));
        assert!(outcome.is_ok());
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(steps, 0);
    }
}
