use crate::{Result, Stepper};

/// Quicksort with a Lomuto partition around the last element.
pub fn quick(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    if values.len() < 2 {
        return Ok(());
    }
    let high = values.len() - 1;
    quick_range(values, steps, 0, high)
}

fn quick_range(values: &mut [u32], steps: &mut Stepper<'_>, low: usize, high: usize) -> Result<()> {
    if low >= high {
        return Ok(());
    }
    let pivot = partition(values, steps, low, high)?;
    if pivot > low {
        quick_range(values, steps, low, pivot - 1)?;
    }
    quick_range(values, steps, pivot + 1, high)
}

/// Moves everything smaller than `values[high]` to the front of the range and
/// returns the pivot's final index.
fn partition(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    low: usize,
    high: usize,
) -> Result<usize> {
    let pivot = values[high];
    let mut store = low;
    for j in low..high {
        if values[j] < pivot {
            steps.swap(values, store, j)?;
            store += 1;
        }
    }
    steps.swap(values, store, high)?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::trace;

    #[test]
    fn two_elements_need_only_the_pivot_placement() {
        let (values, pairs) = trace(&[2, 1], quick);
        assert_eq!(values, vec![1, 2]);
        assert_eq!(pairs, vec![(0, 1)]);
    }

    #[test]
    fn partition_swaps_precede_pivot_placement() {
        let (values, pairs) = trace(&[1, 3, 2], quick);
        assert_eq!(values, vec![1, 2, 3]);
        // 1 < 2 swaps in place, then the pivot lands at index 1
        assert_eq!(pairs, vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn sorts_already_sorted_runs_without_underflow() {
        let input: Vec<u32> = (0..30).collect();
        let (values, _) = trace(&input, quick);
        assert_eq!(values, input);
    }
}
