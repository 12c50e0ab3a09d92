use crate::{Result, Stepper};

/// Top-down merge sort. Each merged run is written back through a scratch
/// buffer with one step per written position.
pub fn merge(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    if values.len() < 2 {
        return Ok(());
    }
    let right = values.len() - 1;
    merge_range(values, steps, 0, right)
}

fn merge_range(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    left: usize,
    right: usize,
) -> Result<()> {
    if left >= right {
        return Ok(());
    }
    let mid = left + (right - left) / 2;
    merge_range(values, steps, left, mid)?;
    merge_range(values, steps, mid + 1, right)?;
    merge_runs(values, steps, left, mid, right)
}

fn merge_runs(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    left: usize,
    mid: usize,
    right: usize,
) -> Result<()> {
    let mut scratch = Vec::with_capacity(right - left + 1);
    let (mut i, mut j) = (left, mid + 1);
    while i <= mid && j <= right {
        if values[i] <= values[j] {
            scratch.push(values[i]);
            i += 1;
        } else {
            scratch.push(values[j]);
            j += 1;
        }
    }
    scratch.extend_from_slice(&values[i..=mid]);
    scratch.extend_from_slice(&values[j..=right]);

    for (offset, value) in scratch.into_iter().enumerate() {
        let index = left + offset;
        values[index] = value;
        steps.emit(values, index, index)?;
    }
    Ok(())
}

/// Bitonic sort for arbitrary lengths.
///
/// Power-of-two runs sort their first half ascending and their second half
/// descending, whatever direction the run itself is merged in. Other runs
/// sort the first half against the requested direction and the second half
/// with it, which keeps them bitonic when the merge compares across the
/// largest power of two below the run length.
pub fn bitonic(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let len = values.len();
    bitonic_range(values, steps, 0, len, true)
}

fn bitonic_range(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    low: usize,
    count: usize,
    ascending: bool,
) -> Result<()> {
    if count > 1 {
        let half = count / 2;
        let (first, second) = if count.is_power_of_two() {
            (true, false)
        } else {
            (!ascending, ascending)
        };
        bitonic_range(values, steps, low, half, first)?;
        bitonic_range(values, steps, low + half, count - half, second)?;
        bitonic_merge(values, steps, low, count, ascending)?;
    }
    Ok(())
}

fn bitonic_merge(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    low: usize,
    count: usize,
    ascending: bool,
) -> Result<()> {
    if count > 1 {
        let k = greatest_power_of_two_below(count);
        for i in low..low + count - k {
            let out_of_order = if ascending {
                values[i] > values[i + k]
            } else {
                values[i] < values[i + k]
            };
            if out_of_order {
                steps.swap(values, i, i + k)?;
            }
        }
        bitonic_merge(values, steps, low, k, ascending)?;
        bitonic_merge(values, steps, low + k, count - k, ascending)?;
    }
    Ok(())
}

/// Largest power of two strictly below `n` (for `n >= 2`).
fn greatest_power_of_two_below(n: usize) -> usize {
    let mut k = 1;
    while k < n {
        k <<= 1;
    }
    k >> 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::trace;

    #[test]
    fn merge_writes_back_every_position() {
        let (values, pairs) = trace(&[4, 3, 2, 1], merge);
        assert_eq!(values, vec![1, 2, 3, 4]);
        // two runs of two, then one run of four
        assert_eq!(pairs.len(), 8);
        assert!(pairs.iter().all(|&(a, b)| a == b));
        assert_eq!(&pairs[4..], &[(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn power_of_two_helper_is_strict() {
        assert_eq!(greatest_power_of_two_below(2), 1);
        assert_eq!(greatest_power_of_two_below(3), 2);
        assert_eq!(greatest_power_of_two_below(4), 2);
        assert_eq!(greatest_power_of_two_below(5), 4);
        assert_eq!(greatest_power_of_two_below(17), 16);
    }

    #[test]
    fn bitonic_sorts_non_power_of_two_lengths() {
        for len in 0..14u32 {
            let input: Vec<u32> = (0..len).map(|i| (i * 7 + 3) % 5).collect();
            let mut expected = input.clone();
            expected.sort();
            let (values, _) = trace(&input, bitonic);
            assert_eq!(values, expected, "length {len}");
        }
    }

    #[test]
    fn bitonic_power_of_two_trace_is_canonical() {
        let (values, pairs) = trace(&[353, 345, 651, 636, 210, 417, 0, 455], bitonic);
        assert_eq!(values, vec![0, 210, 345, 353, 417, 455, 636, 651]);
        assert_eq!(
            pairs,
            vec![
                (0, 1),
                (2, 3),
                (6, 7),
                (4, 6),
                (2, 6),
                (3, 7),
                (0, 2),
                (1, 3),
                (0, 1),
                (4, 5),
            ]
        );
    }

    #[test]
    fn bitonic_only_swaps_across_power_of_two_distances() {
        let (_, pairs) = trace(&[6, 5, 4, 3, 2, 1], bitonic);
        assert!(!pairs.is_empty());
        assert!(pairs.iter().all(|&(a, b)| (b - a).is_power_of_two()));
    }
}
