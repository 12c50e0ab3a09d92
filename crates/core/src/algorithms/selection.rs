use crate::{Result, Stepper};

/// Swaps the minimum of the unsorted suffix into place, one step per pass
/// even when the minimum is already in position.
pub fn selection(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let len = values.len();
    for i in 0..len {
        let mut min = i;
        for j in i + 1..len {
            if values[j] < values[min] {
                min = j;
            }
        }
        steps.swap(values, i, min)?;
    }
    Ok(())
}

pub fn heap(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let len = values.len();
    for root in (0..len / 2).rev() {
        sift_down(values, steps, len, root)?;
    }

    for end in (1..len).rev() {
        steps.swap(values, 0, end)?;
        sift_down(values, steps, end, 0)?;
    }
    Ok(())
}

/// Restores the max-heap property below `root` within the first `size`
/// elements.
fn sift_down(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    size: usize,
    mut root: usize,
) -> Result<()> {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < size && values[left] > values[largest] {
            largest = left;
        }
        if right < size && values[right] > values[largest] {
            largest = right;
        }
        if largest == root {
            return Ok(());
        }

        steps.swap(values, root, largest)?;
        root = largest;
    }
}

/// Repeatedly flips the prefix ending at the running maximum to the front,
/// then flips it to the end of the unsorted region.
pub fn pancake(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    for end in (1..values.len()).rev() {
        let mut max_index = 0;
        for i in 1..=end {
            if values[i] > values[max_index] {
                max_index = i;
            }
        }

        if max_index != end {
            flip(values, steps, max_index)?;
            flip(values, steps, end)?;
        }
    }
    Ok(())
}

/// Reverses `values[..=end]`, one step per swapped pair.
fn flip(values: &mut [u32], steps: &mut Stepper<'_>, mut end: usize) -> Result<()> {
    let mut start = 0;
    while start < end {
        steps.swap(values, start, end)?;
        start += 1;
        end -= 1;
    }
    Ok(())
}

/// Cycle sort: every element is written at most once into its final slot.
pub fn cycle(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let len = values.len();
    for cycle_start in 0..len.saturating_sub(1) {
        let mut item = values[cycle_start];
        let mut pos = slot_for(values, cycle_start, item);
        if pos == cycle_start {
            continue;
        }

        while item == values[pos] {
            pos += 1;
        }
        std::mem::swap(&mut values[pos], &mut item);
        steps.emit(values, pos, cycle_start)?;

        while pos != cycle_start {
            pos = slot_for(values, cycle_start, item);
            while item == values[pos] {
                pos += 1;
            }
            std::mem::swap(&mut values[pos], &mut item);
            steps.emit(values, pos, cycle_start)?;
        }
    }
    Ok(())
}

/// Final position of `item` relative to the cycle start.
fn slot_for(values: &[u32], cycle_start: usize, item: u32) -> usize {
    cycle_start
        + values[cycle_start + 1..]
            .iter()
            .filter(|&&value| value < item)
            .count()
}
