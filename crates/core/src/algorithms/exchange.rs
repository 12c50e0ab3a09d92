use crate::{Result, Stepper};

/// Adjacent compare-and-swap passes, shrinking by one element per pass.
pub fn bubble(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let len = values.len();
    for pass in 0..len.saturating_sub(1) {
        for j in 0..len - 1 - pass {
            if values[j] > values[j + 1] {
                steps.swap(values, j, j + 1)?;
            }
        }
    }
    Ok(())
}

/// Bubble sort alternating direction, narrowing both bounds.
pub fn cocktail(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    if values.len() < 2 {
        return Ok(());
    }

    let mut start = 0;
    let mut end = values.len() - 1;
    loop {
        let mut swapped = false;
        for i in start..end {
            if values[i] > values[i + 1] {
                steps.swap(values, i, i + 1)?;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }

        swapped = false;
        end -= 1;
        for i in (start..end).rev() {
            if values[i] > values[i + 1] {
                steps.swap(values, i, i + 1)?;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        start += 1;
    }
    Ok(())
}

pub fn gnome(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let mut index = 0;
    while index < values.len() {
        if index == 0 || values[index] >= values[index - 1] {
            index += 1;
        } else {
            steps.swap(values, index, index - 1)?;
            index -= 1;
        }
    }
    Ok(())
}

/// Fixes the ends of the range, then recurses on the first two thirds, the
/// last two thirds and the first two thirds again.
pub fn stooge(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    if values.len() < 2 {
        return Ok(());
    }
    let high = values.len() - 1;
    stooge_range(values, steps, 0, high)
}

fn stooge_range(
    values: &mut [u32],
    steps: &mut Stepper<'_>,
    low: usize,
    high: usize,
) -> Result<()> {
    if low >= high {
        return Ok(());
    }

    if values[low] > values[high] {
        steps.swap(values, low, high)?;
    }

    let span = high - low + 1;
    if span > 2 {
        let third = span / 3;
        stooge_range(values, steps, low, high - third)?;
        stooge_range(values, steps, low + third, high)?;
        stooge_range(values, steps, low, high - third)?;
    }
    Ok(())
}

/// Bubble sort over a gap that shrinks by a factor of 1.3 until it reaches 1.
pub fn comb(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let len = values.len();
    let mut gap = len;
    let mut swapped = true;

    while gap > 1 || swapped {
        gap = (gap * 10 / 13).max(1);
        swapped = false;

        let mut i = 0;
        while i + gap < len {
            if values[i] > values[i + gap] {
                steps.swap(values, i, i + gap)?;
                swapped = true;
            }
            i += 1;
        }
    }
    Ok(())
}
