use crate::{Result, Stepper};

/// Shifts larger elements right one slot at a time, then drops the held
/// value into the gap.
pub fn insertion(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    for i in 1..values.len() {
        let current = values[i];
        let mut j = i;
        while j > 0 && values[j - 1] > current {
            values[j] = values[j - 1];
            steps.emit(values, j, j - 1)?;
            j -= 1;
        }
        values[j] = current;
        steps.emit(values, j, i)?;
    }
    Ok(())
}

/// Gapped insertion sort, halving the gap after every round.
pub fn shell(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let len = values.len();
    let mut gap = len / 2;
    while gap > 0 {
        for i in gap..len {
            let held = values[i];
            let mut j = i;
            while j >= gap && values[j - gap] > held {
                values[j] = values[j - gap];
                steps.emit(values, j, j - gap)?;
                j -= gap;
            }
            values[j] = held;
            steps.emit(values, j, i)?;
        }
        gap /= 2;
    }
    Ok(())
}
