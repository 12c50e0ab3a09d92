use crate::{Result, Stepper};

const RADIX: u64 = 10;

/// LSD radix sort over decimal digits. Each digit pass is a stable counting
/// sort whose output is written back one step per position.
pub fn radix(values: &mut [u32], steps: &mut Stepper<'_>) -> Result<()> {
    let Some(max) = values.iter().copied().max() else {
        return Ok(());
    };

    let mut exp = 1_u64;
    while u64::from(max) / exp > 0 {
        counting_pass(values, steps, exp)?;
        exp *= RADIX;
    }
    Ok(())
}

fn counting_pass(values: &mut [u32], steps: &mut Stepper<'_>, exp: u64) -> Result<()> {
    let digit = |value: u32| ((u64::from(value) / exp) % RADIX) as usize;

    let mut count = [0_usize; RADIX as usize];
    for &value in values.iter() {
        count[digit(value)] += 1;
    }
    for d in 1..count.len() {
        count[d] += count[d - 1];
    }

    let mut output = vec![0_u32; values.len()];
    for &value in values.iter().rev() {
        let d = digit(value);
        count[d] -= 1;
        output[count[d]] = value;
    }

    for (index, value) in output.into_iter().enumerate() {
        values[index] = value;
        steps.emit(values, index, index)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::trace;

    #[test]
    fn one_pass_per_digit_of_the_maximum() {
        let (values, pairs) = trace(&[0, 999, 5], radix);
        assert_eq!(values, vec![0, 5, 999]);
        assert_eq!(pairs.len(), 9);
    }

    #[test]
    fn all_zeros_need_no_pass() {
        let (values, pairs) = trace(&[0, 0, 0], radix);
        assert_eq!(values, vec![0, 0, 0]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn handles_the_largest_representable_value() {
        let (values, _) = trace(&[u32::MAX, 1, 40], radix);
        assert_eq!(values, vec![1, 40, u32::MAX]);
    }
}
