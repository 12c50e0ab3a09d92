//! The sixteen instrumented sorting procedures.
//!
//! Every procedure sorts `values` ascending in place and reports each data
//! movement through the [`Stepper`] right after performing it.

use std::{fmt, str::FromStr};

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{Result, SortVizError, Stepper};

mod bogo;
mod exchange;
mod insertion;
mod merge;
mod quick;
mod radix;
mod selection;

pub use bogo::bogo;
pub use exchange::{bubble, cocktail, comb, gnome, stooge};
pub use insertion::{insertion, shell};
pub use merge::{bitonic, merge};
pub use quick::quick;
pub use radix::radix;
pub use selection::{cycle, heap, pancake, selection};

/// Closed registry of the supported algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Shell,
    Heap,
    Radix,
    Cocktail,
    Gnome,
    Stooge,
    Comb,
    Pancake,
    Cycle,
    Bogo,
    Bitonic,
}

impl Algorithm {
    pub const ALL: [Algorithm; 16] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Shell,
        Algorithm::Heap,
        Algorithm::Radix,
        Algorithm::Cocktail,
        Algorithm::Gnome,
        Algorithm::Stooge,
        Algorithm::Comb,
        Algorithm::Pancake,
        Algorithm::Cycle,
        Algorithm::Bogo,
        Algorithm::Bitonic,
    ];

    /// Registry key used to select the algorithm by name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Shell => "shell",
            Algorithm::Heap => "heap",
            Algorithm::Radix => "radix",
            Algorithm::Cocktail => "cocktail",
            Algorithm::Gnome => "gnome",
            Algorithm::Stooge => "stooge",
            Algorithm::Comb => "comb",
            Algorithm::Pancake => "pancake",
            Algorithm::Cycle => "cycle",
            Algorithm::Bogo => "bogo",
            Algorithm::Bitonic => "bitonic",
        }
    }

    /// Whether the emitted step sequence depends on the random source.
    pub fn is_randomised(self) -> bool {
        matches!(self, Algorithm::Bogo)
    }

    /// Sorts `values` in place, emitting one step per instrumented mutation.
    ///
    /// `rng` and `bogo_limit` are only consulted by [`Algorithm::Bogo`].
    pub fn run(
        self,
        values: &mut [u32],
        steps: &mut Stepper<'_>,
        rng: &mut dyn RngCore,
        bogo_limit: Option<u64>,
    ) -> Result<()> {
        match self {
            Algorithm::Bubble => bubble(values, steps),
            Algorithm::Selection => selection(values, steps),
            Algorithm::Insertion => insertion(values, steps),
            Algorithm::Merge => merge(values, steps),
            Algorithm::Quick => quick(values, steps),
            Algorithm::Shell => shell(values, steps),
            Algorithm::Heap => heap(values, steps),
            Algorithm::Radix => radix(values, steps),
            Algorithm::Cocktail => cocktail(values, steps),
            Algorithm::Gnome => gnome(values, steps),
            Algorithm::Stooge => stooge(values, steps),
            Algorithm::Comb => comb(values, steps),
            Algorithm::Pancake => pancake(values, steps),
            Algorithm::Cycle => cycle(values, steps),
            Algorithm::Bogo => bogo(values, steps, rng, bogo_limit),
            Algorithm::Bitonic => bitonic(values, steps),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortVizError;

    fn from_str(name: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| SortVizError::UnknownAlgorithm(name.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::{RecordingRenderer, Stepper, VirtualClock};

    /// Runs `sort` over `input` and returns the result with the recorded
    /// `(primary, secondary)` pairs.
    pub fn trace<F>(input: &[u32], sort: F) -> (Vec<u32>, Vec<(usize, usize)>)
    where
        F: FnOnce(&mut [u32], &mut Stepper<'_>) -> crate::Result<()>,
    {
        let mut values = input.to_vec();
        let mut renderer = RecordingRenderer::new();
        let mut clock = VirtualClock::new();
        {
            let mut steps = Stepper::new(&mut renderer, &mut clock, Duration::ZERO);
            sort(values.as_mut_slice(), &mut steps).expect("sort should succeed");
        }
        (values, renderer.index_pairs())
    }

    pub fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_registry() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "not-a-real-algorithm".parse::<Algorithm>().unwrap_err();
        assert!(matches!(
            err,
            SortVizError::UnknownAlgorithm(name) if name == "not-a-real-algorithm"
        ));
    }

    #[test]
    fn registry_holds_sixteen_distinct_names() {
        let mut names: Vec<&str> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn serde_uses_registry_names() {
        let json = serde_json::to_string(&Algorithm::Cocktail).unwrap();
        assert_eq!(json, "\"cocktail\"");
        let parsed: Algorithm = serde_json::from_str("\"bitonic\"").unwrap();
        assert_eq!(parsed, Algorithm::Bitonic);
    }
}
