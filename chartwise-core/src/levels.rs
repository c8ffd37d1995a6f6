//! Support and resistance from local price extrema.
//!
//! A bar is a resistance candidate when its high is strictly above the highs
//! of the `LEVEL_RADIUS` bars on each side; support mirrors this on lows.
//! Works on raw bars, independent of the indicator snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::Series;
use crate::params::{LEVEL_RADIUS, MAX_LEVELS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    /// Ascending, at most `MAX_LEVELS`.
    pub support: Vec<f64>,
    /// Descending, at most `MAX_LEVELS`.
    pub resistance: Vec<f64>,
}

impl Levels {
    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }
}

/// Locate support/resistance levels. Fewer than `2 * LEVEL_RADIUS + 1` bars
/// yields empty lists rather than an error.
pub fn find_levels(series: &Series) -> Levels {
    let highs = series.highs();
    let lows = series.lows();

    let mut resistance = extrema(&highs, |candidate, neighbour| candidate > neighbour);
    let mut support = extrema(&lows, |candidate, neighbour| candidate < neighbour);

    resistance.sort_by(|a, b| b.total_cmp(a));
    resistance.dedup();
    resistance.truncate(MAX_LEVELS);

    support.sort_by(|a, b| a.total_cmp(b));
    support.dedup();
    support.truncate(MAX_LEVELS);

    Levels {
        support,
        resistance,
    }
}

/// Values that beat every neighbour within `LEVEL_RADIUS` according to `beats`.
fn extrema(values: &[f64], beats: impl Fn(f64, f64) -> bool) -> Vec<f64> {
    let n = values.len();
    if n < 2 * LEVEL_RADIUS + 1 {
        return Vec::new();
    }

    (LEVEL_RADIUS..n - LEVEL_RADIUS)
        .filter(|&i| {
            let candidate = values[i];
            (i - LEVEL_RADIUS..=i + LEVEL_RADIUS)
                .filter(|&j| j != i)
                .all(|j| beats(candidate, values[j]))
        })
        .map(|i| values[i])
        .collect()
}
