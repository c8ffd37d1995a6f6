//! Volume statistics: latest volume against its trailing average.

use serde::{Deserialize, Serialize};

use super::{mean, trailing, Indicator};

/// Coarse volume classification reported alongside the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeLevel {
    High,
    Low,
    Normal,
}

impl VolumeLevel {
    /// `High` above 1.5x average, `Low` below 0.5x, else `Normal`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.5 {
            Self::High
        } else if ratio < 0.5 {
            Self::Low
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub current: f64,
    pub average: f64,
    /// current / average; 0.0 when the average is 0.
    pub ratio: f64,
    pub level: VolumeLevel,
    pub window: usize,
}

#[derive(Debug, Clone)]
pub struct VolumeProfile {
    period: usize,
    name: String,
}

impl VolumeProfile {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volume period must be >= 1");
        Self {
            period,
            name: format!("volume_{period}"),
        }
    }
}

impl Indicator for VolumeProfile {
    type Output = VolumeStats;

    fn name(&self) -> &str {
        &self.name
    }

    fn period(&self) -> usize {
        self.period
    }

    fn compute(&self, values: &[f64]) -> VolumeStats {
        let window = trailing(values, self.period);
        let current = values.last().copied().unwrap_or(0.0);
        let average = mean(window);
        let ratio = if average > 0.0 { current / average } else { 0.0 };

        VolumeStats {
            current,
            average,
            ratio,
            level: VolumeLevel::from_ratio(ratio),
            window: window.len(),
        }
    }
}
