//! Trend assessment: direction, strength, stage, and the recommendation
//! derived from direction and stage.

use serde::{Deserialize, Serialize};

use crate::signals::{distance_ratio, Strength};
use crate::snapshot::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    StrongUptrend,
    Uptrend,
    Neutral,
    Downtrend,
    StrongDowntrend,
}

impl TrendDirection {
    pub fn is_up(self) -> bool {
        matches!(self, Self::StrongUptrend | Self::Uptrend)
    }

    pub fn is_down(self) -> bool {
        matches!(self, Self::StrongDowntrend | Self::Downtrend)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Early,
    Middle,
    Late,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAssessment {
    pub direction: TrendDirection,
    pub strength: Strength,
    pub stage: Stage,
    pub recommendation: Recommendation,
}

pub fn assess_trend(snapshot: &IndicatorSnapshot) -> TrendAssessment {
    let ma = &snapshot.moving_averages;
    let rsi = snapshot.rsi.value;

    let direction = direction(ma.price, ma.sma_20, ma.sma_50, rsi, snapshot.macd.value);
    let strength = strength(ma.price, ma.sma_50);
    let stage = stage(direction, rsi);

    TrendAssessment {
        direction,
        strength,
        stage,
        recommendation: recommendation(direction, stage),
    }
}

fn direction(price: f64, sma_20: f64, sma_50: f64, rsi: f64, macd: f64) -> TrendDirection {
    if price > sma_20 && sma_20 > sma_50 && rsi > 50.0 && macd > 0.0 {
        TrendDirection::StrongUptrend
    } else if price > sma_20 && rsi > 50.0 {
        TrendDirection::Uptrend
    } else if price < sma_20 && sma_20 < sma_50 && rsi < 50.0 && macd < 0.0 {
        TrendDirection::StrongDowntrend
    } else if price < sma_20 && rsi < 50.0 {
        TrendDirection::Downtrend
    } else {
        TrendDirection::Neutral
    }
}

fn strength(price: f64, sma_50: f64) -> Strength {
    let distance = distance_ratio(price, sma_50);
    if distance > 0.10 {
        Strength::Strong
    } else if distance > 0.05 {
        Strength::Moderate
    } else {
        Strength::Weak
    }
}

fn stage(direction: TrendDirection, rsi: f64) -> Stage {
    if direction.is_up() {
        if rsi > 70.0 {
            Stage::Late
        } else if rsi > 50.0 {
            Stage::Middle
        } else {
            Stage::Early
        }
    } else if direction.is_down() {
        if rsi < 30.0 {
            Stage::Late
        } else if rsi < 50.0 {
            Stage::Middle
        } else {
            Stage::Early
        }
    } else {
        Stage::Unknown
    }
}

fn recommendation(direction: TrendDirection, stage: Stage) -> Recommendation {
    use Recommendation::*;
    match (direction, stage) {
        (TrendDirection::Neutral, _) => Neutral,
        (_, Stage::Late | Stage::Unknown) => Hold,
        (TrendDirection::StrongUptrend, Stage::Early) => StrongBuy,
        (TrendDirection::StrongUptrend | TrendDirection::Uptrend, _) => Buy,
        (TrendDirection::StrongDowntrend, Stage::Early) => StrongSell,
        (TrendDirection::StrongDowntrend | TrendDirection::Downtrend, _) => Sell,
    }
}
