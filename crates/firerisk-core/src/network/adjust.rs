//! ネットワーク出力に対するルールベースの後処理補正
//!
//! 補正は固定順で適用し、各倍率は **補正途中の値** に掛かる（複利的に効く）。
//! 元の基礎リスクに個別に掛ける方式ではない点に注意。

use serde::{Deserialize, Serialize};

use super::constants::{
    DRYNESS_FACTOR, DRYNESS_THRESHOLD, HEAT_FACTOR, HEAT_THRESHOLD, PRECIPITATION_DAMPING_FACTOR,
    PRECIPITATION_DAMPING_THRESHOLD, WIND_DIVISOR, WIND_THRESHOLD,
};
use crate::types::RawInputs;

/// 後処理補正の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// 降水量 > 70: ×0.3
    PrecipitationDamping,
    /// 気温 > 35: ×1.2
    HeatAmplification,
    /// 風速 > 15: ×(1 + (風速 - 15) / 10)
    WindAmplification,
    /// 湿度 < 20: ×1.3
    DrynessAmplification,
}

impl Adjustment {
    /// 適用順
    pub const ORDER: [Adjustment; 4] = [
        Adjustment::PrecipitationDamping,
        Adjustment::HeatAmplification,
        Adjustment::WindAmplification,
        Adjustment::DrynessAmplification,
    ];

    /// 入力に対してこの補正が発動するか
    pub fn triggers(&self, raw: &RawInputs) -> bool {
        match self {
            Self::PrecipitationDamping => raw.precipitation > PRECIPITATION_DAMPING_THRESHOLD,
            Self::HeatAmplification => raw.temperature > HEAT_THRESHOLD,
            Self::WindAmplification => raw.wind_speed > WIND_THRESHOLD,
            Self::DrynessAmplification => raw.humidity < DRYNESS_THRESHOLD,
        }
    }

    /// 倍率（発動条件は呼び出し側で確認済みとする）
    pub fn factor(&self, raw: &RawInputs) -> f32 {
        match self {
            Self::PrecipitationDamping => PRECIPITATION_DAMPING_FACTOR,
            Self::HeatAmplification => HEAT_FACTOR,
            Self::WindAmplification => 1.0 + (raw.wind_speed - WIND_THRESHOLD) / WIND_DIVISOR,
            Self::DrynessAmplification => DRYNESS_FACTOR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrecipitationDamping => "precipitation_damping",
            Self::HeatAmplification => "heat_amplification",
            Self::WindAmplification => "wind_amplification",
            Self::DrynessAmplification => "dryness_amplification",
        }
    }
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 補正結果（未クランプ・未丸め）
#[derive(Debug, Clone, PartialEq)]
pub struct Adjusted {
    pub value: f32,
    /// 発動した補正（適用順）
    pub applied: Vec<Adjustment>,
}

/// 基礎リスクに補正を順に適用する
// NOTE: 複利適用が意図的かは未確認。観測された挙動としてそのまま保持している。
pub fn apply(base_risk: f32, raw: &RawInputs) -> Adjusted {
    let mut value = base_risk;
    let mut applied = Vec::new();

    for adj in Adjustment::ORDER {
        if adj.triggers(raw) {
            let factor = adj.factor(raw);
            log::trace!("adjustment {adj}: {value} x {factor}");
            value *= factor;
            applied.push(adj);
        }
    }

    Adjusted { value, applied }
}
