//! リスク評価の補助情報
//!
//! 数値結果に添える定性的なレベルと、入力要因ごとのアラート。
//! 閾値は後処理補正と同じものを使う。

use serde::{Deserialize, Serialize};

use crate::network::constants::{
    DRYNESS_THRESHOLD, HEAT_THRESHOLD, PRECIPITATION_DAMPING_THRESHOLD, WIND_THRESHOLD,
};
use crate::types::{RawInputs, RiskScore};

/// Low / Moderate の境界
pub const MODERATE_RISK_FROM: u8 = 30;
/// Moderate / High の境界
pub const HIGH_RISK_FROM: u8 = 60;

/// リスクレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: RiskScore) -> Self {
        match score.value() {
            v if v < MODERATE_RISK_FROM => Self::Low,
            v if v < HIGH_RISK_FROM => Self::Moderate,
            _ => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// 説明文
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "low, suggesting safe conditions",
            Self::Moderate => "moderate, requiring regular monitoring",
            Self::High => "high, indicating dangerous conditions",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 入力要因ごとのアラート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorAlert {
    /// 気温が危険域
    CriticalHeat,
    /// 降水がリスクを抑制している
    PrecipitationSuppressing,
    /// 強風
    DangerousWind,
    /// 低湿度
    DangerouslyDry,
}

impl FactorAlert {
    /// 入力から発動中のアラートを列挙（気温, 降水量, 風速, 湿度の順）
    pub fn detect(raw: &RawInputs) -> Vec<FactorAlert> {
        let mut alerts = Vec::new();
        if raw.temperature > HEAT_THRESHOLD {
            alerts.push(Self::CriticalHeat);
        }
        if raw.precipitation > PRECIPITATION_DAMPING_THRESHOLD {
            alerts.push(Self::PrecipitationSuppressing);
        }
        if raw.wind_speed > WIND_THRESHOLD {
            alerts.push(Self::DangerousWind);
        }
        if raw.humidity < DRYNESS_THRESHOLD {
            alerts.push(Self::DangerouslyDry);
        }
        alerts
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::CriticalHeat => "Temperature at critical levels, significantly increasing risk",
            Self::PrecipitationSuppressing => {
                "Current precipitation levels are helping to suppress fire risk"
            }
            Self::DangerousWind => "High wind speeds are creating dangerous conditions",
            Self::DangerouslyDry => "Dangerously low humidity levels detected",
        }
    }

    /// リスクを押し上げる要因か
    pub fn is_aggravating(&self) -> bool {
        !matches!(self, Self::PrecipitationSuppressing)
    }
}
