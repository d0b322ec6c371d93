//! プリセットシナリオ
//!
//! 各プリセットは現在の入力に加算する [`InputDelta`]。

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::InputDelta;

/// 名前付きプリセット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// 現状のトレンドが続く場合
    CurrentTrend,
    /// 緩和策を講じた場合
    Mitigation,
    /// 最悪ケース
    WorstCase,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::CurrentTrend, Preset::Mitigation, Preset::WorstCase];

    /// 差分（気温, 降水量, 風速, 湿度）
    pub fn delta(&self) -> InputDelta {
        match self {
            Self::CurrentTrend => InputDelta::new(2.0, -10.0, 2.0, -10.0),
            Self::Mitigation => InputDelta::new(1.0, 10.0, 0.0, 5.0),
            Self::WorstCase => InputDelta::new(4.0, -30.0, 5.0, -30.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentTrend => "current-trend",
            Self::Mitigation => "mitigation",
            Self::WorstCase => "worst-case",
        }
    }

    /// 表示名
    pub fn title(&self) -> &'static str {
        match self {
            Self::CurrentTrend => "Current Trend",
            Self::Mitigation => "Mitigation Scenario",
            Self::WorstCase => "Worst Case",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}
