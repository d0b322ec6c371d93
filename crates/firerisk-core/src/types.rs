//! 入力値・正規化値・リスク値の基本型

use serde::{Deserialize, Serialize};

use crate::assessment::RiskLevel;
use crate::network::constants::{INPUT_COUNT, INPUT_SCALES};

/// 入力値の有効範囲 `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// NaN は 0（範囲外なら近い端）に寄せる
    #[inline]
    pub fn clamp(&self, v: f32) -> f32 {
        if v.is_nan() {
            return 0.0_f32.clamp(self.min, self.max);
        }
        v.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        (self.min..=self.max).contains(&v)
    }
}

/// 気温 (°C)
pub const TEMPERATURE_RANGE: Range = Range::new(0.0, 50.0);
/// 降水量 (%)
pub const PRECIPITATION_RANGE: Range = Range::new(0.0, 100.0);
/// 風速 (m/s)
pub const WIND_SPEED_RANGE: Range = Range::new(0.0, 20.0);
/// 湿度 (%)
pub const HUMIDITY_RANGE: Range = Range::new(0.0, 100.0);

/// シミュレーション差分の範囲
pub const TEMPERATURE_DELTA_RANGE: Range = Range::new(-4.0, 4.0);
pub const PRECIPITATION_DELTA_RANGE: Range = Range::new(-30.0, 30.0);
pub const WIND_SPEED_DELTA_RANGE: Range = Range::new(-5.0, 5.0);
pub const HUMIDITY_DELTA_RANGE: Range = Range::new(-30.0, 30.0);

/// 生の環境入力値
///
/// 各フィールドは書き込み時にクランプされる前提。
/// [`crate::InferenceEngine::forward`] 自体は範囲チェックを行わない。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub temperature: f32,
    pub precipitation: f32,
    pub wind_speed: f32,
    pub humidity: f32,
}

impl Default for RawInputs {
    /// デモの初期値（25°C, 50%, 10m/s, 60%）
    fn default() -> Self {
        Self::new(25.0, 50.0, 10.0, 60.0)
    }
}

impl RawInputs {
    pub const fn new(temperature: f32, precipitation: f32, wind_speed: f32, humidity: f32) -> Self {
        Self {
            temperature,
            precipitation,
            wind_speed,
            humidity,
        }
    }

    /// 各フィールドを有効範囲にクランプした値を返す
    pub fn clamped(&self) -> Self {
        Self {
            temperature: TEMPERATURE_RANGE.clamp(self.temperature),
            precipitation: PRECIPITATION_RANGE.clamp(self.precipitation),
            wind_speed: WIND_SPEED_RANGE.clamp(self.wind_speed),
            humidity: HUMIDITY_RANGE.clamp(self.humidity),
        }
    }

    /// 全フィールドが有効範囲内か
    pub fn in_domain(&self) -> bool {
        TEMPERATURE_RANGE.contains(self.temperature)
            && PRECIPITATION_RANGE.contains(self.precipitation)
            && WIND_SPEED_RANGE.contains(self.wind_speed)
            && HUMIDITY_RANGE.contains(self.humidity)
    }

    /// 差分を加算し、入力範囲でクランプする
    pub fn apply_delta(&self, delta: &InputDelta) -> Self {
        Self {
            temperature: self.temperature + delta.temperature,
            precipitation: self.precipitation + delta.precipitation,
            wind_speed: self.wind_speed + delta.wind_speed,
            humidity: self.humidity + delta.humidity,
        }
        .clamped()
    }

    /// 入力層の並び順（気温, 降水量, 風速, 湿度）で配列化
    #[inline]
    pub fn to_array(&self) -> [f32; INPUT_COUNT] {
        [self.temperature, self.precipitation, self.wind_speed, self.humidity]
    }

    /// 固定スケール (50, 100, 20, 100) で割って正規化
    pub fn normalize(&self) -> NormalizedInputs {
        let raw = self.to_array();
        let mut out = [0.0f32; INPUT_COUNT];
        for (o, (v, scale)) in out.iter_mut().zip(raw.iter().zip(INPUT_SCALES.iter())) {
            *o = v / scale;
        }
        NormalizedInputs(out)
    }
}

/// 正規化済み入力（入力層の活性値）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedInputs(pub [f32; INPUT_COUNT]);

impl NormalizedInputs {
    #[inline]
    pub fn as_array(&self) -> &[f32; INPUT_COUNT] {
        &self.0
    }
}

/// シミュレーション用の入力差分
///
/// 各フィールドは書き込み時に差分範囲へクランプされる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDelta {
    pub temperature: f32,
    pub precipitation: f32,
    pub wind_speed: f32,
    pub humidity: f32,
}

impl InputDelta {
    /// 差分範囲にクランプして作成
    pub fn new(temperature: f32, precipitation: f32, wind_speed: f32, humidity: f32) -> Self {
        Self {
            temperature,
            precipitation,
            wind_speed,
            humidity,
        }
        .clamped()
    }

    pub fn clamped(&self) -> Self {
        Self {
            temperature: TEMPERATURE_DELTA_RANGE.clamp(self.temperature),
            precipitation: PRECIPITATION_DELTA_RANGE.clamp(self.precipitation),
            wind_speed: WIND_SPEED_DELTA_RANGE.clamp(self.wind_speed),
            humidity: HUMIDITY_DELTA_RANGE.clamp(self.humidity),
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.temperature, self.precipitation, self.wind_speed, self.humidity]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn is_zero(&self) -> bool {
        self.temperature == 0.0
            && self.precipitation == 0.0
            && self.wind_speed == 0.0
            && self.humidity == 0.0
    }
}

/// 外部公開するリスク値（0〜100 の整数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MAX: RiskScore = RiskScore(100);

    /// 補正後の未丸め値を `[0, 100]` にクランプして四捨五入
    pub fn from_unrounded(value: f32) -> Self {
        // NaN は `as u8` で 0 になる
        Self(value.clamp(0.0, 100.0).round() as u8)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn level(self) -> RiskLevel {
        RiskLevel::from_score(self)
    }
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
