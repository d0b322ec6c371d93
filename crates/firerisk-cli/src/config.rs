//! `--config` で読み込む TOML 設定
//!
//! ```toml
//! [inputs]
//! temperature = 30.0
//! humidity = 40.0
//!
//! [diagram]
//! width = 800.0
//!
//! [simulation]
//! preset = "worst-case"
//! steps = 3
//! ```
//!
//! 全フィールドにデフォルトがあり、省略したキーはデフォルト値になる。

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use firerisk_core::{InputDelta, Preset, RawInputs};

/// 設定ファイル全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub inputs: InputsConfig,
    pub diagram: DiagramConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    pub temperature: f32,
    pub precipitation: f32,
    pub wind_speed: f32,
    pub humidity: f32,
}

impl Default for InputsConfig {
    fn default() -> Self {
        let raw = RawInputs::default();
        Self {
            temperature: raw.temperature,
            precipitation: raw.precipitation,
            wind_speed: raw.wind_speed,
            humidity: raw.humidity,
        }
    }
}

impl InputsConfig {
    pub fn to_raw(self) -> RawInputs {
        RawInputs::new(self.temperature, self.precipitation, self.wind_speed, self.humidity)
    }
}

/// 図のキャンバス
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 400.0,
            margin: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// 指定時は `delta` より優先
    pub preset: Option<Preset>,
    pub steps: u32,
    pub delta: DeltaConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            preset: None,
            steps: 1,
            delta: DeltaConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeltaConfig {
    pub temperature: f32,
    pub precipitation: f32,
    pub wind_speed: f32,
    pub humidity: f32,
}

impl DeltaConfig {
    pub fn to_delta(self) -> InputDelta {
        InputDelta::new(self.temperature, self.precipitation, self.wind_speed, self.humidity)
    }
}

impl Config {
    /// パス未指定ならデフォルト設定
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 数値フィールドは有限値のみ（TOML は nan / inf を受け付ける）
    fn validate(&self) -> Result<()> {
        let i = &self.inputs;
        let d = &self.diagram;
        let delta = &self.simulation.delta;
        let fields = [
            ("inputs.temperature", i.temperature),
            ("inputs.precipitation", i.precipitation),
            ("inputs.wind_speed", i.wind_speed),
            ("inputs.humidity", i.humidity),
            ("diagram.width", d.width),
            ("diagram.height", d.height),
            ("diagram.margin", d.margin),
            ("simulation.delta.temperature", delta.temperature),
            ("simulation.delta.precipitation", delta.precipitation),
            ("simulation.delta.wind_speed", delta.wind_speed),
            ("simulation.delta.humidity", delta.humidity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                bail!("{name} must be a finite number: {value}");
            }
        }
        Ok(())
    }
}
