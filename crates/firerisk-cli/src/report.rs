//! 出力レポート（テキスト / JSON）

use std::fmt::Write as _;

use chrono::Local;
use serde::Serialize;

use firerisk_core::{
    Adjustment, FactorAlert, Inference, NetworkLayout, NormalizedInputs, RawInputs, RiskLevel,
    Simulator, TrendSeries,
};

fn timestamp() -> String {
    Local::now().to_rfc3339()
}

/// `assess` の結果
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub generated_at: String,
    pub architecture: String,
    pub inputs: RawInputs,
    pub normalized: NormalizedInputs,
    pub hidden: Vec<f32>,
    pub base_risk: f32,
    pub adjustments: Vec<Adjustment>,
    pub risk: u8,
    pub level: RiskLevel,
    pub alerts: Vec<FactorAlert>,
}

impl AssessmentReport {
    pub fn new(sim: &Simulator) -> Self {
        let inputs = *sim.inputs();
        let inference = sim.last();
        Self {
            generated_at: timestamp(),
            architecture: sim.engine().architecture().name(),
            inputs,
            normalized: inputs.normalize(),
            hidden: inference.activations.layer(1).map(<[f32]>::to_vec).unwrap_or_default(),
            base_risk: inference.base_risk(),
            adjustments: inference.adjustments.clone(),
            risk: inference.risk.value(),
            level: inference.level(),
            alerts: FactorAlert::detect(&inputs),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let i = &self.inputs;
        let _ = writeln!(out, "network       : {}", self.architecture);
        let _ = writeln!(
            out,
            "inputs        : temperature={} precipitation={} wind_speed={} humidity={}",
            i.temperature, i.precipitation, i.wind_speed, i.humidity
        );
        let _ = writeln!(out, "normalized    : {}", join(self.normalized.as_array()));
        let _ = writeln!(out, "hidden        : {}", join(&self.hidden));
        let _ = writeln!(out, "base risk     : {:.2}", self.base_risk);
        if self.adjustments.is_empty() {
            let _ = writeln!(out, "adjustments   : none");
        } else {
            let names: Vec<&str> = self.adjustments.iter().map(Adjustment::as_str).collect();
            let _ = writeln!(out, "adjustments   : {}", names.join(", "));
        }
        let _ = writeln!(out, "risk          : {}% ({})", self.risk, self.level);
        let _ = writeln!(out, "               {}", self.level.description());
        for alert in &self.alerts {
            let mark = if alert.is_aggravating() { "!" } else { "-" };
            let _ = writeln!(out, "  {mark} {}", alert.message());
        }
        out
    }
}

/// `diagram` の結果
#[derive(Debug, Clone, Serialize)]
pub struct DiagramReport {
    pub generated_at: String,
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub risk: u8,
    pub layout: NetworkLayout,
}

impl DiagramReport {
    pub fn new(sim: &Simulator, width: f32, height: f32, margin: f32, layout: NetworkLayout) -> Self {
        Self {
            generated_at: timestamp(),
            width,
            height,
            margin,
            risk: sim.last().risk.value(),
            layout,
        }
    }
}

/// シミュレーション1ステップ分
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: u32,
    pub inputs: RawInputs,
    pub risk: u8,
    pub level: RiskLevel,
    pub adjustments: Vec<Adjustment>,
}

impl StepRecord {
    pub fn new(step: u32, inputs: RawInputs, inference: &Inference) -> Self {
        Self {
            step,
            inputs,
            risk: inference.risk.value(),
            level: inference.level(),
            adjustments: inference.adjustments.clone(),
        }
    }
}

/// `simulate` の結果
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: String,
    pub preset: Option<String>,
    pub initial_risk: u8,
    pub steps: Vec<StepRecord>,
    pub trend: TrendSeries,
}

impl SimulationReport {
    pub fn new(
        sim: &Simulator,
        preset: Option<String>,
        initial_risk: u8,
        steps: Vec<StepRecord>,
    ) -> Self {
        Self {
            generated_at: timestamp(),
            preset,
            initial_risk,
            steps,
            trend: sim.history().trend_series(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(preset) = &self.preset {
            let _ = writeln!(out, "preset        : {preset}");
        }
        let _ = writeln!(out, "initial risk  : {}%", self.initial_risk);
        for s in &self.steps {
            let i = &s.inputs;
            let _ = writeln!(
                out,
                "step {:>3}      : {:>3}% {:<8} (T={} P={} W={} H={})",
                s.step,
                s.risk,
                s.level.as_str(),
                i.temperature,
                i.precipitation,
                i.wind_speed,
                i.humidity
            );
        }
        let risks: Vec<String> = self.trend.risks.iter().map(u8::to_string).collect();
        let _ = writeln!(out, "trend         : {}", risks.join(" "));
        out
    }
}

fn join(values: &[f32]) -> String {
    values.iter().map(|v| format!("{v:.4}")).collect::<Vec<_>>().join(" ")
}
