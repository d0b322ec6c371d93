//! firerisk - 固定重みニューラルネットによる火災リスク推定 CLI
//!
//! ```text
//! firerisk assess --temperature 40 --humidity 15
//! firerisk diagram --width 800 --height 600 > layout.json
//! firerisk simulate --preset worst-case --steps 5 --json
//! ```

mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use firerisk_core::{Extent, InputDelta, Preset, RawInputs, Simulator};

use crate::config::Config;
use crate::report::{AssessmentReport, DiagramReport, SimulationReport, StepRecord};

/// `simulate` の最大ステップ数
const MAX_STEPS: u32 = 10_000;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fire risk estimation with a fixed-weight neural network")]
struct Cli {
    /// TOML 設定ファイル（フラグが優先）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 入力からリスクを推定して内訳を表示
    Assess {
        #[command(flatten)]
        inputs: InputArgs,

        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// ネットワーク図のレイアウトを JSON で出力
    Diagram {
        #[command(flatten)]
        inputs: InputArgs,

        /// キャンバス幅
        #[arg(long)]
        width: Option<f32>,

        /// キャンバス高さ
        #[arg(long)]
        height: Option<f32>,

        /// 余白
        #[arg(long)]
        margin: Option<f32>,
    },
    /// 差分を繰り返し適用してリスクの推移を表示
    Simulate {
        #[command(flatten)]
        inputs: InputArgs,

        /// プリセット（current-trend, mitigation, worst-case）
        #[arg(long, conflicts_with_all = ["delta_temperature", "delta_precipitation", "delta_wind_speed", "delta_humidity"])]
        preset: Option<String>,

        /// 気温差分（-4..4）
        #[arg(long, allow_negative_numbers = true)]
        delta_temperature: Option<f32>,

        /// 降水量差分（-30..30）
        #[arg(long, allow_negative_numbers = true)]
        delta_precipitation: Option<f32>,

        /// 風速差分（-5..5）
        #[arg(long, allow_negative_numbers = true)]
        delta_wind_speed: Option<f32>,

        /// 湿度差分（-30..30）
        #[arg(long, allow_negative_numbers = true)]
        delta_humidity: Option<f32>,

        /// ステップ数（1..=10000）
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_STEPS as i64))]
        steps: Option<u32>,

        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
}

/// 入力値フラグ（未指定は設定ファイルの値）
#[derive(Args, Debug, Clone, Copy, Default)]
struct InputArgs {
    /// 気温 °C（0..50）
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f32>,

    /// 降水量 %（0..100）
    #[arg(long, allow_negative_numbers = true)]
    precipitation: Option<f32>,

    /// 風速 m/s（0..20）
    #[arg(long, allow_negative_numbers = true)]
    wind_speed: Option<f32>,

    /// 湿度 %（0..100）
    #[arg(long, allow_negative_numbers = true)]
    humidity: Option<f32>,
}

impl InputArgs {
    fn resolve(&self, base: RawInputs) -> Result<RawInputs> {
        let raw = RawInputs::new(
            self.temperature.unwrap_or(base.temperature),
            self.precipitation.unwrap_or(base.precipitation),
            self.wind_speed.unwrap_or(base.wind_speed),
            self.humidity.unwrap_or(base.humidity),
        );
        if raw.to_array().iter().any(|v| !v.is_finite()) {
            bail!("inputs must be finite numbers: {raw:?}");
        }
        if !raw.in_domain() {
            log::warn!("inputs out of range, clamping: {raw:?}");
        }
        Ok(raw.clamped())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Assess { inputs, json } => run_assess(&config, inputs, json),
        Command::Diagram {
            inputs,
            width,
            height,
            margin,
        } => run_diagram(&config, inputs, width, height, margin),
        Command::Simulate {
            inputs,
            preset,
            delta_temperature,
            delta_precipitation,
            delta_wind_speed,
            delta_humidity,
            steps,
            json,
        } => {
            let delta = [delta_temperature, delta_precipitation, delta_wind_speed, delta_humidity];
            run_simulate(&config, inputs, preset.as_deref(), delta, steps, json)
        }
    }
}

// ---------------------------------------------------------------------------
// assess
// ---------------------------------------------------------------------------

fn run_assess(config: &Config, inputs: InputArgs, json: bool) -> Result<()> {
    let raw = inputs.resolve(config.inputs.to_raw())?;
    let sim = Simulator::new(raw);
    let report = AssessmentReport::new(&sim);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// diagram
// ---------------------------------------------------------------------------

fn run_diagram(
    config: &Config,
    inputs: InputArgs,
    width: Option<f32>,
    height: Option<f32>,
    margin: Option<f32>,
) -> Result<()> {
    let raw = inputs.resolve(config.inputs.to_raw())?;
    let width = width.unwrap_or(config.diagram.width);
    let height = height.unwrap_or(config.diagram.height);
    let margin = margin.unwrap_or(config.diagram.margin);

    let extent = Extent::try_new(width, height)
        .and_then(|canvas| canvas.inset(margin))
        .context("invalid diagram canvas")?;

    let sim = Simulator::new(raw);
    let layout = sim.diagram(extent);
    log::debug!("layout: {} nodes, {} edges", layout.nodes.len(), layout.edges.len());

    let report = DiagramReport::new(&sim, width, height, margin, layout);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

fn run_simulate(
    config: &Config,
    inputs: InputArgs,
    preset: Option<&str>,
    delta: [Option<f32>; 4],
    steps: Option<u32>,
    json: bool,
) -> Result<()> {
    let raw = inputs.resolve(config.inputs.to_raw())?;
    let steps = steps.unwrap_or(config.simulation.steps);
    if !(1..=MAX_STEPS).contains(&steps) {
        bail!("simulation steps must be in 1..={MAX_STEPS}: {steps}");
    }

    let mut sim = Simulator::new(raw);
    let initial_risk = sim.last().risk.value();

    let preset = match preset {
        Some(name) => Some(name.parse::<Preset>()?),
        None if delta.iter().all(Option::is_none) => config.simulation.preset,
        None => None,
    };
    match preset {
        Some(p) => sim.apply_preset(p),
        None => {
            if delta.iter().flatten().any(|v| !v.is_finite()) {
                bail!("simulation delta must be finite numbers: {delta:?}");
            }
            let base = config.simulation.delta.to_delta();
            let [t, p, w, h] = delta;
            let requested = InputDelta::new(
                t.unwrap_or(base.temperature),
                p.unwrap_or(base.precipitation),
                w.unwrap_or(base.wind_speed),
                h.unwrap_or(base.humidity),
            );
            sim.set_delta(requested);
        }
    }
    if sim.delta().is_zero() {
        log::warn!("simulation delta is zero; risk will not change");
    }

    let mut records = Vec::new();
    for step in 1..=steps {
        let inference = sim.run_simulation().clone();
        records.push(StepRecord::new(step, *sim.inputs(), &inference));
    }

    let report =
        SimulationReport::new(&sim, preset.map(|p| p.to_string()), initial_risk, records);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
