//! Simulator - 入力・差分・履歴を保持するオーケストレータ
//!
//! 入力が変わるたびに呼び出し側が明示的に再計算する方式。
//! 暗黙の依存追跡は行わない。1回の再計算で履歴は必ず1件増える。

use crate::history::{HistoryEntry, RiskHistory};
use crate::layout::{Extent, LayoutEngine, NetworkLayout};
use crate::network::{Inference, InferenceEngine};
use crate::scenario::Preset;
use crate::types::{InputDelta, RawInputs};

/// 1セッション分の状態
#[derive(Debug, Clone)]
pub struct Simulator {
    engine: InferenceEngine,
    layout_engine: LayoutEngine,
    inputs: RawInputs,
    delta: InputDelta,
    history: RiskHistory,
    last: Inference,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(RawInputs::default())
    }
}

impl Simulator {
    /// 初期入力で作成し、初回の推論結果を履歴に記録する
    pub fn new(inputs: RawInputs) -> Self {
        Self::with_engine(InferenceEngine::new(), inputs)
    }

    pub fn with_engine(engine: InferenceEngine, inputs: RawInputs) -> Self {
        let inputs = inputs.clamped();
        let last = engine.forward(&inputs);
        let mut history = RiskHistory::new();
        history.push(HistoryEntry {
            inputs,
            risk: last.risk,
        });
        Self {
            engine,
            layout_engine: LayoutEngine::new(),
            inputs,
            delta: InputDelta::default(),
            history,
            last,
        }
    }

    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    pub fn delta(&self) -> &InputDelta {
        &self.delta
    }

    pub fn history(&self) -> &RiskHistory {
        &self.history
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// 直近の推論結果
    pub fn last(&self) -> &Inference {
        &self.last
    }

    /// 入力を置き換えて再計算
    pub fn set_inputs(&mut self, inputs: RawInputs) -> &Inference {
        self.inputs = inputs.clamped();
        self.recompute()
    }

    /// 保留中の差分を設定（再計算はしない）
    pub fn set_delta(&mut self, delta: InputDelta) {
        self.delta = delta.clamped();
    }

    /// プリセットの差分を保留中の差分として設定
    pub fn apply_preset(&mut self, preset: Preset) {
        log::debug!("apply preset {preset}");
        self.set_delta(preset.delta());
    }

    /// 保留中の差分を入力に加算して再計算
    pub fn run_simulation(&mut self) -> &Inference {
        self.inputs = self.inputs.apply_delta(&self.delta);
        self.recompute()
    }

    /// 現在の入力で推論し、履歴に記録する
    pub fn recompute(&mut self) -> &Inference {
        self.last = self.engine.forward(&self.inputs);
        self.history.push(HistoryEntry {
            inputs: self.inputs,
            risk: self.last.risk,
        });
        log::info!(
            "risk {} ({}) history={}",
            self.last.risk,
            self.last.level(),
            self.history.len()
        );
        &self.last
    }

    /// 直近の推論結果でネットワーク図をレイアウト
    pub fn diagram(&self, extent: Extent) -> NetworkLayout {
        let weights = self.engine.weight_matrices();
        self.layout_engine.layout(
            &self.engine.layer_specs(),
            Some(&self.last.activations),
            Some(&weights),
            extent,
        )
    }
}
