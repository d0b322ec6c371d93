//! InferenceEngine - 固定重み 4→6→1 ネットワークの推論
//!
//! ## パイプライン
//!
//! ```text
//! RawInputs ─ 正規化 (÷50, ÷100, ÷20, ÷100) → 入力層 [4]
//!   Dense 4→6 + ReLU                          → 隠れ層 [6]
//!   Dense 6→1 + Sigmoid                       → 出力層 [1]
//!   ×100 → 後処理補正（複利）→ [0,100] クランプ → 四捨五入
//! ```
//!
//! 全層の活性値は [`ActivationSet`] として毎回まとめて返す
//! （中間出力を取るための2回目の推論は行わない）。

use serde::{Deserialize, Serialize};

use super::adjust::{self, Adjustment};
use super::constants::{
    HIDDEN_BIASES, HIDDEN_COUNT, HIDDEN_TO_OUTPUT, INPUT_COUNT, INPUT_TO_HIDDEN, OUTPUT_BIASES,
    OUTPUT_COUNT, RISK_SCALE,
};
use super::layers::{Dense, Relu, Sigmoid};
use super::spec::{ArchitectureSpec, LayerSpec};
use crate::assessment::RiskLevel;
use crate::types::{RawInputs, RiskScore};

/// 重み行列 `[入力ノード][出力ノード]`
pub type WeightMatrix = Vec<Vec<f32>>;

/// 層ごとの活性値（入力層を含む）
///
/// `[0]` は正規化済み入力、`[i]` は第 i 層の活性化関数出力。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationSet(Vec<Vec<f32>>);

impl ActivationSet {
    pub fn new(layers: Vec<Vec<f32>>) -> Self {
        Self(layers)
    }

    /// 層数
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn layers(&self) -> &[Vec<f32>] {
        &self.0
    }

    pub fn layer(&self, index: usize) -> Option<&[f32]> {
        self.0.get(index).map(Vec::as_slice)
    }

    /// 範囲外は `None`
    #[inline]
    pub fn value(&self, layer: usize, index: usize) -> Option<f32> {
        self.0.get(layer).and_then(|l| l.get(index)).copied()
    }

    /// 最終層の活性値
    pub fn output(&self) -> Option<&[f32]> {
        self.0.last().map(Vec::as_slice)
    }
}

/// 固定重みの火災リスクネットワーク
#[derive(Debug, Clone, PartialEq)]
pub struct FireRiskNetwork {
    /// 入力 → 隠れ層 (4 → 6)
    pub hidden: Dense<INPUT_COUNT, HIDDEN_COUNT>,
    /// 隠れ層 → 出力 (6 → 1)
    pub output: Dense<HIDDEN_COUNT, OUTPUT_COUNT>,
}

impl FireRiskNetwork {
    pub const fn new(
        hidden: Dense<INPUT_COUNT, HIDDEN_COUNT>,
        output: Dense<HIDDEN_COUNT, OUTPUT_COUNT>,
    ) -> Self {
        Self { hidden, output }
    }

    /// 組み込みの固定重み
    pub const fn fixed() -> Self {
        Self::new(
            Dense::new(INPUT_TO_HIDDEN, HIDDEN_BIASES),
            Dense::new(HIDDEN_TO_OUTPUT, OUTPUT_BIASES),
        )
    }

    /// 正規化済み入力から全層の活性値を計算
    pub fn propagate(
        &self,
        input: &[f32; INPUT_COUNT],
    ) -> ([f32; HIDDEN_COUNT], [f32; OUTPUT_COUNT]) {
        let mut hidden = [0.0f32; HIDDEN_COUNT];
        self.hidden.propagate(input, &mut hidden);
        Relu::propagate(&mut hidden);

        let mut output = [0.0f32; OUTPUT_COUNT];
        self.output.propagate(&hidden, &mut output);
        Sigmoid::propagate(&mut output);

        (hidden, output)
    }
}

impl Default for FireRiskNetwork {
    fn default() -> Self {
        Self::fixed()
    }
}

/// 推論結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    /// 補正・クランプ・丸め後のリスク値
    pub risk: RiskScore,
    /// [正規化入力, 隠れ層, 出力層]
    pub activations: ActivationSet,
    /// 発動した後処理補正（適用順）
    pub adjustments: Vec<Adjustment>,
}

impl Inference {
    /// 補正前のリスク（出力活性値 × 100）
    pub fn base_risk(&self) -> f32 {
        self.activations
            .output()
            .and_then(|o| o.first())
            .map_or(0.0, |v| v * RISK_SCALE)
    }

    pub fn level(&self) -> RiskLevel {
        self.risk.level()
    }
}

/// 推論エンジン
///
/// 重みは構築時に固定され、`forward` は副作用のない純粋関数。
#[derive(Debug, Clone, Default)]
pub struct InferenceEngine {
    network: FireRiskNetwork,
}

impl InferenceEngine {
    /// 組み込みの固定重みで作成
    pub fn new() -> Self {
        Self::with_network(FireRiskNetwork::fixed())
    }

    /// 任意の固定重みで作成（同一形状 4→6→1）
    pub fn with_network(network: FireRiskNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &FireRiskNetwork {
        &self.network
    }

    pub fn architecture(&self) -> ArchitectureSpec {
        ArchitectureSpec::FIRE_RISK
    }

    /// 図描画用の層構成
    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        self.architecture().layer_specs()
    }

    /// 図描画用の重み行列（層遷移ごと）
    pub fn weight_matrices(&self) -> Vec<WeightMatrix> {
        vec![self.network.hidden.to_weight_matrix(), self.network.output.to_weight_matrix()]
    }

    /// 推論
    ///
    /// 入力は呼び出し側でクランプ済みであることが前提（範囲チェックはしない）。
    pub fn forward(&self, raw: &RawInputs) -> Inference {
        let normalized = raw.normalize();
        let (hidden, output) = self.network.propagate(normalized.as_array());

        let base_risk = output[0] * RISK_SCALE;
        let adjusted = adjust::apply(base_risk, raw);
        let risk = RiskScore::from_unrounded(adjusted.value);

        log::debug!(
            "forward: inputs={raw:?} base_risk={base_risk:.3} adjusted={:.3} risk={risk} applied={:?}",
            adjusted.value,
            adjusted.applied
        );

        Inference {
            risk,
            activations: ActivationSet::new(vec![
                normalized.as_array().to_vec(),
                hidden.to_vec(),
                output.to_vec(),
            ]),
            adjustments: adjusted.applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigmoid(x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }

    /// 参照実装: 行列を素直にループで計算
    fn reference_base_risk(normalized: [f32; 4]) -> f32 {
        let mut hidden = [0.0f32; 6];
        for (j, h) in hidden.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (i, n) in normalized.iter().enumerate() {
                sum += n * INPUT_TO_HIDDEN[i][j];
            }
            *h = sum.max(0.0);
        }
        let mut out = 0.0f32;
        for (j, h) in hidden.iter().enumerate() {
            out += h * HIDDEN_TO_OUTPUT[j][0];
        }
        sigmoid(out) * 100.0
    }

    #[test]
    fn test_regression_fixture_default_inputs() {
        let engine = InferenceEngine::new();
        let result = engine.forward(&RawInputs::new(25.0, 50.0, 10.0, 60.0));

        assert_eq!(result.activations.layer(0).unwrap(), &[0.5, 0.5, 0.5, 0.6]);
        assert!(result.adjustments.is_empty());

        // 隠れ層: [0.08, 0.10, 0.12, 0.14, 0.16, 0.18]
        let expected_hidden = [0.08f32, 0.10, 0.12, 0.14, 0.16, 0.18];
        let hidden = result.activations.layer(1).unwrap();
        for (h, e) in hidden.iter().zip(expected_hidden.iter()) {
            assert!((h - e).abs() < 1e-5, "hidden {h} != {e}");
        }

        // 出力層の事前活性 0.476 → sigmoid ≈ 0.6168
        let expected = reference_base_risk([0.5, 0.5, 0.5, 0.6]);
        assert!((result.base_risk() - expected).abs() < 1e-4);
        assert!((result.base_risk() - 61.68).abs() < 0.01);
        assert_eq!(result.risk.value(), expected.clamp(0.0, 100.0).round() as u8);
        assert_eq!(result.risk.value(), 62);
    }

    #[test]
    fn test_all_three_amplifications_fire() {
        let engine = InferenceEngine::new();
        let result = engine.forward(&RawInputs::new(40.0, 20.0, 18.0, 15.0));
        assert_eq!(
            result.adjustments,
            vec![
                Adjustment::HeatAmplification,
                Adjustment::WindAmplification,
                Adjustment::DrynessAmplification,
            ]
        );
        // 基礎リスク ≈ 99.98 に ×1.2×1.3×1.3 → 上限でクランプ
        assert_eq!(result.risk, RiskScore::MAX);
    }

    #[test]
    fn test_activation_set_shape() {
        let result = InferenceEngine::new().forward(&RawInputs::default());
        assert_eq!(result.activations.len(), 3);
        assert_eq!(result.activations.layer(0).map(<[f32]>::len), Some(4));
        assert_eq!(result.activations.layer(1).map(<[f32]>::len), Some(6));
        assert_eq!(result.activations.layer(2).map(<[f32]>::len), Some(1));
        assert_eq!(result.activations.value(3, 0), None);
    }

    #[test]
    fn test_forward_is_deterministic() {
        let engine = InferenceEngine::new();
        let raw = RawInputs::new(33.0, 12.5, 7.0, 41.0);
        assert_eq!(engine.forward(&raw), engine.forward(&raw));
    }

    #[test]
    fn test_risk_in_range_and_finite_over_domain() {
        let engine = InferenceEngine::new();
        for t in (0..=50).step_by(5) {
            for p in (0..=100).step_by(10) {
                for w in (0..=20).step_by(2) {
                    for h in (0..=100).step_by(10) {
                        let raw = RawInputs::new(t as f32, p as f32, w as f32, h as f32);
                        let result = engine.forward(&raw);
                        assert!(result.risk.value() <= 100, "{raw:?}");
                        assert!(result.base_risk().is_finite(), "{raw:?}");
                        for layer in result.activations.layers() {
                            assert!(layer.iter().all(|v| v.is_finite()), "{raw:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_heavy_precipitation_strictly_lowers_risk() {
        let engine = InferenceEngine::new();
        for t in (0..=50).step_by(5) {
            for w in (0..=20).step_by(4) {
                for h in (0..=100).step_by(20) {
                    let at_limit = engine.forward(&RawInputs::new(t as f32, 70.0, w as f32, h as f32));
                    for p in [71.0, 85.0, 100.0] {
                        let wet = engine.forward(&RawInputs::new(t as f32, p, w as f32, h as f32));
                        assert!(
                            wet.risk < at_limit.risk,
                            "t={t} p={p} w={w} h={h}: {} !< {}",
                            wet.risk,
                            at_limit.risk
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_strong_wind_raises_risk_unless_saturated() {
        let engine = InferenceEngine::new();
        for t in (0..=50).step_by(5) {
            for p in (0..=100).step_by(10) {
                for h in (0..=100).step_by(20) {
                    let calm = engine.forward(&RawInputs::new(t as f32, p as f32, 15.0, h as f32));
                    for w in [16.0, 18.0, 20.0] {
                        let windy = engine.forward(&RawInputs::new(t as f32, p as f32, w, h as f32));
                        if calm.risk == RiskScore::MAX {
                            assert_eq!(windy.risk, RiskScore::MAX);
                        } else {
                            assert!(
                                windy.risk > calm.risk,
                                "t={t} p={p} w={w} h={h}: {} !> {}",
                                windy.risk,
                                calm.risk
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_custom_network() {
        // 全重み 0 → 出力 sigmoid(0) = 0.5 → リスク 50
        let zero = FireRiskNetwork::new(
            Dense::new([[0.0; HIDDEN_COUNT]; INPUT_COUNT], [0.0; HIDDEN_COUNT]),
            Dense::new([[0.0; OUTPUT_COUNT]; HIDDEN_COUNT], [0.0; OUTPUT_COUNT]),
        );
        let engine = InferenceEngine::with_network(zero);
        let result = engine.forward(&RawInputs::new(30.0, 0.0, 20.0, 30.0));
        assert_eq!(result.base_risk(), 50.0);
        // 風速20 → ×1.5 のみ発動
        assert_eq!(result.adjustments, vec![Adjustment::WindAmplification]);
        assert_eq!(result.risk.value(), 75);
    }

    #[test]
    fn test_weight_matrices_match_topology() {
        let engine = InferenceEngine::new();
        let weights = engine.weight_matrices();
        let specs = engine.layer_specs();
        assert_eq!(weights.len(), specs.len() - 1);
        for (i, m) in weights.iter().enumerate() {
            assert_eq!(m.len(), specs[i].node_count);
            assert!(m.iter().all(|row| row.len() == specs[i + 1].node_count));
        }
        assert_eq!(weights[0][1][0], -2.0);
        assert_eq!(weights[1][5][0], 0.2);
    }
}
