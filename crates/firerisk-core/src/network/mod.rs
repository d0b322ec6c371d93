//! 火災リスクネットワーク
//!
//! - `constants`: 層サイズ・固定重み・補正閾値
//! - `layers`: Dense / ReLU / Sigmoid
//! - `spec`: 層構成・アーキテクチャ仕様
//! - `adjust`: ネットワーク出力の後処理補正
//! - `engine`: 正規化 → 順伝播 → 補正をまとめた [`InferenceEngine`]

pub mod adjust;
pub mod constants;
pub mod engine;
pub mod layers;
pub mod spec;

pub use adjust::{Adjusted, Adjustment};
pub use engine::{ActivationSet, FireRiskNetwork, Inference, InferenceEngine, WeightMatrix};
pub use layers::{Dense, Relu, Sigmoid};
pub use spec::{Activation, ArchitectureSpec, LayerSpec};
