//! 森林火災リスク推論 + ネットワーク図レイアウトエンジン
//!
//! 4つの環境値（気温・降水量・風速・湿度）を固定重みの 4→6→1 ネットワークで
//! 0〜100 のリスク値に変換し、各層の活性値をネットワーク図として配置する。
//!
//! - [`network`]: 正規化・順伝播・後処理補正（[`InferenceEngine`]）
//! - [`layout`]: 層構成 + 活性値 + 重みからノード/エッジ座標を計算（[`LayoutEngine`]）
//! - [`history`]: 直近20件のリスク履歴（トレンドチャート用）
//! - [`scenario`]: プリセット差分と入力差分のクランプ
//! - [`assessment`]: リスクレベル・要因アラート
//! - [`session`]: 入力変更ごとに明示的に再計算するオーケストレータ
//!
//! # 使用例
//!
//! ```
//! use firerisk_core::{Extent, InferenceEngine, LayoutEngine, RawInputs};
//!
//! let engine = InferenceEngine::new();
//! let result = engine.forward(&RawInputs::new(25.0, 50.0, 10.0, 60.0));
//! assert_eq!(result.risk.value(), 62);
//!
//! let layout = LayoutEngine::new().layout(
//!     &engine.layer_specs(),
//!     Some(&result.activations),
//!     Some(&engine.weight_matrices()),
//!     Extent::new(460.0, 360.0),
//! );
//! assert_eq!(layout.nodes.len(), 11);
//! assert_eq!(layout.edges.len(), 30);
//! ```

pub mod assessment;
pub mod error;
pub mod history;
pub mod layout;
pub mod network;
pub mod scenario;
pub mod session;
pub mod types;

pub use assessment::{FactorAlert, RiskLevel};
pub use error::{Error, Result};
pub use history::{HISTORY_CAPACITY, HistoryEntry, RiskHistory, TrendSeries};
pub use layout::{Extent, LayoutEngine, NetworkLayout, PositionedEdge, PositionedNode};
pub use network::{
    ActivationSet, Adjustment, Inference, InferenceEngine, LayerSpec, WeightMatrix,
};
pub use scenario::Preset;
pub use session::Simulator;
pub use types::{InputDelta, NormalizedInputs, RawInputs, RiskScore};
