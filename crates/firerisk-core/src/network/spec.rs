//! ネットワーク構成の型定義
//!
//! レイアウトエンジンは層構成をパラメータとして受け取るため、
//! 層サイズとラベルはここで値として表現する。

use serde::{Deserialize, Serialize};

use super::constants::{HIDDEN_COUNT, INPUT_COUNT, OUTPUT_COUNT};

/// 活性化関数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// 入力層（変換なし）
    Identity,
    /// `y = max(0, x)`
    Relu,
    /// `y = 1 / (1 + e^-x)`
    Sigmoid,
}

impl Activation {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Relu => "relu",
            Self::Sigmoid => "sigmoid",
        }
    }

    /// スカラー値に適用
    #[inline]
    pub fn apply(&self, x: f32) -> f32 {
        match self {
            Self::Identity => x,
            Self::Relu => x.max(0.0),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 1層分の仕様
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// ノード数（1以上を想定。0 の場合レイアウトはノードを生成しない）
    pub node_count: usize,
    /// 表示ラベル
    pub label: String,
}

impl LayerSpec {
    pub fn new(node_count: usize, label: impl Into<String>) -> Self {
        Self {
            node_count,
            label: label.into(),
        }
    }
}

/// アーキテクチャ仕様
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchitectureSpec {
    pub input: usize,
    pub hidden: usize,
    pub output: usize,
    pub hidden_activation: Activation,
    pub output_activation: Activation,
}

impl ArchitectureSpec {
    /// 火災リスクネットワーク（4→6→1, ReLU, Sigmoid）
    pub const FIRE_RISK: ArchitectureSpec = ArchitectureSpec {
        input: INPUT_COUNT,
        hidden: HIDDEN_COUNT,
        output: OUTPUT_COUNT,
        hidden_activation: Activation::Relu,
        output_activation: Activation::Sigmoid,
    };

    /// アーキテクチャ名を生成
    ///
    /// 例: "4-6-1-relu-sigmoid"
    pub fn name(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.input, self.hidden, self.output, self.hidden_activation, self.output_activation
        )
    }

    /// 入力層を含む層仕様の列
    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        vec![
            LayerSpec::new(self.input, "Input"),
            LayerSpec::new(self.hidden, "Hidden"),
            LayerSpec::new(self.output, "Output"),
        ]
    }
}

impl std::fmt::Display for ArchitectureSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
