//! ネットワーク図のレイアウト
//!
//! 層構成 + 活性値 + 重み + 描画領域から、ノード座標とエッジを計算する。
//! 描画（SVG / canvas、色補間）は呼び出し側の責務。
//!
//! ## 配置
//!
//! ```text
//! x(layer i)   = i * width / (layer_count - 1)   （1層のみなら width / 2）
//! y(node j/n)  = (j + 1) * height / (n + 1)
//! ```
//!
//! ノード数の異なる層は上下マージンが均等になるため、縦方向には揃わない。
//!
//! ## 順序
//!
//! 出力順序自体が契約: ノードは層優先→層内インデックス順、
//! エッジは層遷移優先→始点順→終点順。差分描画やアニメーションの同一性に使われる。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::network::{ActivationSet, LayerSpec, WeightMatrix};

/// エッジ太さ = |weight| * この値
pub const DEFAULT_EDGE_SCALE: f32 = 2.0;

/// 描画領域（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// 有限かつ非負であることを検証して作成
    pub fn try_new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(Error::InvalidExtent { width, height });
        }
        Ok(Self { width, height })
    }

    /// 外側キャンバスから四辺に `margin` を取った内側の描画領域
    pub fn inset(&self, margin: f32) -> Result<Self> {
        let width = self.width - 2.0 * margin;
        let height = self.height - 2.0 * margin;
        if !margin.is_finite() || margin < 0.0 || width < 0.0 || height < 0.0 {
            return Err(Error::MarginTooLarge {
                margin,
                width: self.width,
                height: self.height,
            });
        }
        Self::try_new(width, height)
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// 配置済みノード
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub x: f32,
    pub y: f32,
    pub layer_index: usize,
    pub index_in_layer: usize,
    /// 活性値（データがなければ 0）
    pub value: f32,
}

/// 配置済みエッジ
///
/// `from` / `to` は [`NetworkLayout::nodes`] へのインデックス。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedEdge {
    pub from: usize,
    pub to: usize,
    /// 重み（データがなければ 0）。ノード値には影響しない
    pub weight: f32,
    /// 描画用の線幅 `|weight| * scale`
    pub thickness: f32,
}

/// レイアウト結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkLayout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PositionedEdge>,
}

impl NetworkLayout {
    /// エッジの両端ノード
    pub fn endpoints(&self, edge: &PositionedEdge) -> Option<(&PositionedNode, &PositionedNode)> {
        Some((self.nodes.get(edge.from)?, self.nodes.get(edge.to)?))
    }

    /// 指定層のノード
    pub fn layer_nodes(&self, layer_index: usize) -> impl Iterator<Item = &PositionedNode> {
        self.nodes.iter().filter(move |n| n.layer_index == layer_index)
    }
}

/// レイアウトエンジン
///
/// 入力4つの純粋関数。同じ入力に対して常に同じ順序・同じ値を返す。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    edge_scale: f32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub const fn new() -> Self {
        Self {
            edge_scale: DEFAULT_EDGE_SCALE,
        }
    }

    pub const fn with_edge_scale(edge_scale: f32) -> Self {
        Self { edge_scale }
    }

    pub fn edge_scale(&self) -> f32 {
        self.edge_scale
    }

    /// レイアウトを計算
    ///
    /// `activations` / `weights` が欠けている、またはインデックスが範囲外の場合は
    /// 0 として扱う（エラーにはしない）。図は常に描画可能な状態を保つ。
    pub fn layout(
        &self,
        layers: &[LayerSpec],
        activations: Option<&ActivationSet>,
        weights: Option<&[WeightMatrix]>,
        extent: Extent,
    ) -> NetworkLayout {
        let layer_count = layers.len();
        let total_nodes: usize = layers.iter().map(|l| l.node_count).sum();
        let mut nodes = Vec::with_capacity(total_nodes);
        // 各層の先頭ノードのインデックス
        let mut layer_starts = Vec::with_capacity(layer_count);

        for (i, layer) in layers.iter().enumerate() {
            layer_starts.push(nodes.len());
            let x = layer_x(i, layer_count, extent.width);
            let node_spacing = extent.height / (layer.node_count + 1) as f32;
            for j in 0..layer.node_count {
                nodes.push(PositionedNode {
                    x,
                    y: (j + 1) as f32 * node_spacing,
                    layer_index: i,
                    index_in_layer: j,
                    value: activations.and_then(|a| a.value(i, j)).unwrap_or(0.0),
                });
            }
        }

        let edge_count: usize = layers.windows(2).map(|w| w[0].node_count * w[1].node_count).sum();
        let mut edges = Vec::with_capacity(edge_count);

        for i in 0..layer_count.saturating_sub(1) {
            let matrix = weights.and_then(|w| w.get(i));
            for src in 0..layers[i].node_count {
                let row = matrix.and_then(|m| m.get(src));
                for dst in 0..layers[i + 1].node_count {
                    let weight = row.and_then(|r| r.get(dst)).copied().unwrap_or(0.0);
                    edges.push(PositionedEdge {
                        from: layer_starts[i] + src,
                        to: layer_starts[i + 1] + dst,
                        weight,
                        thickness: weight.abs() * self.edge_scale,
                    });
                }
            }
        }

        log::trace!("layout: {} layers, {} nodes, {} edges", layer_count, nodes.len(), edges.len());

        NetworkLayout { nodes, edges }
    }
}

/// 層の x 座標
#[inline]
fn layer_x(index: usize, layer_count: usize, width: f32) -> f32 {
    if layer_count < 2 {
        width / 2.0
    } else {
        index as f32 * (width / (layer_count - 1) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::InferenceEngine;
    use crate::types::RawInputs;

    fn fire_risk_layers() -> Vec<LayerSpec> {
        vec![
            LayerSpec::new(4, "Input"),
            LayerSpec::new(6, "Hidden"),
            LayerSpec::new(1, "Output"),
        ]
    }

    #[test]
    fn test_counts_for_4_6_1() {
        let layout =
            LayoutEngine::new().layout(&fire_risk_layers(), None, None, Extent::new(460.0, 360.0));
        assert_eq!(layout.nodes.len(), 11);
        assert_eq!(layout.edges.len(), 4 * 6 + 6 * 1);
    }

    #[test]
    fn test_positions_within_extent() {
        let extent = Extent::new(460.0, 360.0);
        let layout = LayoutEngine::new().layout(&fire_risk_layers(), None, None, extent);
        for n in &layout.nodes {
            assert!(extent.contains(n.x, n.y), "{n:?} outside {extent:?}");
        }
    }

    #[test]
    fn test_coordinates() {
        let layout =
            LayoutEngine::new().layout(&fire_risk_layers(), None, None, Extent::new(400.0, 350.0));

        let xs: Vec<f32> = (0..3).map(|i| layout.layer_nodes(i).next().unwrap().x).collect();
        assert_eq!(xs, vec![0.0, 200.0, 400.0]);

        // 入力層: 350 / 5 = 70 間隔
        let ys: Vec<f32> = layout.layer_nodes(0).map(|n| n.y).collect();
        assert_eq!(ys, vec![70.0, 140.0, 210.0, 280.0]);

        // 出力層は中央
        assert_eq!(layout.layer_nodes(2).next().unwrap().y, 175.0);
    }

    #[test]
    fn test_single_layer_is_centered() {
        let layout = LayoutEngine::new().layout(
            &[LayerSpec::new(3, "Only")],
            None,
            None,
            Extent::new(300.0, 400.0),
        );
        assert_eq!(layout.nodes.len(), 3);
        assert!(layout.edges.is_empty());
        assert!(layout.nodes.iter().all(|n| n.x == 150.0));
    }

    #[test]
    fn test_degenerate_topologies() {
        let engine = LayoutEngine::new();
        let empty = engine.layout(&[], None, None, Extent::new(100.0, 100.0));
        assert_eq!(empty, NetworkLayout::default());

        let layers = vec![LayerSpec::new(2, "a"), LayerSpec::new(0, "b"), LayerSpec::new(2, "c")];
        let layout = engine.layout(&layers, None, None, Extent::new(100.0, 100.0));
        assert_eq!(layout.nodes.len(), 4);
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn test_ordering_contract() {
        let layout =
            LayoutEngine::new().layout(&fire_risk_layers(), None, None, Extent::new(100.0, 100.0));

        let keys: Vec<(usize, usize)> =
            layout.nodes.iter().map(|n| (n.layer_index, n.index_in_layer)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let edge_keys: Vec<(usize, usize, usize)> = layout
            .edges
            .iter()
            .map(|e| {
                let (a, b) = layout.endpoints(e).unwrap();
                (a.layer_index, a.index_in_layer, b.index_in_layer)
            })
            .collect();
        let mut sorted = edge_keys.clone();
        sorted.sort();
        assert_eq!(edge_keys, sorted);
        assert_eq!(edge_keys[0], (0, 0, 0));
        assert_eq!(edge_keys[5], (0, 0, 5));
        assert_eq!(edge_keys[6], (0, 1, 0));
        assert_eq!(edge_keys[24], (1, 0, 0));
    }

    #[test]
    fn test_edges_connect_adjacent_layers_only() {
        let layout =
            LayoutEngine::new().layout(&fire_risk_layers(), None, None, Extent::new(100.0, 100.0));
        for e in &layout.edges {
            let (a, b) = layout.endpoints(e).unwrap();
            assert_eq!(a.layer_index + 1, b.layer_index);
        }
    }

    #[test]
    fn test_values_and_weights_from_inference() {
        let engine = InferenceEngine::new();
        let result = engine.forward(&RawInputs::default());
        let weights = engine.weight_matrices();
        let layout = LayoutEngine::new().layout(
            &engine.layer_specs(),
            Some(&result.activations),
            Some(&weights),
            Extent::new(460.0, 360.0),
        );

        assert_eq!(layout.nodes[3].value, 0.6);
        assert_eq!(layout.nodes[10].value, result.activations.value(2, 0).unwrap());

        // 降水量(入力1) → 隠れ0 の重み -2.0、太さ 4.0
        let e = layout.edges[6];
        assert_eq!(e.weight, -2.0);
        assert_eq!(e.thickness, 4.0);
    }

    #[test]
    fn test_missing_data_falls_back_to_zero() {
        let partial = ActivationSet::new(vec![vec![1.0, 2.0]]);
        let weights: Vec<WeightMatrix> = vec![vec![vec![0.5]]];
        let layout = LayoutEngine::new().layout(
            &fire_risk_layers(),
            Some(&partial),
            Some(&weights),
            Extent::new(100.0, 100.0),
        );

        assert_eq!(layout.nodes[0].value, 1.0);
        assert_eq!(layout.nodes[1].value, 2.0);
        assert!(layout.nodes[2..].iter().all(|n| n.value == 0.0));

        assert_eq!(layout.edges[0].weight, 0.5);
        assert_eq!(layout.edges[0].thickness, 1.0);
        assert!(layout.edges[1..].iter().all(|e| e.weight == 0.0 && e.thickness == 0.0));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let engine = InferenceEngine::new();
        let result = engine.forward(&RawInputs::new(12.0, 3.0, 19.0, 88.0));
        let weights = engine.weight_matrices();
        let run = || {
            LayoutEngine::new().layout(
                &engine.layer_specs(),
                Some(&result.activations),
                Some(&weights),
                Extent::new(640.0, 480.0),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_custom_edge_scale() {
        let weights: Vec<WeightMatrix> = vec![vec![vec![-1.5]]];
        let layers = vec![LayerSpec::new(1, "a"), LayerSpec::new(1, "b")];
        let layout = LayoutEngine::with_edge_scale(3.0).layout(
            &layers,
            None,
            Some(&weights),
            Extent::new(10.0, 10.0),
        );
        assert_eq!(layout.edges[0].thickness, 4.5);
    }

    #[test]
    fn test_extent_validation() {
        assert!(Extent::try_new(f32::NAN, 10.0).is_err());
        assert!(Extent::try_new(-1.0, 10.0).is_err());

        let inner = Extent::new(500.0, 400.0).inset(20.0).unwrap();
        assert_eq!(inner, Extent::new(460.0, 360.0));
        assert_eq!(
            Extent::new(30.0, 400.0).inset(20.0),
            Err(Error::MarginTooLarge {
                margin: 20.0,
                width: 30.0,
                height: 400.0,
            })
        );
    }
}
