//! ネットワーク層の実装
//!
//! - `Dense`: 全結合アフィン変換層（入力×重み + バイアス）
//! - `Relu`: `max(0, x)`
//! - `Sigmoid`: ロジスティック関数 `1 / (1 + e^-x)`

use super::engine::WeightMatrix;
use super::spec::Activation;

/// 全結合層（静的サイズ版）
///
/// 重みは `weights[input][output]` の行優先で保持する。
/// 1列（= 1出力ユニット）が入力ベクトルとの内積対象。
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<const INPUT_DIM: usize, const OUTPUT_DIM: usize> {
    /// 重み
    pub weights: [[f32; OUTPUT_DIM]; INPUT_DIM],
    /// バイアス
    pub biases: [f32; OUTPUT_DIM],
}

impl<const INPUT_DIM: usize, const OUTPUT_DIM: usize> Dense<INPUT_DIM, OUTPUT_DIM> {
    pub const fn new(weights: [[f32; OUTPUT_DIM]; INPUT_DIM], biases: [f32; OUTPUT_DIM]) -> Self {
        Self { weights, biases }
    }

    /// 順伝播
    ///
    /// `output[j] = biases[j] + Σ_i input[i] * weights[i][j]`
    pub fn propagate(&self, input: &[f32; INPUT_DIM], output: &mut [f32; OUTPUT_DIM]) {
        output.copy_from_slice(&self.biases);
        for (in_val, row) in input.iter().zip(self.weights.iter()) {
            for (out, w) in output.iter_mut().zip(row.iter()) {
                *out += in_val * w;
            }
        }
    }

    /// 図描画用に `Vec` 形式の重み行列へ変換
    pub fn to_weight_matrix(&self) -> WeightMatrix {
        self.weights.iter().map(|row| row.to_vec()).collect()
    }
}

/// ReLU層
pub struct Relu<const DIM: usize>;

impl<const DIM: usize> Relu<DIM> {
    /// 順伝播（in-place）
    #[inline]
    pub fn propagate(values: &mut [f32; DIM]) {
        for v in values.iter_mut() {
            *v = Activation::Relu.apply(*v);
        }
    }
}

/// Sigmoid層
pub struct Sigmoid<const DIM: usize>;

impl<const DIM: usize> Sigmoid<DIM> {
    /// 順伝播（in-place）
    ///
    /// 大きな負値でも `exp` が +inf になるだけで、結果は 0.0 に収束する（NaN にはならない）。
    #[inline]
    pub fn propagate(values: &mut [f32; DIM]) {
        for v in values.iter_mut() {
            *v = Activation::Sigmoid.apply(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_propagate() {
        let layer: Dense<2, 2> = Dense::new([[1.0, 3.0], [2.0, 4.0]], [10.0, 20.0]);
        let mut output = [0.0f32; 2];

        layer.propagate(&[1.0, 2.0], &mut output);

        // output[0] = 10 + 1*1 + 2*2 = 15
        // output[1] = 20 + 1*3 + 2*4 = 31
        assert_eq!(output, [15.0, 31.0]);
    }

    #[test]
    fn test_dense_overwrites_previous_output() {
        let layer: Dense<1, 1> = Dense::new([[2.0]], [0.5]);
        let mut output = [100.0f32];
        layer.propagate(&[1.0], &mut output);
        assert_eq!(output, [2.5]);
    }

    #[test]
    fn test_relu() {
        let mut values = [-1.0f32, 0.0, 0.25, 3.0];
        Relu::propagate(&mut values);
        assert_eq!(values, [0.0, 0.0, 0.25, 3.0]);
    }

    #[test]
    fn test_sigmoid() {
        let mut values = [0.0f32, 1000.0, -1000.0];
        Sigmoid::propagate(&mut values);
        assert_eq!(values[0], 0.5);
        assert_eq!(values[1], 1.0);
        assert_eq!(values[2], 0.0);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_to_weight_matrix_shape() {
        let layer: Dense<3, 2> = Dense::new([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]], [0.0; 2]);
        let m = layer.to_weight_matrix();
        assert_eq!(m.len(), 3);
        assert!(m.iter().all(|row| row.len() == 2));
        assert_eq!(m[2][1], 6.0);
    }
}
