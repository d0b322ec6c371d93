//! ネットワーク定数
//!
//! 層サイズ・入力スケール・固定重み・後処理補正の閾値。
//! 学習は行わないため、重みはプロセス全体で不変。

/// 入力層の次元（気温, 降水量, 風速, 湿度）
pub const INPUT_COUNT: usize = 4;

/// 隠れ層の次元
pub const HIDDEN_COUNT: usize = 6;

/// 出力層の次元
pub const OUTPUT_COUNT: usize = 1;

/// 正規化スケール（入力層の並び順）
pub const INPUT_SCALES: [f32; INPUT_COUNT] = [50.0, 100.0, 20.0, 100.0];

/// 入力→隠れ層の重み `[入力][隠れユニット]`
///
/// 気温・風速は正、降水量・湿度は負の寄与。
/// 行ごとにユニット 0 が最大で、以降 0.2 ずつ減衰する。
pub const INPUT_TO_HIDDEN: [[f32; HIDDEN_COUNT]; INPUT_COUNT] = [
    [2.0, 1.8, 1.6, 1.4, 1.2, 1.0],       // 気温
    [-2.0, -1.8, -1.6, -1.4, -1.2, -1.0], // 降水量
    [1.6, 1.4, 1.2, 1.0, 0.8, 0.6],       // 風速
    [-1.2, -1.0, -0.8, -0.6, -0.4, -0.2], // 湿度
];

/// 隠れ→出力層の重み `[隠れユニット][出力]`
pub const HIDDEN_TO_OUTPUT: [[f32; OUTPUT_COUNT]; HIDDEN_COUNT] =
    [[1.2], [1.0], [0.8], [0.6], [0.4], [0.2]];

/// 隠れ層バイアス（この構成では全て 0）
pub const HIDDEN_BIASES: [f32; HIDDEN_COUNT] = [0.0; HIDDEN_COUNT];

/// 出力層バイアス
pub const OUTPUT_BIASES: [f32; OUTPUT_COUNT] = [0.0; OUTPUT_COUNT];

/// 出力活性値 → リスク値の倍率
pub const RISK_SCALE: f32 = 100.0;

// ---------------------------------------------------------------------------
// 後処理補正
// ---------------------------------------------------------------------------

/// この値を超える降水量でリスクを減衰
pub const PRECIPITATION_DAMPING_THRESHOLD: f32 = 70.0;
pub const PRECIPITATION_DAMPING_FACTOR: f32 = 0.3;

/// この値を超える気温でリスクを増幅
pub const HEAT_THRESHOLD: f32 = 35.0;
pub const HEAT_FACTOR: f32 = 1.2;

/// この値を超える風速で `1 + (風速 - 閾値) / WIND_DIVISOR` 倍
pub const WIND_THRESHOLD: f32 = 15.0;
pub const WIND_DIVISOR: f32 = 10.0;

/// この値未満の湿度でリスクを増幅
pub const DRYNESS_THRESHOLD: f32 = 20.0;
pub const DRYNESS_FACTOR: f32 = 1.3;
