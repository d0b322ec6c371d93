//! リスク履歴（トレンドチャート用）
//!
//! 上限 [`HISTORY_CAPACITY`] 件の FIFO。超過時は最古のエントリを捨てる。
//! 挿入順（古い順、最新が末尾）を保持する。

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::{RawInputs, RiskScore};

/// 履歴の最大件数
pub const HISTORY_CAPACITY: usize = 20;

/// 履歴1件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 推論時点の入力スナップショット
    pub inputs: RawInputs,
    pub risk: RiskScore,
}

/// チャート描画用の系列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// "1", "2", ... （古い順）
    pub labels: Vec<String>,
    pub risks: Vec<u8>,
}

/// リスク履歴
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskHistory {
    entries: VecDeque<HistoryEntry>,
}

impl Default for RiskHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// 追記（上限超過時は最古を破棄）
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// 全エントリ（古い順）
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最新のエントリ
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn trend_series(&self) -> TrendSeries {
        TrendSeries {
            labels: (1..=self.entries.len()).map(|i| i.to_string()).collect(),
            risks: self.entries.iter().map(|e| e.risk.value()).collect(),
        }
    }
}
