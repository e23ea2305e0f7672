// ==========================================
// 批处理结果
// ==========================================

use crate::domain::types::TaxYear;
use crate::repository::BATCH_SIZE;
use serde::{Deserialize, Serialize};

/// 本次调用的结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchOutcome {
    /// 没有剩余候选，已清空本年度已处理标记
    AllProcessed,
    /// 处理了一批，还需继续调用
    MoreRunsNeeded,
}

/// 单次批处理统计
///
/// 调用方只拿到 `message()`；计数仅用于日志
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub year: TaxYear,
    pub outcome: BatchOutcome,
    pub candidates: usize,
    pub written: usize,
    pub skipped_existing: usize,
    pub rejected_below_minimum: usize,
    pub rejected_missing_number: usize,
    pub reset_marks: usize,
}

impl BatchReport {
    pub(crate) fn new(year: TaxYear, outcome: BatchOutcome) -> Self {
        Self {
            year,
            outcome,
            candidates: 0,
            written: 0,
            skipped_existing: 0,
            rejected_below_minimum: 0,
            rejected_missing_number: 0,
            reset_marks: 0,
        }
    }

    /// 返回给调用方的状态消息
    pub fn message(&self) -> String {
        match self.outcome {
            BatchOutcome::AllProcessed => {
                format!("All contacts for tax year {} processed", self.year)
            }
            BatchOutcome::MoreRunsNeeded => format!(
                "Batch of {} contacts for tax year {} processed, you need to do more runs!",
                BATCH_SIZE, self.year
            ),
        }
    }

    pub fn is_done(&self) -> bool {
        self.outcome == BatchOutcome::AllProcessed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tax_year_batch::parse_year;

    #[test]
    fn test_messages() {
        let year = parse_year("2023").unwrap();
        assert_eq!(
            BatchReport::new(year, BatchOutcome::AllProcessed).message(),
            "All contacts for tax year 2023 processed"
        );
        assert_eq!(
            BatchReport::new(year, BatchOutcome::MoreRunsNeeded).message(),
            "Batch of 1000 contacts for tax year 2023 processed, you need to do more runs!"
        );
    }
}
