// ==========================================
// 捐赠税务申报 - 捐赠聚合仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: civicrm_contribution 归宿主系统所有,只读
// ==========================================

use crate::domain::oppgave::CandidateRow;
use crate::domain::types::TaxYear;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 单次批处理的候选上限
pub const BATCH_SIZE: usize = 1000;

// ==========================================
// CandidateBatch - 一批候选联系人
// ==========================================
/// 一批候选联系人
///
/// 有限、只能向前消费一次、不可重启。
/// 批次在查询时即完整读出，因此消费过程中可以对同一连接执行写入。
#[derive(Debug)]
pub struct CandidateBatch {
    rows: std::vec::IntoIter<CandidateRow>,
    len: usize,
}

impl CandidateBatch {
    fn new(rows: Vec<CandidateRow>) -> Self {
        let len = rows.len();
        Self {
            rows: rows.into_iter(),
            len,
        }
    }

    /// 查询得到的候选总数（不随消费变化）
    pub fn total(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Iterator for CandidateBatch {
    type Item = CandidateRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

// ==========================================
// ContributionRepository - 捐赠聚合仓储
// ==========================================
pub struct ContributionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ContributionRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询本年度尚未处理的候选联系人及其可抵扣总额
    ///
    /// # 参数
    /// - `year`: 税务年度
    /// - `completed_status_id`: “已完成”捐赠状态
    /// - `min_deductible_amount`: 聚合后下限（HAVING）
    /// - `limit`: 批次上限
    ///
    /// # 说明
    /// - receive_date 落在 [年初 00:00:00, 年末 23:59:59]
    /// - 已在 civicrm_oppgave_processed 标记的联系人被排除
    /// - 不保证顺序
    pub fn find_candidates(
        &self,
        year: TaxYear,
        completed_status_id: i64,
        min_deductible_amount: f64,
        limit: usize,
    ) -> RepositoryResult<CandidateBatch> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                a.contact_id,
                SUM(a.total_amount - COALESCE(a.non_deductible_amount, 0)) AS deductible_amount
            FROM civicrm_contribution a
            LEFT JOIN civicrm_oppgave_processed b
                ON a.contact_id = b.contact_id AND b.oppgave_year = ?1
            WHERE a.receive_date BETWEEN ?2 AND ?3
              AND a.contribution_status_id = ?4
              AND b.contact_id IS NULL
            GROUP BY a.contact_id
            HAVING SUM(a.total_amount - COALESCE(a.non_deductible_amount, 0)) >= ?5
            LIMIT ?6
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![
                    year.value(),
                    year.start_timestamp(),
                    year.end_timestamp(),
                    completed_status_id,
                    min_deductible_amount,
                    limit as i64,
                ],
                |row| {
                    Ok(CandidateRow {
                        contact_id: row.get(0)?,
                        deductible_amount: row.get(1)?,
                    })
                },
            )?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(CandidateBatch::new(rows))
    }
}
