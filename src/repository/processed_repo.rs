// ==========================================
// 捐赠税务申报 - 已处理标记仓储
// ==========================================
// 表: civicrm_oppgave_processed (contact_id, oppgave_year)
// ==========================================

use crate::domain::types::TaxYear;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct ProcessedMarkRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProcessedMarkRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 标记联系人在本年度已处理
    pub fn mark_processed(&self, year: TaxYear, contact_id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO civicrm_oppgave_processed (contact_id, oppgave_year) VALUES (?1, ?2)",
            params![contact_id, year.value()],
        )?;
        Ok(())
    }

    /// 清空本年度全部已处理标记
    ///
    /// # 返回
    /// - Ok(rows): 删除的行数
    pub fn reset_year(&self, year: TaxYear) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM civicrm_oppgave_processed WHERE oppgave_year = ?1",
            params![year.value()],
        )?;
        Ok(rows)
    }

    /// 本年度已处理标记数
    pub fn count_for_year(&self, year: TaxYear) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM civicrm_oppgave_processed WHERE oppgave_year = ?1",
            params![year.value()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// 某联系人在本年度的标记数（正常情况下为 0 或 1）
    pub fn count_for_contact(&self, year: TaxYear, contact_id: i64) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM civicrm_oppgave_processed WHERE oppgave_year = ?1 AND contact_id = ?2",
            params![year.value(), contact_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
