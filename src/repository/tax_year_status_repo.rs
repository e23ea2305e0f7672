// ==========================================
// 捐赠税务申报 - 年度状态仓储
// ==========================================
// 表: civicrm_skatteinnberetninger (year 主键, 覆盖写)
// ==========================================

use crate::domain::oppgave::YearStatus;
use crate::domain::types::{TaxYear, YearStatusCode};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct TaxYearStatusRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TaxYearStatusRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入年度状态（insert-or-overwrite）
    pub fn upsert(&self, year: TaxYear, status: YearStatusCode) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO civicrm_skatteinnberetninger (year, status_id) VALUES (?1, ?2)",
            params![year.value(), status.id()],
        )?;
        Ok(())
    }

    pub fn find(&self, year: TaxYear) -> RepositoryResult<Option<YearStatus>> {
        let conn = self.get_conn()?;
        let status = conn
            .query_row(
                "SELECT year, status_id FROM civicrm_skatteinnberetninger WHERE year = ?1",
                params![year.value()],
                |row| {
                    Ok(YearStatus {
                        year: row.get(0)?,
                        status: YearStatusCode::from_id(row.get(1)?),
                    })
                },
            )
            .optional()?;
        Ok(status)
    }
}
