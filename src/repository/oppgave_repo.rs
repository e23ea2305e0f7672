// ==========================================
// 捐赠税务申报 - oppgave 申报记录仓储
// ==========================================
// 表: civicrm_oppgave
// 红线: 只有插入,没有更新路径
// ==========================================

use crate::domain::oppgave::OppgaveRecord;
use crate::domain::types::{DonorType, TaxYear};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

pub struct OppgaveRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OppgaveRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 该联系人本年度是否已有申报记录
    pub fn exists(&self, contact_id: i64, year: TaxYear) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let donor_count: i64 = conn.query_row(
            "SELECT COUNT(*) AS donor_count FROM civicrm_oppgave WHERE contact_id = ?1 AND oppgave_year = ?2",
            params![contact_id, year.value()],
            |row| row.get(0),
        )?;
        Ok(donor_count > 0)
    }

    /// 插入申报记录
    ///
    /// # 返回
    /// - `Ok(id)`: 新记录的行ID
    pub fn insert(&self, record: &OppgaveRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO civicrm_oppgave (
                oppgave_year, contact_id, donor_type,
                donor_name, donor_number, deductible_amount, loaded_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.oppgave_year.value(),
                record.contact_id,
                record.donor_type.label(),
                record.donor_name,
                record.donor_number,
                record.deductible_amount,
                record.loaded_date.format("%Y-%m-%d").to_string(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 查询本年度全部申报记录（按联系人ID排序）
    pub fn find_by_year(&self, year: TaxYear) -> RepositoryResult<Vec<OppgaveRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT contact_id, donor_type, donor_name, donor_number,
                   deductible_amount, loaded_date
            FROM civicrm_oppgave
            WHERE oppgave_year = ?1
            ORDER BY contact_id ASC, id ASC
            "#,
        )?;

        let raw = stmt
            .query_map(params![year.value()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        raw.into_iter()
            .map(
                |(contact_id, donor_type, donor_name, donor_number, amount, loaded)|
                 -> RepositoryResult<OppgaveRecord> {
                    let donor_type = DonorType::from_label(&donor_type).ok_or_else(|| {
                        RepositoryError::FieldValueError {
                            field: "donor_type".to_string(),
                            message: format!("未知捐赠人类别: {}", donor_type),
                        }
                    })?;
                    let loaded_date = NaiveDate::parse_from_str(&loaded, "%Y-%m-%d").map_err(
                        |e| RepositoryError::FieldValueError {
                            field: "loaded_date".to_string(),
                            message: e.to_string(),
                        },
                    )?;
                    Ok(OppgaveRecord {
                        oppgave_year: year,
                        contact_id,
                        donor_type,
                        donor_name: donor_name.unwrap_or_default(),
                        donor_number,
                        deductible_amount: amount,
                        loaded_date,
                    })
                },
            )
            .collect()
    }
}
