// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库初始化（宿主表 + 作业表）、测试数据写入
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 测试用自定义字段表
pub const CUSTOM_TABLE: &str = "civicrm_value_contact_id_numbers";

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("非UTF-8路径")?.to_string();

    let conn = Connection::open(&db_path)?;
    init_host_schema(&conn)?;
    oppgave_loader::db::ensure_job_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 初始化宿主系统的表（联系人/捐赠/证件号自定义字段）
fn init_host_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS civicrm_contact (
            id INTEGER PRIMARY KEY,
            contact_type TEXT NOT NULL,
            display_name TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS civicrm_contribution (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL,
            receive_date TEXT NOT NULL,
            total_amount REAL NOT NULL,
            non_deductible_amount REAL NOT NULL DEFAULT 0,
            contribution_status_id INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS civicrm_value_contact_id_numbers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_id INTEGER NOT NULL,
            personsnummer TEXT,
            organisasjonsnummer TEXT
        );
        "#,
    )?;
    Ok(())
}

/// 写入联系人及其证件号
pub fn insert_contact(
    conn: &Connection,
    id: i64,
    contact_type: &str,
    display_name: &str,
    personsnummer: Option<&str>,
    organisasjonsnummer: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO civicrm_contact (id, contact_type, display_name) VALUES (?1, ?2, ?3)",
        params![id, contact_type, display_name],
    )?;
    conn.execute(
        "INSERT INTO civicrm_value_contact_id_numbers (entity_id, personsnummer, organisasjonsnummer)
         VALUES (?1, ?2, ?3)",
        params![id, personsnummer, organisasjonsnummer],
    )?;
    Ok(())
}

/// 写入一笔已完成捐赠
pub fn insert_completed_contribution(
    conn: &Connection,
    contact_id: i64,
    receive_date: &str,
    total_amount: f64,
    non_deductible_amount: f64,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO civicrm_contribution (contact_id, receive_date, total_amount, non_deductible_amount, contribution_status_id)
         VALUES (?1, ?2, ?3, ?4, 1)",
        params![contact_id, receive_date, total_amount, non_deductible_amount],
    )?;
    Ok(())
}
