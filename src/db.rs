// ==========================================
// 捐赠税务申报 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少调度器与人工同时触发时的偶发 busy 错误
// - 建立本作业自有的表 (联系人/捐赠/自定义字段表归宿主系统所有)
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建立作业自有的表（幂等）
///
/// - civicrm_oppgave: 年度申报记录（无唯一约束，去重靠写入前检查）
/// - civicrm_oppgave_processed: 已处理标记
/// - civicrm_skatteinnberetninger: 年度状态
/// - config_kv: 阈值与字段映射配置
pub fn ensure_job_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS civicrm_oppgave (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            oppgave_year INTEGER NOT NULL,
            contact_id INTEGER NOT NULL,
            donor_type TEXT NOT NULL,
            donor_name TEXT,
            donor_number TEXT NOT NULL,
            deductible_amount REAL NOT NULL,
            loaded_date TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_oppgave_contact_year
            ON civicrm_oppgave (contact_id, oppgave_year);

        CREATE TABLE IF NOT EXISTS civicrm_oppgave_processed (
            contact_id INTEGER NOT NULL,
            oppgave_year INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_oppgave_processed_year
            ON civicrm_oppgave_processed (oppgave_year, contact_id);

        CREATE TABLE IF NOT EXISTS civicrm_skatteinnberetninger (
            year INTEGER PRIMARY KEY,
            status_id INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}
