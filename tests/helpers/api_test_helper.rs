// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供 TaxYearApi 集成测试的通用环境
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

pub use test_helpers::*;

use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use oppgave_loader::api::TaxYearApi;
use oppgave_loader::config::TaxConfigReader;
use oppgave_loader::db::configure_sqlite_connection;
use oppgave_loader::engine::{MemoryLogSink, TaxYearRepositories};

use super::mock_config::MockConfig;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
pub struct ApiTestEnv {
    pub api: TaxYearApi,
    pub conn: Arc<Mutex<Connection>>,
    pub repos: TaxYearRepositories,
    pub log: Arc<MemoryLogSink>,
    pub config: Arc<MockConfig>,
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建测试环境（下限 500，上限 20000）
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(MockConfig::default())
    }

    pub fn with_config(config: MockConfig) -> Result<Self, Box<dyn std::error::Error>> {
        oppgave_loader::logging::init_test();
        let (temp_file, db_path) = create_test_db()?;

        let conn = Connection::open(&db_path)?;
        configure_sqlite_connection(&conn)?;
        let conn = Arc::new(Mutex::new(conn));

        let log = Arc::new(MemoryLogSink::new());
        let config = Arc::new(config);
        let config_reader: Arc<dyn TaxConfigReader> = config.clone();
        let api = TaxYearApi::new(conn.clone())
            .with_config_reader(config_reader)
            .with_log_sink(log.clone());

        Ok(Self {
            api,
            repos: TaxYearRepositories::from_connection(conn.clone()),
            conn,
            log,
            config,
            _temp_file: temp_file,
        })
    }

    /// 在测试连接上执行写入
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
        let guard = self.conn.lock().expect("连接锁获取失败");
        f(&guard)
    }
}
