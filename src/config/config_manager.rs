// ==========================================
// 捐赠税务申报 - 配置管理器
// ==========================================
// 职责: 从 config_kv 读取阈值与自定义字段映射
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::tax_config::{
    ConfigError, CustomFieldLocation, TaxConfig, TaxConfigReader, DEFAULT_COMPLETED_STATUS_ID,
    DEFAULT_CONTACT_CUSTOM_TABLE, DEFAULT_MAX_DEDUCTIBLE_AMOUNT, DEFAULT_MIN_DEDUCTIBLE_AMOUNT,
    DEFAULT_ORGANIZATION_NUMBER_COLUMN, DEFAULT_PERSON_NUMBER_COLUMN,
};
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path).map_err(|e| ConfigError::Storage(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::Storage(format!("锁获取失败: {}", e)))?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ConfigError::Storage(e.to_string()))
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::Storage(format!("锁获取失败: {}", e)))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )
        .map_err(|e| ConfigError::Storage(e.to_string()))?;
        Ok(())
    }

    /// 读取字符串配置，带默认值（空白值视为未配置）
    fn get_string_or_default(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(self
            .get_global_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 读取数值配置，带默认值
    fn get_parsed_or_default<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T::Err: std::fmt::Display,
    {
        match self.get_global_config_value(key)? {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{} ({})", raw, e),
                })
            }
            _ => Ok(default),
        }
    }
}

impl TaxConfigReader for ConfigManager {
    fn load_tax_config(&self) -> Result<TaxConfig, ConfigError> {
        let config = TaxConfig {
            min_deductible_amount: self.get_parsed_or_default(
                config_keys::MIN_DEDUCTIBLE_AMOUNT,
                DEFAULT_MIN_DEDUCTIBLE_AMOUNT,
            )?,
            max_deductible_amount: self.get_parsed_or_default(
                config_keys::MAX_DEDUCTIBLE_AMOUNT,
                DEFAULT_MAX_DEDUCTIBLE_AMOUNT,
            )?,
            completed_status_id: self.get_parsed_or_default(
                config_keys::COMPLETED_CONTRIBUTION_STATUS_ID,
                DEFAULT_COMPLETED_STATUS_ID,
            )?,
            custom_fields: CustomFieldLocation {
                table: self.get_string_or_default(
                    config_keys::CONTACT_CUSTOM_GROUP_TABLE,
                    DEFAULT_CONTACT_CUSTOM_TABLE,
                )?,
                person_number_column: self.get_string_or_default(
                    config_keys::PERSONSNUMMER_CUSTOM_FIELD_COLUMN,
                    DEFAULT_PERSON_NUMBER_COLUMN,
                )?,
                organization_number_column: self.get_string_or_default(
                    config_keys::ORGANISASJONSNUMMER_CUSTOM_FIELD_COLUMN,
                    DEFAULT_ORGANIZATION_NUMBER_COLUMN,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 可抵扣金额阈值
    pub const MIN_DEDUCTIBLE_AMOUNT: &str = "min_deductible_amount";
    pub const MAX_DEDUCTIBLE_AMOUNT: &str = "max_deductible_amount";

    // 捐赠状态
    pub const COMPLETED_CONTRIBUTION_STATUS_ID: &str = "completed_contribution_status_id";

    // 证件号自定义字段
    pub const CONTACT_CUSTOM_GROUP_TABLE: &str = "contact_custom_group_table";
    pub const PERSONSNUMMER_CUSTOM_FIELD_COLUMN: &str = "personsnummer_custom_field_column";
    pub const ORGANISASJONSNUMMER_CUSTOM_FIELD_COLUMN: &str =
        "organisasjonsnummer_custom_field_column";
}
