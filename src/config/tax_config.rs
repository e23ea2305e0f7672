// ==========================================
// 捐赠税务申报 - 税务配置
// ==========================================
// 职责: 定义单次调用所需的只读配置及其读取接口
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认可抵扣下限
pub const DEFAULT_MIN_DEDUCTIBLE_AMOUNT: f64 = 500.0;
/// 默认可抵扣上限
pub const DEFAULT_MAX_DEDUCTIBLE_AMOUNT: f64 = 25_000.0;
/// 默认“已完成”捐赠状态
pub const DEFAULT_COMPLETED_STATUS_ID: i64 = 1;
/// 默认证件号自定义字段表
pub const DEFAULT_CONTACT_CUSTOM_TABLE: &str = "civicrm_value_contact_id_numbers";
pub const DEFAULT_PERSON_NUMBER_COLUMN: &str = "personsnummer";
pub const DEFAULT_ORGANIZATION_NUMBER_COLUMN: &str = "organisasjonsnummer";

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值无效 (key={key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("不安全的SQL标识符 (key={key}): {value}")]
    UnsafeIdentifier { key: String, value: String },

    #[error("可抵扣下限 {min} 大于上限 {max}")]
    InvertedBounds { min: f64, max: f64 },

    #[error("配置读取失败: {0}")]
    Storage(String),
}

// ==========================================
// CustomFieldLocation - 证件号自定义字段位置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldLocation {
    pub table: String,
    pub person_number_column: String,
    pub organization_number_column: String,
}

// ==========================================
// TaxConfig - 单次调用的税务配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub min_deductible_amount: f64,
    pub max_deductible_amount: f64,
    pub completed_status_id: i64,
    pub custom_fields: CustomFieldLocation,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            min_deductible_amount: DEFAULT_MIN_DEDUCTIBLE_AMOUNT,
            max_deductible_amount: DEFAULT_MAX_DEDUCTIBLE_AMOUNT,
            completed_status_id: DEFAULT_COMPLETED_STATUS_ID,
            custom_fields: CustomFieldLocation {
                table: DEFAULT_CONTACT_CUSTOM_TABLE.to_string(),
                person_number_column: DEFAULT_PERSON_NUMBER_COLUMN.to_string(),
                organization_number_column: DEFAULT_ORGANIZATION_NUMBER_COLUMN.to_string(),
            },
        }
    }
}

impl TaxConfig {
    /// 校验配置
    ///
    /// - 下限不得大于上限
    /// - 表名/列名会被拼接进 SQL，只允许 `[A-Za-z_][A-Za-z0-9_]*`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_deductible_amount.is_finite() || !self.max_deductible_amount.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "deductible_amount".to_string(),
                message: "金额必须为有限数值".to_string(),
            });
        }
        if self.min_deductible_amount > self.max_deductible_amount {
            return Err(ConfigError::InvertedBounds {
                min: self.min_deductible_amount,
                max: self.max_deductible_amount,
            });
        }

        let fields = &self.custom_fields;
        for (key, value) in [
            ("contact_custom_group_table", &fields.table),
            ("personsnummer_custom_field_column", &fields.person_number_column),
            ("organisasjonsnummer_custom_field_column", &fields.organization_number_column),
        ] {
            if !is_safe_identifier(value) {
                return Err(ConfigError::UnsafeIdentifier {
                    key: key.to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

fn is_safe_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ==========================================
// TaxConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait TaxConfigReader: Send + Sync {
    /// 读取并校验本次调用的税务配置
    fn load_tax_config(&self) -> Result<TaxConfig, ConfigError>;
}

impl TaxConfigReader for TaxConfig {
    fn load_tax_config(&self) -> Result<TaxConfig, ConfigError> {
        self.validate()?;
        Ok(self.clone())
    }
}
