// ==========================================
// 捐赠税务申报 - 配置层
// ==========================================
// 职责: 可抵扣金额阈值、捐赠状态、证件号字段映射
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod tax_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use tax_config::{ConfigError, CustomFieldLocation, TaxConfig, TaxConfigReader};
