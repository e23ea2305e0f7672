// ==========================================
// 捐赠税务申报 - 核心库
// ==========================================
// 功能: TaxYear.Load 年度 oppgave 批量装载
// 技术栈: Rust + SQLite
// 系统定位: 批处理作业 (每次调用最多处理 1000 个联系人)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 批处理规则
pub mod engine;

// 配置层 - 阈值与自定义字段映射
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 调用契约
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    CandidateRow, ContactData, ContactLookup, ContactType, CustomIdentifiers, DonorData,
    DonorType, OppgaveRecord, TaxYear, YearStatus, YearStatusCode,
};

pub use engine::{
    BatchOutcome, LogLevel, MemoryLogSink, OppgaveLogSink, TaxYearBatchProcessor, TracingLogSink,
};

pub use api::{ApiError, ApiResult, LoadResponse, TaxYearApi};

pub use config::{ConfigManager, TaxConfig, TaxConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "oppgave-loader";
