// ==========================================
// 捐赠税务申报 - TaxYear API
// ==========================================
// 职责: TaxYear.Load 调用契约、年度状态查询、申报记录查询
// 约束: 同一年度的 load 调用需由调用方串行化
// ==========================================

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, TaxConfigReader};
use crate::domain::oppgave::{OppgaveRecord, YearStatus};
use crate::engine::oppgave_log::{OppgaveLogSink, TracingLogSink};
use crate::engine::repositories::TaxYearRepositories;
use crate::engine::tax_year_batch::{
    parse_year, validate_load_params, BatchReport, TaxYearBatchProcessor, YEAR_PARAM,
};
use crate::repository::{ContactRegistry, SqliteContactRegistry};

// ==========================================
// LoadResponse - 成功响应
// ==========================================
/// 成功响应信封
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadResponse {
    pub is_error: u8,
    pub version: u8,
    pub count: usize,
    pub values: Vec<String>,
}

impl LoadResponse {
    fn success(message: String) -> Self {
        Self {
            is_error: 0,
            version: 3,
            count: 1,
            values: vec![message],
        }
    }

    /// 状态消息
    pub fn message(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or_default()
    }
}

// ==========================================
// TaxYearApi
// ==========================================

/// TaxYear API
///
/// 职责：
/// 1. load: 校验参数 → 读取配置 → 执行一轮批处理 → 返回状态消息
/// 2. year_status: 查询年度状态
/// 3. list_oppgaver: 查询已写入的申报记录
pub struct TaxYearApi {
    conn: Arc<Mutex<Connection>>,
    repos: TaxYearRepositories,
    config_reader: Arc<dyn TaxConfigReader>,
    log: Arc<dyn OppgaveLogSink>,
    registry: Option<Arc<dyn ContactRegistry>>,
}

impl TaxYearApi {
    /// 创建新的 TaxYearApi 实例
    ///
    /// 默认从 config_kv 读取配置，作业日志转发到 tracing，
    /// 联系人注册表使用同一连接上的宿主表
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            repos: TaxYearRepositories::from_connection(conn.clone()),
            config_reader: Arc::new(ConfigManager::from_connection(conn.clone())),
            log: Arc::new(TracingLogSink),
            registry: None,
            conn,
        }
    }

    pub fn with_config_reader(mut self, config_reader: Arc<dyn TaxConfigReader>) -> Self {
        self.config_reader = config_reader;
        self
    }

    pub fn with_log_sink(mut self, log: Arc<dyn OppgaveLogSink>) -> Self {
        self.log = log;
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn ContactRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// TaxYear.Load
    ///
    /// # 参数
    /// - params: 调用参数，需包含 `year`（4位数字）
    ///
    /// # 返回
    /// - Ok(LoadResponse): 含一条状态消息
    /// - Err(ApiError::ValidationError): 参数不合法（未做任何写入）
    /// - Err(ApiError): 配置或存储错误
    pub fn load(&self, params: &Map<String, Value>) -> ApiResult<LoadResponse> {
        let report = self.run_batch(params)?;
        Ok(LoadResponse::success(report.message()))
    }

    /// 以年度字符串调用 TaxYear.Load
    pub fn load_year(&self, year: &str) -> ApiResult<LoadResponse> {
        let mut params = Map::new();
        params.insert(YEAR_PARAM.to_string(), Value::String(year.to_string()));
        self.load(&params)
    }

    /// 执行一轮批处理并返回统计
    pub fn run_batch(&self, params: &Map<String, Value>) -> ApiResult<BatchReport> {
        let year = validate_load_params(params)?;
        let config = self.config_reader.load_tax_config()?;

        let registry: Arc<dyn ContactRegistry> = match &self.registry {
            Some(registry) => registry.clone(),
            None => Arc::new(SqliteContactRegistry::new(
                self.conn.clone(),
                config.custom_fields.clone(),
            )),
        };

        tracing::info!(year = year.value(), "TaxYear.Load 开始");
        let processor =
            TaxYearBatchProcessor::new(self.repos.clone(), registry, self.log.clone(), config);
        let report = processor.run(year)?;
        Ok(report)
    }

    /// 查询年度状态
    pub fn year_status(&self, year: &str) -> ApiResult<Option<YearStatus>> {
        let year = parse_year(year)?;
        Ok(self.repos.status_repo.find(year)?)
    }

    /// 查询年度申报记录
    pub fn list_oppgaver(&self, year: &str) -> ApiResult<Vec<OppgaveRecord>> {
        let year = parse_year(year)?;
        self.repos
            .oppgave_repo
            .find_by_year(year)
            .map_err(ApiError::from)
    }
}
