// ==========================================
// 捐赠税务申报 - 引擎层
// ==========================================
// 职责: 年度批处理规则 (校验/选择/解析/写入/收尾)
// 红线: 引擎只通过 Repository 与注册表接口访问数据
// ==========================================

pub mod oppgave_log;
pub mod repositories;
pub mod tax_year_batch;

pub use oppgave_log::{LogLevel, MemoryLogSink, OppgaveLogSink, TracingLogSink};
pub use repositories::TaxYearRepositories;
pub use tax_year_batch::{
    parse_year, settle_amount, validate_load_params, AmountDecision, BatchOutcome, BatchReport,
    DonorResolution, DonorResolver, TaxYearBatchProcessor, YearValidationError,
};
