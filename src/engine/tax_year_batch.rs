// ==========================================
// 捐赠税务申报 - TaxYear.Load 年度批处理
// ==========================================
// 职责:
// 1. 输入校验 (validate)
// 2. 候选选择 + 已处理标记重置 (core)
// 3. 捐赠人解析 (resolver)
// 4. 金额校验/截断 + 写入 (amount, core)
// 5. 年度状态与结果消息 (core, report)
// ==========================================

mod amount;
mod core;
mod report;
mod resolver;
mod validate;


pub use self::core::TaxYearBatchProcessor;
pub use amount::{settle_amount, AmountDecision};
pub use report::{BatchOutcome, BatchReport};
pub use resolver::{DonorResolution, DonorResolver};
pub use validate::{parse_year, validate_load_params, YearValidationError, YEAR_PARAM};
