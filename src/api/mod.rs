// ==========================================
// 捐赠税务申报 - API层
// ==========================================
// 职责: 对外调用契约 (TaxYear.Load)
// ==========================================

pub mod error;
pub mod tax_year_api;

pub use error::{ApiError, ApiResult};
pub use tax_year_api::{LoadResponse, TaxYearApi};
