// ==========================================
// TaxYear.Load 输入校验
// ==========================================
// 纯函数,在任何查询之前执行
// ==========================================

use crate::domain::types::TaxYear;
use serde_json::{Map, Value};
use thiserror::Error;

/// 年度参数键
pub const YEAR_PARAM: &str = "year";

/// 年度参数校验错误（消息原样返回给调用方）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum YearValidationError {
    #[error("Year is a mandatory param but is not found in passed params")]
    Missing,

    #[error("Param year can not be empty")]
    Empty,

    #[error("Year has to have 4 digits")]
    WrongLength,

    #[error("Year has to be numeric")]
    NotNumeric,
}

/// 校验调用参数并取出税务年度
///
/// 依次检查: 键存在 → 非空 → 全部为数字 → 长度为 4
pub fn validate_load_params(params: &Map<String, Value>) -> Result<TaxYear, YearValidationError> {
    let value = params.get(YEAR_PARAM).ok_or(YearValidationError::Missing)?;

    let raw = match value {
        Value::Null => String::new(),
        Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(a) if a.is_empty() => String::new(),
        Value::Object(o) if o.is_empty() => String::new(),
        Value::Array(_) | Value::Object(_) => return Err(YearValidationError::NotNumeric),
    };

    parse_year(&raw)
}

/// 校验年度字符串
pub fn parse_year(raw: &str) -> Result<TaxYear, YearValidationError> {
    // "0" 与空串同样视为空
    if raw.is_empty() || raw == "0" {
        return Err(YearValidationError::Empty);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(YearValidationError::NotNumeric);
    }
    if raw.len() != 4 {
        return Err(YearValidationError::WrongLength);
    }

    raw.parse::<i32>()
        .map(TaxYear::new)
        .map_err(|_| YearValidationError::NotNumeric)
}
