// ==========================================
// 捐赠税务申报 - oppgave 领域模型
// ==========================================
// 对齐: civicrm_oppgave / civicrm_skatteinnberetninger 表
// ==========================================

use crate::domain::types::{DonorType, TaxYear, YearStatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// CandidateRow - 候选联系人 (聚合结果行)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub contact_id: i64,
    pub deductible_amount: f64, // SUM(total_amount - non_deductible_amount)
}

// ==========================================
// OppgaveRecord - 年度申报记录
// ==========================================
// 每个 (contact_id, oppgave_year) 至多一条,由写入前的存在性检查保证
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OppgaveRecord {
    pub oppgave_year: TaxYear,
    pub contact_id: i64,
    pub donor_type: DonorType,
    pub donor_name: String,
    pub donor_number: String,
    pub deductible_amount: f64,
    pub loaded_date: NaiveDate,
}

// ==========================================
// YearStatus - 年度状态 (每年一行)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStatus {
    pub year: i32,
    pub status: YearStatusCode,
}
