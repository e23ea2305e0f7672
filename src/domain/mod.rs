// ==========================================
// 捐赠税务申报 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod contact;
pub mod oppgave;
pub mod types;

// 重导出核心类型
pub use contact::{ContactData, ContactLookup, CustomIdentifiers, DonorData};
pub use oppgave::{CandidateRow, OppgaveRecord, YearStatus};
pub use types::{ContactType, DonorType, TaxYear, YearStatusCode};
