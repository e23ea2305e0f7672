// ==========================================
// 捐赠税务申报 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod contact_registry;
pub mod contribution_repo;
pub mod error;
pub mod oppgave_repo;
pub mod processed_repo;
pub mod tax_year_status_repo;

// 重导出核心仓储
pub use contact_registry::{ContactRegistry, SqliteContactRegistry};
pub use contribution_repo::{CandidateBatch, ContributionRepository, BATCH_SIZE};
pub use error::{RepositoryError, RepositoryResult};
pub use oppgave_repo::OppgaveRepository;
pub use processed_repo::ProcessedMarkRepository;
pub use tax_year_status_repo::TaxYearStatusRepository;
