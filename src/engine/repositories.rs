// ==========================================
// 捐赠税务申报 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合批处理引擎所需的所有 Repository
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::repository::{
    ContributionRepository, OppgaveRepository, ProcessedMarkRepository, TaxYearStatusRepository,
};

/// 年度批处理仓储集合
///
/// # 包含的仓储
/// - `contribution_repo`: 候选联系人聚合（只读）
/// - `processed_repo`: 已处理标记
/// - `oppgave_repo`: 申报记录
/// - `status_repo`: 年度状态
#[derive(Clone)]
pub struct TaxYearRepositories {
    pub contribution_repo: Arc<ContributionRepository>,
    pub processed_repo: Arc<ProcessedMarkRepository>,
    pub oppgave_repo: Arc<OppgaveRepository>,
    pub status_repo: Arc<TaxYearStatusRepository>,
}

impl TaxYearRepositories {
    pub fn new(
        contribution_repo: Arc<ContributionRepository>,
        processed_repo: Arc<ProcessedMarkRepository>,
        oppgave_repo: Arc<OppgaveRepository>,
        status_repo: Arc<TaxYearStatusRepository>,
    ) -> Self {
        Self {
            contribution_repo,
            processed_repo,
            oppgave_repo,
            status_repo,
        }
    }

    /// 所有仓储共享同一连接
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self::new(
            Arc::new(ContributionRepository::new(conn.clone())),
            Arc::new(ProcessedMarkRepository::new(conn.clone())),
            Arc::new(OppgaveRepository::new(conn.clone())),
            Arc::new(TaxYearStatusRepository::new(conn)),
        )
    }
}
