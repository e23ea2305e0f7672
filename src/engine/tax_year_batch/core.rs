// ==========================================
// TaxYearBatchProcessor - 年度 oppgave 批处理器
// ==========================================
// 流程: Select → {空: 清空标记 | 非空: 逐个(标记 → 存在性检查 → 解析 → 金额校验 → 写入)} → 年度状态
// 约束: 每条语句独立提交，中途失败保留已完成部分
// 约束: 同一年度的并发调用不安全（存在性检查与写入非原子）
// ==========================================

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use super::amount::{settle_amount, AmountDecision};
use super::report::{BatchOutcome, BatchReport};
use super::resolver::{DonorResolution, DonorResolver};
use crate::config::TaxConfig;
use crate::domain::oppgave::{CandidateRow, OppgaveRecord};
use crate::domain::types::{TaxYear, YearStatusCode};
use crate::engine::oppgave_log::{LogLevel, OppgaveLogSink};
use crate::engine::repositories::TaxYearRepositories;
use crate::repository::{ContactRegistry, RepositoryResult, BATCH_SIZE};

pub struct TaxYearBatchProcessor {
    repos: TaxYearRepositories,
    registry: Arc<dyn ContactRegistry>,
    log: Arc<dyn OppgaveLogSink>,
    config: TaxConfig,
}

impl TaxYearBatchProcessor {
    /// 创建批处理器
    ///
    /// 配置在构造时注入，整个调用期间只读
    pub fn new(
        repos: TaxYearRepositories,
        registry: Arc<dyn ContactRegistry>,
        log: Arc<dyn OppgaveLogSink>,
        config: TaxConfig,
    ) -> Self {
        Self {
            repos,
            registry,
            log,
            config,
        }
    }

    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// 执行一轮批处理（loaded_date 取本地当天）
    pub fn run(&self, year: TaxYear) -> RepositoryResult<BatchReport> {
        self.run_on(year, Local::now().date_naive())
    }

    /// 执行一轮批处理
    ///
    /// # 参数
    /// - `year`: 已校验的税务年度
    /// - `today`: 写入记录的 loaded_date
    ///
    /// # 返回
    /// - Ok(BatchReport): 本轮统计
    /// - Err: 存储错误，本轮中止
    pub fn run_on(&self, year: TaxYear, today: NaiveDate) -> RepositoryResult<BatchReport> {
        let batch = self.repos.contribution_repo.find_candidates(
            year,
            self.config.completed_status_id,
            self.config.min_deductible_amount,
            BATCH_SIZE,
        )?;

        let mut report = if batch.is_empty() {
            let mut report = BatchReport::new(year, BatchOutcome::AllProcessed);
            report.reset_marks = self.repos.processed_repo.reset_year(year)?;
            self.log.log_message(
                LogLevel::Info,
                &format!("No more contacts to be processed found for year {}", year),
            );
            report
        } else {
            self.log.log_message(
                LogLevel::Info,
                &format!("Batch of {} contacts processed for year {}", BATCH_SIZE, year),
            );
            BatchReport::new(year, BatchOutcome::MoreRunsNeeded)
        };
        report.candidates = batch.total();

        let resolver = DonorResolver::new(self.registry.as_ref());
        for candidate in batch {
            // 先标记，无论后续是否写入
            self.repos
                .processed_repo
                .mark_processed(year, candidate.contact_id)?;
            self.log.log_message(
                LogLevel::Info,
                &format!(
                    "Contact {} with total deductible amount {} read, will now be checked",
                    candidate.contact_id, candidate.deductible_amount
                ),
            );
            self.process_candidate(year, &candidate, &resolver, today, &mut report)?;
        }

        self.repos
            .status_repo
            .upsert(year, YearStatusCode::BatchCompleted)?;

        tracing::info!(
            year = year.value(),
            candidates = report.candidates,
            written = report.written,
            skipped_existing = report.skipped_existing,
            rejected_below_minimum = report.rejected_below_minimum,
            rejected_missing_number = report.rejected_missing_number,
            reset_marks = report.reset_marks,
            "TaxYear.Load 批处理完成"
        );

        Ok(report)
    }

    /// 处理单个候选（调用前已标记）
    pub(super) fn process_candidate(
        &self,
        year: TaxYear,
        candidate: &CandidateRow,
        resolver: &DonorResolver<'_>,
        today: NaiveDate,
        report: &mut BatchReport,
    ) -> RepositoryResult<()> {
        if self.repos.oppgave_repo.exists(candidate.contact_id, year)? {
            report.skipped_existing += 1;
            self.log.log_message(
                LogLevel::Info,
                &format!(
                    "Contact {} already exists in tax file civicrm_oppgave for {}, contact ignored",
                    candidate.contact_id, year
                ),
            );
            return Ok(());
        }

        if let Some(record) = self.build_record(year, candidate, resolver, today, report)? {
            self.repos.oppgave_repo.insert(&record)?;
            report.written += 1;
            self.log.log_message(
                LogLevel::Info,
                &format!(
                    "Contact {} added to tax file civicrm_oppgave for {}",
                    record.contact_id, year
                ),
            );
        }
        Ok(())
    }

    /// 组装申报记录；不满足条件返回 None
    fn build_record(
        &self,
        year: TaxYear,
        candidate: &CandidateRow,
        resolver: &DonorResolver<'_>,
        today: NaiveDate,
        report: &mut BatchReport,
    ) -> RepositoryResult<Option<OppgaveRecord>> {
        let decision = settle_amount(
            candidate.deductible_amount,
            self.config.min_deductible_amount,
            self.config.max_deductible_amount,
        );
        let amount = match decision {
            AmountDecision::BelowMinimum => {
                report.rejected_below_minimum += 1;
                self.log.log_message(
                    LogLevel::Error,
                    &format!(
                        "Deductible amount {} below minimum {} for contact {}, year {}",
                        candidate.deductible_amount,
                        self.config.min_deductible_amount,
                        candidate.contact_id,
                        year
                    ),
                );
                return Ok(None);
            }
            AmountDecision::Accepted(amount) | AmountDecision::Clamped(amount) => amount,
        };
        self.log.log_message(
            LogLevel::Info,
            &format!(
                "Deductible Amount set to {} for contact {}, year {}",
                amount, candidate.contact_id, year
            ),
        );

        let donor = match resolver.resolve(candidate.contact_id)? {
            DonorResolution::Found(donor) => donor,
            DonorResolution::Unavailable => {
                report.rejected_missing_number += 1;
                self.log.log_message(
                    LogLevel::Error,
                    &format!(
                        "No person/organisasjonsnummer found for contact {}, year {}",
                        candidate.contact_id, year
                    ),
                );
                return Ok(None);
            }
        };

        // 联系人存在但证件号为空: 不写作业日志，直接跳过
        let donor_type = match donor.donor_type {
            Some(donor_type) if donor.has_number() => donor_type,
            _ => {
                report.rejected_missing_number += 1;
                tracing::debug!(contact_id = candidate.contact_id, "证件号为空，跳过");
                return Ok(None);
            }
        };

        Ok(Some(OppgaveRecord {
            oppgave_year: year,
            contact_id: candidate.contact_id,
            donor_type,
            donor_name: donor.name.unwrap_or_default(),
            donor_number: donor.number.unwrap_or_default(),
            deductible_amount: amount,
            loaded_date: today,
        }))
    }
}
