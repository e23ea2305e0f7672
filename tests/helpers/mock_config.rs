// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use oppgave_loader::config::tax_config::ConfigError;
use oppgave_loader::config::{TaxConfig, TaxConfigReader};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock 配置：固定阈值，记录被读取的次数
#[derive(Debug)]
pub struct MockConfig {
    pub config: TaxConfig,
    reads: AtomicUsize,
}

impl MockConfig {
    /// 下限 500，上限 20000，其余默认
    pub fn default() -> Self {
        Self::with_bounds(500.0, 20000.0)
    }

    pub fn with_bounds(min: f64, max: f64) -> Self {
        Self {
            config: TaxConfig {
                min_deductible_amount: min,
                max_deductible_amount: max,
                ..TaxConfig::default()
            },
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TaxConfigReader for MockConfig {
    fn load_tax_config(&self) -> Result<TaxConfig, ConfigError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.config.validate()?;
        Ok(self.config.clone())
    }
}
