// ==========================================
// 可抵扣金额规则
// ==========================================
// 低于下限: 拒绝; 高于上限: 截断为上限; 其余原样
// ==========================================

/// 金额判定结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountDecision {
    BelowMinimum,
    Accepted(f64),
    Clamped(f64),
}

impl AmountDecision {
    /// 可写入的金额
    pub fn amount(&self) -> Option<f64> {
        match self {
            AmountDecision::BelowMinimum => None,
            AmountDecision::Accepted(a) | AmountDecision::Clamped(a) => Some(*a),
        }
    }
}

pub fn settle_amount(amount: f64, min: f64, max: f64) -> AmountDecision {
    if amount < min {
        AmountDecision::BelowMinimum
    } else if amount > max {
        AmountDecision::Clamped(max)
    } else {
        AmountDecision::Accepted(amount)
    }
}
