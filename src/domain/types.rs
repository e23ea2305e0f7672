// ==========================================
// 捐赠税务申报 - 领域类型定义
// ==========================================
// 联系人类别 / 捐赠人类别 / 年度状态 / 税务年度
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 税务年度 (Tax Year)
// ==========================================
// 只能由输入校验器构造,保证为 4 位数字年度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxYear(i32);

impl TaxYear {
    pub(crate) fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// 年度起点 (含)
    pub fn start_timestamp(&self) -> String {
        format!("{:04}-01-01 00:00:00", self.0)
    }

    /// 年度终点 (含)
    pub fn end_timestamp(&self) -> String {
        format!("{:04}-12-31 23:59:59", self.0)
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

// ==========================================
// 联系人类别 (Contact Type)
// ==========================================
// 对齐: civicrm_contact.contact_type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactType {
    Individual,
    Household,
    Organization,
    /// 注册表中出现的其他类别 (保留原值)
    Other(String),
}

impl ContactType {
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "Individual" => ContactType::Individual,
            "Household" => ContactType::Household,
            "Organization" => ContactType::Organization,
            other => ContactType::Other(other.to_string()),
        }
    }

    pub fn to_db_str(&self) -> &str {
        match self {
            ContactType::Individual => "Individual",
            ContactType::Household => "Household",
            ContactType::Organization => "Organization",
            ContactType::Other(s) => s.as_str(),
        }
    }

    /// 映射为申报文件中的捐赠人类别
    ///
    /// # 返回
    /// - Some(DonorType): 可申报类别
    /// - None: 未知类别 (无法确定证件号来源)
    pub fn donor_type(&self) -> Option<DonorType> {
        match self {
            ContactType::Individual => Some(DonorType::Person),
            ContactType::Household => Some(DonorType::Household),
            ContactType::Organization => Some(DonorType::Organization),
            ContactType::Other(_) => None,
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 捐赠人类别 (Donor Type)
// ==========================================
// 写入 civicrm_oppgave.donor_type 的标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonorType {
    Person,       // 个人 (personsnummer)
    Household,    // 家庭 (personsnummer)
    Organization, // 组织 (organisasjonsnummer)
}

impl DonorType {
    pub fn label(&self) -> &'static str {
        match self {
            DonorType::Person => "Person",
            DonorType::Household => "Household",
            DonorType::Organization => "Organization",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Person" => Some(DonorType::Person),
            "Household" => Some(DonorType::Household),
            "Organization" => Some(DonorType::Organization),
            _ => None,
        }
    }

    /// 是否使用个人证件号 (personsnummer)
    pub fn uses_person_number(&self) -> bool {
        matches!(self, DonorType::Person | DonorType::Household)
    }
}

impl fmt::Display for DonorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 年度状态 (Year Status Code)
// ==========================================
// 对齐: civicrm_skatteinnberetninger.status_id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearStatusCode {
    Open,           // 1
    BatchCompleted, // 2: 至少完成一轮批处理
    Other(i64),
}

impl YearStatusCode {
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => YearStatusCode::Open,
            2 => YearStatusCode::BatchCompleted,
            other => YearStatusCode::Other(other),
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            YearStatusCode::Open => 1,
            YearStatusCode::BatchCompleted => 2,
            YearStatusCode::Other(id) => *id,
        }
    }
}
