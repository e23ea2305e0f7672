// ==========================================
// 捐赠税务申报 - 联系人领域模型
// ==========================================
// 联系人与自定义证件号字段均归外部注册表所有,本作业只读
// ==========================================

use crate::domain::types::{ContactType, DonorType};
use serde::{Deserialize, Serialize};

// ==========================================
// ContactData - 注册表返回的联系人分类信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactData {
    pub id: i64,
    pub contact_type: ContactType,
    pub display_name: String,
}

// ==========================================
// ContactLookup - 按ID查询联系人的结果
// ==========================================
// 查询失败不是异常,调用方显式分支处理
#[derive(Debug, Clone, PartialEq)]
pub enum ContactLookup {
    Found(ContactData),
    NotFound,
}

// ==========================================
// CustomIdentifiers - 证件号自定义字段
// ==========================================
// 未找到自定义字段行时两个号码均为空串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomIdentifiers {
    pub person_number: String,       // personsnummer
    pub organization_number: String, // organisasjonsnummer
}

// ==========================================
// DonorData - 解析后的捐赠人信息
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorData {
    pub donor_type: Option<DonorType>,
    pub name: Option<String>,
    pub number: Option<String>,
}

impl DonorData {
    /// 由联系人与自定义字段组装捐赠人信息
    pub fn from_contact(contact: &ContactData, identifiers: &CustomIdentifiers) -> Self {
        let donor_type = contact.contact_type.donor_type();
        let number = donor_type.map(|t| {
            if t.uses_person_number() {
                identifiers.person_number.clone()
            } else {
                identifiers.organization_number.clone()
            }
        });

        Self {
            donor_type,
            name: Some(contact.display_name.clone()),
            number,
        }
    }

    /// 证件号为空或为 "0" 则不可申报（不做 trim）
    pub fn has_number(&self) -> bool {
        matches!(self.number.as_deref(), Some(n) if !n.is_empty() && n != "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(contact_type: ContactType) -> ContactData {
        ContactData {
            id: 7,
            contact_type,
            display_name: "Kari Nordmann".to_string(),
        }
    }

    fn identifiers() -> CustomIdentifiers {
        CustomIdentifiers {
            person_number: "01019012345".to_string(),
            organization_number: "987654321".to_string(),
        }
    }

    #[test]
    fn test_individual_uses_person_number() {
        let donor = DonorData::from_contact(&contact(ContactType::Individual), &identifiers());
        assert_eq!(donor.donor_type, Some(DonorType::Person));
        assert_eq!(donor.number.as_deref(), Some("01019012345"));
        assert_eq!(donor.name.as_deref(), Some("Kari Nordmann"));
        assert!(donor.has_number());
    }

    #[test]
    fn test_household_uses_person_number() {
        let donor = DonorData::from_contact(&contact(ContactType::Household), &identifiers());
        assert_eq!(donor.donor_type, Some(DonorType::Household));
        assert_eq!(donor.number.as_deref(), Some("01019012345"));
    }

    #[test]
    fn test_organization_uses_organization_number() {
        let donor = DonorData::from_contact(&contact(ContactType::Organization), &identifiers());
        assert_eq!(donor.donor_type, Some(DonorType::Organization));
        assert_eq!(donor.number.as_deref(), Some("987654321"));
    }

    #[test]
    fn test_unknown_type_has_no_number() {
        let donor = DonorData::from_contact(
            &contact(ContactType::Other("Robot".to_string())),
            &identifiers(),
        );
        assert_eq!(donor.donor_type, None);
        assert!(!donor.has_number());
    }

    #[test]
    fn test_empty_donor_data() {
        assert!(!DonorData::default().has_number());

        let with_number = |n: &str| DonorData {
            number: Some(n.to_string()),
            ..DonorData::default()
        };
        assert!(!with_number("").has_number());
        assert!(!with_number("0").has_number());
        // 空白不视为缺失
        assert!(with_number("   ").has_number());
        assert!(with_number("00").has_number());
    }
}
