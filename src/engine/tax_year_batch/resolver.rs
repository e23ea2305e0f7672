// ==========================================
// 捐赠人信息解析
// ==========================================
// 注册表查不到联系人不是致命错误: 返回 Unavailable,
// 由写入环节记 Error 并跳过
// ==========================================

use crate::domain::contact::{ContactLookup, DonorData};
use crate::repository::{ContactRegistry, RepositoryResult};

/// 捐赠人解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonorResolution {
    /// 注册表中存在该联系人（证件号可能为空）
    Found(DonorData),
    /// 查不到或查询失败
    Unavailable,
}

pub struct DonorResolver<'a> {
    registry: &'a dyn ContactRegistry,
}

impl<'a> DonorResolver<'a> {
    pub fn new(registry: &'a dyn ContactRegistry) -> Self {
        Self { registry }
    }

    /// 解析捐赠人类别、名称与证件号
    ///
    /// # 返回
    /// - Ok(DonorResolution::Found): 联系人存在
    /// - Ok(DonorResolution::Unavailable): 查不到或查询失败
    /// - Err: 自定义字段表读取失败
    pub fn resolve(&self, contact_id: i64) -> RepositoryResult<DonorResolution> {
        let contact = match self.registry.lookup_contact(contact_id) {
            Ok(ContactLookup::Found(contact)) => contact,
            Ok(ContactLookup::NotFound) => {
                tracing::debug!(contact_id, "注册表中不存在该联系人");
                return Ok(DonorResolution::Unavailable);
            }
            Err(e) => {
                tracing::warn!(contact_id, error = %e, "联系人查询失败，跳过该联系人");
                return Ok(DonorResolution::Unavailable);
            }
        };

        let identifiers = self.registry.custom_identifiers(contact.id)?;
        Ok(DonorResolution::Found(DonorData::from_contact(
            &contact,
            &identifiers,
        )))
    }
}
