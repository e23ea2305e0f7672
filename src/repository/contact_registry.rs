// ==========================================
// 捐赠税务申报 - 联系人注册表接口
// ==========================================
// 联系人与自定义字段表归宿主系统所有,本作业只读
// 约束: 表名/列名来自已校验的配置,其余参数一律绑定
// ==========================================

use crate::config::CustomFieldLocation;
use crate::domain::contact::{ContactData, ContactLookup, CustomIdentifiers};
use crate::domain::types::ContactType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// Trait: ContactRegistry
// ==========================================
/// 外部联系人注册表
pub trait ContactRegistry {
    /// 按ID查询联系人；不存在返回 `ContactLookup::NotFound`
    fn lookup_contact(&self, contact_id: i64) -> RepositoryResult<ContactLookup>;

    /// 读取证件号自定义字段；无记录时返回两个空串
    fn custom_identifiers(&self, contact_id: i64) -> RepositoryResult<CustomIdentifiers>;
}

// ==========================================
// SqliteContactRegistry - 基于宿主库表的实现
// ==========================================
pub struct SqliteContactRegistry {
    conn: Arc<Mutex<Connection>>,
    location: CustomFieldLocation,
}

impl SqliteContactRegistry {
    pub fn new(conn: Arc<Mutex<Connection>>, location: CustomFieldLocation) -> Self {
        Self { conn, location }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl ContactRegistry for SqliteContactRegistry {
    fn lookup_contact(&self, contact_id: i64) -> RepositoryResult<ContactLookup> {
        let conn = self.get_conn()?;
        let contact = conn
            .query_row(
                r#"
                SELECT id, contact_type, display_name
                FROM civicrm_contact
                WHERE id = ?1 AND COALESCE(is_deleted, 0) = 0
                "#,
                params![contact_id],
                |row| {
                    Ok(ContactData {
                        id: row.get(0)?,
                        contact_type: ContactType::from_db_str(
                            &row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        ),
                        display_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;

        Ok(match contact {
            Some(contact) => ContactLookup::Found(contact),
            None => ContactLookup::NotFound,
        })
    }

    fn custom_identifiers(&self, contact_id: i64) -> RepositoryResult<CustomIdentifiers> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {person}, {org} FROM {table} WHERE entity_id = ?1 LIMIT 1",
            person = self.location.person_number_column,
            org = self.location.organization_number_column,
            table = self.location.table,
        );

        let identifiers = conn
            .query_row(&sql, params![contact_id], |row| {
                Ok(CustomIdentifiers {
                    person_number: value_to_string(row.get(0)?),
                    organization_number: value_to_string(row.get(1)?),
                })
            })
            .optional()?;

        Ok(identifiers.unwrap_or_default())
    }
}

/// 自定义字段列可能是 TEXT 也可能是 INTEGER
fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE civicrm_contact (
                id INTEGER PRIMARY KEY,
                contact_type TEXT,
                display_name TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE civicrm_value_numbers (
                id INTEGER PRIMARY KEY,
                entity_id INTEGER NOT NULL,
                person_no TEXT,
                org_no INTEGER
            );
            INSERT INTO civicrm_contact (id, contact_type, display_name) VALUES
                (1, 'Individual', 'Ola Nordmann'),
                (2, 'Organization', 'Frivillig AS');
            INSERT INTO civicrm_contact (id, contact_type, display_name, is_deleted) VALUES
                (3, 'Individual', 'Slettet Person', 1);
            INSERT INTO civicrm_value_numbers (entity_id, person_no, org_no) VALUES
                (1, '01019012345', NULL),
                (2, NULL, 987654321);
            "#,
        )
        .unwrap();
        Arc::new(Mutex::new(conn))
    }

    fn registry() -> SqliteContactRegistry {
        SqliteContactRegistry::new(
            setup(),
            CustomFieldLocation {
                table: "civicrm_value_numbers".to_string(),
                person_number_column: "person_no".to_string(),
                organization_number_column: "org_no".to_string(),
            },
        )
    }

    #[test]
    fn test_lookup_found() {
        let registry = registry();
        match registry.lookup_contact(1).unwrap() {
            ContactLookup::Found(contact) => {
                assert_eq!(contact.id, 1);
                assert_eq!(contact.contact_type, ContactType::Individual);
                assert_eq!(contact.display_name, "Ola Nordmann");
            }
            ContactLookup::NotFound => panic!("Expected Found"),
        }
    }

    #[test]
    fn test_lookup_missing_and_deleted() {
        let registry = registry();
        assert_eq!(registry.lookup_contact(99).unwrap(), ContactLookup::NotFound);
        assert_eq!(registry.lookup_contact(3).unwrap(), ContactLookup::NotFound);
    }

    #[test]
    fn test_custom_identifiers() {
        let registry = registry();

        let person = registry.custom_identifiers(1).unwrap();
        assert_eq!(person.person_number, "01019012345");
        assert_eq!(person.organization_number, "");

        // INTEGER 列也按字符串读出
        let org = registry.custom_identifiers(2).unwrap();
        assert_eq!(org.organization_number, "987654321");

        // 无自定义字段行
        let none = registry.custom_identifiers(3).unwrap();
        assert_eq!(none, CustomIdentifiers::default());
    }
}
