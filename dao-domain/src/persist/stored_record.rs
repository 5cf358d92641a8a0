//! 实体持久化模型（StoredRecord）
//!
//! 定义实体在持久化层的标准形态与同实体间的双向转换：
//! 标识与版本以列的形式冗余存储，支持只读取单列的窄投影查询。
//!
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    entity::Entity,
    error::{DaoError, DaoResult},
    value_object::Version,
};

#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct StoredRecord {
    /// 实体标识的存储原生（字符串）形式
    entity_id: String,
    /// 实体类型名，用于恢复时的类型校验
    entity_type: String,
    /// 实体版本，用于乐观锁和并发控制
    version: Version,
    /// 首次持久化时间
    saved_at: DateTime<Utc>,
    /// 最近一次更新时间
    updated_at: DateTime<Utc>,
    /// 实体负载，存储实体的全部持久化字段
    payload: Value,
}

impl StoredRecord {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// 从已持久化（标识与版本均已写回）的实体构建存储记录
    pub fn from_entity<E>(entity: &E) -> DaoResult<Self>
    where
        E: Entity + Serialize,
    {
        let (id, version) = identity_and_version(entity)?;
        let now = Utc::now();

        Ok(StoredRecord::builder()
            .entity_id(id)
            .entity_type(E::TYPE.to_string())
            .version(version)
            .saved_at(now)
            .updated_at(now)
            .payload(serde_json::to_value(entity)?)
            .build())
    }

    /// 构建本记录的后继版本：负载与版本取自实体，创建时间保持不变
    pub fn apply_update<E>(&self, entity: &E) -> DaoResult<Self>
    where
        E: Entity + Serialize,
    {
        let (id, version) = identity_and_version(entity)?;

        Ok(StoredRecord::builder()
            .entity_id(id)
            .entity_type(self.entity_type.clone())
            .version(version)
            .saved_at(self.saved_at)
            .updated_at(Utc::now())
            .payload(serde_json::to_value(entity)?)
            .build())
    }

    /// 恢复为实体；记录的类型标注必须与目标实体类型一致
    pub fn to_entity<E>(&self) -> DaoResult<E>
    where
        E: Entity + DeserializeOwned,
    {
        if self.entity_type != E::TYPE {
            return Err(DaoError::TypeMismatch {
                expected: E::TYPE.to_string(),
                found: self.entity_type.clone(),
            });
        }

        let entity: E = serde_json::from_value(self.payload.clone())?;

        Ok(entity)
    }
}

// 读取实体的标识与版本；二者缺一即为契约违反
fn identity_and_version<E: Entity>(entity: &E) -> DaoResult<(String, Version)> {
    let id = entity.id().ok_or_else(|| DaoError::IllegalState {
        reason: format!("{} entity has no assigned identity", E::TYPE),
    })?;

    let version = entity.version().ok_or_else(|| DaoError::IllegalState {
        reason: format!("{} entity has identity but no version", E::TYPE),
    })?;

    Ok((id.to_string(), version))
}
