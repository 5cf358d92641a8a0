//! 基于内存的存储会话实现
//!
//! 以 `DashMap` 保存实体的存储侧记录，按标识的字符串形式为键，
//! 供测试与示例作为参考后端使用。版本语义与关系型后端一致：
//! 插入时初始化为 0，带版本的更新命中零行或版本不符即报
//! `StaleObjectState`，成功更新后版本严格加一并写回实体。
//!
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    entity::Entity,
    error::{DaoError, DaoResult},
    persist::{LockMode, StorageSession, StoredRecord},
    value_object::Version,
};

/// 基于内存的 StorageSession 实现
/// - 标识由注入的键生成器分配（显式依赖传递，不使用全局注册表）
/// - 行级锁仅做登记，供测试断言锁的获取情况
pub struct InMemorySession<E: Entity> {
    records: DashMap<String, StoredRecord>,
    locks: DashMap<String, LockMode>,
    key_source: Arc<dyn Fn() -> E::Key + Send + Sync>,
}

impl<E: Entity> InMemorySession<E> {
    /// 创建会话；`key_source` 在首次持久化瞬时实体时分配标识
    pub fn new<F>(key_source: F) -> Self
    where
        F: Fn() -> E::Key + Send + Sync + 'static,
    {
        Self {
            records: DashMap::new(),
            locks: DashMap::new(),
            key_source: Arc::new(key_source),
        }
    }

    /// 该标识对应的行当前是否被锁定
    pub fn is_locked(&self, id: &E::Key) -> bool {
        self.locks.contains_key(&id.to_string())
    }

    /// 当前持久化的行数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<E> StorageSession<E> for InMemorySession<E>
where
    E: Entity + Clone + Serialize + DeserializeOwned,
{
    fn get_by_id(&self, id: &E::Key) -> DaoResult<Option<E>> {
        self.records
            .get(&id.to_string())
            .map(|record| record.to_entity())
            .transpose()
    }

    fn upsert(&self, entity: &mut E) -> DaoResult<()> {
        match (entity.id().cloned(), entity.version()) {
            // 瞬时实体：分配标识并初始化版本。
            // 记录先在暂存副本上构建，落盘成功才写回实体，
            // 构建失败（如序列化错误）时实体保持瞬时状态。
            (None, _) => {
                let key = (self.key_source)();

                let mut staged = entity.clone();
                staged.assign_identity(key.clone());
                staged.set_version(Version::new());
                let record = StoredRecord::from_entity(&staged)?;

                self.records.insert(key.to_string(), record);
                entity.assign_identity(key);
                entity.set_version(Version::new());

                Ok(())
            }
            // 调用方自赋标识的首次插入
            (Some(key), None) => {
                let slot = key.to_string();
                if self.records.contains_key(&slot) {
                    return Err(DaoError::Storage {
                        reason: format!("duplicate identity on insert: {slot}"),
                    });
                }

                let mut staged = entity.clone();
                staged.set_version(Version::new());
                let record = StoredRecord::from_entity(&staged)?;

                self.records.insert(slot, record);
                entity.set_version(Version::new());

                Ok(())
            }
            // 带版本更新：命中零行或版本不符即为陈旧
            (Some(key), Some(version)) => {
                let slot = key.to_string();

                let Some(existing) = self.records.get(&slot).map(|r| r.value().clone()) else {
                    return Err(stale::<E>(&slot));
                };

                if existing.version() != version {
                    return Err(stale::<E>(&slot));
                }

                let mut staged = entity.clone();
                staged.set_version(version.next());
                let record = existing.apply_update(&staged)?;

                self.records.insert(slot, record);
                entity.set_version(version.next());

                Ok(())
            }
        }
    }

    fn merge_detached(&self, entity: E) -> DaoResult<E> {
        let mut entity = entity;

        let Some(key) = entity.id().cloned() else {
            // 瞬时副本：合并等价于首次持久化
            self.upsert(&mut entity)?;
            return Ok(entity);
        };

        let slot = key.to_string();

        match self.records.get(&slot).map(|r| r.version()) {
            // 受管实例以存储中的版本为准，再执行一次带版本更新
            Some(stored_version) => {
                entity.set_version(stored_version);
                self.upsert(&mut entity)?;
            }
            // 行已不存在：作为新插入处理，保留副本携带的标识
            None => {
                entity.set_version(Version::new());
                let record = StoredRecord::from_entity(&entity)?;
                self.records.insert(slot, record);
            }
        }

        Ok(entity)
    }

    fn project_version(&self, id: &E::Key) -> DaoResult<Option<Version>> {
        Ok(self.records.get(&id.to_string()).map(|r| r.version()))
    }

    fn contains_identity(&self, id: &E::Key) -> DaoResult<bool> {
        Ok(self.records.contains_key(&id.to_string()))
    }

    fn delete_existing(&self, entity: E) -> DaoResult<()> {
        let slot = identity_slot(&entity)?;

        if self.records.remove(&slot).is_none() {
            return Err(DaoError::InstanceNotFound {
                entity_type: E::TYPE,
                id: slot,
            });
        }

        self.locks.remove(&slot);

        Ok(())
    }

    fn lock_row(&self, entity: &E, mode: LockMode) -> DaoResult<()> {
        let slot = identity_slot(entity)?;

        if !self.records.contains_key(&slot) {
            return Err(DaoError::InstanceNotFound {
                entity_type: E::TYPE,
                id: slot,
            });
        }

        self.locks.insert(slot, mode);

        Ok(())
    }

    fn list_all(&self) -> DaoResult<Vec<E>> {
        self.records
            .iter()
            .map(|record| record.to_entity())
            .collect()
    }
}

fn identity_slot<E: Entity>(entity: &E) -> DaoResult<String> {
    entity
        .id()
        .map(|id| id.to_string())
        .ok_or_else(|| DaoError::IllegalState {
            reason: format!("{} entity has no assigned identity", E::TYPE),
        })
}

fn stale<E: Entity>(slot: &str) -> DaoError {
    DaoError::StaleObjectState {
        entity_type: E::TYPE,
        id: slot.to_string(),
    }
}
