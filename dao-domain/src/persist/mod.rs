//! 持久化（persist）
//!
//! 定义通用仓储契约及其消费的存储会话接口，支持：
//! - 实体的保存/合并/查找/存在性检查/删除/列举（`Repository`）；
//! - 写前乐观锁版本校验（`Repository::check_version`）与行级升级锁；
//! - 存储会话抽象（`StorageSession`）与实体的存储侧形态（`StoredRecord`）；
//! - 基于内存的参考会话实现（`InMemorySession`），用于测试与示例。
//!
//! 该模块聚焦协议与装配逻辑，具体存储后端（如关系型数据库）由上层提供实现并注入。
//!
mod repository;
mod session;
mod session_inmemory;
mod stored_record;

pub use repository::{GenericRepository, Repository};
pub use session::{LockMode, StorageSession};
pub use session_inmemory::InMemorySession;
pub use stored_record::StoredRecord;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::error::DaoError;
    use crate::value_object::Version;
    use dao_macros::entity;
    use serde::{Deserialize, Serialize};

    #[entity]
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Task {
        title: String,
    }

    #[entity(name = "work_report")]
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct WorkReport {
        hours: u32,
    }

    // 置毒后序列化必然失败的实体，用于验证失败的持久化不改写实体状态
    #[derive(Debug, Clone, Default, Deserialize)]
    struct Flaky {
        id: Option<String>,
        version: Option<Version>,
        poisoned: bool,
    }

    impl Entity for Flaky {
        type Key = String;
        const TYPE: &'static str = "flaky";

        fn id(&self) -> Option<&String> {
            self.id.as_ref()
        }

        fn version(&self) -> Option<Version> {
            self.version
        }

        fn assign_identity(&mut self, id: String) {
            self.id = Some(id);
        }

        fn set_version(&mut self, version: Version) {
            self.version = Some(version);
        }
    }

    impl Serialize for Flaky {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            use serde::ser::SerializeStruct;

            if self.poisoned {
                return Err(<S::Error as serde::ser::Error>::custom("poisoned"));
            }

            let mut state = serializer.serialize_struct("Flaky", 3)?;
            state.serialize_field("id", &self.id)?;
            state.serialize_field("version", &self.version)?;
            state.serialize_field("poisoned", &self.poisoned)?;
            state.end()
        }
    }

    #[test]
    fn stored_record_roundtrip() {
        let mut task = Task {
            title: "prepare estimate".into(),
            ..Default::default()
        };
        task.assign_identity("t-1".to_string());
        task.set_version(Version::from_value(3));

        let record = StoredRecord::from_entity(&task).unwrap();
        assert_eq!(record.entity_id(), "t-1");
        assert_eq!(record.entity_type(), Task::TYPE);
        assert_eq!(record.version(), Version::from_value(3));

        let restored: Task = record.to_entity().unwrap();
        assert_eq!(restored.id(), Some(&"t-1".to_string()));
        assert_eq!(restored.version(), Some(Version::from_value(3)));
        assert_eq!(restored.title, task.title);
    }

    #[test]
    fn stored_record_rejects_transient_entity() {
        let task = Task {
            title: "unsaved".into(),
            ..Default::default()
        };

        let err = StoredRecord::from_entity(&task).unwrap_err();
        assert!(matches!(err, DaoError::IllegalState { .. }));
    }

    #[test]
    fn stored_record_type_check() {
        let mut task = Task::default();
        task.assign_identity("t-2".to_string());
        task.set_version(Version::new());

        let record = StoredRecord::from_entity(&task).unwrap();

        // 跨类型恢复应报类型不匹配
        let err = record.to_entity::<WorkReport>().unwrap_err();
        match err {
            DaoError::TypeMismatch { expected, found } => {
                assert_eq!(expected, "work_report");
                assert_eq!(found, "Task");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stored_record_update_preserves_creation_time() {
        let mut task = Task {
            title: "v0".into(),
            ..Default::default()
        };
        task.assign_identity("t-3".to_string());
        task.set_version(Version::new());

        let record = StoredRecord::from_entity(&task).unwrap();

        task.title = "v1".into();
        task.set_version(Version::from_value(1));
        let updated = record.apply_update(&task).unwrap();

        assert_eq!(updated.saved_at(), record.saved_at());
        assert_eq!(updated.version(), Version::from_value(1));

        let restored: Task = updated.to_entity().unwrap();
        assert_eq!(restored.title, "v1");
    }

    // 插入阶段序列化失败：标识与版本不得写回实体，存储无行
    #[test]
    fn failed_insert_leaves_entity_transient() {
        let session = InMemorySession::<Flaky>::new(|| "f-1".to_string());

        let mut entity = Flaky {
            poisoned: true,
            ..Default::default()
        };
        let err = session.upsert(&mut entity).unwrap_err();

        assert!(matches!(err, DaoError::Serde { .. }));
        assert!(entity.is_transient());
        assert_eq!(entity.version(), None);
        assert!(session.is_empty());
    }

    // 更新阶段序列化失败：实体与存储都停留在失败前的版本
    #[test]
    fn failed_update_keeps_entity_version() {
        let session = InMemorySession::<Flaky>::new(|| "f-2".to_string());

        let mut entity = Flaky::default();
        session.upsert(&mut entity).unwrap();
        assert_eq!(entity.version(), Some(Version::new()));

        entity.poisoned = true;
        let err = session.upsert(&mut entity).unwrap_err();
        assert!(matches!(err, DaoError::Serde { .. }));

        assert_eq!(entity.version(), Some(Version::new()));
        let stored = session.project_version(entity.id().unwrap()).unwrap();
        assert_eq!(stored, Some(Version::new()));
    }
}
