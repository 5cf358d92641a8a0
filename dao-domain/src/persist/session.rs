//! 存储会话协议（StorageSession）
//!
//! 仓储消费的下行接口：按键读取、插入/更新、合并游离副本、
//! 窄投影查询（版本列/标识列）、删除、行级锁与全量列举。
//! 每个查询都是具名方法并带有显式返回类型，不使用回调闭包包装。
//!
//! 会话被假定为事务作用域内、非线程共享；取消与超时由会话自行处理。
//!
use std::sync::Arc;

use crate::{entity::Entity, error::DaoResult, value_object::Version};

/// 行级锁模式
///
/// 仓储的读-改-写序列只发升级锁；其他模式待有调用方时再补充。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// 升级锁：阻止并发写者交错
    Upgrade,
}

/// 存储会话抽象
///
/// 版本语义由实现方维护：插入时初始化版本，成功更新时严格加一；
/// 带版本的更新命中零行（行不存在或版本不符）必须以
/// `StaleObjectState` 失败，而不是静默写入。
pub trait StorageSession<E: Entity>: Send + Sync {
    /// 按标识加载完整实体；不存在返回 `None`
    fn get_by_id(&self, id: &E::Key) -> DaoResult<Option<E>>;

    /// 插入或更新实体；插入时写回标识与初始版本，更新时写回递增后的版本
    fn upsert(&self, entity: &mut E) -> DaoResult<()>;

    /// 将游离/瞬时副本与存储中的受管实例合并，返回受管实例
    fn merge_detached(&self, entity: E) -> DaoResult<E>;

    /// 仅投影版本列的窄查询；不加载整行
    fn project_version(&self, id: &E::Key) -> DaoResult<Option<Version>>;

    /// 仅投影标识列的存在性查询；不加载整行
    fn contains_identity(&self, id: &E::Key) -> DaoResult<bool>;

    /// 删除已持久化实体
    fn delete_existing(&self, entity: E) -> DaoResult<()>;

    /// 对实体对应的行加锁
    fn lock_row(&self, entity: &E, mode: LockMode) -> DaoResult<()>;

    /// 列举该实体类型的全部持久化行
    fn list_all(&self) -> DaoResult<Vec<E>>;
}

impl<E, T> StorageSession<E> for Arc<T>
where
    E: Entity,
    T: StorageSession<E> + ?Sized,
{
    fn get_by_id(&self, id: &E::Key) -> DaoResult<Option<E>> {
        (**self).get_by_id(id)
    }

    fn upsert(&self, entity: &mut E) -> DaoResult<()> {
        (**self).upsert(entity)
    }

    fn merge_detached(&self, entity: E) -> DaoResult<E> {
        (**self).merge_detached(entity)
    }

    fn project_version(&self, id: &E::Key) -> DaoResult<Option<Version>> {
        (**self).project_version(id)
    }

    fn contains_identity(&self, id: &E::Key) -> DaoResult<bool> {
        (**self).contains_identity(id)
    }

    fn delete_existing(&self, entity: E) -> DaoResult<()> {
        (**self).delete_existing(entity)
    }

    fn lock_row(&self, entity: &E, mode: LockMode) -> DaoResult<()> {
        (**self).lock_row(entity, mode)
    }

    fn list_all(&self) -> DaoResult<Vec<E>> {
        (**self).list_all()
    }
}
