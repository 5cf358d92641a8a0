//! 通用仓储（Repository）
//!
//! 面向单一实体类型的类型安全 CRUD 契约，外加写前乐观锁版本校验；
//! 全部 I/O 委托给注入的 `StorageSession`。仓储自身无共享可变状态，
//! 所有操作在调用方线程同步执行，可能阻塞于存储 I/O。
//!
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    entity::Entity,
    error::{DaoError, DaoResult},
    persist::{LockMode, StorageSession},
};

/// 仓储上行契约：按具体实体类型参数化的八个操作
pub trait Repository<E>: Send + Sync
where
    E: Entity,
{
    /// 插入或更新实体；持久化后标识与版本被写回实体
    fn save(&self, entity: &mut E) -> DaoResult<()>;

    /// 将游离/瞬时副本与存储中的受管实例合并，返回受管实例。
    /// 用于调用方持有陈旧副本、需要调和而非盲目覆盖的场景。
    fn merge(&self, entity: E) -> DaoResult<E>;

    /// 写前乐观锁版本校验。
    ///
    /// 标识未赋值时直接返回（无可比较对象，不发出任何存储查询）；
    /// 否则仅投影版本列做一次窄查询：行不存在视为已被并发删除、
    /// 不作为陈旧处理；版本不一致则以 `StaleObjectState` 失败，
    /// 携带实体类型与标识。校验结果不跨调用缓存。
    fn check_version(&self, entity: &E) -> DaoResult<()>;

    /// 获取升级模式行锁，保证后续读-改-写序列不被并发写者交错。
    /// 仅允许对已持久化实体调用；瞬时实体报 `IllegalState`。
    fn lock(&self, entity: &E) -> DaoResult<()>;

    /// 按标识加载实体；不存在则以 `InstanceNotFound` 失败
    fn find(&self, id: &E::Key) -> DaoResult<E>;

    /// 存在性检查：仅投影标识列，绝不加载整行；不存在返回 `false` 而非错误
    fn exists(&self, id: &E::Key) -> DaoResult<bool>;

    /// 删除标识对应的实体；不存在则传播 `InstanceNotFound` 且不发出删除
    fn remove(&self, id: &E::Key) -> DaoResult<()>;

    /// 列举该实体类型的全部持久化行。
    /// 刻意保持最小化：无分页无过滤，更复杂的查询应直接使用存储会话。
    fn list(&self) -> DaoResult<Vec<E>>;
}

impl<E, T> Repository<E> for Arc<T>
where
    E: Entity,
    T: Repository<E> + ?Sized,
{
    fn save(&self, entity: &mut E) -> DaoResult<()> {
        (**self).save(entity)
    }

    fn merge(&self, entity: E) -> DaoResult<E> {
        (**self).merge(entity)
    }

    fn check_version(&self, entity: &E) -> DaoResult<()> {
        (**self).check_version(entity)
    }

    fn lock(&self, entity: &E) -> DaoResult<()> {
        (**self).lock(entity)
    }

    fn find(&self, id: &E::Key) -> DaoResult<E> {
        (**self).find(id)
    }

    fn exists(&self, id: &E::Key) -> DaoResult<bool> {
        (**self).exists(id)
    }

    fn remove(&self, id: &E::Key) -> DaoResult<()> {
        (**self).remove(id)
    }

    fn list(&self) -> DaoResult<Vec<E>> {
        (**self).list()
    }
}

/// 基于存储会话的通用仓储实现。
/// 除实体类型绑定与会话句柄外无任何状态；错误原样传播，
/// 不做任何重试（重试策略属于调用方或会话）。
pub struct GenericRepository<E, S>
where
    E: Entity,
    S: StorageSession<E>,
{
    session: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> GenericRepository<E, S>
where
    E: Entity,
    S: StorageSession<E>,
{
    pub fn new(session: Arc<S>) -> Self {
        Self {
            session,
            _entity: PhantomData,
        }
    }

    /// 访问底层会话，供需要更复杂查询的调用方使用
    pub fn session(&self) -> &Arc<S> {
        &self.session
    }
}

impl<E, S> Repository<E> for GenericRepository<E, S>
where
    E: Entity,
    S: StorageSession<E>,
{
    fn save(&self, entity: &mut E) -> DaoResult<()> {
        self.session.upsert(entity)
    }

    fn merge(&self, entity: E) -> DaoResult<E> {
        self.session.merge_detached(entity)
    }

    fn check_version(&self, entity: &E) -> DaoResult<()> {
        // 瞬时实体无可比较对象
        let Some(id) = entity.id() else {
            return Ok(());
        };

        let version = entity.version().ok_or_else(|| DaoError::IllegalState {
            reason: format!("{} entity has identity but no version", E::TYPE),
        })?;

        match self.session.project_version(id)? {
            // 行已被并发删除：不作为陈旧处理，后续操作自会暴露
            None => Ok(()),
            Some(stored) if stored == version => Ok(()),
            Some(_) => Err(DaoError::StaleObjectState {
                entity_type: E::TYPE,
                id: id.to_string(),
            }),
        }
    }

    fn lock(&self, entity: &E) -> DaoResult<()> {
        if entity.is_transient() {
            return Err(DaoError::IllegalState {
                reason: format!("cannot lock transient {} entity", E::TYPE),
            });
        }

        self.session.lock_row(entity, LockMode::Upgrade)
    }

    fn find(&self, id: &E::Key) -> DaoResult<E> {
        self.session
            .get_by_id(id)?
            .ok_or_else(|| DaoError::InstanceNotFound {
                entity_type: E::TYPE,
                id: id.to_string(),
            })
    }

    fn exists(&self, id: &E::Key) -> DaoResult<bool> {
        self.session.contains_identity(id)
    }

    fn remove(&self, id: &E::Key) -> DaoResult<()> {
        let entity = self.find(id)?;

        self.session.delete_existing(entity)
    }

    fn list(&self) -> DaoResult<Vec<E>> {
        self.session.list_all()
    }
}
