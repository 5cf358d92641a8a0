//! 实体（Entity）基础抽象
//!
//! 为可持久化实体提供统一的标识（Id）与版本（optimistic locking）能力契约。
//! 标识在首次持久化前为空（瞬时实体）；版本由存储层在持久化时写回并维护。
//!
use std::fmt::Display;
use std::hash::Hash;

use crate::value_object::Version;

/// 主键类型约束
///
/// 要求可克隆、可比较、可哈希，并通过 `Display` 序列化为存储层的原生键形式。
pub trait EntityKey: Clone + Eq + Hash + Display + Send + Sync + 'static {}

impl<T> EntityKey for T where T: Clone + Eq + Hash + Display + Send + Sync + 'static {}

/// 可持久化实体的能力契约："具备标识与版本"
///
/// 替代运行时反射的静态访问器接口：具体实体类型（通常经由
/// `dao_macros::entity` 宏）提供标识与版本字段的读写访问，
/// 仓储与存储会话只通过本 trait 与实体交互。
pub trait Entity: Send + Sync {
    /// 实体标识类型
    type Key: EntityKey;

    /// 实体类型名，用于错误信息与存储记录的类型标注
    const TYPE: &'static str;

    /// 获取实体标识；瞬时实体（尚未持久化）为 `None`
    fn id(&self) -> Option<&Self::Key>;

    /// 获取当前版本；首次持久化前为 `None`
    fn version(&self) -> Option<Version>;

    /// 由存储层在首次持久化时写回标识
    fn assign_identity(&mut self, id: Self::Key);

    /// 由存储层在每次成功持久化后写回版本
    fn set_version(&mut self, version: Version);

    /// 是否为瞬时实体（从未持久化，无标识）
    fn is_transient(&self) -> bool {
        self.id().is_none()
    }
}
