//! 通用 DAO 基础库（dao-domain）
//!
//! 提供带乐观锁版本校验的通用实体持久化契约，用于在应用中实现：
//! - 实体（`entity`）的标识与版本能力契约建模
//! - 版本号值对象（`value_object`）与按次递增的版本语义
//! - 面向存储会话的通用仓储（`persist`）：save/merge/find/exists/remove/list/lock
//!   以及写前冲突检测 `check_version`
//!
//! 本 crate 不实现存储引擎，仅定义仓储上行契约与其消费的 `StorageSession`
//! 下行接口，并附带一个基于内存的参考会话用于测试与示例；
//! 具体后端（例如关系型数据库）由上层提供实现并注入。
//!
//! 典型用法：
//! 1. 用 `#[entity]` 定义实体类型（标识与版本字段由宏注入）；
//! 2. 为目标后端实现 `StorageSession`，或在测试中使用 `InMemorySession`；
//! 3. 以 `GenericRepository::new(session)` 构造仓储并执行 CRUD；
//! 4. 在读-改-写流程前调用 `check_version` 做写前陈旧性检测，
//!    收到 `StaleObjectState` 时重新加载并重试业务操作。
//!
pub mod entity;
pub mod error;
pub mod persist;
pub mod value_object;

// 允许在本 crate 内部通过 ::dao_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::dao_domain 路径。
extern crate self as dao_domain;
