//! dao-macros：持久化实体的过程宏
//!
//! 为 `dao-domain` 的实体契约消除样板代码：
//! - `#[entity]`：注入 `id`/`version` 字段并实现 `Entity` trait；
//! - `#[entity_id]`：为单字段 tuple struct 形式的主键类型生成常用实现；
//! - `#[value_object]`：为值对象合并标准派生集合。
//!
//! 宏展开引用 `::dao_domain::...` 绝对路径，使用方需依赖 `dao-domain`。
//!
use proc_macro::TokenStream;

mod derives;
mod entity;
mod entity_id;
mod value_object;

/// 实体宏
/// - 追加字段：`id: Option<IdType>`、`version: Option<Version>`（若缺失）并置于字段最前
/// - 自动为目标结构体实现 `::dao_domain::entity::Entity`（`TYPE/id/version/assign_identity/set_version`）
/// - 支持参数：`#[entity(id = IdType)]`（默认 `String`）、`#[entity(name = "...")]`（默认结构体名）
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体主键宏
/// 用于 `struct TaskId(Uuid);` 这类单字段 tuple struct，
/// 合并标准派生并生成 `new`、`Display`、`FromStr`、`AsRef`、`From` 等实现。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
/// 为结构体或枚举合并标准派生：Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq。
/// 与使用方自带的 `#[derive(...)]` 去重合并。
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
