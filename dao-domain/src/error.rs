//! 统一错误定义
//!
//! 聚焦仓储与存储会话的最小必要集合：未找到、版本陈旧、非法状态、
//! 类型不匹配与底层存储失败，便于在各实现层统一转换为 `DaoError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DaoError {
    // --- 序列化/键解析 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },

    // --- 仓储/持久化 ---
    #[error("instance not found: type={entity_type}, id={id}")]
    InstanceNotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("stale object state: type={entity_type}, id={id}")]
    StaleObjectState {
        entity_type: &'static str,
        id: String,
    },
    #[error("illegal state: {reason}")]
    IllegalState { reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },

    // --- 底层存储 ---
    #[error("storage error: {reason}")]
    Storage { reason: String },
}

/// 统一 Result 类型别名
pub type DaoResult<T> = Result<T, DaoError>;

// ---- Cross-crate conversions for infrastructure convenience ----
// 允许在基础设施层直接使用 `?` 将 uuid 等键解析错误转换为 DaoError

impl From<uuid::Error> for DaoError {
    fn from(err: uuid::Error) -> Self {
        DaoError::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<std::num::ParseIntError> for DaoError {
    fn from(err: std::num::ParseIntError) -> Self {
        DaoError::Parse {
            reason: err.to_string(),
        }
    }
}
