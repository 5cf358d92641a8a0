//! 通用仓储的完整用法演示
//!
//! 运行：`cargo run -p dao-domain --example task_repository`
//!
use std::sync::Arc;

use anyhow::Result;
use dao_domain::entity::Entity;
use dao_domain::error::DaoError;
use dao_domain::persist::{GenericRepository, InMemorySession, Repository};
use dao_macros::{entity, entity_id};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[entity_id]
struct TaskId(Uuid);

#[entity(id = TaskId, name = "task")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Task {
    title: String,
    hours: u32,
}

fn main() -> Result<()> {
    let session = Arc::new(InMemorySession::new(|| TaskId::new(Uuid::new_v4())));
    let repo = GenericRepository::new(Arc::clone(&session));

    // 保存瞬时实体：存储分配标识并初始化版本
    let mut task = Task {
        title: "prepare cost estimate".into(),
        hours: 4,
        ..Default::default()
    };
    repo.save(&mut task)?;
    let id = task.id().cloned().expect("identity assigned on save");
    println!("saved {} at {}", id, task.version().expect("versioned"));

    // 两个调用方各自加载同一版本
    let copy_a = repo.find(&id)?;
    let mut copy_b = repo.find(&id)?;

    // B 先提交：存储版本前进一格
    copy_b.hours = 6;
    repo.save(&mut copy_b)?;
    println!("writer B committed {}", copy_b.version().expect("versioned"));

    // A 的写前校验发现冲突
    match repo.check_version(&copy_a) {
        Err(DaoError::StaleObjectState { entity_type, id }) => {
            println!("writer A is stale: type={entity_type}, id={id}");
        }
        other => anyhow::bail!("expected stale check, got {other:?}"),
    }

    // A 重读、在行锁保护下重做业务变更并提交
    let mut fresh = repo.find(&id)?;
    repo.lock(&fresh)?;
    fresh.title = "prepare cost estimate (revised)".into();
    repo.save(&mut fresh)?;
    println!("writer A retried at {}", fresh.version().expect("versioned"));

    // 清理
    repo.remove(&id)?;
    println!("removed; exists = {}", repo.exists(&id)?);

    Ok(())
}
