use dao_domain::entity::Entity;
use dao_domain::value_object::Version;
use dao_macros::entity;

// 默认 String 主键，类型名默认为结构体名
#[entity]
#[derive(Debug, Clone, Default)]
struct Task {
    title: String,
}

// 自定义主键类型与类型名
#[entity(id = uuid::Uuid, name = "work_report")]
#[derive(Debug, Clone, Default)]
struct WorkReport {
    hours: u32,
}

fn main() {
    let mut task = Task {
        title: "estimate".into(),
        ..Default::default()
    };

    // 瞬时实体：无标识无版本
    assert!(task.is_transient());
    assert_eq!(task.version(), None);
    assert_eq!(Task::TYPE, "Task");

    // 存储层写回标识与版本
    task.assign_identity("t-1".to_string());
    task.set_version(Version::new());
    assert_eq!(task.id(), Some(&"t-1".to_string()));
    assert_eq!(task.version(), Some(Version::new()));

    let report = WorkReport::default();
    assert_eq!(WorkReport::TYPE, "work_report");
    assert!(report.id().is_none());
    let _ = report.hours;
}
