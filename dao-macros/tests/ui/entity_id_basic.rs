use dao_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct TaskId(Uuid);

#[entity_id]
struct OrderCode(String);

fn main() {
    // new / From / AsRef
    let id = TaskId::new(Uuid::nil());
    let _: &Uuid = id.as_ref();
    let _: Uuid = id.clone().into();
    let _ = TaskId::from(Uuid::nil());

    // Display 委托内部类型
    let code = OrderCode::new("ord-7".to_string());
    assert_eq!(code.to_string(), "ord-7");

    // FromStr 委托内部类型
    let parsed: OrderCode = "ord-8".parse().unwrap();
    assert_eq!(parsed, OrderCode::new("ord-8".to_string()));

    // Hash/Eq 派生可用于集合键
    let mut set = std::collections::HashSet::new();
    set.insert(id);
}
