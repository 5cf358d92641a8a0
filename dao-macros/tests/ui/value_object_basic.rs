use dao_macros::value_object;

#[value_object]
struct Amount {
    value: i64,
}

#[value_object]
enum Level {
    #[default]
    Low,
    High,
}

fn main() {
    // Debug/Default/Clone/PartialEq 可用（编译期检查足矣）
    let a = Amount::default();
    let _ = format!("{:?}", a);
    let _b = a.clone();
    let _eq = a == Amount { value: 0 };

    // 枚举同样获得标准派生
    let lv: Level = Default::default();
    let _ = format!("{:?}", lv.clone());

    // serde 派生已合并
    let _ = serde_json::to_string(&Amount { value: 7 }).unwrap();
}
