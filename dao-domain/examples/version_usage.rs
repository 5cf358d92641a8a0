//! Version 值对象用法演示
//!
//! 运行：`cargo run -p dao-domain --example version_usage`
//!
use anyhow::Result;
use dao_domain::value_object::Version;

fn main() -> Result<()> {
    // 初始版本：首次持久化时由存储层写回
    let v0 = Version::new();
    println!("initial: {} (is_new = {})", v0, v0.is_new());

    // 每次成功更新严格加一
    let v1 = v0.next();
    let v2 = v1.next();
    println!("after two updates: {} -> {} -> {}", v0, v1, v2);

    // 全序比较支撑陈旧性判断
    assert!(v2 > v0);
    println!("{} is newer than {}", v2, v0);

    // 以裸数字形式序列化，便于作为版本列存储
    let json = serde_json::to_string(&v2)?;
    println!("serialized: {json}");
    let back: Version = serde_json::from_str(&json)?;
    assert_eq!(back, v2);

    Ok(())
}
