//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值。
//!

use std::fmt;

use dao_macros::value_object;

/// 版本号（用于乐观锁和并发控制）
///
/// 提供类型安全的版本号操作，避免直接使用 u64 导致的语义不明确问题。
/// 版本号由存储层维护：插入时初始化为 0，每次成功更新严格加一，
/// 永不回退或复用。
///
/// # 示例
///
/// ```
/// use dao_domain::value_object::Version;
///
/// let v1 = Version::new();
/// assert_eq!(v1.value(), 0);
/// assert!(v1.is_new());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(!v2.is_new());
///
/// assert!(v2 > v1);
/// ```
// 使用 value_object 宏提供基础的派生（Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq）
// 手动添加 Version 特有的派生（Copy, PartialOrd, Ord, Hash）
#[value_object]
#[derive(Copy, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// 创建初始版本（版本号为 0）
    pub const fn new() -> Self {
        Self(0)
    }

    /// 从值创建版本号
    pub const fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    ///
    /// # 示例
    ///
    /// ```
    /// use dao_domain::value_object::Version;
    ///
    /// let v1 = Version::from_value(10);
    /// assert_eq!(v1.next().value(), 11);
    /// ```
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// 获取版本号的值
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// 检查是否为初始版本（尚未经历任何更新）
    pub fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.value()
    }
}
