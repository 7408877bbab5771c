//! Mock 实现模块
//!
//! 不直接依赖被测 crate（避免循环依赖），由被测 crate 在 `cfg(test)` 下
//! 或集成测试中为这些类型实现自己的 trait。

pub mod arch;
pub mod vfs;
