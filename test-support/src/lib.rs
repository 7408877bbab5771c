//! 测试支持 crate
//!
//! 提供 Mock 实现和测试工具，供各 crate 的单元测试与集成测试使用

#![no_std]

pub mod mock;
