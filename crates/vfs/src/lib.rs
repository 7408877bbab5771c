//! 内核虚拟文件系统节点层
//!
//! 此 crate 定义所有后端共同遵守的节点与分派契约：
//!
//! - [`Node`] - 统一的文件系统节点（文件、目录、设备、管道、符号链接、挂载点）
//! - [`NodeOps`] - 节点的能力表，每项能力可有可无
//! - 分派操作 - `read` / `write` / `open` / `close` / `read_dir` / `lookup`，
//!   调用前透明地解析挂载点与符号链接（见 `dispatch` 模块）
//! - [`RootHandle`] - 显式安装、显式拆除的全局根节点句柄
//! - 路径解析 - 基于 `lookup` 的逐级查找
//!
//! 本层不分配、不释放节点，不做权限检查，也不定义磁盘格式。

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod impls;
pub mod ops;

mod dispatch;
mod node;
mod path;
mod root;

// Re-export error
pub use error::FsError;

// Re-export ops
pub use ops::{Capability, EmptyOps, NodeOps};

// Re-export node
pub use node::{DirEntry, FileMode, Node, NodeBuilder, NodeFlags, NodeKind};

// Re-export root
pub use root::RootHandle;

// Re-export path
pub use path::{
    PathComponent, lookup_path, lookup_path_from, lookup_path_no_follow, normalize_path,
    parse_path,
};

// Re-export impls
pub use impls::{InlineFileOps, MemDirOps};
