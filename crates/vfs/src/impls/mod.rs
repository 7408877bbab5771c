//! 参考内存后端
//!
//! 最简单的两种后端：以节点内联缓冲区为存储的文件，以及子节点列表构成的目录。
//! 真实文件系统提供自己的 [`crate::NodeOps`] 实现。

mod inline_file;
mod mem_dir;

pub use inline_file::InlineFileOps;
pub use mem_dir::MemDirOps;
