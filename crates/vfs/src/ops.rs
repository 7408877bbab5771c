//! 节点操作表
//!
//! 每个节点持有一个 [`NodeOps`] 实现，它就是该节点的“能力表”：
//! [`NodeOps::capabilities`] 声明支持哪些操作，分派层只会调用已声明的回调。
//! 未声明的能力是一种正常、可检查的状态，而不是空指针。

use alloc::sync::Arc;

use crate::{DirEntry, Node};

bitflags::bitflags! {
    /// 节点可选能力集合
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capability: u8 {
        /// 按偏移读取
        const READ     = 1 << 0;
        /// 按偏移写入
        const WRITE    = 1 << 1;
        /// 打开通知
        const OPEN     = 1 << 2;
        /// 关闭通知
        const CLOSE    = 1 << 3;
        /// 按序号枚举目录项
        const READ_DIR = 1 << 4;
        /// 按名字查找直接子节点
        const LOOKUP   = 1 << 5;
    }
}

/// 后端回调接口
///
/// 回调收到的 `node` 总是解析挂载点/符号链接之后的有效节点。
/// 默认实现对应“不支持”的结果；实际是否调用由 `capabilities()` 决定，
/// 因此覆盖了某个方法却没有声明对应能力时，该方法不会被分派到。
///
/// 分派层不加锁：同一节点可能被并发调用时，由后端自行串行化。
pub trait NodeOps: Send + Sync {
    /// 该后端支持的能力
    fn capabilities(&self) -> Capability;

    /// 从 `offset` 开始读取至多 `buf.len()` 字节，返回实际读取的字节数
    fn read(&self, _node: &Node, _offset: usize, _buf: &mut [u8]) -> usize {
        0
    }

    /// 从 `offset` 开始写入 `buf`，返回实际写入的字节数
    fn write(&self, _node: &Node, _offset: usize, _buf: &[u8]) -> usize {
        0
    }

    /// 打开通知，携带读/写意图
    fn open(&self, _node: &Node, _read: bool, _write: bool) {}

    /// 关闭通知
    fn close(&self, _node: &Node) {}

    /// 返回第 `index` 个目录项（从 0 开始），越界返回 `None`
    fn read_dir(&self, _node: &Node, _index: usize) -> Option<DirEntry> {
        None
    }

    /// 按名字精确查找直接子节点
    fn lookup(&self, _node: &Node, _name: &str) -> Option<Arc<Node>> {
        None
    }
}

/// 不具备任何能力的操作表
///
/// 符号链接、纯挂载点等自身不承载数据的节点使用它。
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyOps;

impl NodeOps for EmptyOps {
    fn capabilities(&self) -> Capability {
        Capability::empty()
    }
}
