//! 内存目录
//!
//! 子节点按插入顺序保存在自旋锁保护的列表中，枚举顺序因此稳定。
//! 目录持有子节点的强引用，是子节点生命周期的拥有者。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use sync::SpinLock;

use crate::{Capability, DirEntry, FsError, Node, NodeOps};

/// 内存目录后端
pub struct MemDirOps {
    children: SpinLock<Vec<Arc<Node>>>,
}

impl MemDirOps {
    /// 创建空目录
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            children: SpinLock::new(Vec::new()),
        })
    }

    /// 追加子节点；同名子节点已存在时返回 [`FsError::AlreadyExists`]
    pub fn insert(&self, child: Arc<Node>) -> Result<(), FsError> {
        let mut children = self.children.lock();
        if children.iter().any(|c| c.name() == child.name()) {
            return Err(FsError::AlreadyExists);
        }
        children.push(child);
        Ok(())
    }

    /// 移除并返回子节点，后续子节点的序号前移
    pub fn remove(&self, name: &str) -> Result<Arc<Node>, FsError> {
        let mut children = self.children.lock();
        let pos = children
            .iter()
            .position(|c| c.name() == name)
            .ok_or(FsError::NotFound)?;
        Ok(children.remove(pos))
    }

    /// 子节点数量
    pub fn len(&self) -> usize {
        self.children.lock().len()
    }

    /// 是否为空目录
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NodeOps for MemDirOps {
    fn capabilities(&self) -> Capability {
        Capability::READ_DIR | Capability::LOOKUP
    }

    fn read_dir(&self, _node: &Node, index: usize) -> Option<DirEntry> {
        self.children.lock().get(index).map(|child| DirEntry {
            name: String::from(child.name()),
            inode: child.inode(),
        })
    }

    fn lookup(&self, _node: &Node, name: &str) -> Option<Arc<Node>> {
        self.children.lock().iter().find(|c| c.name() == name).cloned()
    }
}
