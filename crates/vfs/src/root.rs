//! 文件系统根节点句柄
//!
//! 整个系统任一时刻只有一个根节点，它是所有路径解析的起点。
//! 根节点由初始化代码显式安装、由关机流程显式拆除，本层自身从不修改它。
//!
//! ```ignore
//! static FS_ROOT: RootHandle = RootHandle::new();
//!
//! FS_ROOT.install(ramdisk_root)?;   // 启动
//! let node = lookup_path(&FS_ROOT, "/etc/motd")?;
//! FS_ROOT.teardown();               // 关机
//! ```

use alloc::sync::Arc;

use sync::{RawSpinLock, SpinLock};

use crate::{FsError, Node};

/// 根节点句柄
///
/// 句柄持有根节点的强引用，根节点因此在安装到拆除之间始终存活。
pub struct RootHandle {
    root: SpinLock<Option<Arc<Node>>>,
}

impl RootHandle {
    /// 创建一个尚未安装根节点的句柄
    pub const fn new() -> Self {
        Self {
            root: SpinLock::const_new(RawSpinLock::new(), None),
        }
    }

    /// 安装根节点
    ///
    /// 已有根节点时返回 [`FsError::AlreadyExists`]，不会替换。
    pub fn install(&self, root: Arc<Node>) -> Result<(), FsError> {
        let mut slot = self.root.lock();
        if let Some(current) = slot.clone() {
            drop(slot);
            log::warn!(
                "vfs: root {:?} already installed, refusing {:?}",
                current.name(),
                root.name()
            );
            return Err(FsError::AlreadyExists);
        }
        *slot = Some(root.clone());
        drop(slot);
        log::info!("vfs: root {:?} installed", root.name());
        Ok(())
    }

    /// 获取根节点
    pub fn get(&self) -> Result<Arc<Node>, FsError> {
        self.root.lock().clone().ok_or(FsError::NotInitialized)
    }

    /// 是否已安装根节点
    pub fn is_installed(&self) -> bool {
        self.root.lock().is_some()
    }

    /// 拆除根节点，返回原根节点
    pub fn teardown(&self) -> Option<Arc<Node>> {
        let root = self.root.lock().take();
        if let Some(root) = root.as_ref() {
            log::info!("vfs: root {:?} torn down", root.name());
        }
        root
    }
}

impl Default for RootHandle {
    fn default() -> Self {
        Self::new()
    }
}
