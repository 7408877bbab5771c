//! 分派层
//!
//! 所有操作先解析重定向，再调用有效节点的能力：
//!
//! 1. 活动挂载点：以挂载根替换当前节点，继续解析
//! 2. 符号链接：以链接目标替换当前节点，继续解析（链式传递）
//! 3. 两者都不是时停止；需要重定向但目标缺失时视为没有任何能力
//!
//! 解析最多跟随 [`MAX_REDIRECT_HOPS`] 次，循环配置因此必然终止。
//!
//! 每个操作有两种形式：
//!
//! - `try_*`：返回 `Result`，区分“不支持”、“目标缺失”、“循环”和“未找到/已枚举完”
//! - 不带前缀的版本：把上述情况统一折叠为 0 / `None` / 无操作

use alloc::sync::Arc;

use crate::config::MAX_REDIRECT_HOPS;
use crate::node::Hop;
use crate::{Capability, DirEntry, FsError, Node};

impl Node {
    /// 解析挂载点与符号链接，返回实际承载操作的节点
    pub fn resolve(self: &Arc<Self>) -> Result<Arc<Node>, FsError> {
        let mut current = self.clone();
        let mut hops = 0;
        loop {
            match current.hop() {
                Hop::Stop => return Ok(current),
                Hop::Follow(next) => {
                    if hops == MAX_REDIRECT_HOPS {
                        log::warn!(
                            "vfs: redirect chain from {:?} exceeds {} hops, giving up",
                            self.name(),
                            MAX_REDIRECT_HOPS
                        );
                        return Err(FsError::TooManySymlinks);
                    }
                    hops += 1;
                    current = next;
                }
                Hop::Dangling => {
                    log::debug!(
                        "vfs: {:?} redirects to a missing node (reached from {:?})",
                        current.name(),
                        self.name()
                    );
                    return Err(FsError::DanglingRedirect);
                }
            }
        }
    }

    /// 解析后节点具备的能力；解析失败时为空集
    pub fn effective_capabilities(self: &Arc<Self>) -> Capability {
        self.resolve()
            .map(|target| target.capabilities())
            .unwrap_or(Capability::empty())
    }

    /// 解析并确认目标具备 `cap`
    fn resolve_for(self: &Arc<Self>, cap: Capability) -> Result<Arc<Node>, FsError> {
        let target = self.resolve()?;
        if !target.capabilities().contains(cap) {
            log::trace!("vfs: {:?} does not support {:?}", target.name(), cap);
            return Err(FsError::NotSupported);
        }
        Ok(target)
    }

    /// 从 `offset` 读取至多 `buf.len()` 字节
    ///
    /// offset 与长度原样交给后端，本层不做越界裁剪。
    pub fn try_read(self: &Arc<Self>, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        let target = self.resolve_for(Capability::READ)?;
        Ok(target.ops.read(&target, offset, buf))
    }

    /// 从 `offset` 写入 `buf`
    pub fn try_write(self: &Arc<Self>, offset: usize, buf: &[u8]) -> Result<usize, FsError> {
        let target = self.resolve_for(Capability::WRITE)?;
        Ok(target.ops.write(&target, offset, buf))
    }

    /// 发出打开通知
    pub fn try_open(self: &Arc<Self>, read: bool, write: bool) -> Result<(), FsError> {
        let target = self.resolve_for(Capability::OPEN)?;
        target.ops.open(&target, read, write);
        Ok(())
    }

    /// 发出关闭通知
    pub fn try_close(self: &Arc<Self>) -> Result<(), FsError> {
        let target = self.resolve_for(Capability::CLOSE)?;
        target.ops.close(&target);
        Ok(())
    }

    /// 读取第 `index` 个目录项；`Ok(None)` 表示已枚举完
    pub fn try_read_dir(self: &Arc<Self>, index: usize) -> Result<Option<DirEntry>, FsError> {
        let target = self.resolve_for(Capability::READ_DIR)?;
        Ok(target.ops.read_dir(&target, index))
    }

    /// 按名字查找直接子节点
    pub fn try_lookup(self: &Arc<Self>, name: &str) -> Result<Arc<Node>, FsError> {
        let target = self.resolve_for(Capability::LOOKUP)?;
        target.ops.lookup(&target, name).ok_or(FsError::NotFound)
    }

    /// 读取；不支持或解析失败时返回 0
    pub fn read(self: &Arc<Self>, offset: usize, buf: &mut [u8]) -> usize {
        self.try_read(offset, buf).unwrap_or(0)
    }

    /// 写入；不支持或解析失败时返回 0
    pub fn write(self: &Arc<Self>, offset: usize, buf: &[u8]) -> usize {
        self.try_write(offset, buf).unwrap_or(0)
    }

    /// 打开；不支持时为无操作，调用者不能据此判断成败
    pub fn open(self: &Arc<Self>, read: bool, write: bool) {
        let _ = self.try_open(read, write);
    }

    /// 关闭；不支持时为无操作
    pub fn close(self: &Arc<Self>) {
        let _ = self.try_close();
    }

    /// 枚举目录项；不支持与已枚举完都返回 `None`
    pub fn read_dir(self: &Arc<Self>, index: usize) -> Option<DirEntry> {
        self.try_read_dir(index).ok().flatten()
    }

    /// 查找子节点；不支持与未找到都返回 `None`
    pub fn lookup(self: &Arc<Self>, name: &str) -> Option<Arc<Node>> {
        self.try_lookup(name).ok()
    }
}
