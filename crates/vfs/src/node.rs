//! 节点抽象
//!
//! [`Node`] 是 VFS 中所有可寻址对象（普通文件、目录、设备、管道、符号链接、挂载点）
//! 的统一表示。节点由各后端构造并拥有生命周期，本层只消费已构造好的节点。
//!
//! 挂载点与符号链接通过 *非拥有* 的重定向引用（[`Weak`]）指向目标节点，
//! 目标的生命周期由构造它的子系统负责。

use alloc::string::String;
use alloc::sync::{Arc, Weak};
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use sync::{RawSpinLock, SpinLock, SpinLockGuard};

use crate::config::{INLINE_CONTENT_CAPACITY, MAX_NAME_LEN};
use crate::{Capability, EmptyOps, FsError, NodeOps};

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// 普通文件
    File,
    /// 目录
    Directory,
    /// 字符设备
    CharDevice,
    /// 块设备
    BlockDevice,
    /// 管道
    Pipe,
    /// 符号链接
    Symlink,
}

impl NodeKind {
    /// 从原始标志字中解析节点类型（忽略挂载点位）
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw & NodeFlags::TYPE_MASK.bits() {
            0x01 => Some(NodeKind::File),
            0x02 => Some(NodeKind::Directory),
            0x03 => Some(NodeKind::CharDevice),
            0x04 => Some(NodeKind::BlockDevice),
            0x05 => Some(NodeKind::Pipe),
            0x06 => Some(NodeKind::Symlink),
            _ => None,
        }
    }

    /// 原始类型码
    pub fn as_raw(&self) -> u32 {
        match self {
            NodeKind::File => 0x01,
            NodeKind::Directory => 0x02,
            NodeKind::CharDevice => 0x03,
            NodeKind::BlockDevice => 0x04,
            NodeKind::Pipe => 0x05,
            NodeKind::Symlink => 0x06,
        }
    }
}

bitflags::bitflags! {
    /// 原始标志字的布局：低 3 位为类型码，0x08 为“活动挂载点”位
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u32 {
        /// 类型码掩码
        const TYPE_MASK  = 0x07;
        /// 节点是活动挂载点
        const MOUNTPOINT = 0x08;
    }
}

bitflags::bitflags! {
    /// 权限掩码（与 POSIX 权限位兼容）
    ///
    /// 本层只存储并原样透传，不做任何权限检查。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileMode: u32 {
        /// 用户读
        const S_IRUSR = 0o400;
        /// 用户写
        const S_IWUSR = 0o200;
        /// 用户执行
        const S_IXUSR = 0o100;
        /// 组读
        const S_IRGRP = 0o040;
        /// 组写
        const S_IWGRP = 0o020;
        /// 组执行
        const S_IXGRP = 0o010;
        /// 其他读
        const S_IROTH = 0o004;
        /// 其他写
        const S_IWOTH = 0o002;
        /// 其他执行
        const S_IXOTH = 0o001;
        /// Set UID
        const S_ISUID = 0o4000;
        /// Set GID
        const S_ISGID = 0o2000;
        /// Sticky bit
        const S_ISVTX = 0o1000;
    }
}

/// 目录项，由枚举操作每次新建返回，不是节点的实时视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// 文件名
    pub name: String,
    /// 节点编号
    pub inode: usize,
}

/// 重定向状态
///
/// 挂载根与链接目标分开保存，卸载后符号链接的目标保持不变。
struct Redirect {
    mounted: bool,
    mount_root: Option<Weak<Node>>,
    link_target: Option<Weak<Node>>,
}

/// 解析过程中的下一步
pub(crate) enum Hop {
    /// 既不是活动挂载点也不是符号链接
    Stop,
    /// 继续解析到目标节点
    Follow(Arc<Node>),
    /// 需要重定向但目标缺失
    Dangling,
}

/// VFS 节点
pub struct Node {
    name: String,
    kind: NodeKind,
    mask: FileMode,
    uid: u32,
    gid: u32,
    inode: usize,
    impl_tag: usize,
    length: AtomicUsize,
    content: SpinLock<[u8; INLINE_CONTENT_CAPACITY]>,
    redirect: SpinLock<Redirect>,
    pub(crate) ops: Arc<dyn NodeOps>,
}

impl Node {
    /// 文件名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 节点类型
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// 权限掩码
    pub fn mask(&self) -> FileMode {
        self.mask
    }

    /// 所有者 UID
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// 所有者 GID
    pub fn gid(&self) -> u32 {
        self.gid
    }

    /// 后端定义的节点编号
    pub fn inode(&self) -> usize {
        self.inode
    }

    /// 后端定义的实现标记（例如设备号、表索引），本层从不解释
    pub fn impl_tag(&self) -> usize {
        self.impl_tag
    }

    /// 文件长度（字节），由后端维护
    pub fn length(&self) -> usize {
        self.length.load(Ordering::Acquire)
    }

    /// 更新文件长度
    pub fn set_length(&self, length: usize) {
        self.length.store(length, Ordering::Release);
    }

    /// 将文件长度增长到至少 `length`，不会缩短
    ///
    /// 并发写入各自扩展长度时，取其中的最大值。
    pub fn extend_length(&self, length: usize) {
        self.length.fetch_max(length, Ordering::AcqRel);
    }

    /// 访问内联内容缓冲区
    ///
    /// 持有返回的 guard 期间不要再调用本节点的分派操作。
    pub fn content(&self) -> SpinLockGuard<'_, [u8; INLINE_CONTENT_CAPACITY]> {
        self.content.lock()
    }

    /// 本节点自身操作表声明的能力（不经过重定向）
    pub fn capabilities(&self) -> Capability {
        self.ops.capabilities()
    }

    /// 是否为活动挂载点
    pub fn is_mountpoint(&self) -> bool {
        self.redirect.lock().mounted
    }

    /// 原始标志字：类型码 | 挂载点位
    pub fn flags(&self) -> u32 {
        let mut flags = NodeFlags::from_bits_retain(self.kind.as_raw());
        if self.is_mountpoint() {
            flags |= NodeFlags::MOUNTPOINT;
        }
        flags.bits()
    }

    /// 当前生效的重定向目标
    ///
    /// 活动挂载点返回挂载根，符号链接返回链接目标，其余返回 `None`。
    /// 目标已被释放时同样返回 `None`。
    pub fn redirect(&self) -> Option<Arc<Node>> {
        match self.hop() {
            Hop::Follow(target) => Some(target),
            Hop::Stop | Hop::Dangling => None,
        }
    }

    /// 设置符号链接目标
    pub fn set_link_target(&self, target: &Arc<Node>) -> Result<(), FsError> {
        if self.kind != NodeKind::Symlink {
            return Err(FsError::InvalidArgument);
        }
        self.redirect.lock().link_target = Some(Arc::downgrade(target));
        Ok(())
    }

    /// 将 `root` 挂载到本节点
    ///
    /// 之后所有分派都作用于 `root`。在已挂载的节点上再次挂载返回
    /// [`FsError::AlreadyExists`]；需要叠加挂载时挂载到当前挂载根上。
    pub fn mount(&self, root: &Arc<Node>) -> Result<(), FsError> {
        if core::ptr::eq(self, Arc::as_ptr(root)) {
            return Err(FsError::InvalidArgument);
        }
        let mut redirect = self.redirect.lock();
        if redirect.mounted {
            return Err(FsError::AlreadyExists);
        }
        redirect.mounted = true;
        redirect.mount_root = Some(Arc::downgrade(root));
        drop(redirect);
        log::debug!("vfs: mounted {:?} on {:?}", root.name(), self.name());
        Ok(())
    }

    /// 卸载，返回原挂载根（若仍存活）
    pub fn unmount(&self) -> Result<Option<Arc<Node>>, FsError> {
        let mut redirect = self.redirect.lock();
        if !redirect.mounted {
            return Err(FsError::InvalidArgument);
        }
        redirect.mounted = false;
        Ok(redirect.mount_root.take().and_then(|root| root.upgrade()))
    }

    /// 检查节点类型与能力表是否一致
    ///
    /// - 目录需要 `READ_DIR` 与 `LOOKUP`
    /// - 普通文件需要 `READ` 与 `WRITE`
    /// - 设备与管道至少支持 `READ` 或 `WRITE`
    /// - 符号链接必须有存活的目标
    /// - 活动挂载点必须有存活的挂载根
    pub fn check_consistency(&self) -> Result<(), FsError> {
        let caps = self.capabilities();
        let ok = match self.kind {
            NodeKind::Directory => caps.contains(Capability::READ_DIR | Capability::LOOKUP),
            NodeKind::File => caps.contains(Capability::READ | Capability::WRITE),
            NodeKind::CharDevice | NodeKind::BlockDevice | NodeKind::Pipe => {
                caps.intersects(Capability::READ | Capability::WRITE)
            }
            NodeKind::Symlink => {
                let redirect = self.redirect.lock();
                alive(&redirect.link_target)
            }
        };
        if !ok {
            return Err(FsError::InvalidArgument);
        }
        let redirect = self.redirect.lock();
        if redirect.mounted && !alive(&redirect.mount_root) {
            return Err(FsError::DanglingRedirect);
        }
        Ok(())
    }

    /// 计算解析的下一步：挂载点优先于符号链接
    pub(crate) fn hop(&self) -> Hop {
        let redirect = self.redirect.lock();
        let slot = if redirect.mounted {
            &redirect.mount_root
        } else if self.kind == NodeKind::Symlink {
            &redirect.link_target
        } else {
            return Hop::Stop;
        };
        match slot.as_ref().and_then(Weak::upgrade) {
            Some(target) => Hop::Follow(target),
            None => Hop::Dangling,
        }
    }
}

fn alive(slot: &Option<Weak<Node>>) -> bool {
    slot.as_ref().is_some_and(|target| target.strong_count() > 0)
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("inode", &self.inode)
            .field("length", &self.length())
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}

/// 节点构造器
///
/// 由后端使用；名字长度与内联内容大小在 [`NodeBuilder::build`] 时校验。
pub struct NodeBuilder<'a> {
    name: &'a str,
    kind: NodeKind,
    mask: FileMode,
    uid: u32,
    gid: u32,
    inode: usize,
    impl_tag: usize,
    length: Option<usize>,
    content: &'a [u8],
    ops: Option<Arc<dyn NodeOps>>,
    link_target: Option<Weak<Node>>,
}

impl<'a> NodeBuilder<'a> {
    /// 以名字和类型开始构造
    pub fn new(name: &'a str, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            mask: FileMode::empty(),
            uid: 0,
            gid: 0,
            inode: 0,
            impl_tag: 0,
            length: None,
            content: &[],
            ops: None,
            link_target: None,
        }
    }

    /// 节点编号
    pub fn inode(mut self, inode: usize) -> Self {
        self.inode = inode;
        self
    }

    /// 权限掩码
    pub fn mask(mut self, mask: FileMode) -> Self {
        self.mask = mask;
        self
    }

    /// 所有者
    pub fn owner(mut self, uid: u32, gid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    /// 实现标记
    pub fn impl_tag(mut self, tag: usize) -> Self {
        self.impl_tag = tag;
        self
    }

    /// 初始长度；未设置时取内联内容的长度
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// 初始内联内容
    pub fn content(mut self, content: &'a [u8]) -> Self {
        self.content = content;
        self
    }

    /// 操作表；未设置时使用 [`EmptyOps`]
    pub fn ops(mut self, ops: Arc<dyn NodeOps>) -> Self {
        self.ops = Some(ops);
        self
    }

    /// 符号链接目标
    pub fn link_target(mut self, target: &Arc<Node>) -> Self {
        self.link_target = Some(Arc::downgrade(target));
        self
    }

    /// 完成构造
    pub fn build(self) -> Result<Arc<Node>, FsError> {
        if self.name.len() > MAX_NAME_LEN {
            return Err(FsError::NameTooLong);
        }
        if self.name.contains('\0') {
            return Err(FsError::InvalidArgument);
        }
        if self.content.len() > INLINE_CONTENT_CAPACITY {
            return Err(FsError::NoSpace);
        }
        if self.link_target.is_some() && self.kind != NodeKind::Symlink {
            return Err(FsError::InvalidArgument);
        }

        let mut content = [0u8; INLINE_CONTENT_CAPACITY];
        content[..self.content.len()].copy_from_slice(self.content);

        Ok(Arc::new(Node {
            name: String::from(self.name),
            kind: self.kind,
            mask: self.mask,
            uid: self.uid,
            gid: self.gid,
            inode: self.inode,
            impl_tag: self.impl_tag,
            length: AtomicUsize::new(self.length.unwrap_or(self.content.len())),
            content: SpinLock::const_new(RawSpinLock::new(), content),
            redirect: SpinLock::const_new(
                RawSpinLock::new(),
                Redirect {
                    mounted: false,
                    mount_root: None,
                    link_target: self.link_target,
                },
            ),
            ops: self.ops.unwrap_or_else(|| Arc::new(EmptyOps)),
        }))
    }
}
