//! 集成测试共用的夹具

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use test_support::mock::arch::MOCK_ARCH_OPS;
use test_support::mock::vfs::{CallLog, RecordedOp};
use vfs::{Capability, DirEntry, MemDirOps, Node, NodeBuilder, NodeKind, NodeOps};

struct TestArch;

impl sync::ArchOps for TestArch {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        MOCK_ARCH_OPS.save_and_disable()
    }

    unsafe fn restore_interrupts(&self, flags: usize) {
        MOCK_ARCH_OPS.restore(flags)
    }
}

static TEST_ARCH: TestArch = TestArch;
// 0 = uninit, 1 = initializing, 2 = ready
static INIT: AtomicUsize = AtomicUsize::new(0);

pub fn init_arch() {
    match INIT.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            // Safety: tests share a single global TestArch.
            unsafe { sync::register_arch_ops(&TEST_ARCH) };
            INIT.store(2, Ordering::Release);
        }
        Err(_) => {
            while INIT.load(Ordering::Acquire) != 2 {
                std::hint::spin_loop();
            }
        }
    }
}

/// 记录每次回调参数的后端
///
/// `read` 把缓冲区填满 `fill` 并报告读满；`write` 报告全部写入。
pub struct RecordingOps {
    pub caps: Capability,
    pub log: CallLog,
    pub fill: u8,
}

impl RecordingOps {
    pub fn new(caps: Capability, fill: u8) -> Arc<Self> {
        Arc::new(Self {
            caps,
            log: CallLog::new(),
            fill,
        })
    }

    pub fn all(fill: u8) -> Arc<Self> {
        Self::new(Capability::all(), fill)
    }
}

impl NodeOps for RecordingOps {
    fn capabilities(&self) -> Capability {
        self.caps
    }

    fn read(&self, _node: &Node, offset: usize, buf: &mut [u8]) -> usize {
        self.log.record(RecordedOp::Read, offset, buf.len());
        buf.fill(self.fill);
        buf.len()
    }

    fn write(&self, _node: &Node, offset: usize, buf: &[u8]) -> usize {
        self.log.record(RecordedOp::Write, offset, buf.len());
        buf.len()
    }

    fn open(&self, _node: &Node, read: bool, write: bool) {
        self.log.record(RecordedOp::Open, read as usize, write as usize);
    }

    fn close(&self, _node: &Node) {
        self.log.record(RecordedOp::Close, 0, 0);
    }

    fn read_dir(&self, _node: &Node, index: usize) -> Option<DirEntry> {
        self.log.record(RecordedOp::ReadDir, index, 0);
        None
    }

    fn lookup(&self, _node: &Node, name: &str) -> Option<Arc<Node>> {
        self.log.record(RecordedOp::FindDir, 0, name.len());
        None
    }
}

pub fn node_with(name: &str, kind: NodeKind, inode: usize, ops: Arc<dyn NodeOps>) -> Arc<Node> {
    NodeBuilder::new(name, kind)
        .inode(inode)
        .ops(ops)
        .build()
        .expect("valid test node")
}

pub fn symlink(name: &str, target: &Arc<Node>) -> Arc<Node> {
    NodeBuilder::new(name, NodeKind::Symlink)
        .link_target(target)
        .build()
        .expect("valid test symlink")
}

/// 创建一个内存目录节点，返回 (节点, 后端)
pub fn mem_dir(name: &str, inode: usize) -> (Arc<Node>, Arc<MemDirOps>) {
    let ops = MemDirOps::new();
    let node = node_with(name, NodeKind::Directory, inode, ops.clone());
    (node, ops)
}
