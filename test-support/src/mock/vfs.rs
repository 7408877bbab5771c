//! VFS 节点回调的调用记录器
//!
//! 测试后端把每次回调的参数写进 [`CallLog`]，测试据此断言分派层
//! 调用了哪个后端、以及 offset/size 是否被原样透传。

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// 被记录的回调种类
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedOp {
    None = 0,
    Read = 1,
    Write = 2,
    Open = 3,
    Close = 4,
    ReadDir = 5,
    FindDir = 6,
}

impl RecordedOp {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => RecordedOp::Read,
            2 => RecordedOp::Write,
            3 => RecordedOp::Open,
            4 => RecordedOp::Close,
            5 => RecordedOp::ReadDir,
            6 => RecordedOp::FindDir,
            _ => RecordedOp::None,
        }
    }
}

/// 记录最近一次回调及累计调用次数
pub struct CallLog {
    calls: AtomicUsize,
    last_op: AtomicU8,
    last_offset: AtomicUsize,
    last_len: AtomicUsize,
}

impl CallLog {
    pub const fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_op: AtomicU8::new(RecordedOp::None as u8),
            last_offset: AtomicUsize::new(0),
            last_len: AtomicUsize::new(0),
        }
    }

    /// 记录一次回调
    pub fn record(&self, op: RecordedOp, offset: usize, len: usize) {
        self.last_op.store(op as u8, Ordering::SeqCst);
        self.last_offset.store(offset, Ordering::SeqCst);
        self.last_len.store(len, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_op(&self) -> RecordedOp {
        RecordedOp::from_u8(self.last_op.load(Ordering::SeqCst))
    }

    pub fn last_offset(&self) -> usize {
        self.last_offset.load(Ordering::SeqCst)
    }

    pub fn last_len(&self) -> usize {
        self.last_len.load(Ordering::SeqCst)
    }
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new()
    }
}
