//! 架构相关操作的 Mock 实现

use core::sync::atomic::{AtomicBool, Ordering};

/// Mock 架构操作
///
/// 用一个原子布尔值模拟本地中断开关。
pub struct MockArchOps {
    pub interrupt_state: AtomicBool,
}

impl MockArchOps {
    pub const fn new() -> Self {
        Self {
            interrupt_state: AtomicBool::new(true),
        }
    }

    /// 关闭“中断”，返回之前的状态（1 = 开启）
    pub fn save_and_disable(&self) -> usize {
        self.interrupt_state.swap(false, Ordering::SeqCst) as usize
    }

    /// 恢复 `save_and_disable` 返回的状态
    pub fn restore(&self, flags: usize) {
        self.interrupt_state.store(flags != 0, Ordering::SeqCst);
    }
}

/// 全局 Mock 实例
pub static MOCK_ARCH_OPS: MockArchOps = MockArchOps::new();
