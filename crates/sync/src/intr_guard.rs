//! 中断保护器
//!
//! 创建时关闭本地中断，销毁时恢复之前的状态。
//!
//! 注意：关中断只能阻止本地 CPU 上“任务 vs 中断处理程序”的并发，
//! 多核共享数据仍需要配合 [`crate::SpinLock`]。

use crate::arch_ops;

/// 中断保护器
///
/// # 示例
/// ```ignore
/// {
///     let _guard = IntrGuard::new(); // 关中断
///     // 临界区
/// } // 自动恢复
/// ```
pub struct IntrGuard {
    flags: usize,
}

impl IntrGuard {
    /// 关闭中断并记录之前的状态
    pub fn new() -> Self {
        // SAFETY: flags 会在 drop 时原样交还给 restore_interrupts
        let flags = unsafe { arch_ops().read_and_disable_interrupts() };
        IntrGuard { flags }
    }

    /// 放弃自动恢复，交出保存的状态字
    ///
    /// 由 [`crate::RawSpinLock`] 使用：状态字在解锁时才恢复。
    pub(crate) fn into_flags(self) -> usize {
        let flags = self.flags;
        core::mem::forget(self);
        flags
    }
}

impl Drop for IntrGuard {
    fn drop(&mut self) {
        // SAFETY: flags 来自 new() 中的 read_and_disable_interrupts
        unsafe { arch_ops().restore_interrupts(self.flags) };
    }
}
