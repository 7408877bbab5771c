//! 关中断自旋锁
//!
//! 实现 [`lock_api::RawMutex`]，上层数据锁直接使用 `lock_api::Mutex`。

use core::hint;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{IntrGuard, arch_ops};

/// 底层自旋锁
///
/// 加锁时先关闭本地中断再自旋，进入临界区前的中断状态保存在锁内部，
/// 解锁时先释放锁标志，再恢复中断。
///
/// 不可重入：持锁期间再次调用 `lock()` 会死锁。
#[derive(Debug)]
pub struct RawSpinLock {
    locked: AtomicBool,
    /// 持锁者进入临界区前的中断状态
    saved_flags: AtomicUsize,
}

impl RawSpinLock {
    /// 创建未加锁的实例
    pub const fn new() -> Self {
        RawSpinLock {
            locked: AtomicBool::new(false),
            saved_flags: AtomicUsize::new(0),
        }
    }

    fn try_acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: 锁标志的获取/释放使用 Acquire/Release，保证互斥
unsafe impl lock_api::RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawSpinLock::new();

    // 中断状态属于当前 CPU，守卫不能跨线程移动
    type GuardMarker = lock_api::GuardNoSend;

    fn lock(&self) {
        let guard = IntrGuard::new();
        while !self.try_acquire() {
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
        self.saved_flags.store(guard.into_flags(), Ordering::Relaxed);
    }

    fn try_lock(&self) -> bool {
        let guard = IntrGuard::new();
        if self.try_acquire() {
            self.saved_flags.store(guard.into_flags(), Ordering::Relaxed);
            true
        } else {
            // guard 在此 drop，立即恢复中断
            false
        }
    }

    unsafe fn unlock(&self) {
        let flags = self.saved_flags.load(Ordering::Relaxed);
        self.locked.store(false, Ordering::Release);
        // SAFETY: flags 由 lock()/try_lock() 中的 IntrGuard 保存
        unsafe { arch_ops().restore_interrupts(flags) };
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}
