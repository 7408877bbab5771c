//! 同步原语
//!
//! 为 VFS 节点层提供关中断自旋锁：
//!
//! - [`RawSpinLock`] - 实现 [`lock_api::RawMutex`] 的底层锁，持锁期间关闭本地中断
//! - [`SpinLock`] / [`SpinLockGuard`] - 基于 `lock_api::Mutex` 的数据锁
//! - [`IntrGuard`] - RAII 风格的中断保护器
//!
//! # 架构依赖
//!
//! 中断开关通过 [`ArchOps`] trait 抽象。
//! 使用任何锁之前必须调用 [`register_arch_ops`] 注册实现。

#![no_std]

mod intr_guard;
mod raw_spin_lock;
mod spin_lock;

pub use intr_guard::IntrGuard;
pub use raw_spin_lock::RawSpinLock;
pub use spin_lock::{SpinLock, SpinLockGuard};

use core::sync::atomic::{AtomicUsize, Ordering};

/// 架构相关操作
///
/// 由内核在启动阶段实现并注册，锁实现只依赖中断的保存与恢复。
pub trait ArchOps: Send + Sync {
    /// 读取当前中断状态并关闭中断，返回之前的状态
    ///
    /// # Safety
    /// 调用者必须保证之后以返回值调用 [`ArchOps::restore_interrupts`]
    unsafe fn read_and_disable_interrupts(&self) -> usize;

    /// 恢复中断状态
    ///
    /// # Safety
    /// flags 必须是之前 read_and_disable_interrupts 返回的值
    unsafe fn restore_interrupts(&self, flags: usize);
}

/// fat pointer 的 data / vtable 两部分
static ARCH_OPS_DATA: AtomicUsize = AtomicUsize::new(0);
static ARCH_OPS_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册架构操作实现
///
/// # Safety
/// 必须在单线程环境下调用，且只能调用一次
pub unsafe fn register_arch_ops(ops: &'static dyn ArchOps) {
    let ptr = ops as *const dyn ArchOps;
    // SAFETY: fat pointer 的布局是 (data, vtable)
    let (data, vtable) = unsafe { core::mem::transmute::<*const dyn ArchOps, (usize, usize)>(ptr) };
    ARCH_OPS_VTABLE.store(vtable, Ordering::Release);
    ARCH_OPS_DATA.store(data, Ordering::Release);
}

/// 检查是否已注册架构操作
pub fn arch_ops_registered() -> bool {
    ARCH_OPS_DATA.load(Ordering::Acquire) != 0
}

/// 获取架构操作实例
///
/// # Panics
/// 如果尚未调用 [`register_arch_ops`]，则 panic
#[inline]
pub(crate) fn arch_ops() -> &'static dyn ArchOps {
    if !arch_ops_registered() {
        panic!("sync: ArchOps not registered, call register_arch_ops first");
    }
    let data = ARCH_OPS_DATA.load(Ordering::Acquire);
    let vtable = ARCH_OPS_VTABLE.load(Ordering::Acquire);
    // SAFETY: data 和 vtable 是通过 register_arch_ops 设置的有效指针
    unsafe { &*core::mem::transmute::<(usize, usize), *const dyn ArchOps>((data, vtable)) }
}


#[cfg(test)]
pub(crate) use test_mock::init_mock_arch_ops;
