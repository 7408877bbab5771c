//! 自旋锁封装
//!
//! 对 [`RawSpinLock`] 套上 `lock_api::Mutex`，获得带数据的 RAII 锁。

use crate::RawSpinLock;

/// 提供对数据互斥访问的自旋锁
///
/// # 示例
/// ```ignore
/// let lock = SpinLock::new(0);
/// {
///     let mut guard = lock.lock();
///     *guard += 1;
/// } // 离开作用域，自动释放锁并恢复中断
/// ```
///
/// # 注意
/// 持锁期间本地中断关闭，临界区内不要执行耗时操作，
/// 也不要调用可能再次获取同一把锁的回调。
pub type SpinLock<T> = lock_api::Mutex<RawSpinLock, T>;

/// [`SpinLock`] 的 RAII 保护器
pub type SpinLockGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;
