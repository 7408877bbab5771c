//! VFS 错误类型
//!
//! 分派层自身只会产生少数几种错误，均可通过 [`FsError::to_errno()`]
//! 转换为系统调用错误码。后端回调的失败经由其自身返回值传递，不在此包装。

use core::fmt;

/// VFS 错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    // 分派相关
    /// 节点不具备所请求的能力 (-ENOTSUP)
    NotSupported,
    /// 挂载点/符号链接的重定向目标缺失或已释放 (-ENOENT)
    DanglingRedirect,
    /// 重定向跳数超过上限，通常意味着循环配置 (-ELOOP)
    TooManySymlinks,

    // 查找相关
    /// 目录中不存在该名字 (-ENOENT)
    NotFound,
    /// 不是目录 (-ENOTDIR)
    NotDirectory,
    /// 名字已存在，或节点已处于挂载状态 (-EEXIST)
    AlreadyExists,

    // 构造相关
    /// 文件名过长 (-ENAMETOOLONG)
    NameTooLong,
    /// 内联内容超出容量 (-ENOSPC)
    NoSpace,
    /// 无效参数 (-EINVAL)
    InvalidArgument,

    // 根节点相关
    /// 根节点尚未安装或已被拆除 (-ENODEV)
    NotInitialized,
}

impl FsError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            FsError::NotFound | FsError::DanglingRedirect => -2,
            FsError::AlreadyExists => -17,
            FsError::NotInitialized => -19,
            FsError::NotDirectory => -20,
            FsError::InvalidArgument => -22,
            FsError::NoSpace => -28,
            FsError::NameTooLong => -36,
            FsError::TooManySymlinks => -40,
            FsError::NotSupported => -95,
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FsError::NotSupported => "operation not supported by node",
            FsError::DanglingRedirect => "redirect target missing",
            FsError::TooManySymlinks => "too many levels of redirection",
            FsError::NotFound => "no such entry",
            FsError::NotDirectory => "not a directory",
            FsError::AlreadyExists => "already exists",
            FsError::NameTooLong => "name too long",
            FsError::NoSpace => "inline content capacity exceeded",
            FsError::InvalidArgument => "invalid argument",
            FsError::NotInitialized => "filesystem root not installed",
        };
        f.write_str(msg)
    }
}
