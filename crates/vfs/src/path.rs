//! 路径解析
//!
//! 从根节点出发，逐个组件调用 [`Node::try_lookup`] 走到目标节点。
//! 每一步都经过分派层，因此中途的挂载点与符号链接会被透明地跟随。
//!
//! - 绝对路径以 `/` 开头，从 [`RootHandle`] 中的根节点开始
//! - `.` 被跳过；`..` 在规范化阶段消去，绝对路径不会越过根
//! - 相对路径由 [`lookup_path_from`] 从调用者给定的节点开始；无法消去的 `..`
//!   作为普通名字交给后端查找

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{FsError, Node, NodeKind, RootHandle};

/// 路径组件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// 根目录 "/"
    Root,
    /// 当前目录 "."
    Current,
    /// 父目录 ".."
    Parent,
    /// 正常的文件名
    Normal(String),
}

/// 将路径字符串解析为组件列表
pub fn parse_path(path: &str) -> Vec<PathComponent> {
    let root = path.starts_with('/').then_some(PathComponent::Root);
    root.into_iter()
        .chain(path.split('/').filter(|s| !s.is_empty()).map(|part| match part {
            "." => PathComponent::Current,
            ".." => PathComponent::Parent,
            name => PathComponent::Normal(String::from(name)),
        }))
        .collect()
}

/// 规范化后的组件：是否为绝对路径，以及剩余的名字（相对路径可能以 ".." 开头）
fn normalize_components(path: &str) -> (bool, Vec<String>) {
    let mut absolute = false;
    let mut stack: Vec<String> = Vec::new();

    for component in parse_path(path) {
        match component {
            PathComponent::Root => absolute = true,
            PathComponent::Current => {}
            PathComponent::Parent => match stack.last().map(String::as_str) {
                Some("..") | None if !absolute => stack.push(String::from("..")),
                None => {}
                Some(_) => {
                    stack.pop();
                }
            },
            PathComponent::Normal(name) => stack.push(name),
        }
    }

    (absolute, stack)
}

/// 规范化路径（处理 ".." 和 "."）
pub fn normalize_path(path: &str) -> String {
    let (absolute, stack) = normalize_components(path);
    match (absolute, stack.is_empty()) {
        (true, _) => String::from("/") + &stack.join("/"),
        (false, true) => String::from("."),
        (false, false) => stack.join("/"),
    }
}

/// 从根节点解析绝对路径，跟随最后一个组件的重定向
pub fn lookup_path(root: &RootHandle, path: &str) -> Result<Arc<Node>, FsError> {
    lookup_path_no_follow(root, path)?.resolve()
}

/// 从根节点解析绝对路径，但不跟随最后一个组件
///
/// 返回的可能是符号链接或挂载点节点本身。
pub fn lookup_path_no_follow(root: &RootHandle, path: &str) -> Result<Arc<Node>, FsError> {
    let (absolute, names) = normalize_components(path);
    if !absolute {
        return Err(FsError::InvalidArgument);
    }
    walk(root.get()?, &names)
}

/// 从 `base` 开始解析相对路径，跟随最后一个组件的重定向
///
/// 以 `/` 开头的路径同样相对于 `base` 解析。
pub fn lookup_path_from(base: &Arc<Node>, path: &str) -> Result<Arc<Node>, FsError> {
    let (_, names) = normalize_components(path);
    walk(base.clone(), &names)?.resolve()
}

fn walk(mut current: Arc<Node>, names: &[String]) -> Result<Arc<Node>, FsError> {
    for name in names {
        let dir = current.resolve()?;
        if dir.kind() != NodeKind::Directory {
            return Err(FsError::NotDirectory);
        }
        current = dir.try_lookup(name)?;
    }
    Ok(current)
}
