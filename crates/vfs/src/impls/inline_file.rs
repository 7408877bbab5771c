//! 内联内容文件
//!
//! 以 [`Node::content`] 缓冲区为存储，写入时在内容锁内扩展 [`Node::length`]。
//! 容量固定为 [`INLINE_CONTENT_CAPACITY`]，更大的文件需要真正的后端。

use crate::config::INLINE_CONTENT_CAPACITY;
use crate::{Capability, Node, NodeOps};

/// 内联内容文件后端
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineFileOps;

impl NodeOps for InlineFileOps {
    fn capabilities(&self) -> Capability {
        Capability::READ | Capability::WRITE
    }

    fn read(&self, node: &Node, offset: usize, buf: &mut [u8]) -> usize {
        let len = node.length().min(INLINE_CONTENT_CAPACITY);
        if offset >= len {
            return 0;
        }
        let n = buf.len().min(len - offset);
        buf[..n].copy_from_slice(&node.content()[offset..offset + n]);
        n
    }

    fn write(&self, node: &Node, offset: usize, buf: &[u8]) -> usize {
        if offset >= INLINE_CONTENT_CAPACITY {
            return 0;
        }
        let n = buf.len().min(INLINE_CONTENT_CAPACITY - offset);
        let mut content = node.content();
        content[offset..offset + n].copy_from_slice(&buf[..n]);
        node.extend_length(offset + n);
        n
    }
}
