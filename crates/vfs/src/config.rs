//! 节点层的编译期常量

/// 节点名的最大字节数
pub const MAX_NAME_LEN: usize = 128;

/// 节点内联内容缓冲区的容量（字节）
pub const INLINE_CONTENT_CAPACITY: usize = 256;

/// 解析挂载点/符号链接时允许的最大跳数
///
/// 超过该值即视为循环配置，分派降级为“不支持”。
pub const MAX_REDIRECT_HOPS: usize = 8;
