mod common;

use std::sync::Arc;

use common::{init_arch, mem_dir, symlink};
use vfs::{
    FsError, InlineFileOps, Node, NodeBuilder, NodeKind, PathComponent, RootHandle, lookup_path,
    lookup_path_from, lookup_path_no_follow, normalize_path, parse_path,
};

#[test]
fn test_normalize_path_absolute() {
    assert_eq!(normalize_path("/foo/bar"), "/foo/bar");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("///foo///bar///"), "/foo/bar");
}

#[test]
fn test_normalize_path_current() {
    assert_eq!(normalize_path("/foo/./bar"), "/foo/bar");
    assert_eq!(normalize_path("./foo"), "foo");
    assert_eq!(normalize_path("."), ".");
}

#[test]
fn test_normalize_path_parent() {
    assert_eq!(normalize_path("/foo/bar/.."), "/foo");
    assert_eq!(normalize_path("/foo/../bar"), "/bar");
    assert_eq!(normalize_path("/.."), "/");
    assert_eq!(normalize_path("/../.."), "/");
    assert_eq!(normalize_path("/foo/bar/../.."), "/");
}

#[test]
fn test_normalize_path_relative() {
    assert_eq!(normalize_path("foo/bar"), "foo/bar");
    assert_eq!(normalize_path("foo/../bar"), "bar");
    assert_eq!(normalize_path("../foo"), "../foo");
    assert_eq!(normalize_path("../../foo"), "../../foo");
    assert_eq!(normalize_path(""), ".");
}

#[test]
fn test_normalize_path_complex() {
    assert_eq!(normalize_path("/foo/./bar/../baz/./qux/.."), "/foo/baz");
    assert_eq!(normalize_path("foo/bar/../../baz"), "baz");
}

#[test]
fn test_parse_path_components() {
    assert_eq!(
        parse_path("/foo/bar"),
        vec![
            PathComponent::Root,
            PathComponent::Normal("foo".to_string()),
            PathComponent::Normal("bar".to_string()),
        ]
    );
    assert_eq!(
        parse_path("foo/./bar/../baz"),
        vec![
            PathComponent::Normal("foo".to_string()),
            PathComponent::Current,
            PathComponent::Normal("bar".to_string()),
            PathComponent::Parent,
            PathComponent::Normal("baz".to_string()),
        ]
    );
    assert!(parse_path("").is_empty());
}

/// 测试用目录树
///
/// ```text
/// /                 (1)
/// ├── etc/          (2)
/// │   └── motd      (3, "hello")
/// ├── mnt/          (4)  <- 挂载 disk: / (100) └── data (101)
/// ├── conf -> etc   (5)
/// └── greeting -> /etc/motd (6)
/// ```
struct Tree {
    root: RootHandle,
    etc: Arc<Node>,
    mnt: Arc<Node>,
    disk: Arc<Node>,
}

fn build_tree() -> Tree {
    init_arch();
    let (root_node, root_ops) = mem_dir("/", 1);
    let (etc, etc_ops) = mem_dir("etc", 2);
    let motd = NodeBuilder::new("motd", NodeKind::File)
        .inode(3)
        .content(b"hello")
        .ops(Arc::new(InlineFileOps))
        .build()
        .unwrap();
    etc_ops.insert(motd.clone()).unwrap();

    let (mnt, _) = mem_dir("mnt", 4);
    let (disk, disk_ops) = mem_dir("disk", 100);
    let data = NodeBuilder::new("data", NodeKind::File)
        .inode(101)
        .ops(Arc::new(InlineFileOps))
        .build()
        .unwrap();
    disk_ops.insert(data).unwrap();
    mnt.mount(&disk).unwrap();

    let conf = NodeBuilder::new("conf", NodeKind::Symlink)
        .inode(5)
        .link_target(&etc)
        .build()
        .unwrap();
    let greeting = NodeBuilder::new("greeting", NodeKind::Symlink)
        .inode(6)
        .link_target(&motd)
        .build()
        .unwrap();

    root_ops.insert(etc.clone()).unwrap();
    root_ops.insert(mnt.clone()).unwrap();
    root_ops.insert(conf).unwrap();
    root_ops.insert(greeting).unwrap();

    let root = RootHandle::new();
    root.install(root_node).unwrap();
    Tree {
        root,
        etc,
        mnt,
        disk,
    }
}

#[test]
fn test_lookup_path_plain() {
    let tree = build_tree();
    let motd = lookup_path(&tree.root, "/etc/motd").unwrap();
    assert_eq!(motd.inode(), 3);

    let mut buf = [0u8; 8];
    assert_eq!(motd.read(0, &mut buf), 5);
    assert_eq!(&buf[..5], b"hello");
}

#[test]
fn test_lookup_path_root() {
    let tree = build_tree();
    assert_eq!(lookup_path(&tree.root, "/").unwrap().inode(), 1);
    assert_eq!(lookup_path(&tree.root, "/..").unwrap().inode(), 1);
    assert_eq!(
        lookup_path(&tree.root, "//etc/../etc/./motd").unwrap().inode(),
        3
    );
}

#[test]
fn test_lookup_path_crosses_mountpoint() {
    let tree = build_tree();
    assert_eq!(lookup_path(&tree.root, "/mnt/data").unwrap().inode(), 101);

    let mounted = lookup_path(&tree.root, "/mnt").unwrap();
    assert!(Arc::ptr_eq(&mounted, &tree.disk));
    let covered = lookup_path_no_follow(&tree.root, "/mnt").unwrap();
    assert!(Arc::ptr_eq(&covered, &tree.mnt));
    assert!(covered.is_mountpoint());
}

#[test]
fn test_lookup_path_after_unmount() {
    let tree = build_tree();
    tree.mnt.unmount().unwrap();
    assert_eq!(
        lookup_path(&tree.root, "/mnt/data").unwrap_err(),
        FsError::NotFound
    );
    assert_eq!(lookup_path(&tree.root, "/mnt").unwrap().inode(), 4);
}

#[test]
fn test_lookup_path_follows_intermediate_symlink() {
    let tree = build_tree();
    assert_eq!(lookup_path(&tree.root, "/conf/motd").unwrap().inode(), 3);
    assert_eq!(lookup_path_no_follow(&tree.root, "/conf/motd").unwrap().inode(), 3);
}

#[test]
fn test_lookup_path_final_symlink() {
    let tree = build_tree();
    assert_eq!(lookup_path(&tree.root, "/greeting").unwrap().inode(), 3);

    let link = lookup_path_no_follow(&tree.root, "/greeting").unwrap();
    assert_eq!(link.inode(), 6);
    assert_eq!(link.kind(), NodeKind::Symlink);
    assert_eq!(link.redirect().map(|t| t.inode()), Some(3));
}

#[test]
fn test_lookup_path_errors() {
    let tree = build_tree();
    assert_eq!(
        lookup_path(&tree.root, "/etc/missing").unwrap_err(),
        FsError::NotFound
    );
    assert_eq!(
        lookup_path(&tree.root, "/etc/motd/deeper").unwrap_err(),
        FsError::NotDirectory
    );
    assert_eq!(
        lookup_path(&tree.root, "/greeting/deeper").unwrap_err(),
        FsError::NotDirectory
    );
    assert_eq!(
        lookup_path(&tree.root, "etc/motd").unwrap_err(),
        FsError::InvalidArgument
    );
}

#[test]
fn test_lookup_path_uninstalled_root() {
    init_arch();
    let root = RootHandle::new();
    assert_eq!(lookup_path(&root, "/").unwrap_err(), FsError::NotInitialized);
}

#[test]
fn test_lookup_path_dangling_component() {
    init_arch();
    let (root_node, root_ops) = mem_dir("/", 1);
    let (gone, _) = mem_dir("gone", 2);
    root_ops.insert(symlink("stale", &gone)).unwrap();
    drop(gone);

    let root = RootHandle::new();
    root.install(root_node).unwrap();
    assert_eq!(
        lookup_path(&root, "/stale/x").unwrap_err(),
        FsError::DanglingRedirect
    );
    assert_eq!(
        lookup_path(&root, "/stale").unwrap_err(),
        FsError::DanglingRedirect
    );
    assert_eq!(lookup_path_no_follow(&root, "/stale").unwrap().inode(), 0);
}

#[test]
fn test_lookup_path_from_base() {
    let tree = build_tree();
    assert_eq!(lookup_path_from(&tree.etc, "motd").unwrap().inode(), 3);
    assert_eq!(lookup_path_from(&tree.etc, "./motd").unwrap().inode(), 3);
    assert_eq!(lookup_path_from(&tree.mnt, "data").unwrap().inode(), 101);
    assert_eq!(lookup_path_from(&tree.etc, "").unwrap().inode(), 2);

    let root_node = tree.root.get().unwrap();
    assert_eq!(lookup_path_from(&root_node, "conf/motd").unwrap().inode(), 3);
    assert_eq!(lookup_path_from(&root_node, "/etc/motd").unwrap().inode(), 3);

    // 无法消去的 ".." 交给后端，内存目录没有这个名字
    assert_eq!(
        lookup_path_from(&tree.etc, "../etc/motd").unwrap_err(),
        FsError::NotFound
    );
}
