use super::types::NodeAddr;
use super::view::ClusterView;

#[test]
fn test_register_and_snapshot() {
    let view = ClusterView::new();
    view.register(NodeAddr::new(3, 8000));
    view.register(NodeAddr::new(1, 8000));
    view.register(NodeAddr::new(2, 8000));

    let members = view.alive_members();
    assert_eq!(members.len(), 3);
    // snapshots come back in a deterministic order
    assert_eq!(members[0], NodeAddr::new(1, 8000));
    assert_eq!(members[2], NodeAddr::new(3, 8000));
}

#[test]
fn test_failed_member_leaves_snapshot() {
    let view = ClusterView::new();
    let a = NodeAddr::new(1, 8000);
    let b = NodeAddr::new(2, 8000);
    view.register(a);
    view.register(b);

    view.fail(b);

    assert!(view.is_alive(a));
    assert!(!view.is_alive(b));
    assert_eq!(view.alive_members(), vec![a]);
}

#[test]
fn test_fail_unknown_member_is_ignored() {
    let view = ClusterView::new();
    view.register(NodeAddr::new(1, 8000));

    view.fail(NodeAddr::new(9, 9999));

    assert_eq!(view.alive_members().len(), 1);
}

#[test]
fn test_addr_wire_form_is_six_bytes() {
    let addr = NodeAddr::new(0x01020304, 0x0506);
    let bytes = addr.to_bytes();
    assert_eq!(bytes.len(), 6);
    assert_eq!(bytes, [0x04, 0x03, 0x02, 0x01, 0x06, 0x05]);
}
