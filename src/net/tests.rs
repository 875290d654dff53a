use super::emulnet::EmulNet;
use crate::membership::types::NodeAddr;

#[test]
fn test_send_then_drain_round_trip() {
    let net = EmulNet::new(0.0);
    let a = NodeAddr::new(1, 8000);
    let b = NodeAddr::new(2, 8000);
    net.register(a);
    net.register(b);

    net.send(a, b, vec![1, 2, 3]);
    net.send(a, b, vec![4]);

    let inbound = net.drain(b);
    assert_eq!(inbound, vec![vec![1, 2, 3], vec![4]]);

    // drain empties the queue
    assert!(net.drain(b).is_empty());
}

#[test]
fn test_unknown_destination_is_dropped() {
    let net = EmulNet::new(0.0);
    let a = NodeAddr::new(1, 8000);
    net.register(a);

    net.send(a, NodeAddr::new(9, 9999), vec![7]);
    assert!(net.drain(NodeAddr::new(9, 9999)).is_empty());
}

#[test]
fn test_full_loss_drops_everything() {
    let net = EmulNet::new(1.0);
    let a = NodeAddr::new(1, 8000);
    let b = NodeAddr::new(2, 8000);
    net.register(a);
    net.register(b);

    for _ in 0..50 {
        net.send(a, b, vec![0]);
    }
    assert!(net.drain(b).is_empty());
}

#[test]
fn test_queues_are_per_destination() {
    let net = EmulNet::new(0.0);
    let a = NodeAddr::new(1, 8000);
    let b = NodeAddr::new(2, 8000);
    let c = NodeAddr::new(3, 8000);
    for addr in [a, b, c] {
        net.register(addr);
    }

    net.send(a, b, vec![1]);
    net.send(a, c, vec![2]);

    assert_eq!(net.drain(b), vec![vec![1]]);
    assert_eq!(net.drain(c), vec![vec![2]]);
    assert!(net.drain(a).is_empty());
}
