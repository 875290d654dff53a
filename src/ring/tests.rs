use super::placement::{
    key_position, node_position, ReplicaRole, Ring, RingNode, RING_SIZE, ROLE_ORDER,
};
use crate::membership::types::NodeAddr;

fn make_members(n: usize) -> Vec<NodeAddr> {
    (0..n).map(|i| NodeAddr::new(i as u32 + 1, 8000)).collect()
}

fn seated(members: &[NodeAddr]) -> Vec<RingNode> {
    let mut nodes: Vec<RingNode> = members
        .iter()
        .map(|&addr| RingNode {
            addr,
            hash: node_position(addr),
        })
        .collect();
    nodes.sort_by_key(|node| (node.hash, node.addr));
    nodes
}

// ============================================================
// POSITIONS
// ============================================================

#[test]
fn test_positions_are_deterministic_and_bounded() {
    for i in 0..1000 {
        let key = format!("key_{}", i);
        let p1 = key_position(&key);
        let p2 = key_position(&key);
        assert_eq!(p1, p2);
        assert!(p1 < RING_SIZE);
    }
}

#[test]
fn test_node_positions_spread() {
    let mut positions: Vec<u64> = make_members(50).into_iter().map(node_position).collect();
    positions.sort();
    positions.dedup();
    // 50 peers on 512 slots should not pile up on a handful of positions
    assert!(positions.len() > 40, "only {} distinct positions", positions.len());
}

// ============================================================
// RING UPDATE
// ============================================================

#[test]
fn test_update_replaces_only_on_size_change() {
    let mut ring = Ring::new();
    assert!(ring.update(&make_members(5)));
    assert_eq!(ring.len(), 5);

    // same-size snapshot keeps the seated ring
    let swapped: Vec<NodeAddr> = (0..5).map(|i| NodeAddr::new(100 + i, 8000)).collect();
    assert!(!ring.update(&swapped));

    // size change reseats it
    assert!(ring.update(&make_members(4)));
    assert_eq!(ring.len(), 4);
}

#[test]
fn test_placement_is_independent_of_snapshot_order() {
    let members = make_members(9);
    let mut reversed = members.clone();
    reversed.reverse();

    let mut ring_a = Ring::new();
    let mut ring_b = Ring::new();
    ring_a.update(&members);
    ring_b.update(&reversed);

    // every node must resolve the same replica set from the same view,
    // whatever order the snapshot arrived in
    for i in 0..200 {
        let key = format!("key_{}", i);
        assert_eq!(ring_a.find_replicas(&key), ring_b.find_replicas(&key));
    }
}

// ============================================================
// REPLICA SETS
// ============================================================

#[test]
fn test_find_replicas_returns_three_distinct_peers() {
    let mut ring = Ring::new();
    ring.update(&make_members(7));

    for i in 0..500 {
        let key = format!("key_{}", i);
        let replicas = ring.find_replicas(&key);
        assert_eq!(replicas.len(), 3, "key {}", key);

        let mut addrs: Vec<NodeAddr> = replicas.iter().map(|r| r.addr).collect();
        addrs.sort();
        addrs.dedup();
        assert_eq!(addrs.len(), 3, "duplicate replica for key {}", key);
    }
}

#[test]
fn test_find_replicas_empty_below_replication_factor() {
    let mut ring = Ring::new();
    ring.update(&make_members(2));
    assert!(ring.find_replicas("anything").is_empty());
}

#[test]
fn test_replicas_are_successive_on_the_ring() {
    let members = make_members(8);
    let mut ring = Ring::new();
    ring.update(&members);
    let order = seated(&members);
    let n = order.len();

    for i in 0..500 {
        let key = format!("key_{}", i);
        let replicas = ring.find_replicas(&key);
        let start = order
            .iter()
            .position(|node| node.addr == replicas[0].addr)
            .unwrap();
        assert_eq!(replicas[1].addr, order[(start + 1) % n].addr);
        assert_eq!(replicas[2].addr, order[(start + 2) % n].addr);
    }
}

#[test]
fn test_primary_is_first_at_or_after_key_position() {
    let members = make_members(8);
    let mut ring = Ring::new();
    ring.update(&members);
    let order = seated(&members);

    for i in 0..500 {
        let key = format!("key_{}", i);
        let pos = key_position(&key);
        let primary = ring.find_replicas(&key)[0];

        if pos <= order[0].hash || pos > order[order.len() - 1].hash {
            // wrapped: the lowest-position peer takes it
            assert_eq!(primary.addr, order[0].addr, "key {} pos {}", key, pos);
        } else {
            assert!(pos <= primary.hash, "key {} pos {} primary {}", key, pos, primary.hash);
            // nothing between the key and its primary
            for node in &order {
                assert!(
                    node.hash < pos || node.hash >= primary.hash,
                    "peer {} at {} should have taken key {} at {}",
                    node.addr,
                    node.hash,
                    key,
                    pos
                );
            }
        }
    }
}

#[test]
fn test_same_key_same_replicas() {
    let mut ring = Ring::new();
    ring.update(&make_members(5));
    let a = ring.find_replicas("stable-key");
    let b = ring.find_replicas("stable-key");
    assert_eq!(a, b);
}

#[test]
fn test_primary_distribution() {
    let mut ring = Ring::new();
    ring.update(&make_members(5));

    let mut counts = std::collections::HashMap::new();
    for i in 0..5000 {
        let key = format!("key_{}", i);
        let primary = ring.find_replicas(&key)[0].addr;
        *counts.entry(primary).or_insert(0usize) += 1;
    }
    // every peer should own at least some keys
    assert_eq!(counts.len(), 5, "some peer owns no keys: {:?}", counts);
}

// ============================================================
// NEIGHBORS
// ============================================================

#[test]
fn test_neighbors_wrap_without_negative_indices() {
    let members = make_members(6);
    let mut ring = Ring::new();
    ring.update(&members);
    let order = seated(&members);
    let n = order.len();

    // every seat, including 0 and 1 where a signed remainder would break
    for (i, node) in order.iter().enumerate() {
        let neighbors = ring.neighbors_of(node.addr).unwrap();
        assert_eq!(neighbors.has_my_replicas[0].addr, order[(i + 1) % n].addr);
        assert_eq!(neighbors.has_my_replicas[1].addr, order[(i + 2) % n].addr);
        assert_eq!(neighbors.have_replicas_of[0].addr, order[(i + n - 1) % n].addr);
        assert_eq!(neighbors.have_replicas_of[1].addr, order[(i + n - 2) % n].addr);
    }
}

#[test]
fn test_neighbors_none_when_ring_too_small() {
    let members = make_members(2);
    let mut ring = Ring::new();
    ring.update(&members);
    assert!(ring.neighbors_of(members[0]).is_none());
}

#[test]
fn test_neighbors_none_for_unknown_peer() {
    let mut ring = Ring::new();
    ring.update(&make_members(4));
    assert!(ring.neighbors_of(NodeAddr::new(999, 1)).is_none());
}

// ============================================================
// ROLES
// ============================================================

#[test]
fn test_role_order_matches_replica_positions() {
    assert_eq!(
        ROLE_ORDER,
        [
            ReplicaRole::Primary,
            ReplicaRole::Secondary,
            ReplicaRole::Tertiary
        ]
    );
}
