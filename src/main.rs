use anyhow::Result;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use replicated_kv::kvstore::coordinator::TxnIds;
use replicated_kv::kvstore::node::KvNode;
use replicated_kv::membership::types::NodeAddr;
use replicated_kv::membership::view::ClusterView;
use replicated_kv::net::emulnet::EmulNet;
use replicated_kv::oplog::{MemorySink, OpKind};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut node_count: usize = 6;
    let mut ticks: u64 = 200;
    let mut key_count: usize = 24;
    let mut loss_rate: f64 = 0.02;
    let mut dump_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--nodes" => {
                node_count = args[i + 1].parse()?;
                i += 2;
            }
            "--ticks" => {
                ticks = args[i + 1].parse()?;
                i += 2;
            }
            "--keys" => {
                key_count = args[i + 1].parse()?;
                i += 2;
            }
            "--loss" => {
                loss_rate = args[i + 1].parse()?;
                i += 2;
            }
            "--dump" => {
                dump_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--help" => {
                eprintln!(
                    "Usage: {} [--nodes N] [--ticks T] [--keys K] [--loss P] [--dump FILE]",
                    args[0]
                );
                return Ok(());
            }
            _ => {
                i += 1;
            }
        }
    }

    tracing::info!(
        "Starting emulation: {} nodes, {} ticks, {} keys, loss {}",
        node_count,
        ticks,
        key_count,
        loss_rate
    );

    // 1. Cluster fabric: directory, transport, outcome sink.
    let view = ClusterView::new();
    let net = Arc::new(EmulNet::new(loss_rate));
    let sink = Arc::new(MemorySink::new());
    let txn_ids = TxnIds::new();

    // 2. Nodes.
    let mut nodes: Vec<KvNode> = (0..node_count)
        .map(|n| {
            let addr = NodeAddr::new(n as u32 + 1, 7000);
            view.register(addr);
            KvNode::new(addr, net.clone(), sink.clone(), txn_ids.clone())
        })
        .collect();

    let mut dead: HashSet<NodeAddr> = HashSet::new();
    let failure_tick = ticks / 2;
    let mut rng = rand::thread_rng();

    // 3. Tick loop: membership snapshot, node ticks, workload.
    let mut interval = tokio::time::interval(Duration::from_millis(10));
    for now in 1..=ticks {
        interval.tick().await;

        let members = view.alive_members();
        for node in nodes.iter_mut() {
            if !dead.contains(&node.addr()) {
                node.tick(now, &members);
            }
        }

        // crash one node halfway through the run; membership sees it on the
        // next snapshot and stabilization takes over
        if now == failure_tick && node_count > 3 {
            let victim = nodes[node_count - 1].addr();
            tracing::info!("Crashing {} at tick {}", victim, now);
            dead.insert(victim);
            view.fail(victim);
        }

        let alive: Vec<usize> = (0..node_count)
            .filter(|&n| !dead.contains(&nodes[n].addr()))
            .collect();
        if alive.is_empty() {
            break;
        }
        let coordinator = alive[rng.gen_range(0..alive.len())];

        if now as usize <= key_count {
            // seeding phase: one fresh key per tick
            let key = format!("key_{}", now);
            let value = format!("v{}", now);
            nodes[coordinator].client_create(&key, &value);
        } else if now % 3 == 0 {
            // steady phase: mostly reads, some overwrites, rare deletes
            let key = format!("key_{}", rng.gen_range(1..=key_count));
            match rng.gen_range(0..8) {
                0 => {
                    nodes[coordinator].client_update(&key, &format!("v{}", now));
                }
                1 => {
                    nodes[coordinator].client_delete(&key);
                }
                _ => {
                    nodes[coordinator].client_read(&key);
                }
            }
        }
    }

    // 4. Summary.
    for kind in [OpKind::Create, OpKind::Read, OpKind::Update, OpKind::Delete] {
        let ok = sink.count(kind, true, true);
        let failed = sink.count(kind, false, true);
        if ok + failed > 0 {
            tracing::info!("{}: {} succeeded, {} failed", kind, ok, failed);
        }
    }
    for node in &nodes {
        let state = if dead.contains(&node.addr()) {
            "crashed"
        } else {
            "alive"
        };
        tracing::info!("{} ({}): {} keys held", node.addr(), state, node.store().len());
    }

    if let Some(path) = dump_path {
        std::fs::write(&path, serde_json::to_string_pretty(&sink.events())?)?;
        tracing::info!("Outcome log written to {}", path);
    }

    Ok(())
}
