//! Streaming merkle tree example: insert transactions and prove inclusion.
//!
//! Run with: cargo run -p streamtree-frontier --example transactions
//! Set RUST_LOG=streamtree_frontier=debug to watch merges and root updates.

use streamtree_frontier::FrontierTree;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = FrontierTree::new();

    println!("=== Streaming Merkle Tree Demo ===\n");

    let transactions = [
        "1 transaction",
        "2 transaction",
        "3 transaction",
        "4 transaction",
    ];
    let mut leaves = Vec::new();

    for tx in &transactions {
        let leaf = tree.insert(tx);
        leaves.push(leaf);
        println!(
            "Inserted '{}' as {}: frontier {:?}",
            tx,
            leaf,
            tree.size_classes()
        );
    }

    if let Some(root) = tree.current_root_digest() {
        println!("\nRoot after {} leaves: {}", tree.leaf_count(), root);
    }
    println!("Nodes allocated: {}", tree.node_count());

    println!("\n=== Inclusion Proofs ===\n");

    for (tx, &leaf) in transactions.iter().zip(&leaves) {
        let proof = tree.generate_proof(leaf)?;
        println!("Proof for '{}': {} digests", tx, proof.len());
    }

    let proof = tree.generate_proof(leaves[0])?;
    let serialized = serde_json::to_string(&proof)?;
    println!("\nSerialized proof size: {} bytes", serialized.len());

    Ok(())
}
