//! Undo Journal Demonstration
//!
//! This example walks through the edit-inversion journal on an in-memory store.
//!
//! Key concepts illustrated:
//! 1. Recording a transaction
//! 2. Coalescing of repeated field edits
//! 3. Ping-pong inversion (undo and redo are the same call)
//! 4. Restoring a deleted subtree

use inverso_core::logging_facility::{init, Profile};
use inverso_core::{open_store, DocumentPath, SpecType, Token, TransactionBlock, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    println!("=== Inverso Undo Journal Demo ===\n");

    let store = open_store();
    let world = DocumentPath::parse("/World")?;
    let cube = world.child("Cube")?;
    let size = Token::from("size");

    // ===== Part 1: Record a transaction =====
    println!("## Part 1: Recording\n");

    let block = TransactionBlock::new();
    store.borrow_mut().create_spec(&world, SpecType::Prim)?;
    store.borrow_mut().create_spec(&cube, SpecType::Prim)?;
    for value in [1.0, 2.0, 4.0] {
        store.borrow_mut().set_field(&cube, &size, Value::Double(value))?;
    }
    let Some(build) = block.close() else {
        return Err("transaction recorded nothing".into());
    };
    println!("✓ Recorded {} ops: {:?}", build.len(), build.kinds());
    println!("  (three writes to {}.size coalesced into one)\n", cube);

    // ===== Part 2: Ping-pong =====
    println!("## Part 2: Undo / Redo\n");

    build.invert();
    println!("✓ Undo: /World exists = {}", store.borrow().has_spec(&world));
    build.invert();
    println!(
        "✓ Redo: size = {:?}\n",
        store.borrow().get_field(&cube, &size)
    );

    // ===== Part 3: Subtree restore =====
    println!("## Part 3: Delete and restore a subtree\n");

    let block = TransactionBlock::new();
    store.borrow_mut().delete_spec(&world)?;
    let Some(delete) = block.close() else {
        return Err("delete recorded nothing".into());
    };
    println!("✓ Deleted /World ({} specs left)", store.borrow().layer().spec_count());

    delete.invert();
    println!(
        "✓ Restored: {} specs, size = {:?}",
        store.borrow().layer().spec_count(),
        store.borrow().get_field(&cube, &size)
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
