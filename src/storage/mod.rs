//! Local Storage Module
//!
//! The node-local keyspace: one versioned entry per key. Every replica of a
//! key holds an independent copy here; consistency across replicas is the
//! coordinator's and stabilizer's concern, not the store's.
//!
//! ## Semantics
//! - **create** fails when the key exists (this is what makes duplicate
//!   stabilization pushes harmless no-ops).
//! - **update** fails when the key is absent, otherwise overwrites.
//! - **delete** fails when the key is absent.

pub mod memory;
