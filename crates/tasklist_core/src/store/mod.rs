//! Collection store and its supporting pieces.
//!
//! # Responsibility
//! - Own record state and expose CRUD, edit, filter, search and selection use-cases.
//! - Derive views without mutating stored state.
//! - Tell subscribers when state changed.
//!
//! # Invariants
//! - One store instance is mutated by one caller at a time (`&mut self`).
//! - Published collection values are immutable; mutations swap in new ones.

pub mod collection_store;
pub mod id_gen;
pub mod observer;
pub mod selection;
pub mod view;
