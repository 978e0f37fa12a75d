//! Board domain types: item variants and payload construction.
//!
//! The remote service models a board as a collection of polymorphic items.
//! Each variant has its own REST path segment and its own required payload
//! shape; [`payload`] builds those shapes exactly as the service expects them.

pub mod payload;

mod kind;

pub use kind::ItemKind;
