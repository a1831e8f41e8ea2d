//! Background Tasks Module
//!
//! Opt-in background work. The cache never starts these itself.
//!
//! # Tasks
//! - Expiry sweep: calls `clear_expired` at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
