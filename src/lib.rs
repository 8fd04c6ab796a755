//! Domain core for hospital HR scheduling: employee contracts, absence
//! requests, availability proposals, schedule projection, and the weekly
//! planning grid built by managers.
//!
//! The crate performs no I/O of its own. Persistence and identity are
//! consumed through the contracts in [`repository`]; every operation is a
//! function over the data the caller supplies.

pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;
