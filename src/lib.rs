//! Puyo engine (workspace facade crate).
//!
//! Exposes the `puyo_engine::{core,types}` public API while the implementation
//! lives in dedicated crates under `crates/`.

pub use puyo_engine_core as core;
pub use puyo_engine_types as types;
