//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `EngineState`: lifecycle of one traversal (idle, running at a depth, done)

mod engine_state;

pub use engine_state::EngineState;
