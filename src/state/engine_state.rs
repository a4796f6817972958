//! Lifecycle states of a traversal engine
//!
//! A crawl moves `Idle → Running(1) → Running(2) → … → Done`. It may also go
//! straight from `Idle` to `Done` when there is nothing to crawl.

use crate::CrawlError;
use std::fmt;

/// Represents the current state of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Engine created, nothing crawled yet
    Idle,

    /// Crawling the queue of the given depth (1-based)
    Running { depth: u32 },

    /// Crawl finished; no further depths will be attempted
    Done,
}

impl EngineState {
    /// Returns true once the crawl has finished
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns the depth currently being crawled, if any
    pub fn depth(&self) -> Option<u32> {
        match self {
            Self::Running { depth } => Some(*depth),
            _ => None,
        }
    }

    /// Checks whether moving to `to` is a legal transition
    pub fn can_transition_to(&self, to: EngineState) -> bool {
        match (*self, to) {
            (Self::Idle, Self::Running { depth }) => depth == 1,
            (Self::Idle, Self::Done) => true,
            (Self::Running { depth: from }, Self::Running { depth: next }) => next == from + 1,
            (Self::Running { .. }, Self::Done) => true,
            _ => false,
        }
    }

    /// Moves to `to`, or fails with [`CrawlError::InvalidTransition`]
    pub fn transition(&mut self, to: EngineState) -> Result<(), CrawlError> {
        if !self.can_transition_to(to) {
            return Err(CrawlError::InvalidTransition { from: *self, to });
        }
        *self = to;
        Ok(())
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running { depth } => write!(f, "running (depth {})", depth),
            Self::Done => write!(f, "done"),
        }
    }
}
