//! Testing utilities
//!
//! Mock collaborators used by the unit and integration tests, and usable by
//! presentation layers that want to exercise the workflow offline.

pub mod mocks;

pub use mocks::{MockDispatcher, MockDispatcherBuilder, RecordedCall, RecordingObserver};
