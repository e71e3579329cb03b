//! # Recipe Finder
//!
//! Workflow controller for a recipe-discovery journey: search for recipes,
//! pick one, read its steps, get drink pairings, and leave a review. Recipe
//! text comes from a generative backend and is rendered through a small
//! markup transformer.
//!
//! ## Usage
//!
//! ```no_run
//! use recipe_finder::{FinderConfig, HttpDispatcher, SearchCriteria, WorkflowController};
//! use std::sync::Arc;
//!
//! # async fn run() -> recipe_finder::Result<()> {
//! let config = FinderConfig::from_env()?;
//! let dispatcher = Arc::new(HttpDispatcher::new(&config)?);
//! let controller = WorkflowController::new(dispatcher, &config);
//!
//! controller
//!     .search(SearchCriteria {
//!         ingredients: "chicken, tomatoes".to_string(),
//!         ..Default::default()
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `config` - Backend URL, language, timeout and log level
//! - `dispatcher` - Request dispatcher trait and its HTTP implementation
//! - `error` - Error type and error code registry
//! - `markup` - Backend text to display segments
//! - `session` - Session state, stage rules, events and observers
//! - `telemetry` - Tracing subscriber setup
//! - `testing` - Mock dispatcher and recording observer
//! - `workflow` - The controller and operation outcomes

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod markup;
pub mod session;
pub mod telemetry;
pub mod testing;
pub mod workflow;

pub use config::FinderConfig;
pub use dispatcher::{HttpDispatcher, RequestDispatcher};
pub use error::{FinderError, Result};
pub use markup::{transform, Segment, TransformOptions};
pub use session::{SearchCriteria, Session, Stage};
pub use workflow::{Outcome, WorkflowController};
