//! Workflow controller and operation outcomes
//!
//! Operations never return errors. A precondition violation comes back as
//! [`Outcome::Rejected`] with the session untouched; a backend failure comes
//! back as [`Outcome::Dispatched`] carrying [`DispatchStatus::Failed`], with
//! the stage's failure message already stored in the session.

pub mod controller;

pub use controller::WorkflowController;

use crate::session::{LoadingPurpose, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Controller operations, for logs and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Search,
    ChooseRecipe,
    FetchDrinks,
    FinishAndReview,
    Navigate,
    Rate,
    EditComment,
    SubmitReview,
    Reset,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::ChooseRecipe => "choose_recipe",
            Operation::FetchDrinks => "fetch_drinks",
            Operation::FinishAndReview => "finish_and_review",
            Operation::Navigate => "navigate",
            Operation::Rate => "rate",
            Operation::EditComment => "edit_comment",
            Operation::SubmitReview => "submit_review",
            Operation::Reset => "reset",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an operation was ignored
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    #[error("a {0} request is already in flight")]
    Busy(LoadingPurpose),
    #[error("data required for the {0} stage is missing")]
    MissingPrerequisite(Stage),
    #[error("recipe name is empty")]
    EmptyRecipeName,
    #[error("the review stage is not active")]
    NotInReview,
    #[error("the review was already submitted")]
    ReviewSubmitted,
    #[error("rating {0} is outside the allowed range")]
    RatingOutOfRange(u8),
    #[error("the session was reset while the request was in flight")]
    Superseded,
}

/// How a dispatched request settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchStatus {
    Succeeded,
    Failed { code: u16, message: String },
}

impl DispatchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchStatus::Succeeded)
    }
}

/// Result of a controller operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A local operation took effect
    Applied,
    /// A request was dispatched and its result stored
    Dispatched(DispatchStatus),
    /// Preconditions did not hold; nothing changed
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    /// The request went out and the backend answered successfully
    pub fn dispatched_ok(&self) -> bool {
        matches!(self, Outcome::Dispatched(DispatchStatus::Succeeded))
    }
}
