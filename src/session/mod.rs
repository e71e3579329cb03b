//! Session aggregate for one recipe-discovery journey
//!
//! A [`Session`] is plain data. It is only mutated by
//! [`crate::workflow::WorkflowController`], which checks the stage rules
//! defined here before touching it.

pub mod events;
pub mod view;

pub use events::{LoggingObserver, NoOpObserver, SessionEvent, SessionObserver, TimestampedEvent};
pub use view::StageView;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The visible step of the workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    Results,
    Steps,
    Drinks,
    Review,
}

impl Stage {
    /// Stages in workflow order
    pub const ORDER: [Stage; 5] = [
        Stage::Idle,
        Stage::Results,
        Stage::Steps,
        Stage::Drinks,
        Stage::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Results => "results",
            Stage::Steps => "steps",
            Stage::Drinks => "drinks",
            Stage::Review => "review",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an in-flight request is for; drives the loading indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingPurpose {
    Search,
    Steps,
    Drinks,
}

impl LoadingPurpose {
    /// Indicator text shown while the request is in flight
    pub fn message(&self) -> &'static str {
        match self {
            LoadingPurpose::Search => "Searching delicious recipes...",
            LoadingPurpose::Steps => "Gathering cooking steps...",
            LoadingPurpose::Drinks => "Pairing the perfect drink...",
        }
    }

    /// Content stored in place of the backend answer when the request fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            LoadingPurpose::Search => "Failed to fetch recipes.",
            LoadingPurpose::Steps => "Failed to fetch recipe details.",
            LoadingPurpose::Drinks => "Failed to fetch drink recommendations.",
        }
    }

    /// Stage entered once the request settles
    pub fn target_stage(&self) -> Stage {
        match self {
            LoadingPurpose::Search => Stage::Results,
            LoadingPurpose::Steps => Stage::Steps,
            LoadingPurpose::Drinks => Stage::Drinks,
        }
    }
}

impl fmt::Display for LoadingPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadingPurpose::Search => "search",
            LoadingPurpose::Steps => "steps",
            LoadingPurpose::Drinks => "drinks",
        };
        f.write_str(name)
    }
}

/// Search inputs; all free text and all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub ingredients: String,
    pub dietary_restrictions: String,
    pub culinary: String,
    pub tools: String,
}

/// Which rating a star click applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewQuestion {
    Experience,
    Quality,
}

/// Review draft and submission flag; ratings are 0 (unrated) to 5
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    pub experience_rating: u8,
    pub quality_rating: u8,
    pub comment: String,
    pub submitted: bool,
}

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    stage: Stage,
    criteria: SearchCriteria,
    search_result: Option<String>,
    chosen_recipe: String,
    recipe_steps: Option<String>,
    drink_pairing: Option<String>,
    review: Option<ReviewState>,
    loading: Option<LoadingPurpose>,
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn search_result(&self) -> Option<&str> {
        self.search_result.as_deref()
    }

    pub fn chosen_recipe(&self) -> &str {
        &self.chosen_recipe
    }

    pub fn recipe_steps(&self) -> Option<&str> {
        self.recipe_steps.as_deref()
    }

    pub fn drink_pairing(&self) -> Option<&str> {
        self.drink_pairing.as_deref()
    }

    pub fn review(&self) -> Option<&ReviewState> {
        self.review.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn loading_purpose(&self) -> Option<LoadingPurpose> {
        self.loading
    }

    /// The review has been submitted; only a reset is accepted now
    pub fn is_terminal(&self) -> bool {
        self.review.as_ref().is_some_and(|r| r.submitted)
    }

    /// Stored backend text for a stage, if that stage shows any
    pub fn content_for(&self, stage: Stage) -> Option<&str> {
        match stage {
            Stage::Results => self.search_result(),
            Stage::Steps => self.recipe_steps(),
            Stage::Drinks => self.drink_pairing(),
            Stage::Idle | Stage::Review => None,
        }
    }

    /// Data a stage depends on is present.
    ///
    /// This is the entry rule: Steps needs a search result and a chosen
    /// recipe, Drinks needs recipe steps, Review needs a drink pairing.
    pub fn prerequisites_met(&self, stage: Stage) -> bool {
        match stage {
            Stage::Idle | Stage::Results => true,
            Stage::Steps => has_text(&self.search_result) && !self.chosen_recipe.is_empty(),
            Stage::Drinks => has_text(&self.recipe_steps),
            Stage::Review => has_text(&self.drink_pairing),
        }
    }

    /// A stage can be revisited without a new request
    pub fn is_available(&self, stage: Stage) -> bool {
        let has_content = match stage {
            Stage::Idle => false,
            Stage::Results => self.search_result.is_some(),
            Stage::Steps => self.recipe_steps.is_some(),
            Stage::Drinks => self.drink_pairing.is_some(),
            Stage::Review => self.review.is_some(),
        };
        has_content && self.prerequisites_met(stage)
    }

    /// Stages the user can navigate to, in workflow order
    pub fn available_stages(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|stage| self.is_available(*stage))
            .collect()
    }

    /// The stage invariants hold for the current state
    pub fn is_consistent(&self) -> bool {
        self.prerequisites_met(self.stage)
            && !(self.stage == Stage::Review && self.review.is_none())
    }

    pub fn current_view(&self) -> StageView {
        StageView::for_stage(self.stage)
    }

    // Mutators below are used by the controller once it has checked the
    // preconditions of the operation.

    pub(crate) fn begin_search(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
        self.recipe_steps = None;
        self.drink_pairing = None;
        self.review = None;
        self.stage = Stage::Idle;
        self.chosen_recipe.clear();
        self.loading = Some(LoadingPurpose::Search);
    }

    /// A different recipe invalidates the pairing and review of the old one
    pub(crate) fn begin_steps(&mut self, recipe_name: &str) {
        if self.chosen_recipe != recipe_name {
            self.drink_pairing = None;
            self.review = None;
            if matches!(self.stage, Stage::Drinks | Stage::Review) {
                self.stage = Stage::Results;
            }
            self.chosen_recipe = recipe_name.to_string();
        }
        self.loading = Some(LoadingPurpose::Steps);
    }

    pub(crate) fn begin_drinks(&mut self) {
        self.loading = Some(LoadingPurpose::Drinks);
    }

    /// Store the settled content of a request and enter its stage
    pub(crate) fn settle(&mut self, purpose: LoadingPurpose, content: String) {
        match purpose {
            LoadingPurpose::Search => self.search_result = Some(content),
            LoadingPurpose::Steps => self.recipe_steps = Some(content),
            LoadingPurpose::Drinks => self.drink_pairing = Some(content),
        }
        self.loading = None;
        self.stage = purpose.target_stage();
    }

    pub(crate) fn enter_review(&mut self) {
        self.review.get_or_insert_with(ReviewState::default);
        self.stage = Stage::Review;
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn review_mut(&mut self) -> Option<&mut ReviewState> {
        self.review.as_mut()
    }
}
