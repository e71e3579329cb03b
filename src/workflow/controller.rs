//! Workflow controller implementation

use super::{DispatchStatus, Operation, Outcome, Rejection};
use crate::config::FinderConfig;
use crate::dispatcher::{RecipeRequest, RequestDispatcher, SearchRequest, TranslateRequest};
use crate::error::{FinderError, Result};
use crate::session::{
    LoadingPurpose, ReviewQuestion, ReviewState, SearchCriteria, Session, SessionEvent,
    SessionObserver, Stage, MAX_RATING,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Session plus the generation counter used to drop stale completions
#[derive(Default)]
struct ControllerState {
    session: Session,
    generation: u64,
}

/// Token for an in-flight request
struct Ticket {
    purpose: LoadingPurpose,
    generation: u64,
    from: Stage,
}

/// Drives one session through search, steps, drinks and review.
///
/// All operations take `&self`; the session lock is never held across a
/// backend request, so concurrent callers observe the loading state and are
/// rejected instead of queued.
pub struct WorkflowController {
    dispatcher: Arc<dyn RequestDispatcher>,
    language: String,
    request_timeout: Duration,
    state: Arc<RwLock<ControllerState>>,
    observers: Arc<RwLock<Vec<Arc<dyn SessionObserver>>>>,
}

impl WorkflowController {
    pub fn new(dispatcher: Arc<dyn RequestDispatcher>, config: &FinderConfig) -> Self {
        Self {
            dispatcher,
            language: config.language.clone(),
            request_timeout: config.request_timeout,
            state: Arc::new(RwLock::new(ControllerState::default())),
            observers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Add an observer
    pub async fn add_observer(&self, observer: Arc<dyn SessionObserver>) {
        self.observers.write().await.push(observer);
    }

    /// Snapshot of the session for rendering
    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    /// Run a new search, discarding everything downstream of it
    pub async fn search(&self, criteria: SearchCriteria) -> Outcome {
        let begun = {
            let mut state = self.state.write().await;
            match ensure_ready(&state.session) {
                Err(reason) => Err(reason),
                Ok(()) => {
                    state.session.begin_search(criteria.clone());
                    Ok(self.ticket(&state, LoadingPurpose::Search))
                }
            }
        };
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(reason) => return self.reject(Operation::Search, reason).await,
        };
        self.started(&ticket).await;

        let request = SearchRequest {
            language: self.language.clone(),
            ingredients: criteria.ingredients,
            dietary_restrictions: criteria.dietary_restrictions,
            culinary: criteria.culinary,
            tools: criteria.tools,
        };
        let result = self
            .bounded(ticket.purpose, self.dispatcher.search_recipes(&request))
            .await;
        self.settle(Operation::Search, ticket, result).await
    }

    /// Request the steps for `recipe_name` out of the current search result
    pub async fn choose_recipe(&self, recipe_name: &str) -> Outcome {
        let recipe_name = recipe_name.trim();
        let begun = {
            let mut state = self.state.write().await;
            let session = &state.session;
            let check = ensure_ready(session).and_then(|()| {
                let recipe_list = session
                    .search_result()
                    .filter(|s| !s.is_empty())
                    .ok_or(Rejection::MissingPrerequisite(Stage::Results))?
                    .to_string();
                if recipe_name.is_empty() {
                    return Err(Rejection::EmptyRecipeName);
                }
                Ok(recipe_list)
            });
            match check {
                Err(reason) => Err(reason),
                Ok(recipe_list) => {
                    state.session.begin_steps(recipe_name);
                    Ok((self.ticket(&state, LoadingPurpose::Steps), recipe_list))
                }
            }
        };
        let (ticket, recipe_list) = match begun {
            Ok(begun) => begun,
            Err(reason) => return self.reject(Operation::ChooseRecipe, reason).await,
        };
        self.started(&ticket).await;

        let request = RecipeRequest {
            language: self.language.clone(),
            chosen_recipe: recipe_name.to_string(),
            recipe_list,
        };
        let result = self
            .bounded(ticket.purpose, self.dispatcher.give_recipe(&request))
            .await;
        self.settle(Operation::ChooseRecipe, ticket, result).await
    }

    /// Request drink pairings for the chosen recipe
    pub async fn fetch_drinks(&self) -> Outcome {
        let begun = {
            let mut state = self.state.write().await;
            let session = &state.session;
            let check = ensure_ready(session).and_then(|()| {
                let recipe_list = session
                    .search_result()
                    .filter(|s| !s.is_empty())
                    .ok_or(Rejection::MissingPrerequisite(Stage::Results))?
                    .to_string();
                if !session.prerequisites_met(Stage::Drinks) {
                    return Err(Rejection::MissingPrerequisite(Stage::Steps));
                }
                Ok((session.chosen_recipe().to_string(), recipe_list))
            });
            match check {
                Err(reason) => Err(reason),
                Ok(fields) => {
                    state.session.begin_drinks();
                    Ok((self.ticket(&state, LoadingPurpose::Drinks), fields))
                }
            }
        };
        let (ticket, (chosen_recipe, recipe_list)) = match begun {
            Ok(begun) => begun,
            Err(reason) => return self.reject(Operation::FetchDrinks, reason).await,
        };
        self.started(&ticket).await;

        let request = RecipeRequest {
            language: self.language.clone(),
            chosen_recipe,
            recipe_list,
        };
        let result = self
            .bounded(ticket.purpose, self.dispatcher.drink_recommendations(&request))
            .await;
        self.settle(Operation::FetchDrinks, ticket, result).await
    }

    /// Show cached drink pairings, fetching them only when absent
    pub async fn open_drinks(&self) -> Outcome {
        let cached = self.state.read().await.session.drink_pairing().is_some();
        if cached {
            self.navigate(Stage::Drinks).await
        } else {
            self.fetch_drinks().await
        }
    }

    /// Move on to the review stage
    pub async fn finish_and_review(&self) -> Outcome {
        self.local(Operation::FinishAndReview, |session| {
            ensure_ready(session)?;
            if !session.prerequisites_met(Stage::Review) {
                return Err(Rejection::MissingPrerequisite(Stage::Drinks));
            }
            session.enter_review();
            Ok(())
        })
        .await
    }

    /// Revisit a stage whose data is already present; never dispatches
    pub async fn navigate(&self, target: Stage) -> Outcome {
        self.local(Operation::Navigate, |session| {
            ensure_ready(session)?;
            if !session.is_available(target) {
                return Err(Rejection::MissingPrerequisite(target));
            }
            session.set_stage(target);
            Ok(())
        })
        .await
    }

    /// Set one rating on the review draft (1 to 5 stars)
    pub async fn rate(&self, question: ReviewQuestion, stars: u8) -> Outcome {
        self.local(Operation::Rate, |session| {
            let review = review_draft(session)?;
            if !(1..=MAX_RATING).contains(&stars) {
                return Err(Rejection::RatingOutOfRange(stars));
            }
            match question {
                ReviewQuestion::Experience => review.experience_rating = stars,
                ReviewQuestion::Quality => review.quality_rating = stars,
            }
            Ok(())
        })
        .await
    }

    pub async fn edit_comment(&self, comment: &str) -> Outcome {
        self.local(Operation::EditComment, |session| {
            review_draft(session)?.comment = comment.to_string();
            Ok(())
        })
        .await
    }

    /// Record the final ratings and comment; 0 means "not rated".
    ///
    /// After this only [`reset`](Self::reset) is accepted.
    pub async fn submit_review(
        &self,
        experience_rating: u8,
        quality_rating: u8,
        comment: &str,
    ) -> Outcome {
        let outcome = self
            .local(Operation::SubmitReview, |session| {
                let review = review_draft(session)?;
                for rating in [experience_rating, quality_rating] {
                    if rating > MAX_RATING {
                        return Err(Rejection::RatingOutOfRange(rating));
                    }
                }
                review.experience_rating = experience_rating;
                review.quality_rating = quality_rating;
                review.comment = comment.to_string();
                review.submitted = true;
                Ok(())
            })
            .await;

        if !outcome.is_rejected() {
            info!(experience_rating, quality_rating, "review submitted");
            self.notify(SessionEvent::ReviewSubmitted {
                experience_rating,
                quality_rating,
                comment: comment.to_string(),
            })
            .await;
        }
        outcome
    }

    /// Discard the session. Accepted from any stage, even mid-request; the
    /// pending request's answer is dropped when it arrives.
    pub async fn reset(&self) -> Outcome {
        let from = {
            let mut state = self.state.write().await;
            let from = state.session.stage();
            state.session = Session::new();
            state.generation += 1;
            from
        };
        debug!(from = %from, "session reset");
        self.notify(SessionEvent::Reset).await;
        Outcome::Applied
    }

    /// Translate text into the configured language; leaves the session alone
    pub async fn translate(&self, text: &str) -> Result<String> {
        let request = TranslateRequest {
            language: self.language.clone(),
            text: text.to_string(),
        };
        match tokio::time::timeout(self.request_timeout, self.dispatcher.translate(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(FinderError::timeout("translate", self.request_timeout)),
        }
    }

    fn ticket(&self, state: &ControllerState, purpose: LoadingPurpose) -> Ticket {
        Ticket {
            purpose,
            generation: state.generation,
            from: state.session.stage(),
        }
    }

    async fn started(&self, ticket: &Ticket) {
        debug!(purpose = %ticket.purpose, "request started");
        self.notify(SessionEvent::RequestStarted {
            purpose: ticket.purpose,
        })
        .await;
    }

    /// Await a dispatch, giving up after the configured timeout
    async fn bounded<F>(&self, purpose: LoadingPurpose, request: F) -> Result<String>
    where
        F: Future<Output = Result<String>>,
    {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(FinderError::timeout(
                format!("{purpose} request"),
                self.request_timeout,
            )),
        }
    }

    /// Store a request's result and advance, unless the session moved on
    async fn settle(
        &self,
        operation: Operation,
        ticket: Ticket,
        result: Result<String>,
    ) -> Outcome {
        let status = match &result {
            Ok(_) => DispatchStatus::Succeeded,
            Err(e) => DispatchStatus::Failed {
                code: e.code(),
                message: e.to_string(),
            },
        };

        let applied = {
            let mut state = self.state.write().await;
            if state.generation != ticket.generation {
                false
            } else {
                let content = match result {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(purpose = %ticket.purpose, error = %e, "request failed");
                        ticket.purpose.failure_message().to_string()
                    }
                };
                state.session.settle(ticket.purpose, content);
                true
            }
        };
        if !applied {
            return self.reject(operation, Rejection::Superseded).await;
        }

        let to = ticket.purpose.target_stage();
        info!(
            purpose = %ticket.purpose,
            stage = %to,
            success = status.is_success(),
            "request settled"
        );
        self.notify(SessionEvent::RequestSettled {
            purpose: ticket.purpose,
            succeeded: status.is_success(),
        })
        .await;
        if ticket.from != to {
            self.notify(SessionEvent::StageChanged {
                from: ticket.from,
                to,
            })
            .await;
        }
        Outcome::Dispatched(status)
    }

    /// Apply a non-dispatching operation atomically
    async fn local<F>(&self, operation: Operation, apply: F) -> Outcome
    where
        F: FnOnce(&mut Session) -> std::result::Result<(), Rejection>,
    {
        let result = {
            let mut state = self.state.write().await;
            // work on a copy so a rejection leaves the session untouched
            let mut draft = state.session.clone();
            let from = draft.stage();
            apply(&mut draft).map(|()| {
                let to = draft.stage();
                state.session = draft;
                (from, to)
            })
        };

        match result {
            Err(reason) => self.reject(operation, reason).await,
            Ok((from, to)) => {
                debug!(operation = %operation, stage = %to, "operation applied");
                if from != to {
                    self.notify(SessionEvent::StageChanged { from, to }).await;
                }
                Outcome::Applied
            }
        }
    }

    async fn reject(&self, operation: Operation, reason: Rejection) -> Outcome {
        debug!(operation = %operation, reason = %reason, "operation rejected");
        self.notify(SessionEvent::Rejected {
            operation,
            reason: reason.clone(),
        })
        .await;
        Outcome::Rejected(reason)
    }

    async fn notify(&self, event: SessionEvent) {
        // observers may register further observers from `on_event`
        let observers = self.observers.read().await.clone();
        for observer in &observers {
            observer.on_event(&event).await;
        }
    }
}

/// Nothing may happen after submission or while a request is in flight
fn ensure_ready(session: &Session) -> std::result::Result<(), Rejection> {
    if session.is_terminal() {
        return Err(Rejection::ReviewSubmitted);
    }
    if let Some(purpose) = session.loading_purpose() {
        return Err(Rejection::Busy(purpose));
    }
    Ok(())
}

fn review_draft(session: &mut Session) -> std::result::Result<&mut ReviewState, Rejection> {
    ensure_ready(session)?;
    if session.stage() != Stage::Review {
        return Err(Rejection::NotInReview);
    }
    session.review_mut().ok_or(Rejection::NotInReview)
}
