//! Mock dispatcher and observer for testing

use crate::dispatcher::{
    Endpoint, RecipeRequest, RequestDispatcher, SearchRequest, TranslateRequest,
};
use crate::error::{ErrorCode, FinderError, Result};
use crate::session::{SessionEvent, SessionObserver, TimestampedEvent};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A request as the mock received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone)]
enum CannedResponse {
    Success(String),
    Failure(String),
}

/// Builder for creating configured mock dispatchers
pub struct MockDispatcherBuilder {
    responses: HashMap<Endpoint, CannedResponse>,
    gated: bool,
}

impl Default for MockDispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDispatcherBuilder {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            gated: false,
        }
    }

    pub fn with_success(mut self, endpoint: Endpoint, text: &str) -> Self {
        self.responses
            .insert(endpoint, CannedResponse::Success(text.to_string()));
        self
    }

    pub fn with_error(mut self, endpoint: Endpoint, message: &str) -> Self {
        self.responses
            .insert(endpoint, CannedResponse::Failure(message.to_string()));
        self
    }

    /// Hold every request until [`MockDispatcher::release`] is called
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub fn build(self) -> MockDispatcher {
        MockDispatcher {
            responses: Mutex::new(self.responses),
            calls: Mutex::new(Vec::new()),
            gate: self.gated.then(|| Arc::new(Notify::new())),
        }
    }
}

/// Mock implementation of RequestDispatcher for testing
pub struct MockDispatcher {
    responses: Mutex<HashMap<Endpoint, CannedResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
    gate: Option<Arc<Notify>>,
}

impl MockDispatcher {
    pub fn builder() -> MockDispatcherBuilder {
        MockDispatcherBuilder::new()
    }

    /// Replace the canned answer for an endpoint
    pub fn set_success(&self, endpoint: Endpoint, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint, CannedResponse::Success(text.to_string()));
    }

    pub fn set_error(&self, endpoint: Endpoint, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint, CannedResponse::Failure(message.to_string()));
    }

    /// Let one held request through
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.endpoint == endpoint)
            .collect()
    }

    async fn respond<B: Serialize + Sync>(&self, endpoint: Endpoint, body: &B) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint,
            body: serde_json::to_value(body).unwrap_or_default(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let canned = self.responses.lock().unwrap().get(&endpoint).cloned();
        match canned {
            Some(CannedResponse::Success(text)) => Ok(text),
            Some(CannedResponse::Failure(message)) => Err(FinderError::dispatch_with_code(
                ErrorCode::DISPATCH_TRANSPORT,
                message,
                Some(endpoint.path().to_string()),
            )),
            None => Ok(format!("Mock response for {endpoint}")),
        }
    }
}

#[async_trait]
impl RequestDispatcher for MockDispatcher {
    async fn translate(&self, request: &TranslateRequest) -> Result<String> {
        self.respond(Endpoint::Translate, request).await
    }

    async fn search_recipes(&self, request: &SearchRequest) -> Result<String> {
        self.respond(Endpoint::SearchRecipes, request).await
    }

    async fn give_recipe(&self, request: &RecipeRequest) -> Result<String> {
        self.respond(Endpoint::GiveRecipe, request).await
    }

    async fn drink_recommendations(&self, request: &RecipeRequest) -> Result<String> {
        self.respond(Endpoint::DrinkRecommendations, request).await
    }
}

/// Observer that keeps every event it sees, stamped with its arrival time
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TimestampedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.timestamped().into_iter().map(|e| e.event).collect()
    }

    pub fn timestamped(&self) -> Vec<TimestampedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionObserver for RecordingObserver {
    async fn on_event(&self, event: &SessionEvent) {
        self.events
            .lock()
            .unwrap()
            .push(TimestampedEvent::new(event.clone()));
    }
}
