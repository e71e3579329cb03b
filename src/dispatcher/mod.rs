//! Request dispatcher abstraction
//!
//! The controller never talks to the network directly. It hands typed
//! requests to a [`RequestDispatcher`], which performs one request and
//! returns either the backend's text or a [`FinderError`]. The explicit
//! `Result` keeps "the call failed" distinguishable from "the backend
//! answered with something unhelpful", even though the default UI policy
//! shows both the same way.

pub mod http;

pub use http::HttpDispatcher;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend operations and their paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    Translate,
    SearchRecipes,
    GiveRecipe,
    DrinkRecommendations,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Translate => "translate",
            Endpoint::SearchRecipes => "search-recipes",
            Endpoint::GiveRecipe => "give-recipe",
            Endpoint::DrinkRecommendations => "drink-recommendations",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub language: String,
    pub ingredients: String,
    pub dietary_restrictions: String,
    pub culinary: String,
    pub tools: String,
}

/// Body shared by the steps and drinks requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub language: String,
    pub chosen_recipe: String,
    pub recipe_list: String,
}

/// Performs requests against the generative backend
#[async_trait]
pub trait RequestDispatcher: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> Result<String>;

    /// Free-text list of candidate recipes
    async fn search_recipes(&self, request: &SearchRequest) -> Result<String>;

    /// Free-text steps for the chosen recipe
    async fn give_recipe(&self, request: &RecipeRequest) -> Result<String>;

    /// Free-text drink pairing suggestions
    async fn drink_recommendations(&self, request: &RecipeRequest) -> Result<String>;
}
