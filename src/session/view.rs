//! Per-stage rendering settings

use super::{Session, Stage};
use crate::markup::{self, Segment, TransformOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageView {
    pub stage: Stage,
    pub heading: Option<&'static str>,
    pub options: TransformOptions,
}

impl StageView {
    pub fn for_stage(stage: Stage) -> Self {
        let (heading, options) = match stage {
            Stage::Idle => (None, TransformOptions::PLAIN),
            Stage::Results => (Some("Results:"), TransformOptions::PLAIN),
            Stage::Steps => (Some("Recipe Steps:"), TransformOptions::WITH_BULLETS),
            Stage::Drinks => (Some("Drink Recommendations:"), TransformOptions::PLAIN),
            Stage::Review => (Some("Review"), TransformOptions::PLAIN),
        };
        Self {
            stage,
            heading,
            options,
        }
    }

    /// Segments for this view's stored content, empty when there is none
    pub fn render(&self, session: &Session) -> Vec<Segment> {
        session
            .content_for(self.stage)
            .map(|raw| markup::transform(raw, self.options))
            .unwrap_or_default()
    }
}
