//! AI generation studio.
//!
//! Generation is simulated: the job sleeps a configured latency and returns
//! the workflow's placeholder asset. There is no queue and no cancellation;
//! a started job always runs to completion.

use std::str::FromStr;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::session::Session;

/// Cost split for one generation, in ⚡.
pub const COST_TO_MINER: f64 = 0.8;
pub const COST_TO_LORA_OWNER: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Text2ImageCartoon,
    Text2VideoCartoon,
    Image2ImageCartoon,
}

impl Workflow {
    pub const ALL: [Workflow; 3] =
        [Workflow::Text2ImageCartoon, Workflow::Text2VideoCartoon, Workflow::Image2ImageCartoon];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Workflow::Text2ImageCartoon => "Text2Image Cartoon",
            Workflow::Text2VideoCartoon => "Text2Video Cartoon",
            Workflow::Image2ImageCartoon => "Image2Image Cartoon",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Workflow::Text2ImageCartoon => "Transform text descriptions into cartoon-style images",
            Workflow::Text2VideoCartoon => "Create animated cartoon videos from text prompts",
            Workflow::Image2ImageCartoon => "Convert existing images into cartoon art style",
        }
    }

    #[must_use]
    pub fn estimated_time(self) -> &'static str {
        match self {
            Workflow::Text2VideoCartoon => "2-5 minutes",
            Workflow::Text2ImageCartoon | Workflow::Image2ImageCartoon => "30 seconds - 2 minutes",
        }
    }

    /// Placeholder output asset for the mocked pipeline.
    #[must_use]
    pub fn placeholder_asset(self) -> &'static str {
        match self {
            Workflow::Text2ImageCartoon => "/assets/images/placeholders/0.webp",
            Workflow::Text2VideoCartoon => "/assets/images/placeholders/1.webp",
            Workflow::Image2ImageCartoon => "/assets/images/placeholders/2.webp",
        }
    }
}

impl FromStr for Workflow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Workflow::ALL
            .into_iter()
            .find(|w| w.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown workflow: {s}"))
    }
}

/// Fixed per-generation cost estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub to_miner: f64,
    pub to_lora_owner: f64,
}

impl CostEstimate {
    #[must_use]
    pub fn standard() -> Self {
        Self { to_miner: COST_TO_MINER, to_lora_owner: COST_TO_LORA_OWNER }
    }

    #[must_use]
    pub fn total(self) -> f64 {
        self.to_miner + self.to_lora_owner
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("sign in to generate content")]
    NotSignedIn,
}

/// One finished generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub id: Uuid,
    pub workflow: Workflow,
    pub lora: String,
    pub prompt: String,
    pub asset: String,
    pub cost: CostEstimate,
}

pub struct Studio {
    latency: Duration,
}

impl Studio {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Run one mocked generation job.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::NotSignedIn`] without starting the job when no
    /// connected session is present.
    pub async fn generate(
        &self,
        session: Option<&Session>,
        workflow: Workflow,
        lora: &str,
        prompt: &str,
    ) -> Result<Generation, StudioError> {
        if !session.is_some_and(|s| s.connected) {
            return Err(StudioError::NotSignedIn);
        }

        info!(workflow = workflow.label(), lora, "generation started");
        tokio::time::sleep(self.latency).await;

        let generation = Generation {
            id: Uuid::new_v4(),
            workflow,
            lora: lora.to_owned(),
            prompt: prompt.to_owned(),
            asset: workflow.placeholder_asset().to_owned(),
            cost: CostEstimate::standard(),
        };
        info!(id = %generation.id, asset = %generation.asset, "generation finished");
        Ok(generation)
    }
}

#[cfg(test)]
#[path = "studio_test.rs"]
mod tests;
