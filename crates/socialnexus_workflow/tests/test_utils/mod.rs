//! Test utilities for SocialNexus workflow tests.
//!
//! [`MockGenerator`] stands in for the Gemini client. Image renders can be
//! held behind per-prompt gates and scripted to fail, and every call kind is
//! counted.

#![allow(dead_code)]

use async_trait::async_trait;
use socialnexus_core::{
    BrandDetails, ContentPillar, GeneratedPost, ImagePayload, MarketAnalysis, NexusConfig,
    PostContent, PostType, ResearchConfig,
};
use socialnexus_error::{
    ContentError, ContentErrorKind, GeminiError, GeminiErrorKind,
};
use socialnexus_interface::{ContentGenerator, ContentResult};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

/// Image prompt of the `index`th mock draft.
pub fn prompt(index: usize) -> String {
    format!("prompt-{}", index)
}

/// Image the mock renders for `prompt`.
pub fn rendered(prompt: &str) -> ImagePayload {
    ImagePayload::new("image/png", format!("IMG:{}", prompt))
}

/// Image the mock returns when editing with `prompt`.
pub fn edited(prompt: &str) -> ImagePayload {
    ImagePayload::new("image/png", format!("EDIT:{}", prompt))
}

pub fn sample_brand() -> BrandDetails {
    BrandDetails::builder()
        .name("EcoSpark")
        .industry("Sustainable Energy")
        .target_audience("Eco-conscious homeowners")
        .unique_value_proposition("Solar kits installed in a day")
        .build()
        .expect("valid brand")
}

pub fn sample_analysis() -> MarketAnalysis {
    let pillars = (1..=4)
        .map(|i| ContentPillar::new(format!("Pillar {}", i), format!("Theme {}", i)))
        .collect();
    MarketAnalysis::new(
        "Competitors lean on rebates",
        "Renters are underserved",
        "Own the one-day install",
        pillars,
        vec![],
    )
    .expect("valid analysis")
}

/// Six well-formed drafts with prompts `prompt-0` .. `prompt-5`.
pub fn sample_drafts(post_type: PostType) -> Vec<GeneratedPost> {
    (0..6)
        .map(|i| {
            let content = PostContent::new(
                format!("Title {}", i),
                format!("Caption {}", i),
                (0..10).map(|h| format!("#tag{}", h)).collect(),
                (0..5).map(|k| format!("keyword{}", k)).collect(),
                prompt(i),
            );
            GeneratedPost::draft(content, post_type)
        })
        .collect()
}

/// A config with a fast progress interval and no image retries.
pub fn fast_config() -> NexusConfig {
    NexusConfig {
        research: ResearchConfig {
            progress_interval_ms: 5,
        },
        ..NexusConfig::default()
    }
}

/// An image error caused by an HTTP status.
pub fn http_image_error(status_code: u16) -> ContentError {
    ContentError::from_gemini(
        ContentErrorKind::Image,
        GeminiError::new(GeminiErrorKind::HttpError {
            status_code,
            message: "mock".to_string(),
        }),
    )
}

/// Scriptable [`ContentGenerator`].
#[derive(Default)]
pub struct MockGenerator {
    research_delay: Duration,
    research_error: Option<String>,
    drafts_error: Option<String>,
    edit_error: Option<u16>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    scripts: Mutex<HashMap<String, VecDeque<ContentResult<ImagePayload>>>>,
    completed: Mutex<Vec<String>>,
    research_calls: AtomicUsize,
    draft_calls: AtomicUsize,
    render_calls: AtomicUsize,
    edit_calls: AtomicUsize,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Research takes `delay` before answering.
    pub fn with_research_delay(mut self, delay: Duration) -> Self {
        self.research_delay = delay;
        self
    }

    /// Research fails with `message`.
    pub fn failing_research(mut self, message: &str) -> Self {
        self.research_error = Some(message.to_string());
        self
    }

    /// Draft generation fails with `message`.
    pub fn failing_drafts(mut self, message: &str) -> Self {
        self.drafts_error = Some(message.to_string());
        self
    }

    /// Every edit fails with the given HTTP status.
    pub fn failing_edits(mut self, status_code: u16) -> Self {
        self.edit_error = Some(status_code);
        self
    }

    /// Hold renders of `prompt` until the returned sender fires.
    pub fn gate(&self, prompt: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .expect("gates lock")
            .insert(prompt.to_string(), rx);
        tx
    }

    /// Queue results for successive renders of `prompt`. Once the queue is
    /// empty, renders succeed.
    pub fn script(&self, prompt: &str, results: Vec<ContentResult<ImagePayload>>) {
        self.scripts
            .lock()
            .expect("scripts lock")
            .insert(prompt.to_string(), results.into());
    }

    /// Prompts in the order their renders finished.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().expect("completed lock").clone()
    }

    pub fn research_calls(&self) -> usize {
        self.research_calls.load(Ordering::SeqCst)
    }

    pub fn draft_calls(&self) -> usize {
        self.draft_calls.load(Ordering::SeqCst)
    }

    pub fn render_calls(&self) -> usize {
        self.render_calls.load(Ordering::SeqCst)
    }

    pub fn edit_calls(&self) -> usize {
        self.edit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn perform_research(&self, _brand: &BrandDetails) -> ContentResult<MarketAnalysis> {
        self.research_calls.fetch_add(1, Ordering::SeqCst);
        if !self.research_delay.is_zero() {
            tokio::time::sleep(self.research_delay).await;
        }
        match &self.research_error {
            Some(message) => Err(ContentError::new(ContentErrorKind::Research(
                message.clone(),
            ))),
            None => Ok(sample_analysis()),
        }
    }

    async fn generate_drafts(
        &self,
        _brand: &BrandDetails,
        _analysis: &MarketAnalysis,
        post_type: PostType,
    ) -> ContentResult<Vec<GeneratedPost>> {
        self.draft_calls.fetch_add(1, Ordering::SeqCst);
        match &self.drafts_error {
            Some(message) => Err(ContentError::new(ContentErrorKind::Generation(
                message.clone(),
            ))),
            None => Ok(sample_drafts(post_type)),
        }
    }

    async fn render_image(&self, prompt: &str) -> ContentResult<ImagePayload> {
        self.render_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().expect("gates lock").remove(prompt);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let scripted = self
            .scripts
            .lock()
            .expect("scripts lock")
            .get_mut(prompt)
            .and_then(VecDeque::pop_front);

        self.completed
            .lock()
            .expect("completed lock")
            .push(prompt.to_string());

        scripted.unwrap_or_else(|| Ok(rendered(prompt)))
    }

    async fn edit_image(&self, _image: &ImagePayload, prompt: &str) -> ContentResult<ImagePayload> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        match self.edit_error {
            Some(status_code) => Err(http_image_error(status_code)),
            None => Ok(edited(prompt)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
