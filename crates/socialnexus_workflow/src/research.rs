//! Market research with progress reporting.

use socialnexus_core::{BrandDetails, MarketAnalysis, ResearchConfig};
use socialnexus_interface::{ContentGenerator, ContentResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Labels shown while research is in flight, in order.
pub const PROGRESS_LABELS: [&str; 3] = [
    "Analyzing your industry...",
    "Scanning competitor trends...",
    "Identifying market opportunities...",
];

/// A progress tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchProgress {
    /// Zero-based tick number
    pub step: usize,
    /// Label for this tick; the last label repeats once the list runs out
    pub label: &'static str,
}

impl ResearchProgress {
    fn at(step: usize) -> Self {
        let index = step.min(PROGRESS_LABELS.len() - 1);
        Self {
            step,
            label: PROGRESS_LABELS[index],
        }
    }
}

/// Runs the single research call while emitting progress labels.
///
/// Progress is cosmetic: it does not reflect real work and stops the moment
/// the call settles.
pub struct MarketResearchOrchestrator<G: ContentGenerator> {
    generator: Arc<G>,
    interval: Duration,
}

impl<G: ContentGenerator> MarketResearchOrchestrator<G> {
    /// Create an orchestrator.
    pub fn new(generator: Arc<G>, config: ResearchConfig) -> Self {
        // tokio::time::interval panics on a zero period
        let interval = config.progress_interval().max(Duration::from_millis(1));
        Self {
            generator,
            interval,
        }
    }

    /// Research the brand.
    ///
    /// When `progress` is given, a label is sent immediately and then every
    /// interval until the call completes. A full or closed channel never
    /// holds up the research.
    #[instrument(skip(self, brand, progress), fields(brand = %brand.name(), provider = self.generator.provider_name()))]
    pub async fn run(
        &self,
        brand: &BrandDetails,
        progress: Option<mpsc::Sender<ResearchProgress>>,
    ) -> ContentResult<MarketAnalysis> {
        info!("Starting market research");

        let research = self.generator.perform_research(brand);
        tokio::pin!(research);

        let mut ticker = tokio::time::interval(self.interval);
        let mut step = 0;

        let result = loop {
            tokio::select! {
                biased;
                result = &mut research => break result,
                _ = ticker.tick() => {
                    if let Some(tx) = &progress {
                        let tick = ResearchProgress::at(step);
                        debug!(step, label = tick.label, "Research progress");
                        let _ = tx.try_send(tick);
                    }
                    step += 1;
                }
            }
        };

        match &result {
            Ok(analysis) => info!(
                pillars = analysis.content_pillars().len(),
                citations = analysis.citations().len(),
                "Market research complete"
            ),
            Err(e) => warn!(error = %e, "Market research failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_label_repeats() {
        assert_eq!(ResearchProgress::at(0).label, PROGRESS_LABELS[0]);
        assert_eq!(ResearchProgress::at(2).label, PROGRESS_LABELS[2]);
        assert_eq!(ResearchProgress::at(7).label, PROGRESS_LABELS[2]);
        assert_eq!(ResearchProgress::at(7).step, 7);
    }
}
