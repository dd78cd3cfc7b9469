//! One full pass through the wizard, as the `run` command performs it.

use chrono::{DateTime, Utc};
use socialnexus_core::{
    BrandDetails, DEFAULT_PLATFORMS, GeneratedPost, MarketAnalysis, PostType,
};
use socialnexus_error::{NexusResult, StorageError, StorageErrorKind};
use socialnexus_interface::ContentGenerator;
use socialnexus_workflow::{PostCollection, ResearchProgress, Wizard};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

/// What the `run` command was asked to do.
#[derive(Debug, Clone)]
pub struct CampaignPlan {
    /// Format of the six posts
    pub post_type: PostType,
    /// Directory to export rendered images into
    pub out_dir: Option<PathBuf>,
    /// Schedule every rendered post at this time
    pub schedule_at: Option<DateTime<Utc>>,
    /// Platforms for scheduling; empty means the defaults
    pub platforms: Vec<String>,
}

impl CampaignPlan {
    /// A plan that only generates.
    pub fn new(post_type: PostType) -> Self {
        Self {
            post_type,
            out_dir: None,
            schedule_at: None,
            platforms: Vec::new(),
        }
    }

    /// Platforms to schedule on.
    pub fn effective_platforms(&self) -> Vec<String> {
        if self.platforms.is_empty() {
            DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect()
        } else {
            self.platforms.clone()
        }
    }
}

/// What a campaign run produced.
#[derive(Debug, Clone)]
pub struct CampaignReport {
    /// Research result
    pub analysis: MarketAnalysis,
    /// Final generation board
    pub posts: PostCollection,
    /// Files written by the export step
    pub exported: Vec<PathBuf>,
    /// Posts scheduled by this run
    pub scheduled: Vec<GeneratedPost>,
}

/// Drive `wizard` from brand submission to the dashboard.
///
/// Posts without an image are neither exported nor scheduled.
///
/// # Errors
///
/// Fails on research or draft failure, on an export error, or when the
/// wizard is not at the brand stage.
#[instrument(skip_all, fields(brand = %brand.name(), post_type = %plan.post_type))]
pub async fn run_campaign<G: ContentGenerator + 'static>(
    wizard: &mut Wizard<G>,
    brand: BrandDetails,
    plan: &CampaignPlan,
    progress: Option<mpsc::Sender<ResearchProgress>>,
) -> NexusResult<CampaignReport> {
    wizard.submit_brand(brand)?;
    let analysis = wizard.run_research(progress).await?;
    wizard.accept_pillars()?;
    wizard.select_post_type(plan.post_type)?;
    let posts = wizard.generate().await?;

    let exported = match &plan.out_dir {
        Some(dir) => export_images(&posts, dir)?,
        None => Vec::new(),
    };

    let mut scheduled = Vec::new();
    if let Some(at) = plan.schedule_at {
        let platforms = plan.effective_platforms();
        for post in posts.iter().filter(|p| p.image().is_some()) {
            scheduled.push(wizard.schedule_post(*post.id(), at, platforms.iter().cloned())?);
        }
        let skipped = posts.len() - scheduled.len();
        if skipped > 0 {
            warn!(skipped, "Posts without images were not scheduled");
        }
    }

    wizard.view_dashboard()?;
    info!(
        exported = exported.len(),
        scheduled = scheduled.len(),
        "Campaign complete"
    );

    Ok(CampaignReport {
        analysis,
        posts: wizard.posts().borrow().clone(),
        exported,
        scheduled,
    })
}

/// Write every rendered image to `<dir>/<post-id>.<ext>`.
///
/// # Errors
///
/// Fails when the directory cannot be created, an image does not decode, or
/// a file cannot be written.
pub fn export_images(posts: &PostCollection, dir: &Path) -> NexusResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    })?;

    let mut written = Vec::new();
    for post in posts {
        let Some(image) = post.image() else {
            continue;
        };
        let bytes = image.decode().map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidImage(format!("post {}: {}", post.id(), e)))
        })?;
        let path = dir.join(format!("{}.{}", post.id(), image.extension()));
        std::fs::write(&path, bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
        })?;
        written.push(path);
    }
    Ok(written)
}
