//! `run` command handler.

use super::research::{print_analysis, progress_printer};
use socialnexus::{
    CampaignPlan, GeminiClient, GeneratedPost, NexusConfig, NexusResult, PostCollection, Wizard,
    load_brand, run_campaign,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

/// Run the whole wizard for one brand and print the results.
pub async fn run_wizard(config: &NexusConfig, brand: &Path, plan: CampaignPlan) -> NexusResult<()> {
    let brand = load_brand(brand)?;
    let client = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let mut wizard = Wizard::new(client, config);

    let board_printer = tokio::spawn(print_board_updates(wizard.posts()));
    let (tx, research_printer) = progress_printer();

    let result = run_campaign(&mut wizard, brand, &plan, Some(tx)).await;
    board_printer.abort();
    let _ = research_printer.await;
    let report = result?;

    print_analysis(&report.analysis);
    println!();
    println!("Posts ({})", plan.post_type);
    for (index, post) in report.posts.iter().enumerate() {
        print_post(index + 1, post, &report.posts);
    }

    if !report.exported.is_empty() {
        println!();
        println!("Exported");
        for path in &report.exported {
            println!("  {}", path.display());
        }
    }

    println!();
    println!("Dashboard");
    if wizard.dashboard().is_empty() {
        println!("  No scheduled posts");
    }
    for post in wizard.dashboard().iter() {
        if let Some(schedule) = post.schedule() {
            println!(
                "  {}  {}  [{}]",
                schedule.at().format("%Y-%m-%d %H:%M UTC"),
                post.content().title(),
                schedule.platforms().join(", ")
            );
        }
    }
    Ok(())
}

async fn print_board_updates(mut board: watch::Receiver<PostCollection>) {
    let mut reported = 0;
    while board.changed().await.is_ok() {
        let (total, done) = {
            let posts = board.borrow_and_update();
            let done = posts.len() - posts.pending_images();
            (posts.len(), done)
        };
        if total > 0 && done != reported {
            eprintln!("Images: {}/{}", done, total);
            reported = done;
        }
    }
}

fn print_post(number: usize, post: &GeneratedPost, board: &PostCollection) {
    let content = post.content();
    println!();
    println!("{}. {}  ({})", number, content.title(), post.id());
    println!("   {}", content.caption());
    println!("   {}", content.hashtags().join(" "));
    println!("   Keywords: {}", content.keywords().join(", "));
    match (post.image(), board.image_failure(*post.id())) {
        (Some(image), _) => println!("   Image: {} ({} base64 chars)", image.mime_type(), image.data().len()),
        (None, Some(reason)) => println!("   Image failed: {}", reason),
        (None, None) => println!("   Image: pending"),
    }
}
