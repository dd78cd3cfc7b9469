//! Tests for the draft + image fan-out and board reconciliation.

mod test_utils;

use socialnexus_core::{ImageRetryPolicy, PostId, PostStatus, PostType};
use socialnexus_error::{ContentErrorKind, NexusErrorKind, PostErrorKind};
use socialnexus_workflow::{ContentGenerationOrchestrator, render_with_retry};
use std::collections::HashSet;
use std::sync::Arc;
use test_utils::{
    MockGenerator, edited, http_image_error, prompt, rendered, sample_analysis, sample_brand,
};

fn retrying(max_retries: usize) -> ImageRetryPolicy {
    ImageRetryPolicy {
        max_retries,
        initial_backoff_ms: 1,
        max_delay_secs: 1,
    }
}

#[tokio::test]
async fn test_images_land_by_id_in_reverse_completion_order() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::new());
    let gates: Vec<_> = (0..6).map(|i| mock.gate(&prompt(i))).collect();
    let orchestrator = ContentGenerationOrchestrator::new(Arc::clone(&mock), ImageRetryPolicy::none());
    let mut board = orchestrator.subscribe();

    let (brand, analysis) = (sample_brand(), sample_analysis());
    let run = orchestrator.run(&brand, &analysis, PostType::Carousel);

    let driver = async {
        board.wait_for(|posts| posts.len() == 6).await?;

        // Draft phase is visible before any image lands
        let ids: Vec<PostId> = {
            let snapshot = board.borrow_and_update();
            assert!(snapshot.iter().all(|p| p.image().is_none()));
            assert!(snapshot.iter().all(|p| *p.status() == PostStatus::Draft));
            assert!(snapshot.iter().all(|p| *p.post_type() == PostType::Carousel));
            snapshot.iter().map(|p| *p.id()).collect()
        };
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 6);

        for (index, gate) in gates.into_iter().enumerate().rev() {
            let _ = gate.send(());
            let id = ids[index];
            board
                .wait_for(|posts| posts.get(id).is_some_and(|p| p.image().is_some()))
                .await?;
        }
        Ok::<_, anyhow::Error>(ids)
    };

    let (result, ids) = tokio::join!(run, driver);
    let (final_board, ids) = (result?, ids?);

    let expected: Vec<String> = (0..6).rev().map(prompt).collect();
    assert_eq!(mock.completed(), expected);

    // Every post carries its own image, in draft order
    let posts: Vec<_> = final_board.iter().collect();
    for (index, post) in posts.iter().enumerate() {
        assert_eq!(post.id(), &ids[index]);
        assert_eq!(post.image().as_ref(), Some(&rendered(&prompt(index))));
    }
    assert_eq!(final_board.pending_images(), 0);
    assert_eq!(mock.render_calls(), 6);
    Ok(())
}

/// Run one generation, releasing image renders in `order`.
async fn release_in_order(order: &[usize]) -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::new());
    let mut gates: Vec<_> = (0..6).map(|i| Some(mock.gate(&prompt(i)))).collect();
    let orchestrator = ContentGenerationOrchestrator::new(Arc::clone(&mock), ImageRetryPolicy::none());
    let mut board = orchestrator.subscribe();

    let (brand, analysis) = (sample_brand(), sample_analysis());
    let run = orchestrator.run(&brand, &analysis, PostType::Guide);

    let driver = async {
        board.wait_for(|posts| posts.len() == 6).await?;
        let ids: Vec<PostId> = board.borrow_and_update().iter().map(|p| *p.id()).collect();

        for &index in order {
            if let Some(gate) = gates[index].take() {
                let _ = gate.send(());
            }
            let id = ids[index];
            board
                .wait_for(|posts| posts.get(id).is_some_and(|p| p.image().is_some()))
                .await?;
        }
        Ok::<_, anyhow::Error>(ids)
    };

    let (result, ids) = tokio::join!(run, driver);
    let (final_board, ids) = (result?, ids?);

    let expected: Vec<String> = order.iter().map(|&i| prompt(i)).collect();
    assert_eq!(mock.completed(), expected);
    for (index, id) in ids.iter().enumerate() {
        let post = final_board.get(*id).expect("post by id");
        assert_eq!(post.image().as_ref(), Some(&rendered(&prompt(index))));
    }
    assert_eq!(final_board.pending_images(), 0);
    Ok(())
}

#[tokio::test]
async fn test_images_land_by_id_in_any_completion_order() -> anyhow::Result<()> {
    for order in [
        [0, 1, 2, 3, 4, 5],
        [2, 0, 5, 1, 4, 3],
        [5, 3, 1, 0, 2, 4],
        [1, 3, 5, 0, 2, 4],
    ] {
        release_in_order(&order).await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_draft_failure_makes_no_image_calls() {
    let mock = Arc::new(MockGenerator::new().failing_drafts("bad json"));
    let orchestrator = ContentGenerationOrchestrator::new(Arc::clone(&mock), ImageRetryPolicy::none());

    let err = orchestrator
        .run(&sample_brand(), &sample_analysis(), PostType::Guide)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ContentErrorKind::Generation("bad json".into()));
    assert_eq!(mock.render_calls(), 0);
    assert!(orchestrator.snapshot().is_empty());
}

#[tokio::test]
async fn test_failed_image_is_scoped_to_its_post() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::new());
    mock.script(&prompt(2), vec![Err(http_image_error(400))]);
    let orchestrator = ContentGenerationOrchestrator::new(Arc::clone(&mock), ImageRetryPolicy::none());

    let board = orchestrator
        .run(&sample_brand(), &sample_analysis(), PostType::SingleImage)
        .await?;

    let failed = board.iter().nth(2).map(|p| *p.id()).expect("third post");
    assert!(board.get(failed).and_then(|p| p.image().as_ref()).is_none());
    assert!(board.image_failure(failed).is_some());
    assert_eq!(board.iter().filter(|p| p.image().is_some()).count(), 5);
    Ok(())
}

#[tokio::test]
async fn test_edit_replaces_image_by_id() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::new());
    let orchestrator = ContentGenerationOrchestrator::new(Arc::clone(&mock), ImageRetryPolicy::none());
    let board = orchestrator
        .run(&sample_brand(), &sample_analysis(), PostType::Infographic)
        .await?;
    let target = board.iter().nth(1).map(|p| *p.id()).expect("second post");

    let updated = orchestrator.edit_image(target, "make it blue").await?;

    assert_eq!(updated.id(), &target);
    assert_eq!(updated.image().as_ref(), Some(&edited("make it blue")));
    let snapshot = orchestrator.snapshot();
    assert_eq!(snapshot.get(target), Some(&updated));
    // Neighbours are untouched
    let first = snapshot.iter().next().expect("first post");
    assert_eq!(first.image().as_ref(), Some(&rendered(&prompt(0))));
    Ok(())
}

#[tokio::test]
async fn test_edit_without_image_is_rejected_locally() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::new());
    mock.script(&prompt(0), vec![Err(http_image_error(400))]);
    let orchestrator = ContentGenerationOrchestrator::new(Arc::clone(&mock), ImageRetryPolicy::none());
    let board = orchestrator
        .run(&sample_brand(), &sample_analysis(), PostType::Carousel)
        .await?;
    let bare = board.iter().next().map(|p| *p.id()).expect("first post");

    let err = orchestrator.edit_image(bare, "add a sun").await.unwrap_err();
    match err.kind() {
        NexusErrorKind::Post(e) => assert_eq!(e.kind, PostErrorKind::MissingImage(bare.to_string())),
        other => panic!("unexpected error: {}", other),
    }

    let err = orchestrator.edit_image(bare, "   ").await.unwrap_err();
    assert!(matches!(err.kind(), NexusErrorKind::Post(e) if e.kind == PostErrorKind::EmptyEditPrompt));

    let err = orchestrator
        .edit_image(PostId::new(), "add a sun")
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), NexusErrorKind::Post(e) if matches!(e.kind, PostErrorKind::NotFound(_))));

    assert_eq!(mock.edit_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_edit_keeps_image_and_records_failure() -> anyhow::Result<()> {
    let mock = Arc::new(MockGenerator::new().failing_edits(500));
    let orchestrator = ContentGenerationOrchestrator::new(Arc::clone(&mock), ImageRetryPolicy::none());
    let board = orchestrator
        .run(&sample_brand(), &sample_analysis(), PostType::Carousel)
        .await?;
    let id = board.iter().next().map(|p| *p.id()).expect("first post");

    let err = orchestrator.edit_image(id, "add a sun").await.unwrap_err();
    assert!(matches!(err.kind(), NexusErrorKind::Content(e) if matches!(e.kind, ContentErrorKind::Image(_))));

    let snapshot = orchestrator.snapshot();
    assert_eq!(
        snapshot.get(id).and_then(|p| p.image().clone()),
        Some(rendered(&prompt(0)))
    );
    assert!(snapshot.image_failure(id).is_some());
    assert_eq!(mock.edit_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_default_policy_makes_one_attempt() {
    let mock = MockGenerator::new();
    mock.script("p", vec![Err(http_image_error(503))]);

    let result = render_with_retry(&mock, "p", ImageRetryPolicy::default()).await;

    assert!(result.is_err());
    assert_eq!(mock.render_calls(), 1);
}

#[tokio::test]
async fn test_configured_retries_recover_from_transient_failures() -> anyhow::Result<()> {
    let mock = MockGenerator::new();
    mock.script(
        "p",
        vec![Err(http_image_error(503)), Err(http_image_error(429))],
    );

    let image = render_with_retry(&mock, "p", retrying(3)).await?;

    assert_eq!(image, rendered("p"));
    assert_eq!(mock.render_calls(), 3);
    Ok(())
}

#[tokio::test]
async fn test_permanent_failures_are_not_retried() {
    let mock = MockGenerator::new();
    mock.script("p", vec![Err(http_image_error(400))]);

    let result = render_with_retry(&mock, "p", retrying(3)).await;

    assert!(result.is_err());
    assert_eq!(mock.render_calls(), 1);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let mock = MockGenerator::new();
    mock.script(
        "p",
        (0..5).map(|_| Err(http_image_error(503))).collect(),
    );

    let result = render_with_retry(&mock, "p", retrying(2)).await;

    assert!(result.is_err());
    assert_eq!(mock.render_calls(), 3);
}
