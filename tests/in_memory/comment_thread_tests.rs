//! In-memory integration tests for comments, replies, and threaded reads.

use super::helpers::{Marketplace, marketplace, task_draft};
use rstest::rstest;
use taskmarket::comment::{
    domain::CommentDraft, ports::CommentRepositoryError, services::CommentServiceError,
};
use taskmarket::task::domain::TaskId;

async fn post_task(marketplace: &Marketplace, title: &str) -> Result<TaskId, eyre::Report> {
    let task = marketplace
        .tasks
        .create_task(
            marketplace.poster,
            task_draft("handyman", title, 6_000, 41.88, -87.63)?,
        )
        .await?;
    Ok(task.id())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_and_replies_form_one_level_threads(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let task_id = post_task(&marketplace, "Hang three shelves").await?;
    let comments = &marketplace.comments;

    let c1 = comments
        .post_comment(marketplace.helper, CommentDraft::new(task_id, "I have a drill")?)
        .await?;
    let c2 = comments
        .post_comment(marketplace.helper, CommentDraft::new(task_id, "What wall type?")?)
        .await?;
    let r1 = comments
        .post_reply(marketplace.poster, c2.id(), CommentDraft::new(task_id, "Plaster")?)
        .await?;
    let r2 = comments
        .post_reply(
            marketplace.helper,
            r1.id(),
            CommentDraft::new(task_id, "Then I need anchors")?,
        )
        .await?;

    let threads = comments.view_comments(task_id).await?;

    eyre::ensure!(threads.len() == 2, "expected two threads, got {}", threads.len());
    let first = threads.first().ok_or_else(|| eyre::eyre!("missing C1"))?;
    let second = threads.get(1).ok_or_else(|| eyre::eyre!("missing C2"))?;
    eyre::ensure!(first.id == c1.id() && first.replies.is_empty(), "C1 must have no replies");
    eyre::ensure!(second.id == c2.id(), "second thread must be C2");
    let reply_ids: Vec<_> = second.replies.iter().map(|reply| reply.id).collect();
    eyre::ensure!(reply_ids == vec![r1.id(), r2.id()], "replies: {reply_ids:?}");
    let authors: Vec<&str> = second
        .replies
        .iter()
        .map(|reply| reply.author_name.as_str())
        .collect();
    eyre::ensure!(authors == vec!["Margaret", "Alan"], "authors: {authors:?}");
    eyre::ensure!(
        threads
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.created_at <= b.created_at)),
        "threads must be ordered by creation time"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_stay_with_their_task(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let shelves = post_task(&marketplace, "Hang three shelves").await?;
    let sofa = post_task(&marketplace, "Move a sofa").await?;
    marketplace
        .comments
        .post_comment(marketplace.helper, CommentDraft::new(shelves, "Available Sunday")?)
        .await?;

    let threads = marketplace.comments.view_comments(sofa).await?;

    eyre::ensure!(threads.is_empty(), "sofa task must have no comments");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reply_to_missing_parent_is_rejected(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let task_id = post_task(&marketplace, "Hang three shelves").await?;
    let missing = taskmarket::comment::domain::CommentId::new(77);

    let result = marketplace
        .comments
        .post_reply(marketplace.poster, missing, CommentDraft::new(task_id, "Hello?")?)
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(CommentServiceError::Repository(CommentRepositoryError::ParentNotFound(id)))
                if id == missing
        ),
        "expected missing parent, got {result:?}"
    );
    Ok(())
}
