//! When steps for comment threading BDD scenarios.

use super::world::{CommentWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskmarket::comment::domain::CommentDraft;
use taskmarket::task::domain::TaskId;
use taskmarket::user::UserId;

fn reply(
    world: &mut CommentWorld,
    author: UserId,
    task_id: TaskId,
    message: String,
    position: usize,
) -> Result<(), eyre::Report> {
    let parent = world.comment_at(position)?.id();
    let draft = CommentDraft::new(task_id, message)?;
    let result = run_async(world.comments.post_reply(author, parent, draft));
    if let Ok(posted) = &result {
        world.posted.push(posted.clone());
    }
    world.last_reply_result = Some(result);
    Ok(())
}

#[when(r#"the poster replies "{message}" to comment {position:usize}"#)]
fn poster_replies(
    world: &mut CommentWorld,
    message: String,
    position: usize,
) -> Result<(), eyre::Report> {
    let (author, task_id) = (world.poster, world.task()?);
    reply(world, author, task_id, message, position)
}

#[when(r#"the helper replies "{message}" to comment {position:usize}"#)]
fn helper_replies(
    world: &mut CommentWorld,
    message: String,
    position: usize,
) -> Result<(), eyre::Report> {
    let (author, task_id) = (world.helper, world.task()?);
    reply(world, author, task_id, message, position)
}

#[when(r#"the poster replies "{message}" to comment {position:usize} on the second task"#)]
fn poster_replies_on_second_task(
    world: &mut CommentWorld,
    message: String,
    position: usize,
) -> Result<(), eyre::Report> {
    let task_id = world
        .second_task_id
        .ok_or_else(|| eyre::eyre!("missing second task in scenario world"))?;
    let author = world.poster;
    reply(world, author, task_id, message, position)
}

#[when("the comments for the task are viewed")]
fn view_comments(world: &mut CommentWorld) -> Result<(), eyre::Report> {
    let threads =
        run_async(world.comments.view_comments(world.task()?)).wrap_err("view comments")?;
    world.threads = Some(threads);
    Ok(())
}
