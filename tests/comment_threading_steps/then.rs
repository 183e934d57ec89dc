//! Then steps for comment threading BDD scenarios.

use super::world::CommentWorld;
use rstest_bdd_macros::then;
use taskmarket::comment::{ports::CommentRepositoryError, services::CommentServiceError};

fn thread_count(world: &CommentWorld) -> Result<usize, eyre::Report> {
    world
        .threads
        .as_ref()
        .map(Vec::len)
        .ok_or_else(|| eyre::eyre!("comments have not been viewed"))
}

#[then("there are {count:usize} threads")]
fn there_are_threads(world: &CommentWorld, count: usize) -> Result<(), eyre::Report> {
    let found = thread_count(world)?;
    eyre::ensure!(found == count, "expected {count} threads, found {found}");
    Ok(())
}

#[then("there is {count:usize} thread")]
fn there_is_thread(world: &CommentWorld, count: usize) -> Result<(), eyre::Report> {
    there_are_threads(world, count)
}

#[then("thread {position:usize} has no replies")]
fn thread_has_no_replies(world: &CommentWorld, position: usize) -> Result<(), eyre::Report> {
    let thread = world.thread_at(position)?;
    eyre::ensure!(
        thread.replies.is_empty(),
        "expected no replies, found {}",
        thread.replies.len()
    );
    Ok(())
}

#[then("thread {position:usize} has {count:usize} replies")]
fn thread_has_replies(
    world: &CommentWorld,
    position: usize,
    count: usize,
) -> Result<(), eyre::Report> {
    let thread = world.thread_at(position)?;
    eyre::ensure!(
        thread.replies.len() == count,
        "expected {count} replies, found {}",
        thread.replies.len()
    );
    Ok(())
}

#[then(r#"thread {position:usize} has the reply "{message}" by "{author}""#)]
fn thread_has_reply(
    world: &CommentWorld,
    position: usize,
    message: String,
    author: String,
) -> Result<(), eyre::Report> {
    let thread = world.thread_at(position)?;
    let [reply] = thread.replies.as_slice() else {
        return Err(eyre::eyre!(
            "expected exactly one reply, found {}",
            thread.replies.len()
        ));
    };
    eyre::ensure!(reply.message == message, "unexpected reply text {}", reply.message);
    eyre::ensure!(
        reply.author_name == author,
        "unexpected reply author {}",
        reply.author_name
    );
    Ok(())
}

#[then("the reply is rejected because the parent was not found")]
fn reply_rejected(world: &CommentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_reply_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reply result in scenario world"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(CommentServiceError::Repository(
                CommentRepositoryError::ParentNotFound(_)
            ))
        ),
        "expected parent-not-found error, got {result:?}"
    );
    Ok(())
}
