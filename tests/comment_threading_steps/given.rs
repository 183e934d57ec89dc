//! Given steps for comment threading BDD scenarios.

use super::world::{CommentWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskmarket::comment::domain::CommentDraft;
use taskmarket::task::domain::{
    CurrencyCode, GeoPoint, Money, TaskDraft, TaskId, TaskLocation, TaskType,
};

fn post_task(world: &CommentWorld, title: &str) -> Result<TaskId, eyre::Report> {
    let amount = Money::new(3_500, CurrencyCode::new("GBP")?)?;
    let location = TaskLocation::new("Hackney", GeoPoint::new(51.5450, -0.0553)?);
    let draft = TaskDraft::new(TaskType::new("plumbing")?, title, amount, location)?;
    let task = run_async(world.tasks.create_task(world.poster, draft))
        .wrap_err("create task for comment scenario")?;
    Ok(task.id())
}

#[given(r#"a posted task "{title}""#)]
fn posted_task(world: &mut CommentWorld, title: String) -> Result<(), eyre::Report> {
    world.task_id = Some(post_task(world, &title)?);
    Ok(())
}

#[given(r#"a second posted task "{title}""#)]
fn second_posted_task(world: &mut CommentWorld, title: String) -> Result<(), eyre::Report> {
    world.second_task_id = Some(post_task(world, &title)?);
    Ok(())
}

#[given(r#"a top-level comment "{message}" by the helper"#)]
fn top_level_comment(world: &mut CommentWorld, message: String) -> Result<(), eyre::Report> {
    let draft = CommentDraft::new(world.task()?, message)?;
    let comment = run_async(world.comments.post_comment(world.helper, draft))
        .wrap_err("post top-level comment")?;
    world.posted.push(comment);
    Ok(())
}
