//! In-memory integration tests for task creation, lookup, and search.

use super::helpers::{Marketplace, chicago_loop, marketplace, task_draft};
use rstest::rstest;
use taskmarket::task::{
    domain::{
        CurrencyCode, GeoPoint, SearchRadius, TaskEquality, TaskId, TaskPredicate, TaskRange,
    },
    ports::TaskRepositoryError,
    services::TaskServiceError,
};
use taskmarket::user::UserId;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips_through_lookup(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let draft = task_draft("moving", "Carry boxes upstairs", 8_000, 41.8800, -87.6300)?;

    let created = marketplace
        .tasks
        .create_task(marketplace.poster, draft.clone())
        .await?;
    let fetched = marketplace.tasks.get_task(created.id()).await?;

    eyre::ensure!(created.draft() == &draft, "input fields must be preserved");
    eyre::ensure!(created.owner() == marketplace.poster, "owner mismatch");
    eyre::ensure!(fetched.as_ref() == Some(&created), "lookup must match created task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_increase_with_each_task(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let first = marketplace
        .tasks
        .create_task(
            marketplace.poster,
            task_draft("moving", "First", 100, 41.88, -87.63)?,
        )
        .await?;
    let second = marketplace
        .tasks
        .create_task(
            marketplace.poster,
            task_draft("moving", "Second", 100, 41.88, -87.63)?,
        )
        .await?;

    eyre::ensure!(first.id() < second.id(), "identifiers must increase");
    eyre::ensure!(
        first.created_at() <= second.created_at(),
        "timestamps must not go backwards"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_lookup_returns_none(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let fetched = marketplace.tasks.get_task(TaskId::new(9_999)).await?;
    eyre::ensure!(fetched.is_none(), "expected no task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_for_unregistered_owner_is_rejected(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let result = marketplace
        .tasks
        .create_task(UserId::new(), task_draft("moving", "Orphan", 1, 41.88, -87.63)?)
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskServiceError::Repository(TaskRepositoryError::UnknownOwner(_)))
        ),
        "expected unknown owner, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn predicates_narrow_a_radius_search(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let service = &marketplace.tasks;
    let cheap = service
        .create_task(
            marketplace.poster,
            task_draft("cleaning", "Sweep a porch", 1_500, 41.8827, -87.6233)?,
        )
        .await?;
    let pricey = service
        .create_task(
            marketplace.poster,
            task_draft("cleaning", "Deep clean a flat", 25_000, 41.8925, -87.6341)?,
        )
        .await?;
    service
        .create_task(
            marketplace.helper,
            task_draft("moving", "Lift a piano", 30_000, 41.8790, -87.6350)?,
        )
        .await?;

    let radius = SearchRadius::from_miles(10.0)?;
    let found = service
        .search_near(chicago_loop()?, radius)
        .with_predicate(TaskEquality::TaskType(
            taskmarket::task::domain::TaskType::new("cleaning")?,
        ))
        .with_predicate(TaskRange::amount(Some(10_000), None)?)
        .with_predicate(TaskEquality::Owner(marketplace.poster))
        .find()
        .await?;

    let ids: Vec<TaskId> = found.iter().map(|hit| hit.task.id()).collect();
    eyre::ensure!(ids == vec![pricey.id()], "unexpected matches: {ids:?}");
    eyre::ensure!(!ids.contains(&cheap.id()), "amount filter ignored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn secondary_radius_and_currency_filters_apply(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let service = &marketplace.tasks;
    let north = service
        .create_task(
            marketplace.poster,
            task_draft("errand", "Lincoln Park pickup", 2_000, 41.9214, -87.6513)?,
        )
        .await?;
    service
        .create_task(
            marketplace.poster,
            task_draft("errand", "Hyde Park pickup", 2_000, 41.7943, -87.5907)?,
        )
        .await?;

    let found = service
        .search_near(chicago_loop()?, SearchRadius::from_miles(15.0)?)
        .with_predicate(TaskPredicate::WithinRadius {
            centre: GeoPoint::new(41.9300, -87.6400)?,
            radius: SearchRadius::from_miles(2.0)?,
        })
        .with_predicate(TaskEquality::Currency(CurrencyCode::new("USD")?))
        .find()
        .await?;

    let ids: Vec<TaskId> = found.iter().map(|hit| hit.task.id()).collect();
    eyre::ensure!(ids == vec![north.id()], "unexpected matches: {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_exactly_on_the_radius_is_excluded(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let origin = chicago_loop()?;
    let target = GeoPoint::new(41.9000, -87.6298)?;
    let created = marketplace
        .tasks
        .create_task(
            marketplace.poster,
            task_draft("errand", "On the edge", 500, target.latitude(), target.longitude())?,
        )
        .await?;

    let exact = SearchRadius::from_miles(origin.distance_miles(target))?;
    let on_edge = marketplace.tasks.search_near(origin, exact).find().await?;
    let wider = SearchRadius::from_miles(origin.distance_miles(target) + 0.01)?;
    let inside = marketplace.tasks.search_near(origin, wider).find().await?;

    eyre::ensure!(on_edge.is_empty(), "task on the boundary must be excluded");
    eyre::ensure!(
        inside.iter().any(|hit| hit.task.id() == created.id()),
        "task inside a wider radius must be found"
    );
    Ok(())
}
