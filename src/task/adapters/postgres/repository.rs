//! `PostgreSQL` repository implementation for task storage and search.

use super::{
    models::{GeneratedTaskId, NearbyTaskRow, TaskRow},
    schema::task,
    search,
};
use crate::task::{
    domain::{
        CurrencyCode, GeoPoint, Money, NearbyTask, NewTask, PersistedTaskData, Task, TaskDraft,
        TaskDomainError, TaskId, TaskLocation, TaskQuery, TaskType,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::{UserId, schema::users};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Double, Text, Timestamptz};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Inserts a task and returns the generated identifier joined with its owner.
///
/// The join yields no row when the owner is missing, which the caller
/// reports as a missing identifier.
const INSERT_TASK_SQL: &str = concat!(
    "WITH ins AS (",
    "INSERT INTO task ",
    "(task_type, user_id, title, description, must_haves, amount, currency, ",
    "locationstr, lat, long, created_date) ",
    "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) ",
    "RETURNING *",
    ") ",
    "SELECT ins.task_id FROM ins JOIN users ON users.oid = ins.user_id",
);

const OWNER_FOREIGN_KEY: &str = "task_user_id_fkey";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, new_task: NewTask) -> TaskRepositoryResult<Task> {
        let owner = new_task.owner();
        let insert_task = new_task.clone();

        let generated = self
            .run_blocking(move |connection| {
                let draft = insert_task.draft();
                let location = draft.location();
                diesel::sql_query(INSERT_TASK_SQL)
                    .bind::<Text, _>(draft.task_type().as_str())
                    .bind::<diesel::sql_types::Uuid, _>(insert_task.owner().into_inner())
                    .bind::<Text, _>(draft.title())
                    .bind::<Text, _>(draft.description())
                    .bind::<Text, _>(draft.must_haves())
                    .bind::<BigInt, _>(draft.amount().minor_units())
                    .bind::<Text, _>(draft.amount().currency().as_str())
                    .bind::<Text, _>(location.label())
                    .bind::<Double, _>(location.point().latitude())
                    .bind::<Double, _>(location.point().longitude())
                    .bind::<Timestamptz, _>(insert_task.created_at())
                    .get_result::<GeneratedTaskId>(connection)
                    .optional()
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info)
                            if info.constraint_name() == Some(OWNER_FOREIGN_KEY) =>
                        {
                            TaskRepositoryError::UnknownOwner(owner)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })
            })
            .await?;

        let Some(GeneratedTaskId { task_id }) = generated else {
            return Err(TaskRepositoryError::MissingGeneratedId);
        };
        Ok(new_task.into_task(TaskId::new(task_id)))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = task::table
                .inner_join(users::table.on(users::oid.eq(task::user_id)))
                .filter(task::task_id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<NearbyTask>> {
        let statement = search::compile(query);
        tracing::debug!(
            sql = %statement.sql,
            binds = statement.binds.len(),
            "compiled task search statement"
        );

        self.run_blocking(move |connection| {
            let rows = statement
                .into_query()
                .load::<NearbyTaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| {
                    let distance_miles = row.distance;
                    row_to_task(row.task).map(|found| NearbyTask {
                        task: found,
                        distance_miles,
                    })
                })
                .collect()
        })
        .await
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        task_id,
        task_type,
        user_id,
        title,
        description,
        must_haves,
        amount,
        currency,
        locationstr,
        lat,
        long,
        created_date,
    } = row;

    let draft = rebuild_draft(
        &task_type,
        title,
        amount,
        &currency,
        TaskLocationColumns {
            label: locationstr,
            lat,
            long,
        },
    )
    .map_err(TaskRepositoryError::persistence)?
    .with_description(description)
    .with_must_haves(must_haves);

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(task_id),
        owner: UserId::from_uuid(user_id),
        draft,
        created_at: created_date,
    }))
}

struct TaskLocationColumns {
    label: String,
    lat: f64,
    long: f64,
}

fn rebuild_draft(
    task_type: &str,
    title: String,
    amount: i64,
    currency: &str,
    location: TaskLocationColumns,
) -> Result<TaskDraft, TaskDomainError> {
    let money = Money::new(amount, CurrencyCode::new(currency)?)?;
    let point = GeoPoint::new(location.lat, location.long)?;
    TaskDraft::new(
        TaskType::new(task_type)?,
        title,
        money,
        TaskLocation::new(location.label, point),
    )
}
