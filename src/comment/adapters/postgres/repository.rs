//! `PostgreSQL` repository implementation for task comments.

use super::{
    models::{CommentRecordRow, GeneratedCommentId},
    schema::comments,
};
use crate::comment::{
    domain::{Comment, CommentId, CommentRecord, NewComment},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::task::domain::TaskId;
use crate::user::schema::users;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Text, Timestamptz};

/// `PostgreSQL` connection pool type used by comment adapters.
pub type CommentPgPool = Pool<ConnectionManager<PgConnection>>;

/// Inserts a top-level comment. Binds exactly four parameters.
const INSERT_COMMENT_SQL: &str = concat!(
    "INSERT INTO comments (user_id, task_id, comment_text, created_date) ",
    "VALUES ($1, $2, $3, $4) ",
    "RETURNING comment_id",
);

/// Inserts a reply only when the parent exists on the same task; otherwise
/// no row is returned.
const INSERT_REPLY_SQL: &str = concat!(
    "INSERT INTO comments (parent_comment_id, user_id, task_id, comment_text, created_date) ",
    "SELECT $1, $2, $3, $4, $5 ",
    "WHERE EXISTS (",
    "SELECT 1 FROM comments parent WHERE parent.comment_id = $1 AND parent.task_id = $3",
    ") ",
    "RETURNING comment_id",
);

const TASK_FOREIGN_KEY: &str = "comments_task_id_fkey";
const AUTHOR_FOREIGN_KEY: &str = "comments_user_id_fkey";

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: CommentPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CommentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: NewComment) -> CommentRepositoryResult<Comment> {
        let insert_comment = comment.clone();

        let generated = self
            .run_blocking(move |connection| {
                let author = insert_comment.author();
                let task_id = insert_comment.task_id();
                let result = match insert_comment.parent() {
                    None => diesel::sql_query(INSERT_COMMENT_SQL)
                        .bind::<diesel::sql_types::Uuid, _>(author.into_inner())
                        .bind::<BigInt, _>(task_id.value())
                        .bind::<Text, _>(insert_comment.message().as_str())
                        .bind::<Timestamptz, _>(insert_comment.created_at())
                        .get_result::<GeneratedCommentId>(connection),
                    Some(parent_id) => diesel::sql_query(INSERT_REPLY_SQL)
                        .bind::<BigInt, _>(parent_id.value())
                        .bind::<diesel::sql_types::Uuid, _>(author.into_inner())
                        .bind::<BigInt, _>(task_id.value())
                        .bind::<Text, _>(insert_comment.message().as_str())
                        .bind::<Timestamptz, _>(insert_comment.created_at())
                        .get_result::<GeneratedCommentId>(connection),
                };
                result
                    .optional()
                    .map_err(|err| map_insert_error(err, &insert_comment))
            })
            .await?;

        match (generated, comment.parent()) {
            (Some(GeneratedCommentId { comment_id }), _) => {
                Ok(comment.into_comment(CommentId::new(comment_id)))
            }
            (None, Some(parent_id)) => Err(CommentRepositoryError::ParentNotFound(parent_id)),
            (None, None) => Err(CommentRepositoryError::MissingGeneratedId),
        }
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<CommentRecord>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .inner_join(users::table.on(users::oid.eq(comments::user_id)))
                .filter(comments::task_id.eq(task_id.value()))
                .order((comments::created_date.asc(), comments::comment_id.asc()))
                .select((
                    comments::comment_id,
                    comments::parent_comment_id,
                    users::first_name,
                    comments::comment_text,
                    comments::created_date,
                ))
                .load::<CommentRecordRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_record).collect())
        })
        .await
    }
}

fn row_to_record(row: CommentRecordRow) -> CommentRecord {
    CommentRecord {
        id: CommentId::new(row.comment_id),
        parent_id: row.parent_comment_id.map(CommentId::new),
        author_name: row.first_name,
        message: row.comment_text,
        created_at: row.created_date,
    }
}

/// Maps foreign-key violations to semantic repository errors.
fn map_insert_error(err: DieselError, comment: &NewComment) -> CommentRepositoryError {
    let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &err else {
        return CommentRepositoryError::persistence(err);
    };
    match info.constraint_name() {
        Some(TASK_FOREIGN_KEY) => CommentRepositoryError::UnknownTask(comment.task_id()),
        Some(AUTHOR_FOREIGN_KEY) => CommentRepositoryError::UnknownAuthor(comment.author()),
        _ => CommentRepositoryError::persistence(err),
    }
}
