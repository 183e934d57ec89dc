//! Compiles [`TaskQuery`] values into a parameterized geo-search statement.
//!
//! The base statement binds the origin latitude, longitude and latitude
//! again as `$1`-`$3` and the exclusive radius as `$4`. Each extra
//! predicate appends an `AND` clause whose placeholders continue from `$5`
//! in bind order, so placeholder numbering never has to be tracked by hand.

use crate::task::domain::{
    EARTH_RADIUS_MILES, GeoPoint, SEARCH_RESULT_LIMIT, SearchRadius, TaskEquality,
    TaskPredicate, TaskQuery, TaskRange,
};
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Double, Text, Timestamptz};

/// A value bound to one positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum SearchBind {
    Double(f64),
    BigInt(i64),
    Text(String),
    Uuid(uuid::Uuid),
    Timestamptz(DateTime<Utc>),
}

/// Statement text with its binds in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SearchStatement {
    pub sql: String,
    pub binds: Vec<SearchBind>,
}

impl SearchStatement {
    /// Attaches every bind to a boxed Diesel query.
    pub fn into_query(self) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
        let Self { sql, binds } = self;
        binds
            .into_iter()
            .fold(diesel::sql_query(sql).into_boxed(), |query, bind| match bind {
                SearchBind::Double(value) => query.bind::<Double, _>(value),
                SearchBind::BigInt(value) => query.bind::<BigInt, _>(value),
                SearchBind::Text(value) => query.bind::<Text, _>(value),
                SearchBind::Uuid(value) => query.bind::<diesel::sql_types::Uuid, _>(value),
                SearchBind::Timestamptz(value) => query.bind::<Timestamptz, _>(value),
            })
    }
}

#[derive(Debug, Default)]
struct PlaceholderWriter {
    binds: Vec<SearchBind>,
    clauses: Vec<String>,
}

impl PlaceholderWriter {
    /// Records a bind and returns its `$n` placeholder.
    fn bind(&mut self, value: SearchBind) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }

    fn and(&mut self, clause: String) {
        self.clauses.push(format!("AND {clause}"));
    }

    /// Binds `centre` and `radius` and returns `(distance_expr, radius_placeholder)`.
    fn distance_from(&mut self, centre: GeoPoint, radius: SearchRadius) -> (String, String) {
        let latitude = self.bind(SearchBind::Double(centre.latitude()));
        let longitude = self.bind(SearchBind::Double(centre.longitude()));
        let latitude_again = self.bind(SearchBind::Double(centre.latitude()));
        let threshold = self.bind(SearchBind::Double(radius.miles()));
        let expression = format!(
            "({EARTH_RADIUS_MILES:?} * acos(LEAST(1.0, GREATEST(-1.0, \
             cos(radians({latitude})) * cos(radians(lat)) * cos(radians(long) - radians({longitude})) \
             + sin(radians({latitude_again})) * sin(radians(lat))))))"
        );
        (expression, threshold)
    }

    fn predicate(&mut self, predicate: &TaskPredicate) {
        match predicate {
            TaskPredicate::Equals(equality) => self.equality(equality),
            TaskPredicate::Range(range) => self.range(range),
            TaskPredicate::WithinRadius { centre, radius } => {
                let (distance, threshold) = self.distance_from(*centre, *radius);
                self.and(format!("{distance} < {threshold}"));
            }
        }
    }

    fn equality(&mut self, equality: &TaskEquality) {
        let (column, value) = match equality {
            TaskEquality::TaskType(task_type) => {
                ("task_type", SearchBind::Text(task_type.as_str().to_owned()))
            }
            TaskEquality::Currency(currency) => {
                ("currency", SearchBind::Text(currency.as_str().to_owned()))
            }
            TaskEquality::Owner(owner) => ("user_id", SearchBind::Uuid(owner.into_inner())),
        };
        let placeholder = self.bind(value);
        self.and(format!("{column} = {placeholder}"));
    }

    fn range(&mut self, range: &TaskRange) {
        let (column, lower, upper) = match range {
            TaskRange::Amount { min, max } => (
                "amount",
                min.map(SearchBind::BigInt),
                max.map(SearchBind::BigInt),
            ),
            TaskRange::CreatedAt { from, to } => (
                "created_date",
                from.map(SearchBind::Timestamptz),
                to.map(SearchBind::Timestamptz),
            ),
        };
        if let Some(value) = lower {
            let placeholder = self.bind(value);
            self.and(format!("{column} >= {placeholder}"));
        }
        if let Some(value) = upper {
            let placeholder = self.bind(value);
            self.and(format!("{column} <= {placeholder}"));
        }
    }
}

/// Builds the search statement for `query`.
pub(super) fn compile(query: &TaskQuery) -> SearchStatement {
    let mut writer = PlaceholderWriter::default();
    let (distance, threshold) = writer.distance_from(query.origin(), query.radius());
    for predicate in query.predicates() {
        writer.predicate(predicate);
    }

    let mut sql = format!(
        "SELECT * FROM (SELECT task.*, {distance} AS distance FROM task) AS nearby \
         WHERE distance < {threshold}"
    );
    for clause in &writer.clauses {
        sql.push(' ');
        sql.push_str(clause);
    }
    sql.push_str(&format!(
        " ORDER BY distance, task_id LIMIT {SEARCH_RESULT_LIMIT}"
    ));

    SearchStatement {
        sql,
        binds: writer.binds,
    }
}
