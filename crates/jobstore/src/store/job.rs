//! Job postings and their data-access routines.

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnAliases, FilterBuilder, ParamList, Patch};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COLUMNS: &str = "id, title, salary, equity, company_handle";

/// External field names whose storage column differs.
const COLUMN_ALIASES: &ColumnAliases = &[("companyHandle", "company_handle")];

/// A job posting belonging to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Input for creating a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// Optional search criteria for jobs.
///
/// Absent fields contribute no predicate; present fields each contribute
/// exactly one, in the fixed order: title, minimum salary, equity flag.
/// `has_equity` at `Some(false)` behaves exactly like `None` and never
/// becomes a bound parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    /// Case-insensitive partial match on the job title.
    pub title_like: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Compose the selection statement and bound values for this filter.
    pub fn to_query(&self) -> StoreResult<(String, ParamList)> {
        let mut qb = FilterBuilder::new(format!("SELECT {COLUMNS} FROM jobs"));
        if let Some(title) = &self.title_like {
            qb.ilike_contains("title", title);
        }
        if let Some(min) = self.min_salary {
            qb.gte("salary", min);
        }
        if self.has_equity == Some(true) {
            qb.raw("equity > 0");
        }
        Ok(qb.finish("title"))
    }
}

/// Create a job. A missing company surfaces as
/// [`StoreError::ForeignKeyViolation`].
pub async fn create(conn: &impl GenericClient, job: &NewJob) -> StoreResult<Job> {
    let sql = format!(
        "INSERT INTO jobs (title, salary, equity, company_handle) \
         VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
    );
    tracing::debug!(tag = "jobs.create", sql = %sql);
    let row = conn
        .query_one(
            &sql,
            &[&job.title, &job.salary, &job.equity, &job.company_handle],
        )
        .await?;
    Job::from_row(&row)
}

/// List jobs matching the filter, ordered by title.
pub async fn find_all(conn: &impl GenericClient, filter: &JobFilter) -> StoreResult<Vec<Job>> {
    let (sql, params) = filter.to_query()?;
    tracing::debug!(tag = "jobs.find_all", sql = %sql);
    let rows = conn.query(&sql, &params.as_refs()).await?;
    rows.iter().map(Job::from_row).collect()
}

/// List a company's jobs, ordered by title.
pub async fn find_by_company(conn: &impl GenericClient, handle: &str) -> StoreResult<Vec<Job>> {
    let sql = format!("SELECT {COLUMNS} FROM jobs WHERE company_handle = $1 ORDER BY title");
    tracing::debug!(tag = "jobs.find_by_company", sql = %sql);
    let rows = conn.query(&sql, &[&handle]).await?;
    rows.iter().map(Job::from_row).collect()
}

/// Fetch a single job by id.
pub async fn get(conn: &impl GenericClient, id: i64) -> StoreResult<Job> {
    let sql = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
    tracing::debug!(tag = "jobs.get", sql = %sql);
    let row = conn
        .query_opt(&sql, &[&id])
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No job: {id}")))?;
    Job::from_row(&row)
}

fn update_sql(id: i64, patch: &Patch) -> StoreResult<(String, ParamList)> {
    let set = patch.build(COLUMN_ALIASES)?;
    let key_idx = set.next_index();
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${key_idx} RETURNING {COLUMNS}",
        set.clause()
    );
    let mut params = set.into_params();
    params.push(id);
    Ok((sql, params))
}

/// Apply a partial update and return the updated job.
///
/// Only the fields present in `patch` change; an empty patch fails with
/// [`StoreError::InvalidArgument`] before any SQL is built.
pub async fn update(conn: &impl GenericClient, id: i64, patch: &Patch) -> StoreResult<Job> {
    let (sql, params) = update_sql(id, patch)?;
    tracing::debug!(tag = "jobs.update", sql = %sql);
    let row = conn
        .query_opt(&sql, &params.as_refs())
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No job: {id}")))?;
    Job::from_row(&row)
}

/// Delete a job by id.
pub async fn delete(conn: &impl GenericClient, id: i64) -> StoreResult<()> {
    let sql = "DELETE FROM jobs WHERE id = $1 RETURNING id";
    tracing::debug!(tag = "jobs.delete", sql = %sql);
    conn.query_opt(sql, &[&id])
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No job: {id}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (sql, params) = JobFilter::default().to_query().unwrap();
        assert_eq!(
            sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn title_filter_binds_wrapped_needle() {
        let filter = JobFilter {
            title_like: Some("eng".into()),
            ..Default::default()
        };
        let (sql, params) = filter.to_query().unwrap();
        assert_eq!(
            sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs \
             WHERE title ILIKE $1 ORDER BY title"
        );
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn equity_flag_adds_fixed_predicate_with_no_binding() {
        let filter = JobFilter {
            min_salary: Some(50_000),
            has_equity: Some(true),
            ..Default::default()
        };
        let (sql, params) = filter.to_query().unwrap();
        assert_eq!(
            sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs \
             WHERE salary >= $1 AND equity > 0 ORDER BY title"
        );
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn equity_flag_false_behaves_like_absent() {
        let filter = JobFilter {
            has_equity: Some(false),
            ..Default::default()
        };
        let (sql, params) = filter.to_query().unwrap();
        assert_eq!(
            sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn all_criteria_compose_in_fixed_order() {
        let filter = JobFilter {
            title_like: Some("dev".into()),
            min_salary: Some(1),
            has_equity: Some(true),
        };
        let (sql, params) = filter.to_query().unwrap();
        assert_eq!(
            sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs \
             WHERE title ILIKE $1 AND salary >= $2 AND equity > 0 ORDER BY title"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn update_sql_aliases_company_handle_and_appends_key() {
        let patch = Patch::new()
            .set("title", "Staff Engineer")
            .set("companyHandle", "acme");
        let (sql, params) = update_sql(7, &patch).unwrap();
        assert_eq!(
            sql,
            "UPDATE jobs SET title = $1, company_handle = $2 WHERE id = $3 \
             RETURNING id, title, salary, equity, company_handle"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn update_sql_rejects_empty_patch() {
        let err = update_sql(7, &Patch::new()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }
}
