//! Repository behavior over a recording stub client, without a database.
//!
//! The stub captures every dispatched statement and its bound-value count,
//! covering the SQL each routine actually sends and the not-found mapping
//! for rows that do not come back.

use std::sync::Mutex;

use jobstore::store::{company, job, CompanyFilter, JobFilter};
use jobstore::{GenericClient, Patch, StoreError, StoreResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Records (statement, bound-value count) pairs and returns no rows.
#[derive(Default)]
struct RecordingClient {
    statements: Mutex<Vec<(String, usize)>>,
}

impl RecordingClient {
    fn last(&self) -> (String, usize) {
        self.statements.lock().unwrap().last().cloned().unwrap()
    }
}

impl GenericClient for RecordingClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        self.statements
            .lock()
            .unwrap()
            .push((sql.to_string(), params.len()));
        Ok(Vec::new())
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<u64> {
        self.statements
            .lock()
            .unwrap()
            .push((sql.to_string(), params.len()));
        Ok(0)
    }
}

#[tokio::test]
async fn find_all_dispatches_composed_statement() {
    let conn = RecordingClient::default();
    let filter = JobFilter {
        min_salary: Some(50_000),
        has_equity: Some(true),
        ..Default::default()
    };
    let jobs = job::find_all(&conn, &filter).await.unwrap();
    assert!(jobs.is_empty());

    let (sql, bound) = conn.last();
    assert_eq!(
        sql,
        "SELECT id, title, salary, equity, company_handle FROM jobs \
         WHERE salary >= $1 AND equity > 0 ORDER BY title"
    );
    assert_eq!(bound, 1);
}

#[tokio::test]
async fn empty_filter_dispatches_without_where() {
    let conn = RecordingClient::default();
    company::find_all(&conn, &CompanyFilter::default()).await.unwrap();

    let (sql, bound) = conn.last();
    assert_eq!(
        sql,
        "SELECT handle, name, description, num_employees, logo_url \
         FROM companies ORDER BY name"
    );
    assert_eq!(bound, 0);
}

#[tokio::test]
async fn update_of_missing_company_is_not_found() {
    let conn = RecordingClient::default();
    let patch = Patch::new().set("numEmployees", 42i32);
    let err = company::update(&conn, "nope", &patch).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    // The statement was still dispatched with the key continuing the numbering.
    let (sql, bound) = conn.last();
    assert_eq!(
        sql,
        "UPDATE companies SET num_employees = $1 WHERE handle = $2 \
         RETURNING handle, name, description, num_employees, logo_url"
    );
    assert_eq!(bound, 2);
}

#[tokio::test]
async fn inconsistent_filter_never_reaches_the_client() {
    let conn = RecordingClient::default();
    let filter = CompanyFilter {
        min_employees: Some(100),
        max_employees: Some(50),
        ..Default::default()
    };
    let err = company::find_all(&conn, &filter).await.unwrap_err();
    assert!(matches!(err, StoreError::BadRequest(_)));
    assert!(conn.statements.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_of_missing_job_is_not_found() {
    let conn = RecordingClient::default();
    let err = job::delete(&conn, 99).await.unwrap_err();
    assert_eq!(err.to_string(), "Not found: No job: 99");
}
