//! Company records and their data-access routines.

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnAliases, FilterBuilder, ParamList, Patch};
use crate::store::job::Job;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// External field names whose storage column differs.
const COLUMN_ALIASES: &ColumnAliases = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

/// A company that posts jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Input for creating a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with its job postings.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

/// Optional search criteria for companies.
///
/// Absent fields contribute no predicate; present fields each contribute
/// exactly one, in the fixed order: name, minimum employees, maximum
/// employees.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyFilter {
    /// Case-insensitive partial match on the company name.
    pub name_like: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Cross-field check; runs before any predicate is appended.
    fn validate(&self) -> StoreResult<()> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(StoreError::bad_request(
                    "Min employees cannot be greater than max",
                ));
            }
        }
        Ok(())
    }

    /// Compose the selection statement and bound values for this filter.
    pub fn to_query(&self) -> StoreResult<(String, ParamList)> {
        self.validate()?;
        let mut qb = FilterBuilder::new(format!("SELECT {COLUMNS} FROM companies"));
        if let Some(name) = &self.name_like {
            qb.ilike_contains("name", name);
        }
        if let Some(min) = self.min_employees {
            qb.gte("num_employees", min);
        }
        if let Some(max) = self.max_employees {
            qb.lte("num_employees", max);
        }
        Ok(qb.finish("name"))
    }
}

/// Create a company. A duplicate handle surfaces as
/// [`StoreError::UniqueViolation`].
pub async fn create(conn: &impl GenericClient, company: &NewCompany) -> StoreResult<Company> {
    let sql = format!(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    );
    tracing::debug!(tag = "companies.create", sql = %sql);
    let row = conn
        .query_one(
            &sql,
            &[
                &company.handle,
                &company.name,
                &company.description,
                &company.num_employees,
                &company.logo_url,
            ],
        )
        .await?;
    Company::from_row(&row)
}

/// List companies matching the filter, ordered by name.
pub async fn find_all(conn: &impl GenericClient, filter: &CompanyFilter) -> StoreResult<Vec<Company>> {
    let (sql, params) = filter.to_query()?;
    tracing::debug!(tag = "companies.find_all", sql = %sql);
    let rows = conn.query(&sql, &params.as_refs()).await?;
    rows.iter().map(Company::from_row).collect()
}

/// Fetch a single company by handle.
pub async fn get(conn: &impl GenericClient, handle: &str) -> StoreResult<Company> {
    let sql = format!("SELECT {COLUMNS} FROM companies WHERE handle = $1");
    tracing::debug!(tag = "companies.get", sql = %sql);
    let row = conn
        .query_opt(&sql, &[&handle])
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No company: {handle}")))?;
    Company::from_row(&row)
}

/// Fetch a company together with its jobs, ordered by title.
pub async fn get_with_jobs(conn: &impl GenericClient, handle: &str) -> StoreResult<CompanyDetail> {
    let company = get(conn, handle).await?;
    let jobs = crate::store::job::find_by_company(conn, handle).await?;
    Ok(CompanyDetail { company, jobs })
}

fn update_sql(handle: &str, patch: &Patch) -> StoreResult<(String, ParamList)> {
    let set = patch.build(COLUMN_ALIASES)?;
    let key_idx = set.next_index();
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${key_idx} RETURNING {COLUMNS}",
        set.clause()
    );
    let mut params = set.into_params();
    params.push(handle.to_string());
    Ok((sql, params))
}

/// Apply a partial update and return the updated company.
///
/// Only the fields present in `patch` change; an empty patch fails with
/// [`StoreError::InvalidArgument`] before any SQL is built.
pub async fn update(conn: &impl GenericClient, handle: &str, patch: &Patch) -> StoreResult<Company> {
    let (sql, params) = update_sql(handle, patch)?;
    tracing::debug!(tag = "companies.update", sql = %sql);
    let row = conn
        .query_opt(&sql, &params.as_refs())
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No company: {handle}")))?;
    Company::from_row(&row)
}

/// Delete a company by handle.
pub async fn delete(conn: &impl GenericClient, handle: &str) -> StoreResult<()> {
    let sql = "DELETE FROM companies WHERE handle = $1 RETURNING handle";
    tracing::debug!(tag = "companies.delete", sql = %sql);
    conn.query_opt(sql, &[&handle])
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No company: {handle}")))?;
    Ok(())
}
