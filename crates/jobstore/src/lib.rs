//! # jobstore
//!
//! A small PostgreSQL data-access layer for a job board: companies, their
//! job postings, and filtered search over both.
//!
//! ## Features
//!
//! - **Injection-safe by construction**: statement text only ever receives
//!   `$1, $2, ...` placeholders; values travel separately ([`ParamList`])
//! - **Partial updates**: [`Patch`] renders a sparse field set into a
//!   parameterized `SET` clause with deterministic numbering
//! - **Filtered search**: [`FilterBuilder`] appends predicates only for
//!   criteria that were supplied, with a fixed per-entity order
//! - **Transaction-friendly**: pass a transaction anywhere a
//!   [`GenericClient`] is expected
//!
//! ## Example
//!
//! ```ignore
//! use jobstore::store::{company, CompanyFilter};
//! use jobstore::Patch;
//!
//! let pool = jobstore::create_pool("postgres://localhost/jobs")?;
//! let client = pool.get().await?;
//!
//! let filter = CompanyFilter {
//!     name_like: Some("net".into()),
//!     min_employees: Some(10),
//!     ..Default::default()
//! };
//! let companies = company::find_all(&client, &filter).await?;
//!
//! let patch = Patch::new().set("numEmployees", 42i32);
//! let updated = company::update(&client, "acme", &patch).await?;
//! ```

pub mod client;
pub mod error;
pub mod row;
pub mod sql;
pub mod store;

pub use client::GenericClient;
pub use error::{StoreError, StoreResult};
pub use row::{FromRow, RowExt};
pub use sql::{FilterBuilder, Param, ParamList, Patch, SetClause};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
