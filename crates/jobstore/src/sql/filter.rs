//! Conditional WHERE-clause composition for filtered search.
//!
//! [`FilterBuilder`] accumulates predicates for criteria that were actually
//! supplied; the parameter indices are computed as predicates are appended,
//! never by string replacement, and values are never interpolated into the
//! statement text.

use crate::sql::param::ParamList;
use tokio_postgres::types::ToSql;

/// Accumulator for a base selection statement plus optional predicates.
///
/// # Example
/// ```ignore
/// let mut qb = FilterBuilder::new("SELECT id, title FROM jobs");
/// if let Some(title) = &filter.title_like {
///     qb.ilike_contains("title", title);
/// }
/// let (sql, params) = qb.finish("title");
/// ```
#[must_use]
#[derive(Debug, Default)]
pub struct FilterBuilder {
    base: String,
    predicates: Vec<String>,
    params: ParamList,
}

impl FilterBuilder {
    /// Create a builder over a base selection statement.
    pub fn new(base_select: impl Into<String>) -> Self {
        Self {
            base: base_select.into(),
            predicates: Vec::new(),
            params: ParamList::new(),
        }
    }

    /// Append a case-insensitive partial-match predicate: `column ILIKE $n`.
    ///
    /// The `%` wildcards are applied here, so callers bind the raw needle.
    pub fn ilike_contains(&mut self, column: &str, needle: &str) -> &mut Self {
        let idx = self.params.push(format!("%{needle}%"));
        self.predicates.push(format!("{column} ILIKE ${idx}"));
        self
    }

    /// Append a minimum-bound predicate: `column >= $n`.
    pub fn gte<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) -> &mut Self {
        let idx = self.params.push(value);
        self.predicates.push(format!("{column} >= ${idx}"));
        self
    }

    /// Append a maximum-bound predicate: `column <= $n`.
    pub fn lte<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) -> &mut Self {
        let idx = self.params.push(value);
        self.predicates.push(format!("{column} <= ${idx}"));
        self
    }

    /// Append a fixed predicate with no bound value, e.g. `equity > 0`.
    pub fn raw(&mut self, predicate: &str) -> &mut Self {
        self.predicates.push(predicate.to_string());
        self
    }

    /// Render the statement and bound values.
    ///
    /// With zero predicates the base statement is returned unchanged (no
    /// `WHERE`, no trailing `AND`); otherwise the predicates are joined with
    /// `" AND "` behind a single `WHERE`. The deterministic `ORDER BY` is
    /// appended unconditionally.
    pub fn finish(self, order_by: &str) -> (String, ParamList) {
        let mut sql = self.base;
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
        (sql, self.params)
    }
}
