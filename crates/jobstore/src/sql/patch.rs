//! Partial-update SET clause construction.
//!
//! A [`Patch`] is an explicit ordered list of (field, value) pairs, so
//! placeholder numbering depends only on the order fields were added, never
//! on ambient map-iteration semantics.

use crate::error::{StoreError, StoreResult};
use crate::sql::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Field name -> storage column translations for one entity.
///
/// Fields absent from the map use their own name unchanged. Entries for
/// fields not present in a patch are ignored.
pub type ColumnAliases = [(&'static str, &'static str)];

/// An ordered, sparse set of field changes for a partial update.
///
/// # Example
/// ```ignore
/// let set = Patch::new()
///     .set("name", "Acme")
///     .set("numEmployees", 12i32)
///     .build(&[("numEmployees", "num_employees")])?;
/// assert_eq!(set.clause(), "name = $1, num_employees = $2");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Patch {
    fields: Vec<(String, Param)>,
}

impl Patch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field change. Fields are rendered in insertion order.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.fields.push((field.to_string(), Param::new(value)));
        self
    }

    /// Add a field change if the value is present (None => skip).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// Number of field changes in this patch.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the patch holds no field changes.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the `SET` clause and bound values.
    ///
    /// Placeholders are numbered from `$1` in insertion order. Field names
    /// present in `aliases` are rewritten to their storage column; all other
    /// fields pass through unchanged (callers supply pre-validated,
    /// whitelisted field sets).
    ///
    /// An empty patch is a caller error and fails with
    /// [`StoreError::InvalidArgument`] before any SQL is assembled.
    pub fn build(&self, aliases: &ColumnAliases) -> StoreResult<SetClause> {
        if self.fields.is_empty() {
            return Err(StoreError::invalid_argument("no data"));
        }

        let mut params = ParamList::new();
        let mut fragments = Vec::with_capacity(self.fields.len());
        for (field, value) in &self.fields {
            let column = aliases
                .iter()
                .find(|(from, _)| *from == field.as_str())
                .map(|(_, to)| *to)
                .unwrap_or(field.as_str());
            let idx = params.push_param(value.clone());
            fragments.push(format!("{column} = ${idx}"));
        }

        Ok(SetClause {
            clause: fragments.join(", "),
            params,
        })
    }
}

/// The rendered `SET` clause of a partial update.
///
/// The clause text and the value list are the same length by construction;
/// [`SetClause::next_index`] lets callers continue the numbering for
/// trailing predicates (e.g. the `WHERE key = $n` of an update statement).
#[derive(Clone, Debug)]
pub struct SetClause {
    clause: String,
    params: ParamList,
}

impl SetClause {
    /// The comma-joined `column = $n` fragments.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// The bound values, in placeholder order.
    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// The next free 1-based placeholder index.
    pub fn next_index(&self) -> usize {
        self.params.len() + 1
    }

    /// Consume the clause, keeping the bound values.
    pub fn into_params(self) -> ParamList {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ALIASES: &ColumnAliases = &[];

    #[test]
    fn set_clause_numbers_placeholders_in_insertion_order() {
        let set = Patch::new()
            .set("title", "Engineer")
            .set("salary", 100i32)
            .build(NO_ALIASES)
            .unwrap();
        assert_eq!(set.clause(), "title = $1, salary = $2");
        assert_eq!(set.params().len(), 2);
    }

    #[test]
    fn aliased_field_uses_storage_column() {
        let set = Patch::new()
            .set("name", "Acme")
            .set("numEmployees", 12i32)
            .set("logoUrl", "http://a.example/logo.png")
            .build(&[
                ("numEmployees", "num_employees"),
                ("logoUrl", "logo_url"),
            ])
            .unwrap();
        assert_eq!(
            set.clause(),
            "name = $1, num_employees = $2, logo_url = $3"
        );
    }

    #[test]
    fn alias_for_absent_field_is_ignored() {
        let set = Patch::new()
            .set("name", "Acme")
            .build(&[("numEmployees", "num_employees")])
            .unwrap();
        assert_eq!(set.clause(), "name = $1");
        assert_eq!(set.params().len(), 1);
    }

    #[test]
    fn empty_patch_fails_with_invalid_argument() {
        let err = Patch::new().build(NO_ALIASES).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Invalid argument: no data");
    }

    #[test]
    fn set_opt_skips_absent_values() {
        let set = Patch::new()
            .set_opt("name", Some("Acme"))
            .set_opt::<i32>("numEmployees", None)
            .set_opt("description", Some("widgets"))
            .build(NO_ALIASES)
            .unwrap();
        assert_eq!(set.clause(), "name = $1, description = $2");
    }

    #[test]
    fn next_index_continues_numbering() {
        let set = Patch::new()
            .set("name", "Acme")
            .set("description", "widgets")
            .build(NO_ALIASES)
            .unwrap();
        assert_eq!(set.next_index(), 3);
    }
}
