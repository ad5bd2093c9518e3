//! Positional parameter storage shared by the SQL builders.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// One bound value, reference-counted so builders stay cheap to clone.
///
/// Statement text only ever refers to parameters through `$n` placeholders;
/// the values themselves live here and are handed to the driver separately.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the value as the trait object the driver executes with.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        // Narrows the bounds from Send + Sync to Sync; the referent is unchanged.
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&"<dyn ToSql>").finish()
    }
}

/// An ordered collection of bound values.
///
/// `push` returns the 1-based placeholder index of the value, which keeps
/// placeholder numbering an explicit function of insertion order.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Bind a value and return its 1-based placeholder index.
    pub fn push<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.params.push(Param::new(value));
        self.params.len()
    }

    /// Bind an already-wrapped value and return its 1-based placeholder index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no values are bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The reference form the driver's query methods take.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_one_based_index() {
        let mut params = ParamList::new();
        assert_eq!(params.push("a"), 1);
        assert_eq!(params.push(2i32), 2);
        assert_eq!(params.push_param(Param::new(true)), 3);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn as_refs_matches_len() {
        let mut params = ParamList::new();
        params.push("x");
        params.push(42i64);
        assert_eq!(params.as_refs().len(), params.len());
    }
}
