//! Dynamic query construction.
//!
//! Two cooperating, stateless builders:
//! - [`Patch`] turns a sparse ordered set of field changes into a
//!   parameterized `SET` clause ([`SetClause`]).
//! - [`FilterBuilder`] turns optional search criteria into a selection
//!   statement with `AND`-joined, positionally-numbered predicates.
//!
//! Both store SQL text and bound values separately; raw values never reach
//! the statement string.

mod filter;
mod param;
mod patch;

pub use filter::FilterBuilder;
pub use param::{Param, ParamList};
pub use patch::{ColumnAliases, Patch, SetClause};
