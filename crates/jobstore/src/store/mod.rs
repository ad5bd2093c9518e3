//! Entity repositories: typed models plus the data-access routines that
//! execute the composed statements and map rows back into models.

pub mod company;
pub mod job;

pub use company::{Company, CompanyDetail, CompanyFilter, NewCompany};
pub use job::{Job, JobFilter, NewJob};
