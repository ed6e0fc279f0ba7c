//! Domain services: typed data access, audit logging, canned queries,
//! routine simulators, derived results.

pub mod audit;
pub mod crud;
pub mod query;
pub mod results;
pub mod routines;
