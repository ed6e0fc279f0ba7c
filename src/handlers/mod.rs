//! HTTP handlers, grouped by dashboard page.

pub mod dashboard;
pub mod entities;
pub mod logs;
pub mod queries;
pub mod results;
pub mod routines;
