//! Static mirror of the cricket schema: row types, enumerations, table names.

mod tables;

pub use tables::*;
