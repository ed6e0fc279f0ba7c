//! Display-SQL synthesis. Nothing here is ever executed; the strings mirror
//! the statement a user action corresponds to, for the display panel and the
//! audit log.

mod display;

pub use display::*;
