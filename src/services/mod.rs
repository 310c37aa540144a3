//! Fixed argument conventions for the two external tools.

mod installer;
mod where_service;

pub use installer::InstallerService;
pub use where_service::{WhereService, filter_args};
