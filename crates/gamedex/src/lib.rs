//! Gamedex - maintenance of a markdown catalog of open source games.
//!
//! Each game is described by one markdown entry inside a category directory.
//! This library parses and validates the entries and regenerates the files
//! derived from them: category tables of contents, the README summary, a
//! statistics page and a JSON export. It can also check the external links
//! of every entry.
//!
//! # Example
//!
//! ```ignore
//! use gamedex::{Catalog, CatalogLayout, maintenance};
//!
//! let catalog = Catalog::load(CatalogLayout::new("."))?;
//! maintenance::update_category_tocs(&catalog)?;
//! maintenance::update_readme(&catalog)?;
//!
//! for finding in maintenance::lint(&catalog) {
//!     println!("{}: {}", finding.file, finding.issue);
//! }
//! ```

pub mod catalog;
pub mod entry;
pub mod http;
pub mod links;
pub mod maintenance;
pub mod rate_limit;
pub mod retry;

pub use catalog::{Catalog, CatalogEntry, CatalogError, CatalogLayout, Category};
pub use entry::{Entry, EntryError, EntryIssue, parse_entry};
pub use http::{HttpError, HttpTransport, LinkRequest};
pub use maintenance::MaintenanceError;
