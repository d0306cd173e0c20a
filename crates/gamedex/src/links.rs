//! External link checking for catalog entries.

mod checker;
mod extract;

pub use checker::{
    BrokenLink, BrokenReason, DEFAULT_USER_AGENT, LinkCheckOptions, LinkProgress,
    LinkProgressCallback, LinkReport, PROGRESS_INTERVAL, check_links,
};
pub use extract::{LinkTarget, collect_link_targets, extract_links};
