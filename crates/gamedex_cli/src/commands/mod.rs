pub(crate) mod links;
pub(crate) mod maintain;
pub(crate) mod meta;
pub(crate) mod report;
pub(crate) mod shared;
