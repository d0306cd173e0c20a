//! Parsing of a single catalog entry.
//!
//! An entry is a markdown file describing one game:
//!
//! ```text
//! # Lincity
//!
//! _City simulation game._
//!
//! - Home: http://lincity.sourceforge.net/
//! - State: mature, inactive since 2005
//! - Code language: C
//! - Code license: GPL-2.0
//!
//! ## Building
//!
//! - Build system: Autoconf
//! ```
//!
//! The first line carries the title. Every `- <name>: <value>` line is a
//! metadata field; values are split on `,` after parenthesised remarks are
//! dropped, so `GPL-2.0 (with exceptions), MIT` yields `["GPL-2.0", "MIT"]`.

mod validate;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub use validate::{ESSENTIAL_FIELDS, EntryIssue};

/// Field lines, anywhere in the entry: `- <name>: <value>`.
static FIELD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (.*?): (.*)$").expect("field regex should compile"));

/// Parenthesised remarks removed before splitting values.
static PARENTHESISED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthesis regex should compile"));

/// Prefix of the state value marking an abandoned project.
pub const INACTIVE_PREFIX: &str = "inactive since";

/// The text after `inactive since`, trimmed; `None` for other state values.
pub(crate) fn inactive_remainder(value: &str) -> Option<&str> {
    value.strip_prefix(INACTIVE_PREFIX).map(str::trim)
}

/// Errors that make an entry unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// The text does not start with a `# ` title line.
    #[error("entry does not start with a '# ' title line")]
    MissingTitle,

    /// The title line is present but empty.
    #[error("entry title is empty")]
    EmptyTitle,
}

/// One metadata field of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Lower-cased field name, e.g. `code license`.
    pub name: String,
    /// The value exactly as written after `: `.
    pub raw: String,
    /// The value split into its comma-separated parts.
    pub values: Vec<String>,
}

/// A parsed catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    title: String,
    fields: Vec<Field>,
    issues: Vec<EntryIssue>,
}

/// Parse the text of an entry file.
///
/// Only a missing title is fatal. Everything else that is wrong with the
/// entry is recorded in [`Entry::issues`].
pub fn parse_entry(text: &str) -> Result<Entry, EntryError> {
    let first_line = text.lines().next().unwrap_or_default();
    let title = first_line
        .strip_prefix("# ")
        .ok_or(EntryError::MissingTitle)?
        .trim_end();
    if title.is_empty() {
        return Err(EntryError::EmptyTitle);
    }

    let mut fields: Vec<Field> = Vec::new();
    let mut issues = Vec::new();

    for caps in FIELD_LINE.captures_iter(text) {
        let name = caps[1].trim().to_lowercase();
        let raw = caps[2].trim_end_matches('\r').to_string();

        if fields.iter().any(|f| f.name == name) {
            if !issues.contains(&EntryIssue::DuplicateField(name.clone())) {
                issues.push(EntryIssue::DuplicateField(name));
            }
            continue;
        }

        let values = split_values(&raw);
        fields.push(Field { name, raw, values });
    }

    let mut entry = Entry {
        title: title.to_string(),
        fields,
        issues,
    };
    let found = validate::validate(&entry);
    entry.issues.extend(found);

    Ok(entry)
}

/// Drop parenthesised remarks, split on `,` and trim.
pub fn split_values(raw: &str) -> Vec<String> {
    PARENTHESISED
        .replace_all(raw, "")
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

impl Entry {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Problems found while parsing, in the order they were detected.
    pub fn issues(&self) -> &[EntryIssue] {
        &self.issues
    }

    /// Look up a field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.raw.as_str())
    }

    /// The split values of a field, empty if the field is absent.
    pub fn values(&self, name: &str) -> &[String] {
        self.field(name).map(|f| f.values.as_slice()).unwrap_or(&[])
    }

    pub fn state(&self) -> &[String] {
        self.values("state")
    }

    pub fn is_beta(&self) -> bool {
        self.state().iter().any(|v| v == "beta")
    }

    pub fn is_mature(&self) -> bool {
        self.state().iter().any(|v| v == "mature")
    }

    /// Year from an `inactive since <year>` state value.
    pub fn inactive_since(&self) -> Option<i32> {
        self.state()
            .iter()
            .find_map(|v| inactive_remainder(v))
            .and_then(|year| year.parse().ok())
    }

    /// Languages from `code language`, or the older `language` field.
    pub fn languages(&self) -> Option<&[String]> {
        self.field("code language")
            .or_else(|| self.field("language"))
            .map(|f| f.values.as_slice())
    }

    /// Licenses from `code license`, or the older `license` field.
    pub fn licenses(&self) -> Option<&[String]> {
        self.field("code license")
            .or_else(|| self.field("license"))
            .map(|f| f.values.as_slice())
    }

    pub fn download(&self) -> Option<&str> {
        self.values("download").first().map(String::as_str)
    }

    /// Short summary shown after the title in a category TOC:
    /// languages, licenses and state joined by `, `.
    pub fn overview(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.languages().unwrap_or_default().iter().map(String::as_str));
        parts.extend(self.licenses().unwrap_or_default().iter().map(String::as_str));
        parts.extend(self.state().iter().map(String::as_str));
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINCITY: &str = "# Lincity

_City simulation game._

- Home: http://lincity.sourceforge.net/, https://sourceforge.net/projects/lincity/
- State: mature, inactive since 2005
- Keywords: simulation, city building (classic)
- Code repository: https://sourceforge.net/p/lincity/code/HEAD/tree/
- Code language: C
- Code license: GPL-2.0
- Download: https://sourceforge.net/projects/lincity/files/

## Building

- Build system: Autoconf
";

    #[test]
    fn parses_title_and_fields() {
        let entry = parse_entry(LINCITY).unwrap();

        assert_eq!(entry.title(), "Lincity");
        assert_eq!(entry.fields().len(), 8);
        assert_eq!(
            entry.values("home"),
            &[
                "http://lincity.sourceforge.net/".to_string(),
                "https://sourceforge.net/projects/lincity/".to_string()
            ]
        );
        assert_eq!(entry.values("build system"), &["Autoconf".to_string()]);
        assert!(entry.issues().is_empty());
    }

    #[test]
    fn field_lookup_ignores_case() {
        let entry = parse_entry(LINCITY).unwrap();
        assert!(entry.has("Code License"));
        assert_eq!(entry.raw("CODE LANGUAGE"), Some("C"));
    }

    #[test]
    fn parenthesised_remarks_are_dropped() {
        let entry = parse_entry(LINCITY).unwrap();
        assert_eq!(
            entry.values("keywords"),
            &["simulation".to_string(), "city building".to_string()]
        );
        assert_eq!(
            entry.raw("keywords"),
            Some("simulation, city building (classic)")
        );
    }

    #[test]
    fn split_values_skips_empty_parts() {
        assert_eq!(split_values("a, , b,"), vec!["a", "b"]);
        assert!(split_values("(only a remark)").is_empty());
    }

    #[test]
    fn state_accessors() {
        let entry = parse_entry(LINCITY).unwrap();
        assert!(entry.is_mature());
        assert!(!entry.is_beta());
        assert_eq!(entry.inactive_since(), Some(2005));
    }

    #[test]
    fn overview_joins_language_license_and_state() {
        let entry = parse_entry(LINCITY).unwrap();
        assert_eq!(entry.overview(), "C, GPL-2.0, mature, inactive since 2005");
    }

    #[test]
    fn legacy_language_and_license_fields() {
        let text = "# Old\n\n- Home: x\n- State: beta\n- Language: Java, Lua\n- License: MIT\n";
        let entry = parse_entry(text).unwrap();
        assert_eq!(
            entry.languages(),
            Some(["Java".to_string(), "Lua".to_string()].as_slice())
        );
        assert_eq!(entry.licenses(), Some(["MIT".to_string()].as_slice()));
        assert_eq!(entry.download(), None);
    }

    #[test]
    fn missing_title_is_an_error() {
        assert_eq!(
            parse_entry("Lincity\n- Home: x\n").unwrap_err(),
            EntryError::MissingTitle
        );
        assert_eq!(parse_entry("").unwrap_err(), EntryError::MissingTitle);
        assert_eq!(parse_entry("# \n").unwrap_err(), EntryError::EmptyTitle);
    }

    #[test]
    fn duplicate_field_keeps_first_value() {
        let text = "# Dup\n\n- Home: a\n- State: beta\n- Home: b\n- Home: c\n";
        let entry = parse_entry(text).unwrap();

        assert_eq!(entry.raw("home"), Some("a"));
        assert_eq!(
            entry.issues(),
            &[EntryIssue::DuplicateField("home".to_string())]
        );
    }

    #[test]
    fn crlf_line_endings() {
        let text = "# Windows\r\n\r\n- Home: a\r\n- State: beta\r\n";
        let entry = parse_entry(text).unwrap();
        assert_eq!(entry.title(), "Windows");
        assert_eq!(entry.raw("home"), Some("a"));
        assert!(entry.issues().is_empty());
    }
}
