//! # Domain Names
//!
//! A small, owned representation of absolute DNS names as they appear in
//! Chaosnet zones. Labels are stored without the root label and compared
//! case-sensitively unless a method says otherwise.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Longest label allowed on the wire.
pub const MAX_LABEL_LEN: usize = 63;
/// Longest name allowed on the wire, length octets included.
pub const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("empty domain name")]
    Empty,
    #[error("empty label in {0:?}")]
    EmptyLabel(String),
    #[error("label {0:?} is longer than 63 octets")]
    LabelTooLong(String),
    #[error("domain name {0:?} is longer than 255 octets")]
    NameTooLong(String),
    #[error("invalid character {1:?} in {0:?}")]
    InvalidCharacter(String, char),
}

/// An absolute domain name, e.g. `FOO.CHAOSNET.NET.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Builds a name from labels that are known to be valid.
    ///
    /// Only meant for compile-time constants; user input goes through [`FromStr`].
    pub fn from_static(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|label| label.to_string()).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn first_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    /// The immediate parent, or `None` for the root.
    pub fn parent(&self) -> Option<DomainName> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            labels: self.labels[1..].to_vec(),
        })
    }

    /// A single-label name holding only the leftmost label.
    pub fn truncate_to_first_label(&self) -> DomainName {
        Self {
            labels: self.labels.iter().take(1).cloned().collect(),
        }
    }

    pub fn eq_ignore_case(&self, other: &DomainName) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    /// Whether the immediate parent of `self` is `domain`, ignoring case.
    pub fn parent_eq_ignore_case(&self, domain: &DomainName) -> bool {
        self.parent()
            .is_some_and(|parent| parent.eq_ignore_case(domain))
    }

    /// Returns the labels of `self` left of `origin`, if `self` is at or below `origin`.
    pub fn relative_to(&self, origin: &DomainName) -> Option<&[String]> {
        let split: usize = self.labels.len().checked_sub(origin.labels.len())?;
        let suffix: &[String] = &self.labels[split..];
        let matches: bool = suffix
            .iter()
            .zip(&origin.labels)
            .all(|(a, b)| a.eq_ignore_ascii_case(b));
        matches.then(|| &self.labels[..split])
    }

    pub fn to_lowercase(&self) -> DomainName {
        Self {
            labels: self
                .labels
                .iter()
                .map(|label| label.to_ascii_lowercase())
                .collect(),
        }
    }

    /// The presentation form without the trailing root dot, as used in host tables.
    pub fn without_final_dot(&self) -> String {
        self.labels.join(".")
    }

    /// Orders names as if they were written right to left: top-level domain first,
    /// host label last. Case is ignored; the original spelling breaks ties.
    pub fn cmp_reversed(&self, other: &DomainName) -> Ordering {
        let lhs = self.labels.iter().rev().map(|l| l.to_ascii_lowercase());
        let rhs = other.labels.iter().rev().map(|l| l.to_ascii_lowercase());
        lhs.cmp(rhs).then_with(|| self.cmp(other))
    }

    fn wire_len(&self) -> usize {
        self.labels.iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }
}

impl FromStr for DomainName {
    type Err = NameError;

    /// Parses a name in presentation format. A trailing dot is optional; `.` is the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        if s == "." {
            return Ok(Self::root());
        }

        let body: &str = s.strip_suffix('.').unwrap_or(s);
        let mut labels: Vec<String> = Vec::new();
        for label in body.split('.') {
            if label.is_empty() {
                return Err(NameError::EmptyLabel(s.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(NameError::LabelTooLong(label.to_string()));
            }
            if let Some(bad) = label.chars().find(|c| !c.is_ascii_graphic()) {
                return Err(NameError::InvalidCharacter(s.to_string(), bad));
            }
            labels.push(label.to_string());
        }

        let name: DomainName = Self { labels };
        if name.wire_len() > MAX_NAME_LEN {
            return Err(NameError::NameTooLong(s.to_string()));
        }
        Ok(name)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.labels {
            write!(f, "{label}.")?;
        }
        if self.is_root() {
            write!(f, ".")?;
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
