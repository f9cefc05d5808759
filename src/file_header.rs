use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

const MARKER_PATTERN: &str = r"^(---|\+\+\+) ";
const CVS_PATTERN: &str =
    r"^(?<path>.*)\t(?<date>\d+ [A-Z][a-z]{2} \d+ (?:\d\d:){2}\d\d [+-]\d{4})(?:\t(?<rev>[\d.]+))?$";
const HG_PATTERN: &str =
    r"^(?:[ab]/)?(?<path>.*)\t(?<date>(?:[A-Z][a-z]{2} ){2}\d\d (?:\d\d:){2}\d\d \d+ [+-]\d{4})$";
const SVN_PATTERN: &str = r"^(?<path>.*?) +\((?<rev>revision \d+|working copy)\)$";

static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(MARKER_PATTERN).unwrap());
static CVS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(CVS_PATTERN).unwrap());
static HG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(HG_PATTERN).unwrap());
static SVN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(SVN_PATTERN).unwrap());

/// Which side of the diff a `---`/`+++` marker line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Removed,
    Added,
}

/// Structured identity of one `---` or `+++` header line.
///
/// The remainder after the marker is matched against the CVS,
/// Mercurial and Subversion conventions, in that order. When none of
/// them applies the remainder is kept verbatim in `opaque` and the
/// structured fields stay empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub raw_line: String,
    pub role: Role,
    pub path: Option<String>,
    pub revision: Option<String>,
    pub timestamp: Option<String>,
    pub opaque: Option<String>,
}

impl FileHeader {
    /// Classifies one marker line. Returns `None` when the line
    /// doesn't even carry a `--- `/`+++ ` marker.
    pub fn classify(line: &str) -> Option<FileHeader> {
        let marker = MARKER_REGEX.captures(line)?;
        let role = match &marker[1] {
            "---" => Role::Removed,
            _ => Role::Added,
        };
        let rest = &line[marker[0].len()..];

        let mut header = FileHeader {
            raw_line: line.to_string(),
            role,
            path: None,
            revision: None,
            timestamp: None,
            opaque: None,
        };

        if let Some(cap) = CVS_REGEX.captures(rest) {
            header.path = Some(cap["path"].to_string());
            header.timestamp = Some(cap["date"].to_string());
            header.revision = Some(
                cap.name("rev")
                    .map(|rev| rev.as_str().to_string())
                    .unwrap_or_else(|| "working copy".to_string()),
            );
        } else if let Some(cap) = HG_REGEX.captures(rest) {
            header.path = Some(cap["path"].to_string());
            header.timestamp = Some(cap["date"].to_string());
        } else if let Some(cap) = SVN_REGEX.captures(rest) {
            header.path = Some(cap["path"].to_string());
            header.revision = Some(cap["rev"].trim_start_matches("revision ").to_string());
        } else {
            log::debug!("No known header convention matches {:?}", rest);
            header.opaque = Some(rest.to_string());
        }

        Some(header)
    }
}

impl Display for FileHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.path, &self.opaque) {
            (Some(path), _) => f.write_str(path),
            (None, Some(opaque)) => f.write_str(opaque),
            (None, None) => Ok(()),
        }
    }
}
