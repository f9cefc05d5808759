use std::fmt::Display;

use crate::file_header::FileHeader;

/// Parse result for a whole patch: raw text before the first file
/// section, the file sections themselves, and raw text after the last
/// hunk of the last file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub prologue: Vec<String>,
    pub files: Vec<FileEntry>,
    pub epilogue: Vec<String>,
}

impl Display for Patch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.prologue {
            writeln!(f, "{}", line)?;
        }
        for file in &self.files {
            f.write_str(&file.to_string())?;
        }
        for line in &self.epilogue {
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

/// One file's diff section. `header` holds the raw lines consumed
/// before the first hunk-range line, including the `---`/`+++` marker
/// lines that `src` and `dest` were classified from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub header: Vec<String>,
    pub src: Option<FileHeader>,
    pub dest: Option<FileHeader>,
    pub hunks: Vec<Hunk>,
}

impl Display for FileEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.header {
            writeln!(f, "{}", line)?;
        }
        for hunk in &self.hunks {
            f.write_str(&hunk.to_string())?;
        }

        Ok(())
    }
}

/// The four numbers of an `@@ -L,C +L,C @@` line. The counts are
/// declared totals that the hunk's runs are expected to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    pub left_start: u32,
    pub left_count: u32,
    pub right_start: u32,
    pub right_count: u32,
}

impl HunkRange {
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.left_start, self.left_count, self.right_start, self.right_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub range: HunkRange,
    pub runs: Vec<Run>,
}

impl Display for Hunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.range.header())?;
        for run in &self.runs {
            f.write_str(&run.to_string())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Context,
    Added,
    Removed,
    Changed,
}

/// A maximal group of consecutive hunk lines sharing one
/// classification. `Added` runs have an empty left side, `Removed`
/// runs an empty right side. A `Changed` run only asserts that a block
/// of removed lines was immediately followed by a block of added lines;
/// no per-line correspondence between the two sides is claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub left: Vec<LineRecord>,
    pub right: Vec<LineRecord>,
}

impl Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            RunKind::Context => {
                for record in &self.left {
                    writeln!(f, " {}", record.text)?;
                }
            }
            RunKind::Added => {
                for record in &self.right {
                    writeln!(f, "+{}", record.text)?;
                }
            }
            RunKind::Removed | RunKind::Changed => {
                for record in &self.left {
                    writeln!(f, "-{}", record.text)?;
                }
                for record in &self.right {
                    writeln!(f, "+{}", record.text)?;
                }
            }
        }

        Ok(())
    }
}

/// One line of hunk body with its marker character stripped, numbered
/// within the side of the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub text: String,
    pub line_number: u32,
}
