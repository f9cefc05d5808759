//! A unified-diff parser for review tooling.
//!
//! Splits a patch into prologue, per-file sections and epilogue,
//! classifies `---`/`+++` header lines across the CVS, Mercurial and
//! Subversion conventions, and groups each hunk's body into typed,
//! line-numbered runs (context, added, removed, changed) that a
//! renderer or annotation store can key by file, line number and side.
//!
//! This crate only parses already-produced diff text; it computes no
//! diffs and performs no I/O.
//!
//! # Example
//!
//! ```
//! let input = "--- a/x.txt (revision 4)\n\
//!     +++ b/x.txt (working copy)\n\
//!     @@ -1,1 +1,1 @@\n\
//!     -foo\n\
//!     +bar\n";
//!
//! let patch = patch_reader::parse(input).unwrap();
//! let file = &patch.files[0];
//! assert_eq!(file.src.as_ref().unwrap().path.as_deref(), Some("a/x.txt"));
//! assert_eq!(file.hunks[0].runs[0].right[0].text, "bar");
//! ```

mod error;
mod file_header;
mod parse;
mod patch;

pub use error::ParseError;
pub use file_header::{FileHeader, Role};
pub use parse::Parser;
pub use patch::{FileEntry, Hunk, HunkRange, LineRecord, Patch, Run, RunKind};

/// Parses a whole patch buffer in one call.
pub fn parse(input: &str) -> Result<Patch, ParseError> {
    Parser::new(input).parse_patch()
}
