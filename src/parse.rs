use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::file_header::FileHeader;
use crate::patch::{FileEntry, Hunk, HunkRange, LineRecord, Patch, Run, RunKind};

const FILE_START_PATTERN: &str = r"^(?:Index:|(?:\w+ )?diff |---|\+\+\+)";
const HUNK_RANGE_PATTERN: &str =
    r"^@@ -(?<left_start>\d+),(?<left_count>\d+) \+(?<right_start>\d+),(?<right_count>\d+) @@";

static FILE_START_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(FILE_START_PATTERN).unwrap());
static HUNK_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(HUNK_RANGE_PATTERN).unwrap());

const STEPS_PER_LINE: usize = 8;
const STEP_FLOOR: usize = 64;

/// A line-oriented parser over one patch buffer.
///
/// The input is split once up front (`\n` and `\r\n` line endings both
/// accepted); every stored line is rendered back with a trailing `\n`.
/// A step counter bounds total work at a constant multiple of the line
/// count, so a parse over adversarial or truncated input fails with
/// [`ParseError::ParseTimeout`] instead of stalling.
pub struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    steps: usize,
    budget: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let lines: Vec<&str> = input.lines().collect();
        let budget = lines.len() * STEPS_PER_LINE + STEP_FLOOR;

        Self {
            lines,
            pos: 0,
            steps: 0,
            budget,
        }
    }

    /// Parses the whole buffer into a [`Patch`].
    ///
    /// Malformed hunk headers and unrecognized `---`/`+++` conventions
    /// degrade into partial-but-valid structure; only an exhausted
    /// step budget surfaces as an error.
    pub fn parse_patch(&mut self) -> Result<Patch, ParseError> {
        log::debug!("Parsing patch of {} lines", self.lines.len());

        let mut prologue = vec![];
        let mut files = vec![];
        // Stray lines after a file's hunks; they seed the next file's
        // header, or become the epilogue when no further file starts.
        let mut pending: Vec<String> = vec![];

        while let Some(line) = self.peek() {
            self.tick()?;
            if is_file_start(line) {
                break;
            }
            prologue.push(self.take_line());
        }

        while let Some(line) = self.peek() {
            self.tick()?;
            if is_file_start(line) {
                files.push(self.parse_file_entry(std::mem::take(&mut pending))?);
            } else {
                pending.push(self.take_line());
            }
        }

        Ok(Patch {
            prologue,
            files,
            epilogue: pending,
        })
    }

    fn parse_file_entry(&mut self, header_seed: Vec<String>) -> Result<FileEntry, ParseError> {
        let mut entry = FileEntry {
            header: header_seed,
            src: None,
            dest: None,
            hunks: vec![],
        };

        while let Some(line) = self.peek() {
            self.tick()?;
            if line.starts_with("@@") {
                break;
            }
            if line.starts_with("---") {
                entry.src = FileHeader::classify(line);
            } else if line.starts_with("+++") {
                entry.dest = FileHeader::classify(line);
            }
            entry.header.push(self.take_line());
        }

        while self.peek().is_some_and(|line| line.starts_with("@@")) {
            match self.parse_hunk() {
                Ok(hunk) => entry.hunks.push(hunk),
                Err(ParseError::MalformedHunkHeader { line }) => {
                    // The line stays unconsumed for the outer loop to
                    // reinterpret as a file start or epilogue.
                    log::debug!("Giving up on hunk at {:?}", line);
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        log::debug!(
            "Parsed file entry ({} header lines, {} hunks)",
            entry.header.len(),
            entry.hunks.len()
        );
        Ok(entry)
    }

    /// Parses exactly one hunk starting at the current line.
    ///
    /// The current line must match `@@ -L,C +L,C @@` (trailing
    /// annotation text is tolerated and discarded); otherwise it is
    /// left unconsumed and [`ParseError::MalformedHunkHeader`] is
    /// returned. The builder stops early, without error, when the body
    /// ends before the declared counts are consumed.
    pub fn parse_hunk(&mut self) -> Result<Hunk, ParseError> {
        let line = self.peek().unwrap_or_default();
        let Some(cap) = HUNK_RANGE_REGEX.captures(line) else {
            return Err(ParseError::MalformedHunkHeader {
                line: line.to_string(),
            });
        };
        let range = HunkRange {
            left_start: parse_count(&cap["left_start"], line)?,
            left_count: parse_count(&cap["left_count"], line)?,
            right_start: parse_count(&cap["right_start"], line)?,
            right_count: parse_count(&cap["right_count"], line)?,
        };
        // Every line number the hunk can assign must fit in a u32.
        if range.left_start.checked_add(range.left_count).is_none()
            || range.right_start.checked_add(range.right_count).is_none()
        {
            return Err(ParseError::MalformedHunkHeader {
                line: line.to_string(),
            });
        }
        self.pos += 1;

        let mut runs = vec![];
        let mut left_remaining = range.left_count;
        let mut right_remaining = range.right_count;
        let mut left_cursor = range.left_start;
        let mut right_cursor = range.right_start;

        while (left_remaining > 0 || right_remaining > 0) && self.pos < self.lines.len() {
            self.tick()?;
            let run = match self.first_char() {
                Some('-') => {
                    let mut run = Run {
                        kind: RunKind::Removed,
                        left: vec![],
                        right: vec![],
                    };
                    while left_remaining > 0 && self.first_char() == Some('-') {
                        run.left.push(LineRecord {
                            text: self.take_marked_line(),
                            line_number: left_cursor,
                        });
                        left_cursor += 1;
                        left_remaining -= 1;
                    }
                    // Removed lines directly followed by added lines
                    // group into one Changed run.
                    if right_remaining > 0 && self.first_char() == Some('+') {
                        run.kind = RunKind::Changed;
                        while right_remaining > 0 && self.first_char() == Some('+') {
                            run.right.push(LineRecord {
                                text: self.take_marked_line(),
                                line_number: right_cursor,
                            });
                            right_cursor += 1;
                            right_remaining -= 1;
                        }
                    }
                    run
                }
                Some('+') => {
                    let mut run = Run {
                        kind: RunKind::Added,
                        left: vec![],
                        right: vec![],
                    };
                    while right_remaining > 0 && self.first_char() == Some('+') {
                        run.right.push(LineRecord {
                            text: self.take_marked_line(),
                            line_number: right_cursor,
                        });
                        right_cursor += 1;
                        right_remaining -= 1;
                    }
                    run
                }
                Some(' ') => {
                    let mut run = Run {
                        kind: RunKind::Context,
                        left: vec![],
                        right: vec![],
                    };
                    while left_remaining > 0
                        && right_remaining > 0
                        && self.first_char() == Some(' ')
                    {
                        let text = self.take_marked_line();
                        run.left.push(LineRecord {
                            text: text.clone(),
                            line_number: left_cursor,
                        });
                        run.right.push(LineRecord {
                            text,
                            line_number: right_cursor,
                        });
                        left_cursor += 1;
                        right_cursor += 1;
                        left_remaining -= 1;
                        right_remaining -= 1;
                    }
                    run
                }
                // Next range line, file marker, or unmarked text:
                // normal hunk termination.
                _ => break,
            };

            if !run.left.is_empty() || !run.right.is_empty() {
                runs.push(run);
            }
        }

        Ok(Hunk { range, runs })
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn first_char(&self) -> Option<char> {
        self.peek().and_then(|line| line.chars().next())
    }

    fn take_line(&mut self) -> String {
        let line = self.lines[self.pos];
        self.pos += 1;
        line.to_string()
    }

    /// Consumes the current line with its one-character marker
    /// stripped. Only called when `first_char` matched a marker, so
    /// the slice below is on a char boundary.
    fn take_marked_line(&mut self) -> String {
        let line = self.lines[self.pos];
        self.pos += 1;
        line[1..].to_string()
    }

    fn tick(&mut self) -> Result<(), ParseError> {
        self.steps += 1;
        if self.steps > self.budget {
            log::debug!("Watchdog tripped after {} steps", self.steps);
            return Err(ParseError::ParseTimeout { steps: self.steps });
        }

        Ok(())
    }
}

fn is_file_start(line: &str) -> bool {
    FILE_START_REGEX.is_match(line)
}

fn parse_count(digits: &str, line: &str) -> Result<u32, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::MalformedHunkHeader {
            line: line.to_string(),
        })
}
