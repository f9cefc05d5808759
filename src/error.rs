use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line expected to be a hunk range didn't match
    /// `@@ -L,C +L,C @@`. The offending line is left unconsumed so the
    /// caller can reinterpret it.
    MalformedHunkHeader { line: String },
    /// The step-budget watchdog tripped. The parse as a whole is
    /// abandoned; nothing beyond previously returned values is
    /// guaranteed consistent.
    ParseTimeout { steps: usize },
}

impl std::error::Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedHunkHeader { line } => {
                f.write_fmt(format_args!("Malformed hunk header: {:?}", line))
            }
            ParseError::ParseTimeout { steps } => {
                f.write_fmt(format_args!("Parse aborted after {} steps", steps))
            }
        }
    }
}
