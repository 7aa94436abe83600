//! Position tracking for scanned input
//!
//! Tokens and scan errors report where in the input they occurred. The scanner
//! works in byte offsets internally; this module converts offsets to
//! line/column positions.
//!
//! [`SourceLocation`] pre-computes the byte offset of every line start once
//! per input, so each conversion is a single O(log n) binary search:
//!
//! ```text
//! Input: "ab\ncd"
//! line_starts = [0, 3]
//! byte_to_position(4) -> find line via binary search -> line index 1
//!                        column = 4 - 3 = 1
//!                        Position { line: 2, column: 1 }
//! ```
//!
//! Lines are 1-based and columns are 0-based, which is the contract every
//! produced [`Token`](crate::Token) and [`ScanError`](crate::ScanError)
//! follows. Columns count bytes from the line start; for ASCII input this is
//! the character column.

use std::fmt;

/// A position in the scanned input: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Fast conversion from byte offsets to line/column positions.
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    /// Create a new SourceLocation from the input text
    pub fn new(input: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in input.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line + 1, column)
    }

    /// Get the total number of lines in the input
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
