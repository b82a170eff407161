//! Line/column translation for byte offsets.

use memchr::memchr_iter;

/// A zero-based line/column position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Precomputed table of line-start offsets for one source text.
///
/// Built once per file; `position` then answers offset → line/column in
/// O(log lines).
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Scan `text` for newlines and record each line start.
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        for nl in memchr_iter(b'\n', bytes) {
            line_starts.push((nl + 1) as u32);
        }
        Self { line_starts }
    }

    /// Translate a byte offset into a zero-based line/column pair.
    ///
    /// Offsets past the end of the text land on the last line.
    pub fn position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        Position {
            line: line as u32,
            column: offset - self.line_starts[line],
        }
    }

    /// Number of lines in the mapped text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let map = LineMap::build("hello");
        assert_eq!(map.line_count(), 1);
        assert_eq!(map.position(3), Position { line: 0, column: 3 });
    }

    #[test]
    fn multi_line_positions() {
        let map = LineMap::build("ab\ncd\nef");
        assert_eq!(map.position(0), Position { line: 0, column: 0 });
        assert_eq!(map.position(3), Position { line: 1, column: 0 });
        assert_eq!(map.position(4), Position { line: 1, column: 1 });
        assert_eq!(map.position(7), Position { line: 2, column: 1 });
    }

    #[test]
    fn offset_on_newline_belongs_to_current_line() {
        let map = LineMap::build("ab\ncd");
        assert_eq!(map.position(2), Position { line: 0, column: 2 });
    }
}
