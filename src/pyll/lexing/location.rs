//! Byte offset to line/column conversion
//!
//! Logos reports byte spans; tokens carry 1-based line and column numbers where a column
//! counts characters, so a tab or a multi-byte character each advance it by one.
//!
//! [`SourceMap`] answers arbitrary offsets. [`LocationTracker`] serves a token stream, whose
//! offsets only grow, and scans each character once over the whole stream.

use crate::pyll::error::Location;

/// Line start offsets of a source text.
#[derive(Debug, Clone)]
pub struct SourceMap<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// Location of the character starting at `offset`. `offset == source.len()` is the
    /// position just past the last character.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.source.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self.source[line_start..offset].chars().count() + 1;
        Location::new(line_idx + 1, column)
    }

    /// Position just past the end of the source.
    pub fn end(&self) -> Location {
        self.location(self.source.len())
    }
}

/// Offset to location conversion for increasing offsets.
///
/// Each call scans only the characters between the previous offset and the new one. An
/// offset behind the previous one falls back to a [`SourceMap`] lookup.
#[derive(Debug, Clone)]
pub struct LocationTracker<'a> {
    map: SourceMap<'a>,
    offset: usize,
    location: Location,
}

impl<'a> LocationTracker<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            map: SourceMap::new(source),
            offset: 0,
            location: Location::new(1, 1),
        }
    }

    pub fn location(&mut self, offset: usize) -> Location {
        let offset = offset.min(self.map.source.len());
        if offset < self.offset {
            self.location = self.map.location(offset);
        } else {
            for ch in self.map.source[self.offset..offset].chars() {
                if ch == '\n' {
                    self.location.line += 1;
                    self.location.column = 1;
                } else {
                    self.location.column += 1;
                }
            }
        }
        self.offset = offset;
        self.location
    }

    pub fn end(&mut self) -> Location {
        self.location(self.map.source.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_character() {
        let map = SourceMap::new("a = 1\n");
        assert_eq!(map.location(0), Location::new(1, 1));
        assert_eq!(map.location(4), Location::new(1, 5));
    }

    #[test]
    fn test_after_newline() {
        let map = SourceMap::new("if a:\n    b\n");
        assert_eq!(map.location(10), Location::new(2, 5));
        assert_eq!(map.end(), Location::new(3, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        let map = SourceMap::new("s = \"ñú\" x");
        assert_eq!(map.location("s = \"ñú\" ".len()), Location::new(1, 10));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(SourceMap::new("").end(), Location::new(1, 1));
    }

    #[test]
    fn test_tracker_agrees_with_map() {
        let source = "if a:\r\n\tb = \"ñú\" # é\n\n    c\n";
        let map = SourceMap::new(source);
        let mut tracker = LocationTracker::new(source);
        for (offset, _) in source.char_indices() {
            assert_eq!(tracker.location(offset), map.location(offset), "offset {offset}");
        }
        assert_eq!(tracker.end(), map.end());
    }

    #[test]
    fn test_tracker_steps_back() {
        let source = "a\nbb\nccc";
        let mut tracker = LocationTracker::new(source);
        assert_eq!(tracker.location(8), Location::new(3, 4));
        assert_eq!(tracker.location(3), Location::new(2, 2));
        assert_eq!(tracker.location(7), Location::new(3, 3));
    }
}
