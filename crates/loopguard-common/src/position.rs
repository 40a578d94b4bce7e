//! Offset to line/column conversion for reporters.

/// Start offset of every line in a source file.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Lines end at `\n`, `\r\n`, a lone `\r`, U+2028 and U+2029.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let line_starts = std::iter::once(0)
            .chain(source.char_indices().filter_map(|(i, ch)| {
                let next = (i + ch.len_utf8()) as u32;
                match ch {
                    '\n' | '\u{2028}' | '\u{2029}' => Some(next),
                    '\r' if bytes.get(i + 1) != Some(&b'\n') => Some(next),
                    _ => None,
                }
            }))
            .collect();
        LineMap { line_starts }
    }

    /// 1-based `(line, column)` of `offset`. Columns count UTF-16 code units,
    /// matching editors.
    pub fn line_and_column(&self, offset: u32, source: &str) -> (u32, u32) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).map_or(0, |&start| start as usize);
        let end = (offset as usize).min(source.len());
        let column: usize = source
            .get(line_start.min(end)..end)
            .map_or(0, |text| text.chars().map(char::len_utf16).sum());
        (line as u32 + 1, column as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_one_based() {
        let source = "for (;;) {\n  f();\n}";
        let map = LineMap::build(source);
        assert_eq!(map.line_and_column(0, source), (1, 1));
        assert_eq!(map.line_and_column(13, source), (2, 3));
        assert_eq!(map.line_and_column(18, source), (3, 1));
    }

    #[test]
    fn every_line_terminator_starts_a_line() {
        let source = "a\r\nb\rc\u{2028}d";
        let map = LineMap::build(source);
        assert_eq!(map.line_and_column(3, source), (2, 1));
        assert_eq!(map.line_and_column(5, source), (3, 1));
        assert_eq!(map.line_and_column(9, source), (4, 1));
    }

    #[test]
    fn astral_characters_take_two_columns() {
        let source = "A \u{1F680} B";
        let map = LineMap::build(source);
        assert_eq!(map.line_and_column(2, source), (1, 3));
        assert_eq!(map.line_and_column(7, source), (1, 6));
    }
}
