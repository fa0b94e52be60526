/// A byte offset range into an input JSON document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Zero-width span at the start of the document.
    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Zero-width span at a byte offset.
    pub fn point(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Span covering the first quoted occurrence of `key` in `source`,
    /// quotes included. Falls back to the document start if the key does
    /// not appear literally (e.g. escaped or absent).
    pub fn of_key(source: &str, key: &str) -> Self {
        let needle = format!("\"{}\"", key);
        match source.find(&needle) {
            Some(pos) => Self::new(pos as u32, (pos + needle.len()) as u32),
            None => Self::dummy(),
        }
    }

    /// Span at a 1-based line/column position, as reported by serde_json
    /// parse errors.
    pub fn at_line_col(source: &str, line: usize, column: usize) -> Self {
        let mut offset = 0usize;
        for (i, l) in source.split('\n').enumerate() {
            if i + 1 == line {
                offset += column.saturating_sub(1).min(l.len());
                return Self::point(offset.min(source.len()) as u32);
            }
            offset += l.len() + 1;
        }
        Self::point(source.len() as u32)
    }
}
