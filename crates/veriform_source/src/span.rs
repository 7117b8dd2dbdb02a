//! Byte-offset ranges within source files.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` within one source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The file this span belongs to.
    pub file: FileId,
    /// Byte offset of the first byte (inclusive).
    pub start: u32,
    /// Byte offset one past the last byte (exclusive).
    pub end: u32,
}

impl Span {
    /// Span used when no source location is available.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a new span.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Returns a span running from the start of `self` to the end of `last`.
    ///
    /// Both spans must belong to the same file; `last` is expected to come
    /// after `self` in the token stream.
    pub fn to(self, last: Span) -> Span {
        debug_assert_eq!(self.file, last.file, "spans from different files");
        Span {
            file: self.file,
            start: self.start,
            end: last.end.max(self.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this is [`Span::DUMMY`].
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_covers_both() {
        let f = FileId::from_raw(0);
        let s = Span::new(f, 4, 10).to(Span::new(f, 20, 24));
        assert_eq!((s.start, s.end), (4, 24));
        assert_eq!(s.len(), 20);
    }

    #[test]
    fn empty_and_dummy() {
        let f = FileId::from_raw(0);
        assert!(Span::new(f, 5, 5).is_empty());
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(f, 0, 0).is_dummy());
    }
}
