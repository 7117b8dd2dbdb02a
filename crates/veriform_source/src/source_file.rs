//! A loaded source file with a line-start index.

use crate::file_id::FileId;
use veriform_common::ContentHash;
use std::path::PathBuf;

/// One RTL source file owned by the [`SourceDb`](crate::SourceDb).
pub struct SourceFile {
    /// Identifier within the owning database.
    pub id: FileId,
    /// Filesystem path, or a synthetic name for in-memory sources.
    pub path: PathBuf,
    /// Full text of the file.
    pub content: String,
    /// Byte offset of each line start; the first entry is always 0.
    line_starts: Vec<u32>,
    /// Fingerprint of `content`.
    pub content_hash: ContentHash,
}

impl SourceFile {
    /// Creates a source file, indexing line starts and hashing the content.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        let content_hash = ContentHash::from_bytes(content.as_bytes());
        Self {
            id,
            path,
            content,
            line_starts,
            content_hash,
        }
    }

    /// Converts a byte offset into 1-based `(line, column)`.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the 1-based line containing `byte_offset`.
    pub fn line_of(&self, byte_offset: u32) -> u32 {
        self.line_col(byte_offset).0
    }

    /// Returns the text between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

    /// The file name without its extension, used as a fallback design name.
    pub fn stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }
}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(content: &str) -> SourceFile {
        SourceFile::new(
            FileId::from_raw(0),
            PathBuf::from("rtl/adder.vhd"),
            content.to_string(),
        )
    }

    #[test]
    fn line_starts_computation() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.line_starts, vec![0, 4, 8]);
    }

    #[test]
    fn line_col_resolution() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(5), (2, 2));
        assert_eq!(f.line_of(8), 3);
    }

    #[test]
    fn empty_file() {
        let f = make_file("");
        assert_eq!(f.line_col(0), (1, 1));
    }

    #[test]
    fn stem_strips_extension() {
        assert_eq!(make_file("").stem(), Some("adder"));
    }

    #[test]
    fn content_hash_computed() {
        let f = make_file("entity adder is");
        assert_eq!(f.content_hash, ContentHash::from_bytes(b"entity adder is"));
    }
}
