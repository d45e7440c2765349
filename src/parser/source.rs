//! Character sources behind the cursor: a fully in-memory string, or a file
//! paged in fixed-size chunks. Sub-parsers never see the difference.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Page size for file-backed sources. Files at most this large are slurped.
pub(crate) const FILE_PAGE_BYTES: usize = 64 * 1024;

/// Random access by character offset over a forward-moving window.
///
/// Offsets before the released low-water mark are never requested again; the
/// driver only releases between top-level values, so every checkpoint a
/// sub-parser may rewind to stays resident.
pub(crate) trait CharSource {
    fn char_at(&mut self, idx: usize) -> Option<char>;
    /// Total length in characters once it is known. In-memory sources know it
    /// immediately; paged files learn it at end of file.
    fn known_len(&mut self) -> Option<usize>;
    /// Copy of `[start, end)`, clamped to what the input holds.
    fn span(&mut self, start: usize, end: usize) -> String;
    /// Nothing before `idx` will be read again.
    fn release_before(&mut self, _idx: usize) {}
    /// A read error swallowed while paging, if any.
    fn take_io_error(&mut self) -> Option<io::Error> {
        None
    }
}

pub(crate) struct StrSource {
    chars: Vec<char>,
}

impl StrSource {
    pub(crate) fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl CharSource for StrSource {
    fn char_at(&mut self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    fn known_len(&mut self) -> Option<usize> {
        Some(self.chars.len())
    }

    fn span(&mut self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }
}

/// Lazily paged file. Bytes are decoded page by page; invalid UTF-8 becomes
/// U+FFFD so a torn multi-byte sequence in a truncated file cannot abort a
/// repair run.
pub(crate) struct FileSource {
    reader: BufReader<File>,
    buf: Vec<char>,
    /// Character offset of `buf[0]`.
    start: usize,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last page.
    carry: Vec<u8>,
    eof: bool,
    total: Option<usize>,
    io_error: Option<io::Error>,
}

impl FileSource {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            buf: Vec::new(),
            start: 0,
            carry: Vec::new(),
            eof: false,
            total: None,
            io_error: None,
        })
    }

    fn fill_page(&mut self) {
        let mut page = vec![0u8; FILE_PAGE_BYTES];
        let n = match self.reader.read(&mut page) {
            Ok(n) => n,
            Err(e) => {
                self.io_error = Some(e);
                0
            }
        };
        if n == 0 {
            self.eof = true;
            if !self.carry.is_empty() {
                self.buf.push('\u{FFFD}');
                self.carry.clear();
            }
            self.total = Some(self.start + self.buf.len());
            return;
        }
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(&page[..n]);
        self.decode_append(&bytes);
    }

    fn decode_append(&mut self, mut bytes: &[u8]) {
        loop {
            match std::str::from_utf8(bytes) {
                Ok(s) => {
                    self.buf.extend(s.chars());
                    return;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    if let Ok(s) = std::str::from_utf8(&bytes[..valid]) {
                        self.buf.extend(s.chars());
                    }
                    bytes = &bytes[valid..];
                    match e.error_len() {
                        Some(len) => {
                            self.buf.push('\u{FFFD}');
                            bytes = &bytes[len..];
                        }
                        None => {
                            // Sequence split across pages; finish it next read.
                            self.carry = bytes.to_vec();
                            return;
                        }
                    }
                    if bytes.is_empty() {
                        return;
                    }
                }
            }
        }
    }
}

impl CharSource for FileSource {
    fn char_at(&mut self, idx: usize) -> Option<char> {
        while !self.eof && idx >= self.start + self.buf.len() {
            self.fill_page();
        }
        idx.checked_sub(self.start)
            .and_then(|rel| self.buf.get(rel))
            .copied()
    }

    fn known_len(&mut self) -> Option<usize> {
        self.total
    }

    fn span(&mut self, start: usize, end: usize) -> String {
        if end > start {
            // Make sure the range is decoded.
            let _ = self.char_at(end - 1);
        }
        let hi = (self.start + self.buf.len()).min(end);
        let lo = start.clamp(self.start, hi);
        self.buf[lo - self.start..hi - self.start].iter().collect()
    }

    fn release_before(&mut self, idx: usize) {
        if idx > self.start {
            let cut = (idx - self.start).min(self.buf.len());
            self.buf.drain(..cut);
            self.start += cut;
        }
    }

    fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn str_source_indexing() {
        let mut src = StrSource::new("a€b");
        assert_eq!(src.char_at(0), Some('a'));
        assert_eq!(src.char_at(1), Some('€'));
        assert_eq!(src.char_at(2), Some('b'));
        assert_eq!(src.char_at(3), None);
        assert_eq!(src.known_len(), Some(3));
        assert_eq!(src.span(1, 3), "€b");
    }

    #[test]
    fn file_source_pages_and_releases() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        let payload = "x".repeat(FILE_PAGE_BYTES * 2 + 17);
        tmp.write_all(payload.as_bytes()).unwrap();
        let mut src = FileSource::open(tmp.path()).unwrap();
        assert_eq!(src.char_at(0), Some('x'));
        assert_eq!(src.char_at(FILE_PAGE_BYTES + 5), Some('x'));
        src.release_before(FILE_PAGE_BYTES);
        assert_eq!(src.char_at(payload.len() - 1), Some('x'));
        assert_eq!(src.char_at(payload.len()), None);
        assert_eq!(src.known_len(), Some(payload.len()));
    }

    #[test]
    fn file_source_multibyte_across_page_boundary() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        let mut payload = "y".repeat(FILE_PAGE_BYTES - 1);
        payload.push('€');
        tmp.write_all(payload.as_bytes()).unwrap();
        let mut src = FileSource::open(tmp.path()).unwrap();
        assert_eq!(src.char_at(FILE_PAGE_BYTES - 1), Some('€'));
        assert_eq!(src.char_at(FILE_PAGE_BYTES), None);
    }
}
