//! Line-oriented I/O helpers
//!
//! Buffered readers with transparent gzip/bzip2 decompression and a line
//! iterator that reuses one buffer and reports end of input as `None`.

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Default buffer size for BufReader/BufWriter (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Path that stands for stdin/stdout
pub const STDIO_PATH: &str = "-";

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression by extension first, then by magic bytes
///
/// - .gz extension or gzip magic bytes (1f 8b)
/// - .bz2 extension or bzip2 magic bytes (42 5a 68)
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => return Ok(CompressionFormat::Gzip),
        Some("bz2") => return Ok(CompressionFormat::Bzip2),
        _ => {}
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = read_prefix(&mut file, &mut magic)?;

    Ok(detect_magic(&magic[..bytes_read]))
}

fn detect_magic(magic: &[u8]) -> CompressionFormat {
    if magic.starts_with(&[0x1f, 0x8b]) {
        CompressionFormat::Gzip
    } else if magic.starts_with(b"BZh") {
        CompressionFormat::Bzip2
    } else {
        CompressionFormat::Plain
    }
}

/// `read` may return short counts, so keep reading until the prefix is full or EOF
fn read_prefix(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Open a file (or stdin for `-`) as a buffered line source
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if path.as_os_str() == STDIO_PATH {
        return Ok(Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            io::stdin(),
        )));
    }

    let format = detect_compression(path)?;
    log::debug!("Opening {:?} as {:?}", path, format);

    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };
    Ok(reader)
}

/// A sink whose output is only complete after a final step beyond `flush`
pub trait FinishWrite: Write {
    /// Write any trailer and flush; the sink stays usable for inspection
    fn finish_write(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl FinishWrite for Vec<u8> {}

impl<W: Write> FinishWrite for BufWriter<W> {}

/// Output sink returned by [`create_writer`]
pub enum OutputWriter {
    Stdout(BufWriter<io::Stdout>),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputWriter {
    pub fn is_compressed(&self) -> bool {
        matches!(self, OutputWriter::Gzip(_))
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputWriter::Stdout(w) => w.write(buf),
            OutputWriter::Plain(w) => w.write(buf),
            OutputWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(w) => w.flush(),
            OutputWriter::Plain(w) => w.flush(),
            OutputWriter::Gzip(w) => w.flush(),
        }
    }
}

impl FinishWrite for OutputWriter {
    fn finish_write(&mut self) -> io::Result<()> {
        match self {
            OutputWriter::Gzip(encoder) => {
                // writes the gzip trailer; errors surface here instead of in Drop
                encoder.try_finish()?;
                encoder.get_mut().flush()
            }
            other => other.flush(),
        }
    }
}

/// Create a buffered sink (stdout for `-`), gzip-compressed for `.gz` paths
pub fn create_writer<P: AsRef<Path>>(path: P) -> io::Result<OutputWriter> {
    let path = path.as_ref();
    if path.as_os_str() == STDIO_PATH {
        return Ok(OutputWriter::Stdout(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            io::stdout(),
        )));
    }

    let file = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, File::create(path)?);
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(OutputWriter::Gzip(GzEncoder::new(
            file,
            flate2::Compression::default(),
        )))
    } else {
        Ok(OutputWriter::Plain(file))
    }
}

/// Line iterator that reuses a buffer to avoid allocations
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
        }
    }

    /// Read the next line into the internal buffer
    /// Returns None at EOF, Some(Ok(&str)) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                // Remove trailing newline
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_buffer_size() {
        assert_eq!(DEFAULT_BUFFER_SIZE, 128 * 1024);
    }

    #[test]
    fn test_line_iterator() {
        let mut lines = LineIterator::new(Cursor::new("a\tb\r\nc\n\nlast"));

        assert_eq!(lines.next_line().unwrap().unwrap(), "a\tb");
        assert_eq!(lines.next_line().unwrap().unwrap(), "c");
        assert_eq!(lines.next_line().unwrap().unwrap(), "");
        assert_eq!(lines.next_line().unwrap().unwrap(), "last");
        assert!(lines.next_line().is_none());
    }

    #[test]
    fn test_line_iterator_keeps_trailing_tab() {
        let mut lines = LineIterator::new(Cursor::new("chr1\t1\t\n"));
        assert_eq!(lines.next_line().unwrap().unwrap(), "chr1\t1\t");
    }

    #[test]
    fn test_detect_magic() {
        assert_eq!(detect_magic(&[0x1f, 0x8b, 0x08]), CompressionFormat::Gzip);
        assert_eq!(detect_magic(b"BZh"), CompressionFormat::Bzip2);
        assert_eq!(detect_magic(b"chr"), CompressionFormat::Plain);
        assert_eq!(detect_magic(b""), CompressionFormat::Plain);
    }

    #[test]
    fn test_detect_compression_by_extension() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("regions.bed.gz");
        std::fs::write(&path, b"not really gzip")?;
        assert_eq!(detect_compression(&path)?, CompressionFormat::Gzip);

        let path = dir.path().join("regions.bed.bz2");
        std::fs::write(&path, b"")?;
        assert_eq!(detect_compression(&path)?, CompressionFormat::Bzip2);
        Ok(())
    }

    #[test]
    fn test_open_reader_gzip_by_magic() -> io::Result<()> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"chr1\t1\t2\n")?;
        let compressed = encoder.finish()?;

        let mut temp = NamedTempFile::new()?;
        temp.write_all(&compressed)?;
        temp.flush()?;

        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Gzip);
        let mut lines = LineIterator::new(open_reader(temp.path())?);
        assert_eq!(lines.next_line().unwrap()?, "chr1\t1\t2");
        assert!(lines.next_line().is_none());
        Ok(())
    }

    #[test]
    fn test_open_reader_bzip2() -> io::Result<()> {
        let mut encoder =
            bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(b"chr2\t3\t4\n")?;
        let compressed = encoder.finish()?;

        let mut temp = NamedTempFile::new()?;
        temp.write_all(&compressed)?;
        temp.flush()?;

        let mut lines = LineIterator::new(open_reader(temp.path())?);
        assert_eq!(lines.next_line().unwrap()?, "chr2\t3\t4");
        Ok(())
    }

    #[test]
    fn test_create_writer_gzip_complete_after_finish() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.bed.gz");
        let mut writer = create_writer(&path)?;
        assert!(writer.is_compressed());
        writer.write_all(b"chrX\t0\t5\n")?;
        writer.finish_write()?;

        // the sink is still alive, so nothing is left for Drop to write
        let mut lines = LineIterator::new(open_reader(&path)?);
        assert_eq!(lines.next_line().unwrap()?, "chrX\t0\t5");
        assert!(lines.next_line().is_none());

        drop(writer);
        Ok(())
    }

    #[test]
    fn test_create_writer_plain() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.bed");
        let mut writer = create_writer(&path)?;
        assert!(!writer.is_compressed());
        writer.write_all(b"chr1\t1\t2\n")?;
        writer.finish_write()?;

        assert_eq!(std::fs::read_to_string(&path)?, "chr1\t1\t2\n");
        Ok(())
    }
}
