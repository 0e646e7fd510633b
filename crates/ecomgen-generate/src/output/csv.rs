use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::GenerationError;
use crate::records::Record;

/// Write records as CSV under the catalog header, truncating any existing
/// file. Returns the number of bytes written.
pub fn write_records<T: Record>(path: &Path, records: &[T]) -> Result<u64, GenerationError> {
    let file = File::create(path).map_err(|source| GenerationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(T::table().column_names())?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush().map_err(|source| GenerationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut counting = writer
        .into_inner()
        .map_err(|err| GenerationError::Io {
            path: path.to_path_buf(),
            source: err.into_error(),
        })?;
    counting.flush().map_err(|source| GenerationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
