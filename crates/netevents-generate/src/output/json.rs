use std::io::Write;

use netevents_core::Event;

use crate::errors::GenerationError;

/// Streams events into a compact JSON array, one record at a time.
///
/// The bytes produced are identical to `serde_json::to_vec(&events)` for the
/// same sequence of events.
pub struct JsonArrayWriter<W: Write> {
    inner: CountingWriter<W>,
    events: u64,
}

impl<W: Write> JsonArrayWriter<W> {
    pub fn new(inner: W) -> Result<Self, GenerationError> {
        let mut inner = CountingWriter::new(inner);
        inner.write_all(b"[")?;
        Ok(Self { inner, events: 0 })
    }

    pub fn write_event(&mut self, event: &Event) -> Result<(), GenerationError> {
        if self.events > 0 {
            self.inner.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.inner, event)?;
        self.events += 1;
        Ok(())
    }

    pub fn events_written(&self) -> u64 {
        self.events
    }

    /// Close the array and flush. Returns the sink and the bytes written.
    pub fn finish(mut self) -> Result<(W, u64), GenerationError> {
        self.inner.write_all(b"]")?;
        self.inner.flush()?;
        let bytes = self.inner.bytes_written();
        Ok((self.inner.inner, bytes))
    }
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
