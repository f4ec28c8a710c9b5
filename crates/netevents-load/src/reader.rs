use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserializer as _;
use serde::de::{self, SeqAccess, Visitor};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use netevents_core::Event;

use crate::error::LoadError;

const READ_BUFFER_BYTES: usize = 1 << 20;

/// Decode a whole artifact into memory.
///
/// Any record that decodes is accepted; value ranges are left to the
/// destination's schema.
pub fn read_events(path: &Path) -> Result<Vec<Event>, LoadError> {
    let raw = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Decode an artifact incrementally on a blocking task.
///
/// Events arrive on the returned channel in artifact order. The channel
/// closes when the array ends or decoding fails; the join handle then yields
/// the number of events decoded or the decode error. Dropping the receiver
/// stops the decoder.
pub fn stream_events(
    path: &Path,
    capacity: usize,
) -> Result<(mpsc::Receiver<Event>, JoinHandle<Result<u64, LoadError>>), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (tx, rx) = mpsc::channel(capacity);

    let decoder = tokio::task::spawn_blocking(move || -> Result<u64, LoadError> {
        let reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        let decoded = (&mut deserializer).deserialize_seq(ForwardEvents { tx: &tx })?;
        deserializer.end()?;
        Ok(decoded)
    });

    Ok((rx, decoder))
}

struct ForwardEvents<'a> {
    tx: &'a mpsc::Sender<Event>,
}

impl<'de> Visitor<'de> for ForwardEvents<'_> {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of events")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut decoded = 0_u64;
        while let Some(event) = seq.next_element::<Event>()? {
            self.tx
                .blocking_send(event)
                .map_err(|_| de::Error::custom("event consumer stopped"))?;
            decoded += 1;
        }
        Ok(decoded)
    }
}
