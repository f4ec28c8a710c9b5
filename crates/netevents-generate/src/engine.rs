use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use netevents_core::Event;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::distribution::TypeHistogram;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::json::JsonArrayWriter;
use crate::synth::EventSynthesizer;

const OUTPUT_BUFFER_BYTES: usize = 1 << 20;

/// Entry point for generating an event artifact.
///
/// `count` events are split into blocks of `block_size`; block `i` always
/// uses the RNG seeded by `hash_block_seed(seed, i)`, so the output depends on
/// the seed only and not on how many workers produced it.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    seed: u64,
    synthesizer: EventSynthesizer,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        if options.workers == 0 {
            return Err(GenerationError::InvalidOptions(
                "workers must be at least 1".to_string(),
            ));
        }
        if options.block_size == 0 {
            return Err(GenerationError::InvalidOptions(
                "block_size must be at least 1".to_string(),
            ));
        }
        options.profile.validate()?;

        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        let synthesizer = EventSynthesizer::new(options.profile.clone());
        Ok(Self {
            options,
            seed,
            synthesizer,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate `count` events into the artifact at `out_path`.
    ///
    /// Output goes to a temporary sibling that is renamed over `out_path`
    /// only once fully written and synced, so a failed run never leaves a
    /// truncated artifact behind.
    pub fn run(&self, count: u64, out_path: &Path) -> Result<GenerationReport, GenerationError> {
        let tmp_path = temp_path(out_path)?;
        info!(
            count,
            seed = self.seed,
            workers = self.options.workers,
            block_size = self.options.block_size,
            out = %out_path.display(),
            "generation started"
        );

        let outcome = self.write_artifact(count, &tmp_path, out_path);
        match outcome {
            Ok(report) => {
                info!(
                    events = report.events_written,
                    bytes_written = report.bytes_written,
                    duration_ms = report.duration_ms,
                    chi_square = report.chi_square,
                    "generation completed"
                );
                Ok(report)
            }
            Err(err) => {
                if tmp_path.exists() {
                    if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                        warn!(path = %tmp_path.display(), error = %cleanup, "unable to remove partial artifact");
                    }
                }
                warn!(error = %err, "generation failed");
                Err(err)
            }
        }
    }

    fn write_artifact(
        &self,
        count: u64,
        tmp_path: &Path,
        out_path: &Path,
    ) -> Result<GenerationReport, GenerationError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(tmp_path)?;
        let mut writer = BufWriter::with_capacity(OUTPUT_BUFFER_BYTES, file);
        let report = self.generate_to_writer(count, &mut writer)?;
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(tmp_path, out_path)?;
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                sync_dir(parent)?;
            }
        }
        Ok(report)
    }

    /// Stream `count` events as a JSON array into `sink`.
    pub fn generate_to_writer<W: Write>(
        &self,
        count: u64,
        sink: W,
    ) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let mut writer = JsonArrayWriter::new(sink)?;
        let mut histogram = TypeHistogram::default();
        let mut blocks = 0_u64;

        for window in self.windows(count) {
            let produced = self.synthesize_window(blocks, &window)?;
            blocks += window.len() as u64;
            for block in produced {
                for event in &block {
                    histogram.record(event.event_type);
                    writer.write_event(event)?;
                }
            }
            debug!(blocks, events = writer.events_written(), "window written");
        }

        let events_written = writer.events_written();
        let (_, bytes_written) = writer.finish()?;
        let elapsed = start.elapsed();

        Ok(GenerationReport {
            seed: self.seed,
            events_requested: count,
            events_written,
            blocks,
            workers: self.options.workers,
            type_counts: histogram.to_code_map(),
            chi_square: histogram.chi_square(),
            bytes_written,
            duration_ms: elapsed.as_millis() as u64,
            throughput_events_per_sec: if elapsed.as_secs_f64() > 0.0 {
                events_written as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            },
        })
    }

    /// Build the whole batch in memory. Same events, same order as the
    /// streamed artifact; only suitable for modest counts.
    pub fn generate_batch(&self, count: u64) -> Result<Vec<Event>, GenerationError> {
        let mut events = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
        let mut blocks = 0_u64;
        for window in self.windows(count) {
            let produced = self.synthesize_window(blocks, &window)?;
            blocks += window.len() as u64;
            events.extend(produced.into_iter().flatten());
        }
        Ok(events)
    }

    /// Block lengths grouped into windows of at most `workers` blocks.
    fn windows(&self, count: u64) -> Windows {
        Windows {
            remaining: count,
            block_size: self.options.block_size as u64,
            workers: self.options.workers,
        }
    }

    fn synthesize_window(
        &self,
        first_block: u64,
        lengths: &[usize],
    ) -> Result<Vec<Vec<Event>>, GenerationError> {
        if let [len] = lengths {
            return Ok(vec![self.synthesize_block(first_block, *len)]);
        }

        thread::scope(|scope| {
            let handles: Vec<_> = lengths
                .iter()
                .enumerate()
                .map(|(offset, &len)| {
                    scope.spawn(move || self.synthesize_block(first_block + offset as u64, len))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| GenerationError::WorkerPanicked))
                .collect()
        })
    }

    fn synthesize_block(&self, block_index: u64, len: usize) -> Vec<Event> {
        let mut rng = ChaCha8Rng::seed_from_u64(hash_block_seed(self.seed, block_index));
        (0..len).map(|_| self.synthesizer.synthesize(&mut rng)).collect()
    }
}

struct Windows {
    remaining: u64,
    block_size: u64,
    workers: usize,
}

impl Iterator for Windows {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let mut lengths = Vec::with_capacity(self.workers);
        while lengths.len() < self.workers && self.remaining > 0 {
            let len = self.remaining.min(self.block_size);
            lengths.push(len as usize);
            self.remaining -= len;
        }
        Some(lengths)
    }
}

fn hash_block_seed(seed: u64, block_index: u64) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    hash ^= block_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash = hash.wrapping_mul(0x100000001b3);
    hash
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::InvalidOptions(format!("invalid output path '{}'", path.display()))
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(path: &Path) -> std::io::Result<()> {
    File::open(path)?.sync_all()
}
