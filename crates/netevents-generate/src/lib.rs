//! Synthetic network event generation for netevents.
//!
//! Events are synthesized in fixed-size blocks, each with its own seeded
//! RNG, and streamed into a JSON array artifact so peak memory does not grow
//! with the requested count.

pub mod distribution;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod sampler;
pub mod synth;

pub use distribution::TypeHistogram;
pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use model::{EventProfile, GenerateOptions, GenerationReport};
pub use synth::EventSynthesizer;
