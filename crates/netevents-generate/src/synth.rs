use netevents_core::Event;
use rand::Rng;

use crate::model::EventProfile;
use crate::sampler::{sample_event_type, sample_occurred_at, sample_ref, sample_token};

/// Builds fully populated events from a caller-owned RNG.
#[derive(Debug, Clone, Default)]
pub struct EventSynthesizer {
    profile: EventProfile,
}

impl EventSynthesizer {
    pub fn new(profile: EventProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &EventProfile {
        &self.profile
    }

    /// Synthesize one event. Only `event_type` follows a non-uniform
    /// distribution; every other field is drawn independently.
    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> Event {
        let profile = &self.profile;
        let max_text = profile.max_text_len;

        Event {
            event_source: rng.random_range(0..profile.max_number),
            event_ref: sample_ref(rng),
            event_type: sample_event_type(rng),
            event_date: sample_occurred_at(rng, profile.max_day_of_month),
            calling_number: rng.random_range(0..profile.max_number),
            called_number: rng.random_range(0..profile.max_number),
            location: sample_token(rng, 1, max_text),
            duration_seconds: rng.random_range(0..profile.max_duration_seconds),
            attr_1: sample_token(rng, 0, max_text),
            attr_2: sample_token(rng, 0, max_text),
            attr_3: sample_token(rng, 0, max_text),
            attr_4: sample_token(rng, 0, max_text),
            attr_5: sample_token(rng, 0, max_text),
            attr_6: sample_token(rng, 0, max_text),
            attr_7: sample_token(rng, 0, max_text),
            attr_8: sample_token(rng, 0, max_text),
        }
    }
}
