use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Service class of an event, which drives downstream rating cost.
///
/// Serialized as its integer code. Code 4 is not part of the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum EventType {
    /// Standard calls.
    Standard = 1,
    /// Premium services.
    Premium = 2,
    /// International calls.
    International = 3,
    /// Complex routing.
    ComplexRouting = 5,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Standard,
        EventType::Premium,
        EventType::International,
        EventType::ComplexRouting,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Expected fraction of events of this type in a large batch.
    pub fn expected_share(self) -> f64 {
        let mut lower = 0;
        for (upper, kind) in TYPE_DISTRIBUTION {
            if kind == self {
                return f64::from(upper - lower) / f64::from(TYPE_ROLL_RANGE);
            }
            lower = upper;
        }
        0.0
    }
}

impl TryFrom<i32> for EventType {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(Error::UnknownEventType(code))
    }
}

impl From<EventType> for i32 {
    fn from(value: EventType) -> Self {
        value.code()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Size of the uniform roll used to pick an event type.
pub const TYPE_ROLL_RANGE: u32 = 100;

/// Cumulative exclusive upper bounds over `[0, TYPE_ROLL_RANGE)`.
///
/// Yields 15% standard, 20% premium, 20% international and 45% complex
/// routing events.
pub const TYPE_DISTRIBUTION: [(u32, EventType); 4] = [
    (15, EventType::Standard),
    (35, EventType::Premium),
    (55, EventType::International),
    (TYPE_ROLL_RANGE, EventType::ComplexRouting),
];

/// Map a roll in `[0, TYPE_ROLL_RANGE)` to its event type.
///
/// Rolls past the range saturate to the last bucket.
pub fn type_for_roll(roll: u32) -> EventType {
    TYPE_DISTRIBUTION
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, kind)| *kind)
        .unwrap_or(EventType::ComplexRouting)
}
