//! Mentor weekly availability.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};

/// Validation errors for availability slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityValidationError {
    /// The text did not match `day HH:MM-HH:MM`.
    Malformed {
        /// Rejected input.
        input: String,
    },
    /// The slot ends at or before its start.
    EmptyRange {
        /// Day of the offending slot.
        day: Weekday,
    },
    /// Two slots on the same day intersect.
    Overlap {
        /// Day holding both slots.
        day: Weekday,
    },
    /// No slot exists at the given position.
    SlotOutOfRange {
        /// Requested position.
        index: usize,
    },
}

impl fmt::Display for AvailabilityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { input } => write!(
                f,
                "slot '{input}' must look like 'mon 09:00-10:30'"
            ),
            Self::EmptyRange { day } => write!(f, "slot on {day} must end after it starts"),
            Self::Overlap { day } => write!(f, "slots on {day} must not overlap"),
            Self::SlotOutOfRange { index } => write!(f, "no slot at position {index}"),
        }
    }
}

impl std::error::Error for AvailabilityValidationError {}

/// One recurring weekly time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilitySlot {
    /// Weekday the window recurs on.
    pub day: Weekday,
    /// Start of the window.
    pub start: NaiveTime,
    /// End of the window, after `start`.
    pub end: NaiveTime,
}

impl AvailabilitySlot {
    /// Build a slot, rejecting windows that do not move forward in time.
    pub fn new(
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, AvailabilityValidationError> {
        if start >= end {
            return Err(AvailabilityValidationError::EmptyRange { day });
        }
        Ok(Self { day, start, end })
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl FromStr for AvailabilitySlot {
    type Err = AvailabilityValidationError;

    /// Parse `"<day> HH:MM-HH:MM"`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || AvailabilityValidationError::Malformed {
            input: raw.to_owned(),
        };
        let (day, range) = raw.trim().split_once(' ').ok_or_else(malformed)?;
        let (start, end) = range.trim().split_once('-').ok_or_else(malformed)?;
        let day = day.parse::<Weekday>().map_err(|_| malformed())?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| malformed())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| malformed())?;
        Self::new(day, start, end)
    }
}

impl fmt::Display for AvailabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// A mentor's weekly availability.
///
/// ## Invariants
/// - No two slots on the same weekday overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    /// IANA timezone the slots are expressed in.
    pub timezone: String,
    slots: Vec<AvailabilitySlot>,
}

impl Availability {
    /// Build availability from slots, rejecting overlaps.
    pub fn new(
        timezone: impl Into<String>,
        slots: Vec<AvailabilitySlot>,
    ) -> Result<Self, AvailabilityValidationError> {
        let mut availability = Self {
            timezone: timezone.into(),
            slots: Vec::with_capacity(slots.len()),
        };
        for slot in slots {
            availability.add_slot(slot)?;
        }
        Ok(availability)
    }

    /// Slots in insertion order.
    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    /// Add a slot unless it overlaps an existing one on the same day.
    pub fn add_slot(&mut self, slot: AvailabilitySlot) -> Result<(), AvailabilityValidationError> {
        if self.slots.iter().any(|existing| existing.overlaps(&slot)) {
            return Err(AvailabilityValidationError::Overlap { day: slot.day });
        }
        self.slots.push(slot);
        Ok(())
    }

    /// Remove and return the slot at `index`.
    pub fn remove_slot(
        &mut self,
        index: usize,
    ) -> Result<AvailabilitySlot, AvailabilityValidationError> {
        if index >= self.slots.len() {
            return Err(AvailabilityValidationError::SlotOutOfRange { index });
        }
        Ok(self.slots.remove(index))
    }
}
