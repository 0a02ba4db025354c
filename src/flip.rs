use std::time::{Duration, Instant};

use crate::digits::DigitField;
use crate::surface::FlipCard;

/// Length of one card flip.
pub const FLIP_DURATION: Duration = Duration::from_millis(300);

/// Angle the front face reaches at the midpoint, edge-on to the viewer.
const EDGE_ON_DEGREES: f32 = -90.0;

/// A single running flip of one card towards `value`.
///
/// The back face gets the new value when the flip starts; the front face folds
/// away to edge-on, swaps to the new value at the midpoint, then unfolds.
#[derive(Debug, Clone)]
pub struct FlipAnimation {
    field: DigitField,
    value: u32,
    started: Instant,
    front_swapped: bool,
}

impl FlipAnimation {
    pub fn start(field: DigitField, value: u32, card: &mut FlipCard, now: Instant) -> Self {
        card.set_back(value);
        card.set_rotation(0.0);
        Self {
            field,
            value,
            started: now,
            front_swapped: false,
        }
    }

    pub fn field(&self) -> DigitField {
        self.field
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Moves the card to where it should be at `now`. Returns `true` once finished.
    pub fn advance(&mut self, card: &mut FlipCard, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= FLIP_DURATION {
            card.set_front(self.value);
            card.clear_rotation();
            return true;
        }

        let half = FLIP_DURATION / 2;
        let angle = if elapsed < half {
            EDGE_ON_DEGREES * (elapsed.as_secs_f32() / half.as_secs_f32())
        } else {
            if !self.front_swapped {
                card.set_front(self.value);
                self.front_swapped = true;
            }
            EDGE_ON_DEGREES * (1.0 - (elapsed - half).as_secs_f32() / half.as_secs_f32())
        };
        card.set_rotation(angle);
        false
    }
}
