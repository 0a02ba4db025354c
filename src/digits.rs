use std::fmt;

use chrono::Timelike;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigitField {
    Hours,
    Minutes,
    Seconds,
}

impl DigitField {
    pub const ALL: [DigitField; 3] = [DigitField::Hours, DigitField::Minutes, DigitField::Seconds];
}

impl fmt::Display for DigitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DigitField::Hours => "hours",
            DigitField::Minutes => "minutes",
            DigitField::Seconds => "seconds",
        })
    }
}

/// The three numbers shown on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DigitTriple {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl DigitTriple {
    pub const ZERO: DigitTriple = DigitTriple {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Wall-clock time in 12-hour form, midnight and noon shown as 12.
    pub fn twelve_hour<T: Timelike>(time: &T) -> Self {
        let hours = match time.hour() % 12 {
            0 => 12,
            h => h,
        };
        Self::new(hours, time.minute(), time.second())
    }

    /// Splits a remaining duration into h/m/s. Negative or zero snaps to all zeros.
    pub fn from_remaining(remaining: chrono::Duration) -> Self {
        // Sub-second remainders are floored, matching what a stopwatch shows.
        let total = remaining.num_milliseconds().max(0) / 1000;
        let total = u32::try_from(total).unwrap_or(u32::MAX);
        Self::new(total / 3600, (total % 3600) / 60, total % 60)
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn get(&self, field: DigitField) -> u32 {
        match field {
            DigitField::Hours => self.hours,
            DigitField::Minutes => self.minutes,
            DigitField::Seconds => self.seconds,
        }
    }

    pub fn set(&mut self, field: DigitField, value: u32) {
        match field {
            DigitField::Hours => self.hours = value,
            DigitField::Minutes => self.minutes = value,
            DigitField::Seconds => self.seconds = value,
        }
    }
}

impl fmt::Display for DigitTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Two-digit, zero-padded card text.
pub fn card_text(value: u32) -> String {
    format!("{:02}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn twelve_hour_maps_midnight_and_noon_to_twelve() {
        let midnight = NaiveTime::from_hms_opt(0, 5, 9).unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let evening = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(DigitTriple::twelve_hour(&midnight), DigitTriple::new(12, 5, 9));
        assert_eq!(DigitTriple::twelve_hour(&noon), DigitTriple::new(12, 0, 0));
        assert_eq!(DigitTriple::twelve_hour(&evening), DigitTriple::new(11, 59, 59));
    }

    #[test]
    fn remaining_is_floored_and_clamped() {
        let d = chrono::Duration::milliseconds(10_999);
        assert_eq!(DigitTriple::from_remaining(d), DigitTriple::new(0, 0, 10));

        let d = chrono::Duration::seconds(23 * 3600 + 59 * 60 + 59);
        assert_eq!(DigitTriple::from_remaining(d), DigitTriple::new(23, 59, 59));

        assert_eq!(DigitTriple::from_remaining(chrono::Duration::zero()), DigitTriple::ZERO);
        assert_eq!(
            DigitTriple::from_remaining(chrono::Duration::seconds(-5)),
            DigitTriple::ZERO
        );
    }

    #[test]
    fn field_accessors() {
        let mut triple = DigitTriple::new(1, 2, 3);
        triple.set(DigitField::Minutes, 42);
        assert_eq!(triple.get(DigitField::Minutes), 42);
        assert_eq!(triple.to_string(), "01:42:03");
        assert_eq!(card_text(7), "07");
    }
}
