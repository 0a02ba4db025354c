use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::digits::DigitField;
use crate::prefs::{PreferenceError, PreferenceStore};
use crate::surface::{DigitSurface, FlipBoard, FlipCard};

/// A shared clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualTime>>,
}

#[derive(Debug)]
struct ManualTime {
    wall: DateTime<Utc>,
    instant: Instant,
}

impl ManualClock {
    pub fn new(wall: DateTime<Utc>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ManualTime {
                wall,
                instant: Instant::now(),
            })),
        }
    }

    /// Moves wall-clock and monotonic time forward together.
    pub fn advance(&self, by: Duration) {
        let mut time = self.inner.borrow_mut();
        time.wall += chrono::Duration::from_std(by).expect("duration in range");
        time.instant += by;
    }

    /// Jumps the wall clock only, as a system clock adjustment would.
    pub fn set_wall(&self, wall: DateTime<Utc>) {
        self.inner.borrow_mut().wall = wall;
    }
}

impl Clock for ManualClock {
    type Tz = Utc;

    fn now(&self) -> DateTime<Utc> {
        self.inner.borrow().wall
    }

    fn instant(&self) -> Instant {
        self.inner.borrow().instant
    }
}

/// Fails every read and write.
#[derive(Debug, Clone, Copy)]
pub struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn load(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
        Err(PreferenceError::NoConfigDir)
    }

    fn store(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
        Err(PreferenceError::NoConfigDir)
    }
}

/// A board with one card torn off.
#[derive(Debug, Default)]
pub struct PartialBoard {
    board: FlipBoard,
    missing: Option<DigitField>,
}

impl PartialBoard {
    pub fn without(field: DigitField) -> Self {
        Self {
            board: FlipBoard::default(),
            missing: Some(field),
        }
    }
}

impl DigitSurface for PartialBoard {
    fn card(&self, field: DigitField) -> Option<&FlipCard> {
        if self.missing == Some(field) {
            return None;
        }
        self.board.card(field)
    }

    fn card_mut(&mut self, field: DigitField) -> Option<&mut FlipCard> {
        if self.missing == Some(field) {
            return None;
        }
        self.board.card_mut(field)
    }
}
