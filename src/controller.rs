//! The clock-mode state machine.
//!
//! [`ClockController`] owns the display mode, what is currently on the board,
//! the countdown timer and the one flip animation allowed at a time. The UI
//! loop calls [`ClockController::on_frame`] every frame; user toggles and
//! window lifecycle events call [`ClockController::toggle_mode`] and
//! [`ClockController::tick`] directly. Every entry point is safe to call at
//! any time and in any order.

use chrono::DateTime;
use log::{debug, info, warn};

use crate::clock::{next_occurrence, Clock};
use crate::digits::{DigitField, DigitTriple};
use crate::flip::FlipAnimation;
use crate::mode::DisplayMode;
use crate::prefs::{PreferenceStore, MODE_KEY};
use crate::schedule::{RepeatingTimer, TickPoll, COUNTDOWN_INTERVAL};
use crate::surface::DigitSurface;

/// How a triple reaches the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Replace every card face at once, cancelling any running flip.
    Direct,
    /// Flip each changed card, one flip at a time.
    Animated,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ControllerOptions {
    /// Flip changed digits in `Now` mode instead of replacing them.
    pub animate_now: bool,
}

/// A committed countdown target and the timer redrawing it.
struct Countdown<Tz: chrono::TimeZone> {
    hour: u32,
    target: DateTime<Tz>,
    timer: RepeatingTimer,
    reached: bool,
}

pub struct ClockController<C: Clock, P, S> {
    clock: C,
    prefs: P,
    surface: S,
    options: ControllerOptions,
    mode: DisplayMode,
    last_displayed: DigitTriple,
    initialized: bool,
    countdown: Option<Countdown<C::Tz>>,
    flip: Option<FlipAnimation>,
    tick_poll: TickPoll,
    deadline_reached: bool,
}

impl<C, P, S> ClockController<C, P, S>
where
    C: Clock,
    P: PreferenceStore,
    S: DigitSurface,
{
    pub fn new(clock: C, prefs: P, surface: S, options: ControllerOptions) -> Self {
        Self {
            clock,
            prefs,
            surface,
            options,
            mode: DisplayMode::Now,
            last_displayed: DigitTriple::ZERO,
            initialized: false,
            countdown: None,
            flip: None,
            tick_poll: TickPoll::default(),
            deadline_reached: false,
        }
    }

    /// Restores the saved mode and paints the first frame without animation.
    pub fn initialize(&mut self) {
        self.mode = self.load_mode();
        info!("Starting in {} mode", self.mode);

        self.render_current(RenderMode::Direct);
        self.initialized = true;
        self.tick_poll.arm(self.clock.instant());
    }

    /// Recomputes the digits for the current mode and renders them.
    pub fn tick(&mut self) {
        let render_mode = if self.initialized && self.options.animate_now {
            RenderMode::Animated
        } else {
            RenderMode::Direct
        };
        self.render_current(render_mode);
    }

    /// `Now -> 5PM -> 6PM -> Now`, rendering the new mode immediately and
    /// remembering it.
    pub fn toggle_mode(&mut self) {
        self.cancel_countdown();
        let previous = self.mode;
        self.mode = self.mode.next();
        info!("Switching from {} to {}", previous, self.mode);

        // Never animate out of a mode switch; the old digits mean something else.
        self.render_current(RenderMode::Direct);
        self.persist_mode();
    }

    /// Per-frame work: the 1 Hz tick, the countdown timer and the running flip.
    ///
    /// Returns `true` while a flip is in progress so the caller keeps painting.
    pub fn on_frame(&mut self) -> bool {
        let now = self.clock.instant();
        if self.tick_poll.poll(now) {
            self.tick();
        }
        let countdown_due = self
            .countdown
            .as_mut()
            .is_some_and(|countdown| countdown.timer.poll(now));
        if countdown_due {
            self.render_countdown();
        }
        self.advance_animation();
        self.is_animating()
    }

    /// The single render entry point.
    ///
    /// A surface missing any card gets nothing, in either mode.
    pub fn render(&mut self, triple: DigitTriple, render_mode: RenderMode) {
        if !self.surface.has_all_cards() {
            warn!("Clock face is missing cards; skipping render of {}", triple);
            return;
        }
        match render_mode {
            RenderMode::Direct => self.render_direct(triple),
            RenderMode::Animated => {
                for field in DigitField::ALL {
                    self.render_digit(field, triple.get(field));
                }
            }
        }
    }

    /// Flips one card to `value`. Returns whether a flip started.
    ///
    /// Unchanged values are a no-op. While another flip is running the request
    /// is dropped, not queued; the remembered value stays old, so the next
    /// tick asks again.
    pub fn render_digit(&mut self, field: DigitField, value: u32) -> bool {
        if self.last_displayed.get(field) == value {
            return false;
        }
        if let Some(running) = &self.flip {
            debug!(
                "Dropping {} flip to {:02}; {} flip to {:02} still running",
                field,
                value,
                running.field(),
                running.value()
            );
            return false;
        }
        let now = self.clock.instant();
        let Some(card) = self.surface.card_mut(field) else {
            warn!("No {} card on the clock face", field);
            return false;
        };
        self.flip = Some(FlipAnimation::start(field, value, card, now));
        self.last_displayed.set(field, value);
        true
    }

    /// Steps the running flip to the current instant.
    pub fn advance_animation(&mut self) {
        let Some(flip) = self.flip.as_mut() else {
            return;
        };
        let now = self.clock.instant();
        let finished = match self.surface.card_mut(flip.field()) {
            Some(card) => flip.advance(card, now),
            None => true,
        };
        if finished {
            self.flip = None;
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn displayed(&self) -> DigitTriple {
        self.last_displayed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_animating(&self) -> bool {
        self.flip.is_some()
    }

    /// The committed countdown deadline, if a countdown is active.
    pub fn countdown_target(&self) -> Option<&DateTime<C::Tz>> {
        self.countdown.as_ref().map(|countdown| &countdown.target)
    }

    /// Returns `true` once per countdown that reached zero.
    pub fn take_deadline_reached(&mut self) -> bool {
        std::mem::take(&mut self.deadline_reached)
    }

    fn render_current(&mut self, render_mode: RenderMode) {
        match self.mode {
            DisplayMode::Now => {
                let triple = DigitTriple::twelve_hour(&self.clock.now());
                self.render(triple, render_mode);
            }
            DisplayMode::CountdownTo(hour) => {
                self.ensure_countdown(hour);
                self.render_countdown();
            }
        }
    }

    fn render_direct(&mut self, triple: DigitTriple) {
        for field in DigitField::ALL {
            if let Some(card) = self.surface.card_mut(field) {
                card.show(triple.get(field));
            }
        }
        self.flip = None;
        self.last_displayed = triple;
    }

    /// Commits a target for `hour` unless that countdown is already running.
    fn ensure_countdown(&mut self, hour: u32) {
        if self.countdown.as_ref().is_some_and(|c| c.hour == hour) {
            return;
        }
        self.cancel_countdown();

        let now = self.clock.now();
        let Some(target) = next_occurrence(&now, hour) else {
            warn!("Cannot count down to hour {}", hour);
            return;
        };
        debug!("Counting down to {}", target.naive_local());
        self.countdown = Some(Countdown {
            hour,
            target,
            timer: RepeatingTimer::start(self.clock.instant(), COUNTDOWN_INTERVAL),
            reached: false,
        });
    }

    fn cancel_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            debug!("Cancelled countdown to {:02}:00", countdown.hour);
        }
    }

    fn render_countdown(&mut self) {
        let now = self.clock.now();
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        let remaining = countdown.target.clone().signed_duration_since(now);
        let triple = DigitTriple::from_remaining(remaining);
        log::trace!("{}s left until {:02}:00", triple.total_seconds(), countdown.hour);

        if triple == DigitTriple::ZERO && !countdown.reached {
            countdown.reached = true;
            self.deadline_reached = true;
            info!("Reached {:02}:00", countdown.hour);
        }
        self.render(triple, RenderMode::Direct);
    }

    fn load_mode(&self) -> DisplayMode {
        match self.prefs.load(MODE_KEY) {
            Ok(Some(key)) => DisplayMode::from_key(&key).unwrap_or_else(|| {
                warn!("Ignoring unknown saved mode {:?}", key);
                DisplayMode::Now
            }),
            Ok(None) => DisplayMode::Now,
            Err(e) => {
                warn!("Could not read saved mode: {}", e);
                DisplayMode::Now
            }
        }
    }

    fn persist_mode(&mut self) {
        if let Err(e) = self.prefs.store(MODE_KEY, &self.mode.key()) {
            warn!("Could not save mode: {}", e);
        }
    }
}
