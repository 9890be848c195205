//! Backlight blink state
//!
//! The blink activity itself is a timed task in the firmware. This type
//! holds what the task needs to agree on with everyone else: whether
//! blinking is on, and which phase the backlight is in.

/// Change in blink demand produced by a channel operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkTransition {
    /// Blinking must begin
    Start,
    /// Blinking must end and the backlight stay on
    Stop,
    /// No change
    Unchanged,
}

impl BlinkTransition {
    /// Transition between two demand levels
    pub fn between(was_wanted: bool, now_wanted: bool) -> Self {
        match (was_wanted, now_wanted) {
            (false, true) => BlinkTransition::Start,
            (true, false) => BlinkTransition::Stop,
            _ => BlinkTransition::Unchanged,
        }
    }
}

/// Backlight blink state machine
///
/// At most one blink activity exists. Starting while already running is
/// ignored and keeps the current phase; stopping always leaves the
/// backlight on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blinker {
    running: bool,
    backlight_on: bool,
}

impl Default for Blinker {
    fn default() -> Self {
        Self::new()
    }
}

impl Blinker {
    /// Idle blinker with the backlight on
    pub const fn new() -> Self {
        Self {
            running: false,
            backlight_on: true,
        }
    }

    /// Begin blinking
    ///
    /// Returns `true` if the blinker was idle and is now running, `false`
    /// if it was already running (duplicate start, ignored).
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop blinking and force the backlight on
    pub fn stop(&mut self) {
        self.running = false;
        self.backlight_on = true;
    }

    /// Force the backlight on without changing whether blinking runs
    pub fn force_on(&mut self) {
        self.backlight_on = true;
    }

    /// Move to the next phase after one dwell period
    ///
    /// Returns the new backlight level, or `None` if not running.
    pub fn advance(&mut self) -> Option<bool> {
        if !self.running {
            return None;
        }
        self.backlight_on = !self.backlight_on;
        Some(self.backlight_on)
    }

    /// Apply a demand change
    ///
    /// Returns the transition that actually took effect: a `Start` on a
    /// blinker that is already running comes back as `Unchanged`.
    pub fn apply(&mut self, transition: BlinkTransition) -> BlinkTransition {
        match transition {
            BlinkTransition::Start if self.start() => BlinkTransition::Start,
            BlinkTransition::Stop if self.running => {
                self.stop();
                BlinkTransition::Stop
            }
            BlinkTransition::Stop => {
                self.stop();
                BlinkTransition::Unchanged
            }
            _ => BlinkTransition::Unchanged,
        }
    }

    /// Whether the blink activity is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current backlight level
    pub fn backlight(&self) -> bool {
        self.backlight_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_blinker_keeps_backlight_on() {
        let mut blinker = Blinker::new();
        assert!(!blinker.is_running());
        assert!(blinker.backlight());
        assert_eq!(blinker.advance(), None);
        assert!(blinker.backlight());
    }

    #[test]
    fn test_first_phase_is_off() {
        let mut blinker = Blinker::new();
        assert!(blinker.start());
        assert_eq!(blinker.advance(), Some(false));
        assert_eq!(blinker.advance(), Some(true));
        assert_eq!(blinker.advance(), Some(false));
    }

    #[test]
    fn test_duplicate_start_ignored() {
        let mut blinker = Blinker::new();
        assert!(blinker.start());
        blinker.advance();
        assert!(!blinker.start());
        // Phase untouched by the second start
        assert!(!blinker.backlight());
    }

    #[test]
    fn test_stop_forces_backlight_on() {
        let mut blinker = Blinker::new();
        blinker.start();
        blinker.advance();
        assert!(!blinker.backlight());

        blinker.stop();
        assert!(!blinker.is_running());
        assert!(blinker.backlight());
    }

    #[test]
    fn test_apply_reports_effective_transition() {
        let mut blinker = Blinker::new();
        assert_eq!(blinker.apply(BlinkTransition::Start), BlinkTransition::Start);
        assert_eq!(blinker.apply(BlinkTransition::Start), BlinkTransition::Unchanged);
        assert_eq!(blinker.apply(BlinkTransition::Stop), BlinkTransition::Stop);
        assert_eq!(blinker.apply(BlinkTransition::Stop), BlinkTransition::Unchanged);
        assert_eq!(blinker.apply(BlinkTransition::Unchanged), BlinkTransition::Unchanged);
    }

    #[test]
    fn test_transition_between() {
        assert_eq!(BlinkTransition::between(false, true), BlinkTransition::Start);
        assert_eq!(BlinkTransition::between(true, false), BlinkTransition::Stop);
        assert_eq!(BlinkTransition::between(true, true), BlinkTransition::Unchanged);
        assert_eq!(BlinkTransition::between(false, false), BlinkTransition::Unchanged);
    }
}
