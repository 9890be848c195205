//! Button sampling for the display loop

use panelmux_protocol::ButtonCode;

use crate::traits::{ButtonSource, ReleaseOutcome};

/// One logical button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Press {
    /// Code sampled when the press was seen
    pub code: ButtonCode,
    /// How the wait for release ended
    pub outcome: ReleaseOutcome,
}

/// Sample the buttons and collapse a held press into one event
///
/// Returns `None` if nothing is held. Otherwise waits up to `hold_ms` for
/// release and returns the code sampled before the wait, whatever the
/// buttons did in between.
pub async fn next_press<B: ButtonSource>(buttons: &mut B, hold_ms: u32) -> Option<Press> {
    let code = buttons.current_button();
    if !code.is_pressed() {
        return None;
    }
    let outcome = buttons.wait_for_release(hold_ms).await;
    Some(Press { code, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::future::{ready, Future};

    use embassy_futures::block_on;
    use heapless::Vec;

    use crate::channel::ChannelId;
    use crate::state::{Multiplexer, Transition};
    use crate::traits::DisplaySink;

    /// Scripted buttons: each wait consumes the next (state after, outcome)
    struct FakeButtons {
        held: ButtonCode,
        script: Vec<(ButtonCode, ReleaseOutcome), 4>,
        waits: usize,
        last_hold_ms: u32,
    }

    impl FakeButtons {
        fn new(held: ButtonCode, script: &[(ButtonCode, ReleaseOutcome)]) -> Self {
            Self {
                held,
                script: Vec::from_slice(script).unwrap(),
                waits: 0,
                last_hold_ms: 0,
            }
        }
    }

    impl ButtonSource for FakeButtons {
        fn current_button(&self) -> ButtonCode {
            self.held
        }

        fn wait_for_release(&mut self, hold_ms: u32) -> impl Future<Output = ReleaseOutcome> {
            self.last_hold_ms = hold_ms;
            let (after, outcome) = self.script[self.waits];
            self.waits += 1;
            self.held = after;
            ready(outcome)
        }
    }

    struct NullSink;

    impl DisplaySink for NullSink {
        fn write_line(&mut self, _row: u8, _col: u8, _text: &str) {}
        fn set_backlight(&mut self, _on: bool) {}
    }

    fn mux_with(channels: usize) -> Multiplexer {
        let mut mux = Multiplexer::default();
        for _ in 1..channels {
            mux.allocate_channel().unwrap();
        }
        mux
    }

    #[test]
    fn test_idle_buttons_skip_wait() {
        let mut buttons = FakeButtons::new(ButtonCode::None, &[]);
        assert_eq!(block_on(next_press(&mut buttons, 500)), None);
        assert_eq!(buttons.waits, 0);
    }

    #[test]
    fn test_quick_release() {
        let mut buttons = FakeButtons::new(
            ButtonCode::Right,
            &[(ButtonCode::None, ReleaseOutcome::Released)],
        );
        let press = block_on(next_press(&mut buttons, 500)).unwrap();
        assert_eq!(press.code, ButtonCode::Right);
        assert_eq!(press.outcome, ReleaseOutcome::Released);
        assert_eq!(buttons.last_hold_ms, 500);
    }

    #[test]
    fn test_code_sampled_before_wait_is_dispatched() {
        // Left held, then Center joins during the wait
        let mut buttons = FakeButtons::new(
            ButtonCode::Left,
            &[(ButtonCode::Chord(3), ReleaseOutcome::TimedOut)],
        );
        let mut mux = mux_with(3);

        let press = block_on(next_press(&mut buttons, 500)).unwrap();
        assert_eq!(press.code, ButtonCode::Left);
        assert_eq!(buttons.current_button(), ButtonCode::Chord(3));

        let transition = mux.cycle(press.code, &mut NullSink);
        assert_eq!(
            transition,
            Transition::Switched {
                from: ChannelId::new(0),
                to: ChannelId::new(1),
            }
        );
    }

    #[test]
    fn test_timed_out_hold_is_one_event() {
        let mut buttons = FakeButtons::new(
            ButtonCode::Left,
            &[
                (ButtonCode::Left, ReleaseOutcome::TimedOut),
                (ButtonCode::None, ReleaseOutcome::Released),
            ],
        );
        let mut mux = mux_with(4);

        let press = block_on(next_press(&mut buttons, 500)).unwrap();
        assert_eq!(press.outcome, ReleaseOutcome::TimedOut);
        assert_eq!(buttons.waits, 1);
        mux.cycle(press.code, &mut NullSink);
        assert_eq!(mux.current_channel().raw(), 1);

        // Still held on the next cycle: a second event, not a burst
        let press = block_on(next_press(&mut buttons, 500)).unwrap();
        assert_eq!(press.outcome, ReleaseOutcome::Released);
        mux.cycle(press.code, &mut NullSink);
        assert_eq!(mux.current_channel().raw(), 2);

        assert_eq!(block_on(next_press(&mut buttons, 500)), None);
        assert_eq!(buttons.waits, 2);
    }
}
