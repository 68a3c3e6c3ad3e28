//! Reel spin controller
//!
//! One reel = one cyclic state machine plus a fixed-point position
//! simulation. Position is an integer strip index plus a scaled
//! sub-position within the current symbol's pitch (1000 = one pitch).
//! The advance step normalizes a single wrap per tick, so per-tick speed
//! must stay below one pitch (checked by [`ReelConfig::validate`]).

use std::cell::RefCell;
use std::rc::Rc;

use sr_core::{
    CyclicState, Renderable, SrError, SrResult, StateMachine, SymbolRenderer, Updateable,
    SCALE_FACTOR,
};
use sr_input::{buttons, ControlList, Controllable, PadPredicate};

use crate::config::ReelConfig;
use crate::sprite::SymbolSprite;
use crate::strip::{SymbolSet, SymbolStrip, INVALID_SYMBOL};

/// Reel lifecycle phases, step-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelState {
    Stopped,
    Starting,
    Spinning,
    Stopping,
    Nudging,
}

impl CyclicState for ReelState {
    const MIN: Self = ReelState::Stopped;
    const MAX: Self = ReelState::Nudging;

    fn ordinal(self) -> u8 {
        match self {
            ReelState::Stopped => 0,
            ReelState::Starting => 1,
            ReelState::Spinning => 2,
            ReelState::Stopping => 3,
            ReelState::Nudging => 4,
        }
    }

    fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(ReelState::Stopped),
            1 => Some(ReelState::Starting),
            2 => Some(ReelState::Spinning),
            3 => Some(ReelState::Stopping),
            4 => Some(ReelState::Nudging),
            _ => None,
        }
    }
}

/// One mechanical reel.
pub struct Reel {
    sprites: Vec<SymbolSprite>,
    symbol_ids: Vec<i32>,
    symbol_size: i32,
    visible_symbols: usize,

    pos_x: i32,
    pos_y: i32,

    current_position: usize,
    sub_position: i32,
    spin_direction: i32,

    spin_speed: i32,
    current_spin_speed: i32,
    spin_up_rate: i32,
    spin_down_rate: i32,
    nudge_speed: i32,

    spin_frames: u32,
    min_spin_duration: u32,
    max_spin_duration: u32,
    pending_stop: bool,

    nudges: i32,

    debug_output: bool,
    state: StateMachine<ReelState>,
}

impl Reel {
    /// Build a reel from a shared art set, a strip layout, and a config.
    ///
    /// Fails if the config is invalid or the strip references a symbol ID
    /// the art set does not contain.
    pub fn new(set: &SymbolSet, strip: SymbolStrip, config: &ReelConfig) -> SrResult<Self> {
        config.validate()?;
        if strip.is_empty() {
            return Err(SrError::InvalidParam(
                "strip must contain at least one symbol".to_string(),
            ));
        }

        let sprites = strip
            .ids()
            .iter()
            .map(|&id| {
                set.image(id)
                    .map(|image| SymbolSprite::new(image, config.symbol_size, config.frame_rate))
                    .ok_or_else(|| {
                        SrError::InvalidParam(format!("strip references unknown symbol id {id}"))
                    })
            })
            .collect::<SrResult<Vec<_>>>()?;

        Ok(Self {
            sprites,
            symbol_ids: strip.ids().to_vec(),
            symbol_size: config.symbol_size,
            visible_symbols: config.visible_symbols,
            pos_x: 0,
            pos_y: 0,
            current_position: 0,
            sub_position: 0,
            spin_direction: config.spin_direction,
            spin_speed: config.spin_speed,
            current_spin_speed: 0,
            spin_up_rate: config.spin_up_rate,
            spin_down_rate: config.spin_down_rate,
            nudge_speed: config.nudge_speed,
            spin_frames: 0,
            min_spin_duration: config.min_spin_duration,
            max_spin_duration: config.max_spin_duration,
            pending_stop: false,
            nudges: 0,
            debug_output: false,
            state: StateMachine::new(ReelState::Stopped),
        })
    }

    // ── control operations ──

    /// The play/stop button.
    ///
    /// Stopped: start spinning. Spinning past the minimum duration: stop
    /// now. Spinning before it: latch a pending stop, consumed on the
    /// first eligible tick. Ignored in every other phase.
    pub fn play_button(&mut self) {
        match self.state.state() {
            ReelState::Stopped => self.enter(ReelState::Starting),
            ReelState::Spinning => {
                if self.spin_frames >= self.min_spin_duration {
                    self.enter(ReelState::Stopping);
                } else {
                    self.pending_stop = true;
                }
            }
            _ => {}
        }
    }

    /// Queue `count` single-symbol post-stop adjustments (sign = direction).
    ///
    /// Only honored while the reel is not spinning (Stopped or Starting);
    /// forces the stop sequence so the nudges resolve.
    pub fn add_nudge(&mut self, count: i32) {
        if !self.is_spinning() {
            self.nudges += count;
            self.enter(ReelState::Stopping);
        }
    }

    // ── queries ──

    /// Spinning in the wide sense: any phase with the reel in motion.
    pub fn is_spinning(&self) -> bool {
        matches!(
            self.state.state(),
            ReelState::Spinning | ReelState::Stopping | ReelState::Nudging
        )
    }

    pub fn state(&self) -> ReelState {
        self.state.state()
    }

    pub fn current_position(&self) -> usize {
        self.current_position
    }

    /// Scaled offset within the current symbol's pitch.
    pub fn sub_position(&self) -> i32 {
        self.sub_position
    }

    pub fn current_spin_speed(&self) -> i32 {
        self.current_spin_speed
    }

    pub fn spin_frames(&self) -> u32 {
        self.spin_frames
    }

    pub fn pending_stop(&self) -> bool {
        self.pending_stop
    }

    pub fn nudges(&self) -> i32 {
        self.nudges
    }

    /// Strip length N.
    pub fn symbol_count(&self) -> usize {
        self.symbol_ids.len()
    }

    /// Symbol ID at visible slot `index`, or [`INVALID_SYMBOL`] out of range.
    pub fn visible_symbol_id(&self, index: usize) -> i32 {
        if index < self.visible_symbols {
            self.symbol_ids[(self.current_position + index) % self.symbol_ids.len()]
        } else {
            INVALID_SYMBOL
        }
    }

    // ── setters ──

    /// Screen placement of the window's top-left slot.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.pos_x = x;
        self.pos_y = y;
    }

    /// Set spin direction; anything but +1/-1 is ignored.
    pub fn set_spin_direction(&mut self, direction: i32) {
        if direction == 1 || direction == -1 {
            self.spin_direction = direction;
        }
    }

    pub fn set_spin_rates(&mut self, up_rate: i32, down_rate: i32) {
        self.spin_up_rate = up_rate;
        self.spin_down_rate = down_rate;
    }

    pub fn set_spin_speed(&mut self, speed: i32) {
        self.spin_speed = speed;
    }

    /// Log position/state/speed/nudge details at debug level each render.
    pub fn set_debug_output(&mut self, enabled: bool) {
        self.debug_output = enabled;
    }

    // ── physics helpers ──

    fn enter(&mut self, next: ReelState) {
        log::debug!("reel {:?} -> {:?}", self.state.state(), next);
        self.state.set_state(next);
    }

    fn step_position(&self, direction: i32) -> usize {
        let n = self.symbol_ids.len() as i32;
        (self.current_position as i32 + direction).rem_euclid(n) as usize
    }

    /// One position-advance step at the instantaneous speed, normalizing a
    /// single wrap in either direction.
    fn advance(&mut self) {
        self.sub_position += self.current_spin_speed * self.spin_direction;

        if self.sub_position >= SCALE_FACTOR {
            self.current_position = self.step_position(self.spin_direction);
            self.sub_position -= SCALE_FACTOR;
        } else if self.sub_position < 0 {
            self.current_position = self.step_position(self.spin_direction);
            self.sub_position += SCALE_FACTOR;
        }

        if self.debug_output {
            log::trace!(
                "reel step pos={} sub={} speed={}",
                self.current_position,
                self.sub_position,
                self.current_spin_speed
            );
        }
    }

    fn spin_up(&mut self) {
        if self.current_spin_speed < self.spin_speed {
            self.current_spin_speed = (self.current_spin_speed + self.spin_up_rate).min(self.spin_speed);
        }
    }

    /// Ramp down; once the speed has reached zero, snap to the nearer
    /// symbol in the direction of travel and hand off to the nudge phase.
    fn spin_down(&mut self) {
        if self.current_spin_speed > 0 {
            self.current_spin_speed = (self.current_spin_speed - self.spin_down_rate).max(0);
        } else {
            // Midpoint snap: half a pitch or more past the boundary in the
            // travel direction counts as the next symbol.
            if self.sub_position * self.spin_direction >= SCALE_FACTOR / 2 {
                self.current_position = self.step_position(self.spin_direction);
            }
            self.sub_position = 0;
            self.current_spin_speed = 0;
            self.enter(ReelState::Nudging);
        }
    }

    /// One nudge increment. Direction follows the sign of the outstanding
    /// nudge count, independent of the spin direction.
    fn nudge_step(&mut self) {
        self.sub_position += self.nudge_speed * self.nudges.signum();

        if self.sub_position >= SCALE_FACTOR {
            self.current_position = self.step_position(1);
            self.sub_position -= SCALE_FACTOR;
            self.nudges -= 1;
        } else if -self.sub_position >= SCALE_FACTOR {
            self.current_position = self.step_position(-1);
            self.sub_position += SCALE_FACTOR;
            self.nudges += 1;
        }

        // Residual fractional offset is discarded once the count resolves
        if self.nudges == 0 {
            self.sub_position = 0;
        }
    }
}

impl Updateable for Reel {
    /// Advance one tick: state machine transitions plus physics.
    fn update(&mut self) {
        match self.state.state() {
            ReelState::Stopped => {
                self.pending_stop = false;
            }

            ReelState::Starting => {
                self.advance();
                self.spin_up();

                if self.current_spin_speed >= self.spin_speed {
                    self.current_spin_speed = self.spin_speed;
                    self.spin_frames = 0;
                    self.enter(ReelState::Spinning);
                }
            }

            ReelState::Spinning => {
                self.spin_frames += 1;
                if self.spin_frames >= self.max_spin_duration {
                    self.enter(ReelState::Stopping);
                } else if self.pending_stop && self.spin_frames >= self.min_spin_duration {
                    self.enter(ReelState::Stopping);
                }

                self.advance();
            }

            ReelState::Stopping => {
                self.advance();
                self.spin_down();
            }

            ReelState::Nudging => {
                if self.nudges != 0 {
                    self.nudge_step();
                } else {
                    self.enter(ReelState::Stopped);
                }
            }
        }
    }
}

impl Renderable for Reel {
    /// Draw the visible window, one call per slot in slot order.
    ///
    /// Two extra slots are drawn while the reel is in motion to cover
    /// symbols partially entering and leaving the window.
    fn render(&self, target: &mut dyn SymbolRenderer) {
        let n = self.symbol_ids.len();
        let mut slots = self.visible_symbols;
        if self.is_spinning() {
            slots += 2;
        }

        for i in 0..slots {
            let symbol_index = (self.current_position + i + n - 1) % n;
            let base_offset = i as i32 * self.symbol_size;
            let fractional_offset = (self.sub_position * self.symbol_size) / SCALE_FACTOR;
            // One slot above the window so entering symbols scroll in
            let y_offset = base_offset - fractional_offset - self.symbol_size;

            self.sprites[symbol_index].render_at(self.pos_x, self.pos_y + y_offset, target);
        }

        if self.debug_output {
            log::debug!(
                "reel pos={} state={:?} pending_stop={} speed={} nudges={}",
                self.current_position,
                self.state.state(),
                self.pending_stop,
                self.current_spin_speed,
                self.nudges
            );
        }
    }
}

impl Controllable for Reel {
    /// Default cabinet binding: A or B spins/stops, UP/DOWN queue nudges.
    fn take_control(this: &Rc<RefCell<Self>>, controls: &mut ControlList) {
        let reel = Rc::clone(this);
        controls.add_control(PadPredicate::JustPressed, buttons::A, move || {
            reel.borrow_mut().play_button();
        });
        let reel = Rc::clone(this);
        controls.add_control(PadPredicate::JustPressed, buttons::B, move || {
            reel.borrow_mut().play_button();
        });
        let reel = Rc::clone(this);
        controls.add_control(PadPredicate::JustPressed, buttons::UP, move || {
            reel.borrow_mut().add_nudge(1);
        });
        let reel = Rc::clone(this);
        controls.add_control(PadPredicate::JustPressed, buttons::DOWN, move || {
            reel.borrow_mut().add_nudge(-1);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_core::{ImageHandle, RecordingRenderer};

    fn five_symbol_reel(config: &ReelConfig) -> Reel {
        let set = SymbolSet::new((0..5u32).map(ImageHandle).collect());
        let strip = SymbolStrip::new(vec![0, 1, 2, 3, 4]);
        Reel::new(&set, strip, config).unwrap()
    }

    fn tick(reel: &mut Reel, n: u32) {
        for _ in 0..n {
            reel.update();
        }
    }

    #[test]
    fn test_reference_scenario() {
        let mut reel = five_symbol_reel(&ReelConfig::default());

        reel.play_button();
        assert_eq!(reel.state(), ReelState::Starting);

        // Speed ramps 50/100/150; spinning on the third tick
        tick(&mut reel, 3);
        assert_eq!(reel.state(), ReelState::Spinning);
        assert_eq!(reel.current_spin_speed(), 150);
        assert_eq!(reel.spin_frames(), 0);

        // Early stop request at spin_frames=10 latches, no transition yet
        tick(&mut reel, 10);
        assert_eq!(reel.spin_frames(), 10);
        reel.play_button();
        assert_eq!(reel.state(), ReelState::Spinning);
        assert!(reel.pending_stop());

        // Honored on the tick spin_frames reaches the minimum
        tick(&mut reel, 49);
        assert_eq!(reel.state(), ReelState::Spinning);
        tick(&mut reel, 1);
        assert_eq!(reel.spin_frames(), 60);
        assert_eq!(reel.state(), ReelState::Stopping);
    }

    #[test]
    fn test_position_invariants_through_full_cycle() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.play_button();

        for _ in 0..400 {
            reel.update();
            assert!(reel.current_position() < reel.symbol_count());
            assert!(reel.current_spin_speed() >= 0 && reel.current_spin_speed() <= 150);
            if reel.state() != ReelState::Stopped && reel.nudges() >= 0 {
                assert!(reel.sub_position() >= 0 && reel.sub_position() < SCALE_FACTOR);
            }
        }
        assert_eq!(reel.state(), ReelState::Stopped);
        assert!(!reel.pending_stop());
    }

    #[test]
    fn test_max_duration_forces_stop() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.play_button();
        tick(&mut reel, 3); // now spinning

        // Never requests a stop; forced once spin_frames hits the max
        tick(&mut reel, 300);
        assert_eq!(reel.state(), ReelState::Stopping);
    }

    #[test]
    fn test_immediate_stop_past_minimum() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.play_button();
        tick(&mut reel, 3 + 60);
        assert!(reel.spin_frames() >= 60);
        reel.play_button();
        assert_eq!(reel.state(), ReelState::Stopping);
    }

    #[test]
    fn test_stopping_resolves_to_nudging_then_stopped() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.play_button();
        tick(&mut reel, 70);
        reel.play_button();
        assert_eq!(reel.state(), ReelState::Stopping);

        // Ramp 150 -> 0 at 10/tick, then one snap tick
        let mut saw_nudging = false;
        for _ in 0..20 {
            reel.update();
            if reel.state() == ReelState::Nudging {
                saw_nudging = true;
                break;
            }
        }
        assert!(saw_nudging);
        assert_eq!(reel.sub_position(), 0);
        assert_eq!(reel.current_spin_speed(), 0);

        // No nudges queued: one no-op tick, then stopped
        reel.update();
        assert_eq!(reel.state(), ReelState::Stopped);
    }

    #[test]
    fn test_midpoint_snap_rounds_up() {
        // Reaches cruise instantly; sub lands at 800 when the speed dies
        let config = ReelConfig {
            spin_speed: 400,
            spin_up_rate: 400,
            spin_down_rate: 400,
            min_spin_duration: 0,
            ..ReelConfig::default()
        };
        let mut reel = five_symbol_reel(&config);
        reel.play_button();
        reel.update(); // starting -> spinning, sub=0
        reel.update(); // spinning, sub=400
        reel.play_button(); // min_spin_duration=0: stop now
        reel.update(); // stopping: sub=800, speed -> 0
        reel.update(); // snap tick: 800 >= 500 rounds forward
        assert_eq!(reel.state(), ReelState::Nudging);
        assert_eq!(reel.current_position(), 1);
        assert_eq!(reel.sub_position(), 0);
    }

    #[test]
    fn test_midpoint_snap_rounds_back() {
        let config = ReelConfig {
            spin_speed: 200,
            spin_up_rate: 200,
            spin_down_rate: 200,
            min_spin_duration: 0,
            ..ReelConfig::default()
        };
        let mut reel = five_symbol_reel(&config);
        reel.play_button();
        reel.update(); // starting -> spinning
        reel.update(); // sub=200
        reel.play_button();
        reel.update(); // stopping: sub=400, speed -> 0
        reel.update(); // snap tick: 400 < 500 stays put
        assert_eq!(reel.state(), ReelState::Nudging);
        assert_eq!(reel.current_position(), 0);
    }

    #[test]
    fn test_reverse_direction_wraps_and_normalizes() {
        let config = ReelConfig {
            spin_direction: -1,
            ..ReelConfig::default()
        };
        let mut reel = five_symbol_reel(&config);
        reel.play_button();

        // First moving tick goes negative and wraps to position N-1
        tick(&mut reel, 20);
        assert!(reel.current_position() < 5);
        assert!(reel.sub_position() >= 0 && reel.sub_position() < SCALE_FACTOR);

        // Runs to completion in reverse too
        reel.play_button();
        tick(&mut reel, 400);
        assert_eq!(reel.state(), ReelState::Stopped);
    }

    #[test]
    fn test_nudge_up_shifts_one_symbol() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.add_nudge(1);
        assert_eq!(reel.state(), ReelState::Stopping);

        tick(&mut reel, 100);
        assert_eq!(reel.state(), ReelState::Stopped);
        assert_eq!(reel.current_position(), 1);
        assert_eq!(reel.nudges(), 0);
        assert_eq!(reel.sub_position(), 0);
    }

    #[test]
    fn test_nudge_down_two_shifts_back_mod_n() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.add_nudge(-2);

        tick(&mut reel, 200);
        assert_eq!(reel.state(), ReelState::Stopped);
        assert_eq!(reel.current_position(), 3);
        assert_eq!(reel.nudges(), 0);
        assert_eq!(reel.sub_position(), 0);
    }

    #[test]
    fn test_nudge_rejected_while_spinning() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.play_button();
        tick(&mut reel, 10); // spinning
        assert!(reel.is_spinning());
        reel.add_nudge(1);
        assert_eq!(reel.nudges(), 0);
        assert_eq!(reel.state(), ReelState::Spinning);
    }

    #[test]
    fn test_visible_symbol_ids() {
        let reel = five_symbol_reel(&ReelConfig::default());
        assert_eq!(reel.visible_symbol_id(0), 0);
        assert_eq!(reel.visible_symbol_id(1), 1);
        assert_eq!(reel.visible_symbol_id(2), 2);
        assert_eq!(reel.visible_symbol_id(3), INVALID_SYMBOL);
        assert_eq!(reel.visible_symbol_id(99), INVALID_SYMBOL);
    }

    #[test]
    fn test_render_window_at_rest() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.set_position(100, 50);

        let mut target = RecordingRenderer::new();
        reel.render(&mut target);

        // Three slots, offset one pitch up, wrapping one symbol behind
        assert_eq!(target.calls.len(), 3);
        assert_eq!(target.calls[0].image, ImageHandle(4));
        assert_eq!((target.calls[0].x, target.calls[0].y), (100, 34));
        assert_eq!(target.calls[1].image, ImageHandle(0));
        assert_eq!((target.calls[1].x, target.calls[1].y), (100, 50));
        assert_eq!(target.calls[2].image, ImageHandle(1));
        assert_eq!((target.calls[2].x, target.calls[2].y), (100, 66));
    }

    #[test]
    fn test_render_window_widens_while_spinning() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.play_button();
        tick(&mut reel, 10);
        assert!(reel.is_spinning());

        let mut target = RecordingRenderer::new();
        reel.render(&mut target);
        assert_eq!(target.calls.len(), 5);
    }

    #[test]
    fn test_unknown_strip_symbol_rejected() {
        let set = SymbolSet::new(vec![ImageHandle(0)]);
        let strip = SymbolStrip::new(vec![0, 7]);
        assert!(Reel::new(&set, strip, &ReelConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_spin_direction_setter_ignored() {
        let mut reel = five_symbol_reel(&ReelConfig::default());
        reel.set_spin_direction(0);
        reel.set_spin_direction(-1);
        reel.set_spin_direction(5);
        // Still a legal direction: a full cycle terminates
        reel.play_button();
        tick(&mut reel, 400);
        assert_eq!(reel.state(), ReelState::Stopped);
    }
}
