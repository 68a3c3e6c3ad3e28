//! Button pad predicate engine
//!
//! Fed the raw 8-bit button mask once per tick; everything else is derived
//! from the previous-tick snapshot. All-of predicates require every masked
//! bit; any-of predicates require a nonzero intersection.

/// Button bit assignments shared by all drivers.
pub mod buttons {
    pub const A: u8 = 1 << 0;
    pub const B: u8 = 1 << 1;
    pub const UP: u8 = 1 << 2;
    pub const DOWN: u8 = 1 << 3;
    pub const LEFT: u8 = 1 << 4;
    pub const RIGHT: u8 = 1 << 5;
}

/// Predicate kinds the control list can register against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadPredicate {
    JustPressed,
    JustReleased,
    Held,
    Repeating,
    DelayedRepeating,
    AnyJustPressed,
    AnyRepeating,
    AnyDelayedRepeating,
}

/// Default frames a button must be held before it starts repeating.
pub const DEFAULT_REPEAT_DELAY: u8 = 10;

/// Combo history depth (most-recent-first).
pub const COMBO_MEMORY_SLOTS: usize = 10;

/// Idle frames with no buttons down before the combo history clears.
const COMBO_MEMORY_CLEAR_FRAMES: u8 = 30;

/// Per-tick button state engine over an 8-bit bitmask.
#[derive(Debug, Clone)]
pub struct Pad {
    prev: u8,
    curr: u8,

    held: u8,
    pressed: u8,
    released: u8,
    repeating: u8,

    frame_counter: u8,
    repeat_delay: u8,
    timers: [u8; 8],

    combo_memory: [u8; COMBO_MEMORY_SLOTS],
    combo_idle_frames: u8,
    memory_cleared: bool,
}

impl Default for Pad {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_DELAY)
    }
}

impl Pad {
    /// Create a pad with the given repeat delay in frames.
    pub fn new(repeat_delay: u8) -> Self {
        Self {
            prev: 0,
            curr: 0,
            held: 0,
            pressed: 0,
            released: 0,
            repeating: 0,
            frame_counter: 0,
            repeat_delay,
            timers: [0; 8],
            combo_memory: [0; COMBO_MEMORY_SLOTS],
            combo_idle_frames: 0,
            memory_cleared: true,
        }
    }

    pub fn set_repeat_delay(&mut self, frames: u8) {
        self.repeat_delay = frames;
    }

    pub fn repeat_delay(&self) -> u8 {
        self.repeat_delay
    }

    /// Feed this tick's raw button mask and recompute all derived masks.
    ///
    /// Must be called exactly once per tick, before any predicate queries
    /// or control dispatch for that tick.
    pub fn update(&mut self, mask: u8) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.prev = self.curr;
        self.curr = mask;

        self.held = self.prev & self.curr;
        self.released = (self.prev ^ self.curr) & self.prev;
        self.pressed = (self.prev ^ self.curr) & self.curr;

        for bit in 0..8 {
            if self.held & (1 << bit) != 0 && self.timers[bit] < self.repeat_delay {
                self.timers[bit] += 1;
            }
            if self.released & (1 << bit) != 0 {
                self.timers[bit] = 0;
            }
        }

        self.repeating = 0;
        for bit in 0..8 {
            if self.timers[bit] >= self.repeat_delay {
                self.repeating |= 1 << bit;
            }
        }

        if self.prev != self.curr {
            // New button combo pressed
            if self.curr != 0 {
                self.shift_combo_memory();
                self.combo_memory[0] = self.curr;
                self.memory_cleared = false;
            }
            self.combo_idle_frames = 0;
        }

        self.combo_idle_frames = self.combo_idle_frames.saturating_add(1);

        if self.curr == 0 && self.combo_idle_frames == COMBO_MEMORY_CLEAR_FRAMES {
            self.clear_combo_memory();
        }
    }

    /// Evaluate a registered predicate kind against a mask.
    ///
    /// `every` only applies to the delayed-repeating kinds (fire once every
    /// `every` ticks while repeating); zero is treated as every tick.
    pub fn check(&self, predicate: PadPredicate, mask: u8, every: u8) -> bool {
        match predicate {
            PadPredicate::JustPressed => self.just_pressed(mask),
            PadPredicate::JustReleased => self.just_released(mask),
            PadPredicate::Held => self.is_held(mask),
            PadPredicate::Repeating => self.is_repeating(mask),
            PadPredicate::DelayedRepeating => self.delayed_repeating(mask, every),
            PadPredicate::AnyJustPressed => self.any_just_pressed(mask),
            PadPredicate::AnyRepeating => self.any_repeating(mask),
            PadPredicate::AnyDelayedRepeating => self.any_delayed_repeating(mask, every),
        }
    }

    /// Every masked button went down this tick.
    pub fn just_pressed(&self, mask: u8) -> bool {
        self.pressed & mask == mask
    }

    /// Every masked button went up this tick.
    pub fn just_released(&self, mask: u8) -> bool {
        self.released & mask == mask
    }

    /// Every masked button was down last tick and this tick.
    pub fn is_held(&self, mask: u8) -> bool {
        self.held & mask == mask
    }

    /// Every masked button has been held past the repeat delay.
    pub fn is_repeating(&self, mask: u8) -> bool {
        self.repeating & mask == mask
    }

    /// Repeating, throttled to once every `every` ticks.
    pub fn delayed_repeating(&self, mask: u8, every: u8) -> bool {
        self.frame_counter % every.max(1) == 0 && self.is_repeating(mask)
    }

    /// At least one masked button went down this tick.
    pub fn any_just_pressed(&self, mask: u8) -> bool {
        self.pressed & mask != 0
    }

    /// At least one masked button is repeating.
    pub fn any_repeating(&self, mask: u8) -> bool {
        self.repeating & mask != 0
    }

    /// Any-of repeating, throttled to once every `every` ticks.
    pub fn any_delayed_repeating(&self, mask: u8, every: u8) -> bool {
        self.frame_counter % every.max(1) == 0 && self.any_repeating(mask)
    }

    /// Most-recent-first history of button combinations.
    ///
    /// Slot 0 is the newest combo; zero slots are empty. Exposed for
    /// combo-detection layers above this one.
    pub fn combo_history(&self) -> &[u8; COMBO_MEMORY_SLOTS] {
        &self.combo_memory
    }

    /// Wrapping per-tick frame counter, used by the delayed predicates.
    pub fn frame_counter(&self) -> u8 {
        self.frame_counter
    }

    fn shift_combo_memory(&mut self) {
        for slot in (1..COMBO_MEMORY_SLOTS).rev() {
            self.combo_memory[slot] = self.combo_memory[slot - 1];
        }
        self.combo_memory[0] = 0;
    }

    fn clear_combo_memory(&mut self) {
        if !self.memory_cleared {
            self.combo_memory = [0; COMBO_MEMORY_SLOTS];
        }
        self.memory_cleared = true;
    }
}
