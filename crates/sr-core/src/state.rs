//! Cyclic state machine
//!
//! Generic transition engine over a contiguous, bounded enumeration. The
//! declared ring (`MIN..=MAX`) may be narrower than the full enumeration;
//! wraparound is modular arithmetic over the declared span, independent of
//! the enumeration's representation.

/// A contiguous, bounded, cyclic state enumeration.
///
/// Implementors declare the ring bounds as associated constants and map
/// states to ordinals. `from_ordinal` is the inverse of `ordinal` and
/// returns `None` outside the enumeration.
pub trait CyclicState: Copy + Eq {
    /// First state of the declared ring.
    const MIN: Self;
    /// Last state of the declared ring.
    const MAX: Self;

    /// Ordinal of this state within the enumeration.
    fn ordinal(self) -> u8;

    /// State for a given ordinal, if one exists.
    fn from_ordinal(ordinal: u8) -> Option<Self>;
}

/// Generic state machine over a [`CyclicState`].
///
/// Out-of-ring targets are silently rejected by [`set_state`](Self::set_state);
/// driving values are internally generated, not externally untrusted.
#[derive(Debug, Clone)]
pub struct StateMachine<S: CyclicState> {
    current: S,
    transition_finished: bool,
}

impl<S: CyclicState> StateMachine<S> {
    /// Create a machine in `initial`, with the transition flag set.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transition_finished: true,
        }
    }

    /// Current state.
    pub fn state(&self) -> S {
        self.current
    }

    /// Is the machine currently in `state`?
    pub fn is_state(&self, state: S) -> bool {
        self.current == state
    }

    /// Set the current state.
    ///
    /// Targets outside `MIN..=MAX` leave the state unchanged and the
    /// transition flag untouched.
    pub fn set_state(&mut self, target: S) {
        if Self::in_ring(target) {
            self.current = target;
            self.transition_finished = false;
        }
    }

    /// Step forward one state, wrapping from `MAX` back to `MIN`.
    pub fn next_state(&mut self) {
        self.step(1);
    }

    /// Step backward one state, wrapping from `MIN` up to `MAX`.
    pub fn previous_state(&mut self) {
        self.step(-1);
    }

    /// Has the owner marked the last transition's effects as finished?
    ///
    /// Starts `true`; cleared on every successful transition (including
    /// wrap); only set again by [`mark_transition_finished`](Self::mark_transition_finished).
    /// Lets an owner gate multi-tick transition effects (animations, audio)
    /// independently of the raw state value.
    pub fn is_transition_finished(&self) -> bool {
        self.transition_finished
    }

    /// Mark the current transition's effects as finished.
    pub fn mark_transition_finished(&mut self) {
        self.transition_finished = true;
    }

    fn in_ring(state: S) -> bool {
        let ord = state.ordinal();
        ord >= S::MIN.ordinal() && ord <= S::MAX.ordinal()
    }

    fn step(&mut self, delta: i16) {
        let min = S::MIN.ordinal() as i16;
        let span = S::MAX.ordinal() as i16 - min + 1;
        let offset = (self.current.ordinal() as i16 - min + delta).rem_euclid(span);
        // from_ordinal cannot fail for an ordinal inside the declared ring
        if let Some(next) = S::from_ordinal((min + offset) as u8) {
            self.current = next;
            self.transition_finished = false;
        }
    }
}
