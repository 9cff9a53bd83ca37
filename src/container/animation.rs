//! Transition timing for the container.
//!
//! A transition animates one or more container properties from a start value
//! to an end value over a fixed duration. Transitions are never cancelled: each
//! one runs to its end and is reported exactly once by [`Animator::advance`].

use std::time::Duration;

/// Duration of the fade and slide transitions.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(400);
/// Duration of the drag snap-back.
pub const SNAP_BACK_DURATION: Duration = Duration::from_millis(300);

/// The two container transitions a flow can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Card slot opacity 0 -> 1 (`fade_in`) or 1 -> 0.
    Fade { fade_in: bool },
    /// Whole sheet slides up from below the screen (`slide_in`) or down off it,
    /// with the backdrop fading along.
    Slide { slide_in: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl TransitionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Container properties a transition can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    CardOpacity,
    BackdropOpacity,
    SheetOffset,
    RootLift,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub property: Property,
    pub from: f32,
    pub to: f32,
}

#[derive(Debug, Clone)]
struct Transition {
    id: TransitionId,
    tracks: Vec<Track>,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// Property values written by an [`Animator::advance`] step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tick {
    pub values: Vec<(Property, f32)>,
    pub finished: Vec<TransitionId>,
}

#[derive(Debug, Default)]
pub struct Animator {
    running: Vec<Transition>,
    next_id: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, tracks: Vec<Track>, duration: Duration, easing: Easing) -> TransitionId {
        self.next_id += 1;
        let id = TransitionId(self.next_id);
        tracing::trace!(id = id.value(), ?duration, "transition started");
        self.running.push(Transition {
            id,
            tracks,
            elapsed: Duration::ZERO,
            duration,
            easing,
        });
        id
    }

    pub fn is_running(&self) -> bool {
        !self.running.is_empty()
    }

    /// Move every running transition forward by `elapsed`.
    ///
    /// Values are emitted in start order, so when two transitions drive the
    /// same property the newer one wins. Finished ids are likewise in start
    /// order.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        let mut tick = Tick::default();
        for transition in &mut self.running {
            transition.elapsed = transition.elapsed.saturating_add(elapsed);
            let eased = transition.easing.apply(transition.progress());
            for track in &transition.tracks {
                let value = track.from + (track.to - track.from) * eased;
                tick.values.push((track.property, value));
            }
            if transition.progress() >= 1.0 {
                tick.finished.push(transition.id);
            }
        }
        self.running
            .retain(|transition| !tick.finished.contains(&transition.id));
        tick
    }
}
