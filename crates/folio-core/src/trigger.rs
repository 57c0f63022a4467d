//! One-shot actions bound to a progress threshold.
//!
//! The segment evaluation in [`crate::timeline`] is a pure function of
//! progress. Triggers are the one place that needs history: to know that a
//! threshold was *crossed* we must remember the previous progress, and to keep
//! jitter around the threshold from re-firing we keep a boolean latch per
//! trigger and direction. Both live in [`TriggerLatches`].

use crate::constants::TRIGGER_HYSTERESIS;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Which crossings of the threshold fire the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Both,
}

impl Direction {
    fn watches(self, crossing: Crossing) -> bool {
        matches!(
            (self, crossing),
            (Direction::Both, _)
                | (Direction::Forward, Crossing::Forward)
                | (Direction::Backward, Crossing::Backward)
        )
    }
}

/// Direction of a single observed crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crossing {
    Forward,
    Backward,
}

/// Zero-duration, edge-fired action at `at`.
pub struct Trigger {
    pub key: String,
    pub at: f32,
    pub direction: Direction,
    action: Box<dyn FnMut()>,
}

impl Trigger {
    pub fn new(
        key: impl Into<String>,
        at: f32,
        direction: Direction,
        action: impl FnMut() + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            at: at.clamp(0.0, 1.0),
            direction,
            action: Box::new(action),
        }
    }

    fn fire(&mut self) {
        (self.action)();
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("key", &self.key)
            .field("at", &self.at)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

// Progress is clamped to [0, 1], so a threshold on either end can only be
// reached, never passed. Resting on 0 counts as before a threshold at 0;
// returning to the end a threshold sits on releases its latch.
fn before(progress: f32, at: f32) -> bool {
    progress < at || at_start(progress, at)
}

fn at_start(progress: f32, at: f32) -> bool {
    at <= 0.0 && progress <= at
}

fn after_end(progress: f32, at: f32) -> bool {
    at >= 1.0 && progress >= at
}

/// Previous progress plus the fired latch for every `(key, crossing)`.
#[derive(Clone, Debug)]
pub struct TriggerLatches {
    last: Option<f32>,
    fired: FnvHashMap<(String, Crossing), bool>,
    hysteresis: f32,
}

impl Default for TriggerLatches {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerLatches {
    pub fn new() -> Self {
        Self::with_hysteresis(TRIGGER_HYSTERESIS)
    }

    pub fn with_hysteresis(hysteresis: f32) -> Self {
        Self {
            last: None,
            fired: FnvHashMap::default(),
            hysteresis: hysteresis.max(0.0),
        }
    }

    pub fn last_progress(&self) -> Option<f32> {
        self.last
    }

    pub fn is_latched(&self, key: &str, crossing: Crossing) -> bool {
        self.fired
            .get(&(key.to_string(), crossing))
            .copied()
            .unwrap_or(false)
    }

    /// Observe `progress` and fire every trigger whose threshold was crossed
    /// since the previous observation. The first observation counts as coming
    /// from progress 0. Returns the keys fired, in trigger order.
    pub fn update(&mut self, progress: f32, triggers: &mut [Trigger]) -> SmallVec<[String; 4]> {
        let prev = self.last.unwrap_or(0.0);
        let cur = progress;
        self.last = Some(cur);

        let mut fired_keys = SmallVec::new();
        for trig in triggers.iter_mut() {
            let mut fire = false;
            if trig.direction.watches(Crossing::Forward) {
                let latch = self
                    .fired
                    .entry((trig.key.clone(), Crossing::Forward))
                    .or_insert(false);
                if *latch && (cur < trig.at - self.hysteresis || at_start(cur, trig.at)) {
                    *latch = false;
                }
                if !*latch && before(prev, trig.at) && !before(cur, trig.at) {
                    *latch = true;
                    fire = true;
                    log::debug!("[trigger] {} forward at {:.3}", trig.key, cur);
                }
            }
            if trig.direction.watches(Crossing::Backward) {
                let latch = self
                    .fired
                    .entry((trig.key.clone(), Crossing::Backward))
                    .or_insert(false);
                if *latch && (cur > trig.at + self.hysteresis || after_end(cur, trig.at)) {
                    *latch = false;
                }
                if !*latch && !before(prev, trig.at) && before(cur, trig.at) {
                    *latch = true;
                    fire = true;
                    log::debug!("[trigger] {} backward at {:.3}", trig.key, cur);
                }
            }
            if fire {
                trig.fire();
                fired_keys.push(trig.key.clone());
            }
        }
        fired_keys
    }
}
