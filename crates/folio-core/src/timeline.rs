//! Scroll timeline player.
//!
//! A timeline is an ordered list of [`Segment`]s, each interpolating one field
//! of one target across a progress interval. [`ScrollTimeline::apply`] writes
//! every segment's value for the given progress. The result depends only on the
//! progress passed in, never on the sequence of earlier calls, so scroll jumps
//! (fast flicks, scroll restoration, back/forward) always land on the same
//! frame.

use crate::constants::SEGMENT_EPSILON;
use crate::easing::{Easing, EasingError};
use crate::target::{Animatable, Field, TargetId, Targets};
use crate::trigger::{Trigger, TriggerLatches};
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimelineError {
    #[error("segment {target}.{field}: start {start} is after end {end}")]
    Inverted {
        target: TargetId,
        field: Field,
        start: f32,
        end: f32,
    },
    #[error("progress {0} is outside [0, 1]")]
    OutOfRange(f32),
    #[error(transparent)]
    Easing(#[from] EasingError),
}

/// Interpolation rule for one field of one target over `[start, end]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub target: TargetId,
    pub field: Field,
    /// Start value. `None` takes the value the field has when the target
    /// first appears (or the end value of an earlier segment on the same field).
    pub from: Option<f32>,
    pub to: f32,
    pub start: f32,
    pub end: f32,
    pub easing: Easing,
}

fn check_progress(p: f32) -> Result<f32, TimelineError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(TimelineError::OutOfRange(p))
    }
}

impl Segment {
    pub fn new(
        target: impl Into<TargetId>,
        field: impl Into<Field>,
        from: Option<f32>,
        to: f32,
        start: f32,
        end: f32,
        easing: Easing,
    ) -> Result<Self, TimelineError> {
        let target = target.into();
        let field = field.into();
        let start = check_progress(start)?;
        let end = check_progress(end)?;
        if start > end {
            return Err(TimelineError::Inverted {
                target,
                field,
                start,
                end,
            });
        }
        Ok(Self {
            target,
            field,
            from,
            to,
            start,
            end,
            easing,
        })
    }

    /// Local progress within the segment, clamped to `[0, 1]`. A zero-length
    /// segment is a step at `start`.
    pub fn local_t(&self, progress: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if progress >= self.start { 1.0 } else { 0.0 };
        }
        ((progress - self.start) / span.max(SEGMENT_EPSILON)).clamp(0.0, 1.0)
    }

    /// How far `progress` lies outside `[start, end]`; 0 inside.
    #[inline]
    pub fn distance(&self, progress: f32) -> f32 {
        if progress < self.start {
            self.start - progress
        } else if progress > self.end {
            progress - self.end
        } else {
            0.0
        }
    }

    pub fn value_at(&self, from: f32, progress: f32) -> f32 {
        let eased = self.easing.apply(self.local_t(progress));
        from + (self.to - from) * eased
    }
}

/// Clamp externally supplied progress into `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Declarative description of a timeline, built once the asset is ready.
#[derive(Debug, Default)]
pub struct Timeline {
    segments: Vec<Segment>,
    triggers: Vec<Trigger>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Append a segment; `easing` is looked up by name.
    pub fn tween(
        self,
        target: &str,
        field: &str,
        from: Option<f32>,
        to: f32,
        range: (f32, f32),
        easing: &str,
    ) -> Result<Self, TimelineError> {
        let easing = Easing::from_name(easing)?;
        let seg = Segment::new(target, field, from, to, range.0, range.1, easing)?;
        Ok(self.segment(seg))
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }
}

/// History a player hands on to its replacement when the timeline is rebuilt:
/// trigger latches plus the latched starts of `from: None` segments.
#[derive(Clone, Debug, Default)]
pub struct PlayerMemory {
    pub latches: TriggerLatches,
    // Keyed by target, field and the segment's ordinal among segments on
    // that same target and field.
    starts: FnvHashMap<(TargetId, Field, usize), f32>,
}

impl PlayerMemory {
    pub fn resolved_start(&self, target: &TargetId, field: &Field, ordinal: usize) -> Option<f32> {
        self.starts
            .get(&(target.clone(), field.clone(), ordinal))
            .copied()
    }
}

// Position of each segment among the segments sharing its target and field.
fn field_ordinals(segments: &[Segment]) -> Vec<usize> {
    let mut seen: FnvHashMap<(&TargetId, &Field), usize> = FnvHashMap::default();
    segments
        .iter()
        .map(|s| {
            let n = seen.entry((&s.target, &s.field)).or_insert(0);
            *n += 1;
            *n - 1
        })
        .collect()
}

/// Player for a [`Timeline`].
#[derive(Debug)]
pub struct ScrollTimeline {
    segments: Vec<Segment>,
    resolved_from: Vec<Option<f32>>,
    reported: Vec<bool>,
    triggers: Vec<Trigger>,
    latches: TriggerLatches,
}

impl ScrollTimeline {
    pub fn new(timeline: Timeline) -> Self {
        Self::with_memory(timeline, PlayerMemory::default())
    }

    /// Build a player that continues from a previous one, e.g. when the
    /// timeline is rebuilt after a layout change. Segments that match an old
    /// `from: None` segment by target, field and ordinal reuse its start, so
    /// the same progress lands on the same values.
    pub fn with_memory(timeline: Timeline, memory: PlayerMemory) -> Self {
        let Timeline { segments, triggers } = timeline;
        let resolved_from = segments
            .iter()
            .zip(field_ordinals(&segments))
            .map(|(s, n)| s.from.or_else(|| memory.resolved_start(&s.target, &s.field, n)))
            .collect();
        let reported = vec![false; segments.len()];
        Self {
            segments,
            resolved_from,
            reported,
            triggers,
            latches: memory.latches,
        }
    }

    pub fn into_memory(self) -> PlayerMemory {
        let mut starts = FnvHashMap::default();
        for ((seg, n), from) in self
            .segments
            .iter()
            .zip(field_ordinals(&self.segments))
            .zip(&self.resolved_from)
        {
            if let (None, Some(v)) = (seg.from, from) {
                starts.insert((seg.target.clone(), seg.field.clone(), n), *v);
            }
        }
        PlayerMemory {
            latches: self.latches,
            starts,
        }
    }

    pub fn latches(&self) -> &TriggerLatches {
        &self.latches
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Start value a segment will interpolate from, once known.
    pub fn resolved_from(&self, index: usize) -> Option<f32> {
        self.resolved_from.get(index).copied().flatten()
    }

    /// Evaluate every segment at `progress` and write the results, then fire
    /// any trigger crossed since the previous call. Returns the fired trigger
    /// keys.
    pub fn apply(&mut self, progress: f32, targets: &mut Targets) -> SmallVec<[String; 4]> {
        let p = clamp_progress(progress);
        self.evaluate(p, targets);
        self.latches.update(p, &mut self.triggers)
    }

    /// Segment evaluation only; no trigger bookkeeping.
    pub fn evaluate(&mut self, progress: f32, targets: &mut Targets) {
        let p = clamp_progress(progress);
        self.resolve_pending(targets);

        let mut unwritable: SmallVec<[usize; 4]> = SmallVec::new();
        for (i, seg) in self.segments.iter().enumerate() {
            if self.is_shadowed(i, p) {
                continue;
            }
            let Some(target) = targets.get_mut(&seg.target) else {
                continue;
            };
            match self.resolved_from[i] {
                Some(from) if target.set(&seg.field, seg.value_at(from, p)) => {}
                _ => unwritable.push(i),
            }
        }
        for i in unwritable {
            self.report_unwritable(i);
        }
    }

    // Another segment on the same (target, field) decides the value at `p`:
    // a later one at least as close, or an earlier one strictly closer.
    fn is_shadowed(&self, index: usize, p: f32) -> bool {
        let seg = &self.segments[index];
        let d = seg.distance(p);
        self.segments.iter().enumerate().any(|(j, other)| {
            j != index
                && other.target == seg.target
                && other.field == seg.field
                && if j > index {
                    other.distance(p) <= d
                } else {
                    other.distance(p) < d
                }
        })
    }

    // Latch `from: None` segments whose target has just become available.
    // Runs before any write in the current call.
    fn resolve_pending(&mut self, targets: &Targets) {
        for i in 0..self.segments.len() {
            if self.resolved_from[i].is_some() {
                continue;
            }
            let seg = &self.segments[i];
            let Some(target) = targets.get(&seg.target) else {
                continue;
            };
            let chained = self.segments[..i]
                .iter()
                .rev()
                .find(|s| s.target == seg.target && s.field == seg.field)
                .map(|s| s.to);
            self.resolved_from[i] = chained.or_else(|| target.get(&seg.field));
        }
    }

    fn report_unwritable(&mut self, index: usize) {
        if !self.reported[index] {
            self.reported[index] = true;
            let seg = &self.segments[index];
            log::debug!(
                "[timeline] {} has no field {}; segment skipped",
                seg.target,
                seg.field
            );
        }
    }
}
