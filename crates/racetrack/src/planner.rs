//! Randomized lap planning from sector templates.
//!
//! The planner draws a sector count, expands each randomly chosen
//! [`SectorTemplate`] into segments, then pads or trims the plan so that its
//! total length lands inside the configured lap bounds.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{TrackError, ensure_positive};
use crate::models::{LapPlan, PlannedSector, SectorTemplate, Segment, SegmentKind};

/// Shortest length the overflow trim leaves on a segment.
pub const TRIM_FLOOR: f64 = 100.0;

/// Length range of straights appended to reach the minimum lap length.
pub const PADDING_LENGTH: RangeInclusive<f64> = 500.0..=1500.0;

/// Sector and lap length bounds for planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub min_sectors: u32,
    pub max_sectors: u32,
    /// Minimum lap length in meters.
    pub min_lap_length: f64,
    /// Maximum lap length in meters.
    pub max_lap_length: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_sectors: 5,
            max_sectors: 7,
            min_lap_length: 4000.0,
            max_lap_length: 7000.0,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.min_sectors < 1 {
            return Err(TrackError::config("min_sectors must be at least 1"));
        }
        if self.max_sectors < self.min_sectors {
            return Err(TrackError::config(format!(
                "max_sectors ({}) < min_sectors ({})",
                self.max_sectors, self.min_sectors
            )));
        }
        ensure_positive("min_lap_length", self.min_lap_length)?;
        ensure_positive("max_lap_length", self.max_lap_length)?;
        if self.max_lap_length < self.min_lap_length {
            return Err(TrackError::config(format!(
                "max_lap_length ({}) < min_lap_length ({})",
                self.max_lap_length, self.min_lap_length
            )));
        }

        // Every template segment may be trimmed down to the floor but no further.
        let floor_length = 2.0 * f64::from(self.max_sectors) * TRIM_FLOOR;
        if self.max_lap_length < floor_length {
            return Err(TrackError::config(format!(
                "max_lap_length ({}) is below the trim floor for {} sectors ({} m, 2 segments of \
                 {} m per sector); shorter laps cannot be guaranteed to fit every draw",
                self.max_lap_length, self.max_sectors, floor_length, TRIM_FLOOR
            )));
        }
        Ok(())
    }
}

/// Builds [`LapPlan`]s from sector templates.
#[derive(Debug, Clone)]
pub struct SegmentPlanner {
    config: PlannerConfig,
}

impl SegmentPlanner {
    /// Creates a planner, rejecting invalid bounds before any work is done.
    pub fn new(config: PlannerConfig) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans one lap.
    ///
    /// Given the same RNG state the resulting plan is identical.
    pub fn plan(&self, rng: &mut impl Rng) -> LapPlan {
        let sector_count = rng.gen_range(self.config.min_sectors..=self.config.max_sectors);
        let mut plan = LapPlan::new();

        for _ in 0..sector_count {
            let template = SectorTemplate::ALL[rng.gen_range(0..SectorTemplate::ALL.len())];
            let first_segment = plan.segments.len();
            append_template(&mut plan.segments, template, rng);
            debug!(?template, first_segment, "Planned sector");
            plan.sectors.push(PlannedSector {
                template,
                first_segment,
                segment_count: plan.segments.len() - first_segment,
            });
        }

        let mut total = plan.total_length();
        let mut padding = 0;
        while total < self.config.min_lap_length {
            let length = rng.gen_range(PADDING_LENGTH);
            plan.segments.push(Segment::straight(length));
            total += length;
            padding += 1;
        }
        if padding > 0 {
            debug!(padding, total, "Padded lap with straights");
        }

        if total > self.config.max_lap_length {
            trim_to_length(&mut plan.segments, self.config.max_lap_length);
        }

        info!(
            sectors = plan.sectors.len(),
            segments = plan.segments.len(),
            length = plan.total_length(),
            "Lap planned"
        );
        plan
    }
}

/// Appends the segments a template stands for.
fn append_template(segments: &mut Vec<Segment>, template: SectorTemplate, rng: &mut impl Rng) {
    match template {
        SectorTemplate::HighSpeed => {
            segments.push(Segment::straight(rng.gen_range(600.0..=1200.0)));
            segments.push(random_curve(SegmentKind::Sweep, 250.0..=600.0, 100.0..=200.0, rng));
        }
        SectorTemplate::Braking => {
            segments.push(Segment::straight(rng.gen_range(400.0..=900.0)));
            segments.push(random_curve(SegmentKind::HeavyCorner, 60.0..=120.0, 30.0..=60.0, rng));
        }
        SectorTemplate::Technical => {
            segments.push(random_curve(SegmentKind::Esses, 200.0..=400.0, 30.0..=60.0, rng));
            segments.push(random_curve(SegmentKind::Hairpin, 60.0..=90.0, 20.0..=40.0, rng));
        }
        SectorTemplate::Chicane => {
            let length = rng.gen_range(120.0..=240.0);
            let intensity = rng.gen_range(30.0..=60.0);
            segments.push(Segment::chicane(length, intensity, rng.gen_bool(0.5)));
        }
        SectorTemplate::Esses => {
            segments.push(random_curve(SegmentKind::Esses, 250.0..=500.0, 40.0..=80.0, rng));
        }
    }
}

fn random_curve(
    kind: SegmentKind,
    length: RangeInclusive<f64>,
    radius: RangeInclusive<f64>,
    rng: &mut impl Rng,
) -> Segment {
    let length = rng.gen_range(length);
    let radius = rng.gen_range(radius);
    Segment::curve(kind, length, radius, rng.gen_bool(0.5))
}

/// Shortens the plan to `max_length`, starting from the last segment.
///
/// Each segment is cut by the remaining overflow but never below
/// `min(TRIM_FLOOR, length)`; whatever the floor leaves is taken from the
/// segment before it. Segments are never removed or reordered.
fn trim_to_length(segments: &mut [Segment], max_length: f64) {
    // Repeat to absorb rounding left over by the float sums.
    for _ in 0..3 {
        let overflow = segments.iter().map(|s| s.length).sum::<f64>() - max_length;
        if overflow <= 0.0 {
            return;
        }

        let mut remaining = overflow;
        for segment in segments.iter_mut().rev() {
            if remaining <= 0.0 {
                break;
            }
            let floor = TRIM_FLOOR.min(segment.length);
            let trimmed = (segment.length - remaining).max(floor);
            remaining -= segment.length - trimmed;
            segment.length = trimmed;
        }

        if remaining > 0.0 {
            warn!(remaining, "Lap still too long with every segment at the trim floor");
            return;
        }
        debug!(overflow, "Trimmed lap overflow");
    }
}
