//! Integrates a [`LapPlan`] into a closed centerline.
//!
//! The walker advances in fixed steps along each segment, turning by
//! `step / radius` radians per step on curved segments, then joins the last
//! point back to the first with a cubic Bezier closing curve.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{TrackError, ensure_positive};
use crate::models::{Centerline, LapPlan, PathPoint, Segment, SegmentKind};

/// Steps shorter than this are dropped so distances stay strictly increasing.
const MIN_STEP: f64 = 1e-6;

/// Smallest accepted `step_size` in meters.
pub const MIN_STEP_SIZE: f64 = 0.01;

/// Most points a single walk may produce, closing curve included.
pub const MAX_CENTERLINE_POINTS: usize = 10_000_000;

// Ribbon indices reach `2 * points + 1` and must fit in u32.
const _: () = assert!(2 * MAX_CENTERLINE_POINTS + 1 < u32::MAX as usize);

/// How chicanes, which only carry an intensity, are walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChicaneMode {
    /// Walk chicanes as straights; their intensity is ignored.
    #[default]
    Straight,
    /// Flick left-right-left (quarter, half, quarter) using the intensity as radius.
    Weave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Distance between emitted points in meters.
    pub step_size: f64,
    /// First centerline point.
    pub origin: DVec3,
    pub chicane_mode: ChicaneMode,
    /// Gap below which no closing curve is synthesized.
    pub closing_epsilon: f64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            origin: DVec3::ZERO,
            chicane_mode: ChicaneMode::Straight,
            closing_epsilon: 0.01,
        }
    }
}

impl WalkerConfig {
    pub fn validate(&self) -> Result<(), TrackError> {
        ensure_positive("step_size", self.step_size)?;
        if self.step_size < MIN_STEP_SIZE {
            return Err(TrackError::config(format!(
                "step_size ({}) must be at least {MIN_STEP_SIZE}",
                self.step_size
            )));
        }
        ensure_positive("closing_epsilon", self.closing_epsilon)?;
        if !self.origin.is_finite() {
            return Err(TrackError::config("origin must be finite"));
        }
        Ok(())
    }

    /// Upper estimate of the points walked for a lap of `lap_length` meters.
    ///
    /// The closing curve spans at most the walked length again.
    pub fn estimated_points(&self, lap_length: f64) -> f64 {
        2.0 * (lap_length / self.step_size).ceil() + 2.0
    }

    /// Rejects laps whose point count would exceed [`MAX_CENTERLINE_POINTS`].
    pub fn check_point_budget(&self, lap_length: f64) -> Result<(), TrackError> {
        let estimate = self.estimated_points(lap_length);
        if !estimate.is_finite() || estimate > MAX_CENTERLINE_POINTS as f64 {
            return Err(TrackError::config(format!(
                "a {lap_length} m lap at step_size {} needs up to {estimate} points, \
                 at most {MAX_CENTERLINE_POINTS} are supported",
                self.step_size
            )));
        }
        Ok(())
    }
}

/// Running pose while walking a plan.
struct WalkState {
    position: DVec3,
    heading: f64,
    distance: f64,
    points: Vec<PathPoint>,
}

impl WalkState {
    fn emit(&mut self, position: DVec3, step: f64) {
        self.position = position;
        self.distance += step;
        self.points.push(PathPoint {
            position,
            cumulative_distance: self.distance,
        });
    }
}

/// Unit travel direction for a heading; heading 0 points along +Z and
/// positive headings turn towards +X (left, seen from above with Y up).
pub fn heading_direction(heading: f64) -> DVec3 {
    DVec3::new(heading.sin(), 0.0, heading.cos())
}

/// Point on a cubic Bezier curve at `t` in `[0, 1]`.
pub fn cubic_bezier(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

#[derive(Debug, Clone)]
pub struct PathWalker {
    config: WalkerConfig,
}

impl PathWalker {
    pub fn new(config: WalkerConfig) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walks a plan after checking it against the point budget.
    pub fn try_walk(&self, plan: &LapPlan) -> Result<Centerline, TrackError> {
        self.config.check_point_budget(plan.total_length())?;
        Ok(self.walk(plan))
    }

    /// Walks every segment in order and closes the loop.
    ///
    /// Plans from [`SegmentPlanner`](crate::SegmentPlanner) are bounded by
    /// their lap length; use [`try_walk`](Self::try_walk) for plans from elsewhere.
    pub fn walk(&self, plan: &LapPlan) -> Centerline {
        let origin = self.config.origin;
        let estimate = ((plan.total_length() / self.config.step_size) as usize + 2)
            .min(MAX_CENTERLINE_POINTS);
        let mut state = WalkState {
            position: origin,
            heading: 0.0,
            distance: 0.0,
            points: Vec::with_capacity(estimate),
        };
        state.points.push(PathPoint {
            position: origin,
            cumulative_distance: 0.0,
        });

        for segment in &plan.segments {
            self.walk_segment(&mut state, segment);
        }
        debug!(
            points = state.points.len(),
            gap = state.position.distance(origin),
            "Segments walked"
        );

        self.close_loop(&mut state);

        info!(
            points = state.points.len(),
            length = state.distance,
            "Centerline walked"
        );
        Centerline::new(state.points)
    }

    fn walk_segment(&self, state: &mut WalkState, segment: &Segment) {
        match segment.kind {
            SegmentKind::Straight => self.advance(state, segment.length, 0.0, false),
            SegmentKind::Chicane
                if self.config.chicane_mode == ChicaneMode::Weave && segment.intensity > 0.0 =>
            {
                let left = segment.curve_left;
                for (fraction, turn_left) in [(0.25, left), (0.5, !left), (0.25, left)] {
                    self.advance(state, segment.length * fraction, segment.intensity, turn_left);
                }
            }
            _ => self.advance(
                state,
                segment.length,
                segment.effective_radius(),
                segment.curve_left,
            ),
        }
    }

    /// Steps forward `length` meters, turning when `radius` is positive.
    fn advance(&self, state: &mut WalkState, length: f64, radius: f64, left: bool) {
        let mut remaining = length;
        while remaining > MIN_STEP {
            let step = self.config.step_size.min(remaining);
            if radius > 0.0 {
                let delta = step / radius;
                state.heading += if left { delta } else { -delta };
            }
            let next = state.position + heading_direction(state.heading) * step;
            state.emit(next, step);
            remaining -= step;
        }
    }

    /// Joins the last point back to the origin with a cubic Bezier whose
    /// handles follow the end and start tangents.
    fn close_loop(&self, state: &mut WalkState) {
        let start = self.config.origin;
        let end = state.position;
        let gap = end.distance(start);
        if gap <= self.config.closing_epsilon {
            return;
        }

        let handle = gap / 3.0;
        let control_out = end + heading_direction(state.heading) * handle;
        let control_in = start - heading_direction(0.0) * handle;
        let steps = ((gap / self.config.step_size).ceil() as usize).max(1);

        let mut previous = end;
        for i in 1..=steps {
            let position = if i == steps {
                start
            } else {
                cubic_bezier(end, control_out, control_in, start, i as f64 / steps as f64)
            };
            let step = position.distance(previous);
            if step <= MIN_STEP {
                continue;
            }
            state.emit(position, step);
            previous = position;
        }
        debug!(gap, steps, "Closing curve synthesized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker() -> PathWalker {
        PathWalker::new(WalkerConfig::default()).unwrap()
    }

    fn assert_monotonic(line: &Centerline) {
        for pair in line.points().windows(2) {
            assert!(
                pair[1].cumulative_distance > pair[0].cumulative_distance,
                "distance did not increase: {} -> {}",
                pair[0].cumulative_distance,
                pair[1].cumulative_distance
            );
        }
    }

    #[test]
    fn test_rejects_bad_step() {
        let config = WalkerConfig {
            step_size: 0.0,
            ..Default::default()
        };
        assert!(PathWalker::new(config).is_err());
    }

    #[test]
    fn test_rejects_tiny_step() {
        let config = WalkerConfig {
            step_size: 1e-12,
            ..Default::default()
        };
        let err = PathWalker::new(config).unwrap_err();
        assert!(matches!(err, TrackError::Configuration(_)));
    }

    #[test]
    fn test_point_budget() {
        let config = WalkerConfig {
            step_size: MIN_STEP_SIZE,
            ..Default::default()
        };
        assert!(config.check_point_budget(7000.0).is_ok());
        assert!(config.check_point_budget(1.0e6).is_err());
        assert!(config.check_point_budget(f64::INFINITY).is_err());

        let walker = PathWalker::new(config).unwrap();
        let huge = LapPlan::from_segments(vec![Segment::straight(1.0e6)]);
        assert!(matches!(
            walker.try_walk(&huge),
            Err(TrackError::Configuration(_))
        ));
        let small = LapPlan::from_segments(vec![Segment::straight(5.0)]);
        assert!(walker.try_walk(&small).unwrap().is_closed(0.5));
    }

    #[test]
    fn test_empty_plan_yields_origin_only() {
        let line = walker().walk(&LapPlan::new());
        assert_eq!(line.len(), 1);
        assert_eq!(line.points()[0].position, DVec3::ZERO);
    }

    #[test]
    fn test_straight_emits_point_per_step() {
        let plan = LapPlan::from_segments(vec![Segment::straight(10.5)]);
        let line = walker().walk(&plan);
        // Origin, 10 full steps and one half step before the closing curve.
        let straight = &line.points()[..12];
        assert_eq!(straight[11].cumulative_distance, 10.5);
        assert!((straight[11].position - DVec3::new(0.0, 0.0, 10.5)).length() < 1e-9);
        assert_monotonic(&line);
    }

    #[test]
    fn test_left_curve_drifts_positive_x() {
        let plan = LapPlan::from_segments(vec![Segment::curve(
            SegmentKind::Sweep,
            100.0,
            100.0,
            true,
        )]);
        let line = walker().walk(&plan);
        assert!(line.points()[100].position.x > 0.0);

        let plan = LapPlan::from_segments(vec![Segment::curve(
            SegmentKind::Sweep,
            100.0,
            100.0,
            false,
        )]);
        let line = walker().walk(&plan);
        assert!(line.points()[100].position.x < 0.0);
    }

    #[test]
    fn test_full_circle_closes_with_short_curve() {
        let radius = 50.0;
        let circumference = std::f64::consts::TAU * radius;
        let plan = LapPlan::from_segments(vec![Segment::curve(
            SegmentKind::Sweep,
            circumference,
            radius,
            true,
        )]);
        let line = walker().walk(&plan);
        assert!(line.closure_gap() < 0.5);
        // Stepping a circle leaves only a small chord error for the curve to bridge.
        assert!((line.total_length() - circumference).abs() < 2.0);
        assert_monotonic(&line);
    }

    #[test]
    fn test_straight_ignores_stray_radius() {
        let mut straight = Segment::straight(100.0);
        straight.curve_radius = 50.0;
        straight.curve_left = true;
        let line = walker().walk(&LapPlan::from_segments(vec![straight]));
        let end = line.points()[100].position;
        assert!(end.x.abs() < 1e-9, "straight drifted to x = {}", end.x);
        assert!((end.z - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_corner_turns_twice_as_fast() {
        let corner = Segment::curve(SegmentKind::HeavyCorner, 20.0, 40.0, true);
        let sweep = Segment::curve(SegmentKind::Sweep, 20.0, 40.0, true);
        let heavy = walker().walk(&LapPlan::from_segments(vec![corner]));
        let light = walker().walk(&LapPlan::from_segments(vec![sweep]));
        assert!(heavy.points()[20].position.x > light.points()[20].position.x);
    }

    #[test]
    fn test_chicane_straight_mode_ignores_intensity() {
        let plan = LapPlan::from_segments(vec![Segment::chicane(120.0, 40.0, true)]);
        let line = walker().walk(&plan);
        assert!(line.points()[120].position.x.abs() < 1e-9);
    }

    #[test]
    fn test_chicane_weave_mode_returns_to_heading() {
        let config = WalkerConfig {
            chicane_mode: ChicaneMode::Weave,
            ..Default::default()
        };
        let plan = LapPlan::from_segments(vec![
            Segment::chicane(120.0, 40.0, true),
            Segment::straight(50.0),
        ]);
        let line = PathWalker::new(config).unwrap().walk(&plan);
        let points = line.points();
        assert!(points[60].position.x.abs() > 1.0, "chicane should move laterally");
        // Heading is restored, so the following straight runs parallel to +Z.
        let dx = points[170].position.x - points[121].position.x;
        assert!(dx.abs() < 1e-6, "straight drifted by {dx}");
    }

    #[test]
    fn test_closing_curve_returns_to_origin() {
        let plan = LapPlan::from_segments(vec![
            Segment::straight(200.0),
            Segment::curve(SegmentKind::Hairpin, 80.0, 25.0, false),
            Segment::straight(120.0),
        ]);
        let line = walker().walk(&plan);
        assert!(line.closure_gap() < 1e-9);
        assert!(line.total_length() > plan.total_length());
        assert_monotonic(&line);
    }

    #[test]
    fn test_custom_origin() {
        let config = WalkerConfig {
            origin: DVec3::new(10.0, 5.0, -3.0),
            ..Default::default()
        };
        let plan = LapPlan::from_segments(vec![Segment::straight(30.0)]);
        let line = PathWalker::new(config).unwrap().walk(&plan);
        assert_eq!(line.points()[0].position, DVec3::new(10.0, 5.0, -3.0));
        assert!(line.closure_gap() < 1e-9);
    }

    #[test]
    fn test_bezier_endpoints() {
        let p0 = DVec3::ZERO;
        let p3 = DVec3::new(4.0, 0.0, 2.0);
        let p1 = DVec3::new(1.0, 0.0, 0.0);
        let p2 = DVec3::new(3.0, 0.0, 2.0);
        assert_eq!(cubic_bezier(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(cubic_bezier(p0, p1, p2, p3, 1.0), p3);
    }
}
