//! Fluent builder running the full generation pipeline.

use std::time::Instant;

use glam::DVec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use racetrack::{
    Centerline, ChicaneMode, LapPlan, PathWalker, RibbonMesh, RibbonMesher, SegmentPlanner,
    TrackError,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::TrackConfig;

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTrack {
    /// Seed the run actually used, after resolving `randomize`.
    pub seed: u64,
    pub road_width: f64,
    pub plan: LapPlan,
    pub centerline: Centerline,
    pub mesh: RibbonMesh,
    /// Populated if metrics tracking was enabled.
    #[serde(skip)]
    pub metrics: Option<GenerationMetrics>,
}

/// Timing and size figures for a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationMetrics {
    /// Time spent planning (milliseconds).
    pub plan_time_ms: u64,
    /// Time spent walking the centerline (milliseconds).
    pub walk_time_ms: u64,
    /// Time spent meshing (milliseconds).
    pub mesh_time_ms: u64,
    pub segment_count: usize,
    pub point_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// Builder for generating a track.
///
/// # Example
///
/// ```rust,ignore
/// let track = TrackBuilder::new()
///     .with_seed(42)
///     .with_lap_length(4000.0, 7000.0)
///     .with_sectors(5, 7)
///     .with_road_width(12.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    config: TrackConfig,
    track_metrics: bool,
}

impl TrackBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a loaded configuration.
    pub fn from_config(config: TrackConfig) -> Self {
        Self {
            config,
            track_metrics: false,
        }
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Sets a fixed seed and turns off randomization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self.config.randomize = false;
        self
    }

    /// Draws a fresh seed on each build.
    pub fn with_randomize(mut self, enabled: bool) -> Self {
        self.config.randomize = enabled;
        self
    }

    /// Sets the lap length bounds in meters.
    pub fn with_lap_length(mut self, min: f64, max: f64) -> Self {
        self.config.min_lap_length = min;
        self.config.max_lap_length = max;
        self
    }

    /// Sets the inclusive range of sector templates to draw.
    pub fn with_sectors(mut self, min: u32, max: u32) -> Self {
        self.config.min_sectors = min;
        self.config.max_sectors = max;
        self
    }

    pub fn with_road_width(mut self, width: f64) -> Self {
        self.config.road_width = width;
        self
    }

    pub fn with_step_size(mut self, step: f64) -> Self {
        self.config.step_size = step;
        self
    }

    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.config.origin = origin.to_array();
        self
    }

    pub fn with_chicane_mode(mut self, mode: ChicaneMode) -> Self {
        self.config.chicane_mode = mode;
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Validates the configuration, then plans, walks and meshes one lap.
    ///
    /// Invalid bounds are reported before any generation work starts.
    pub fn build(&self) -> Result<GeneratedTrack, TrackError> {
        self.config.validate()?;
        let planner = SegmentPlanner::new(self.config.planner_config())?;
        let walker = PathWalker::new(self.config.walker_config())?;
        let mesher = RibbonMesher::new(self.config.road_width)?;

        let seed = self.config.resolve_seed(&mut rand::thread_rng());
        let mut rng = StdRng::seed_from_u64(seed);
        info!(seed, "Generating track");

        let start = Instant::now();
        let plan = planner.plan(&mut rng);
        let planned = Instant::now();
        let centerline = walker.walk(&plan);
        let walked = Instant::now();
        let mesh = mesher.mesh(&centerline);

        let metrics = self.track_metrics.then(|| GenerationMetrics {
            plan_time_ms: (planned - start).as_millis() as u64,
            walk_time_ms: (walked - planned).as_millis() as u64,
            mesh_time_ms: walked.elapsed().as_millis() as u64,
            segment_count: plan.len(),
            point_count: centerline.len(),
            vertex_count: mesh.vertices.len(),
            triangle_count: mesh.triangle_count(),
        });

        Ok(GeneratedTrack {
            seed,
            road_width: self.config.road_width,
            plan,
            centerline,
            mesh,
            metrics,
        })
    }

    /// Walks and meshes a caller-supplied plan, skipping the planner.
    pub fn build_from_plan(&self, plan: LapPlan) -> Result<GeneratedTrack, TrackError> {
        let walker = PathWalker::new(self.config.walker_config())?;
        let mesher = RibbonMesher::new(self.config.road_width)?;

        let centerline = walker.try_walk(&plan)?;
        let mesh = mesher.mesh(&centerline);

        Ok(GeneratedTrack {
            seed: self.config.seed,
            road_width: self.config.road_width,
            plan,
            centerline,
            mesh,
            metrics: None,
        })
    }
}
