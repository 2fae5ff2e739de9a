//! Procedural racetrack generation.
//!
//! A lap is produced by a one-way pipeline:
//!
//! 1. [`SegmentPlanner`] picks randomized sector templates and expands them
//!    into a [`LapPlan`] whose length lies inside the configured bounds.
//! 2. [`PathWalker`] integrates the plan into a closed [`Centerline`].
//! 3. [`RibbonMesher`] offsets the centerline into a triangulated [`RibbonMesh`].
//!
//! ```rust,ignore
//! use rand::{SeedableRng, rngs::StdRng};
//! use racetrack::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let plan = SegmentPlanner::new(PlannerConfig::default())?.plan(&mut rng);
//! let centerline = PathWalker::new(WalkerConfig::default())?.walk(&plan);
//! let mesh = RibbonMesher::new(12.0)?.mesh(&centerline);
//! ```

pub mod errors;
pub mod mesher;
pub mod models;
pub mod planner;
pub mod walker;

pub use errors::TrackError;
pub use mesher::RibbonMesher;
pub use models::{
    Centerline, LapPlan, PathPoint, PlannedSector, RibbonMesh, SectorTemplate, Segment,
    SegmentKind,
};
pub use planner::{PlannerConfig, SegmentPlanner};
pub use walker::{ChicaneMode, PathWalker, WalkerConfig};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::errors::TrackError;
    pub use crate::mesher::RibbonMesher;
    pub use crate::models::{
        Centerline, LapPlan, PathPoint, PlannedSector, RibbonMesh, SectorTemplate, Segment,
        SegmentKind,
    };
    pub use crate::planner::{PlannerConfig, SegmentPlanner};
    pub use crate::walker::{ChicaneMode, PathWalker, WalkerConfig};
}
