//! Racetrack generation tooling.
//!
//! This crate wraps the `racetrack` pipeline with configuration loading, a
//! fluent builder, summaries and file exporters.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use trackgen::prelude::*;
//!
//! let track = TrackBuilder::new()
//!     .with_seed(42)
//!     .with_lap_length(4000.0, 7000.0)
//!     .with_sectors(5, 7)
//!     .with_road_width(12.0)
//!     .with_metrics(true)
//!     .build()?;
//!
//! println!("{}", TrackSummary::from_track(&track));
//! write_track_files(&track, "./track-out")?;
//! ```

pub mod builders;
pub mod config;
pub mod export;
pub mod summary;

// Re-export core types from racetrack crate
pub use racetrack::{
    Centerline, ChicaneMode, LapPlan, PathPoint, RibbonMesh, SectorTemplate, Segment,
    SegmentKind, TrackError,
};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{GeneratedTrack, GenerationMetrics, TrackBuilder};
    pub use crate::config::{ConfigError, TrackConfig};
    pub use crate::export::{ExportError, centerline_json, write_obj, write_track_files};
    pub use crate::summary::{Extent, TrackSummary};
    pub use crate::{
        Centerline, ChicaneMode, LapPlan, PathPoint, RibbonMesh, SectorTemplate, Segment,
        SegmentKind, TrackError,
    };
}
