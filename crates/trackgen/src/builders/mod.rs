//! Builder pattern APIs for generating complete tracks.
//!
//! The [`TrackBuilder`] provides a fluent interface for configuring and
//! running the planner, walker and mesher in one call.

mod track;

pub use track::{GeneratedTrack, GenerationMetrics, TrackBuilder};
