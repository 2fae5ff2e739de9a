//! JSON hand-off of the plan and centerline for downstream consumers.

use serde::Serialize;

use racetrack::{LapPlan, PathPoint};

use super::ExportError;
use crate::builders::GeneratedTrack;

#[derive(Serialize)]
struct CenterlineDocument<'a> {
    seed: u64,
    road_width: f64,
    length: f64,
    plan: &'a LapPlan,
    points: &'a [PathPoint],
}

/// Serializes the seed, plan and centerline points as pretty JSON.
pub fn centerline_json(track: &GeneratedTrack) -> Result<String, ExportError> {
    let doc = CenterlineDocument {
        seed: track.seed,
        road_width: track.road_width,
        length: track.centerline.total_length(),
        plan: &track.plan,
        points: track.centerline.points(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
