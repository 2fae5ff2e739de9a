//! Data model shared by the planner, walker and mesher.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Geometric primitive a segment is walked as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Straight,
    Sweep,
    Hairpin,
    Chicane,
    Esses,
    HeavyCorner,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 6] = [
        SegmentKind::Straight,
        SegmentKind::Sweep,
        SegmentKind::Hairpin,
        SegmentKind::Chicane,
        SegmentKind::Esses,
        SegmentKind::HeavyCorner,
    ];

    pub fn is_curved(self) -> bool {
        !matches!(self, SegmentKind::Straight)
    }
}

/// One typed piece of track geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Length along the centerline in meters.
    pub length: f64,
    /// Turn radius in meters. Zero means the walker applies no heading change.
    pub curve_radius: f64,
    pub curve_left: bool,
    /// Lateral severity, only set by chicanes.
    pub intensity: f64,
}

impl Segment {
    pub fn straight(length: f64) -> Self {
        Self {
            kind: SegmentKind::Straight,
            length,
            curve_radius: 0.0,
            curve_left: false,
            intensity: 0.0,
        }
    }

    pub fn curve(kind: SegmentKind, length: f64, curve_radius: f64, curve_left: bool) -> Self {
        Self {
            kind,
            length,
            curve_radius,
            curve_left,
            intensity: 0.0,
        }
    }

    pub fn chicane(length: f64, intensity: f64, curve_left: bool) -> Self {
        Self {
            kind: SegmentKind::Chicane,
            length,
            curve_radius: 0.0,
            curve_left,
            intensity,
        }
    }

    /// Radius actually used for heading integration.
    ///
    /// Heavy corners turn twice as tightly as their nominal radius and
    /// straights never turn, whatever radius they carry.
    pub fn effective_radius(&self) -> f64 {
        match self.kind {
            SegmentKind::Straight => 0.0,
            SegmentKind::HeavyCorner => self.curve_radius / 2.0,
            _ => self.curve_radius,
        }
    }
}

/// Stylistic zone of a lap; each template expands into one or more segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorTemplate {
    HighSpeed,
    Braking,
    Technical,
    Chicane,
    Esses,
}

impl SectorTemplate {
    pub const ALL: [SectorTemplate; 5] = [
        SectorTemplate::HighSpeed,
        SectorTemplate::Braking,
        SectorTemplate::Technical,
        SectorTemplate::Chicane,
        SectorTemplate::Esses,
    ];

    /// Number of segments the template appends.
    pub fn segment_count(self) -> usize {
        match self {
            SectorTemplate::HighSpeed | SectorTemplate::Braking | SectorTemplate::Technical => 2,
            SectorTemplate::Chicane | SectorTemplate::Esses => 1,
        }
    }
}

/// A run of consecutive plan segments produced by one sector template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSector {
    pub template: SectorTemplate,
    pub first_segment: usize,
    pub segment_count: usize,
}

/// Ordered segment sequence for one lap.
///
/// Padding straights appended to reach the minimum lap length belong to no sector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LapPlan {
    pub segments: Vec<Segment>,
    pub sectors: Vec<PlannedSector>,
}

impl LapPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from bare segments, without sector bookkeeping.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            sectors: Vec::new(),
        }
    }

    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn count_of(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }
}

/// A sampled centerline position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: DVec3,
    /// Distance travelled along the centerline up to this point.
    pub cumulative_distance: f64,
}

/// Ordered, closed sequence of path points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Centerline {
    points: Vec<PathPoint>,
}

impl Centerline {
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn positions(&self) -> Vec<DVec3> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PathPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PathPoint> {
        self.points.last()
    }

    /// Walked length including the closing curve.
    pub fn total_length(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.cumulative_distance)
    }

    /// Straight-line distance between the first and last point.
    pub fn closure_gap(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.position.distance(last.position),
            _ => 0.0,
        }
    }

    pub fn is_closed(&self, epsilon: f64) -> bool {
        self.closure_gap() < epsilon
    }
}

/// Triangulated strip offset from a centerline.
///
/// Vertex `2 * i` is the right edge and `2 * i + 1` the left edge of point `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RibbonMesh {
    pub vertices: Vec<DVec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<DVec3>,
}

impl RibbonMesh {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
