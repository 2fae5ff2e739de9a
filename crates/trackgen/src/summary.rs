//! Human-readable statistics for a generated track.

use std::collections::BTreeMap;
use std::fmt;

use racetrack::{SectorTemplate, SegmentKind};

use crate::builders::GeneratedTrack;

/// Horizontal extent of a centerline on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackSummary {
    pub seed: u64,
    /// Sum of planned segment lengths.
    pub planned_length: f64,
    /// Centerline length including the closing curve.
    pub walked_length: f64,
    pub segments: BTreeMap<String, usize>,
    pub sectors: BTreeMap<String, usize>,
    pub point_count: usize,
    pub closure_gap: f64,
    pub extent: Option<Extent>,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

impl TrackSummary {
    pub fn from_track(track: &GeneratedTrack) -> Self {
        let segments = SegmentKind::ALL
            .iter()
            .map(|&kind| (format!("{kind:?}"), track.plan.count_of(kind)))
            .filter(|(_, count)| *count > 0)
            .collect();

        let mut sectors = BTreeMap::new();
        for template in SectorTemplate::ALL {
            let count = track
                .plan
                .sectors
                .iter()
                .filter(|s| s.template == template)
                .count();
            if count > 0 {
                sectors.insert(format!("{template:?}"), count);
            }
        }

        let extent = track.centerline.points().iter().fold(None, |acc: Option<Extent>, p| {
            let (x, z) = (p.position.x, p.position.z);
            Some(match acc {
                None => Extent {
                    min_x: x,
                    min_z: z,
                    max_x: x,
                    max_z: z,
                },
                Some(e) => Extent {
                    min_x: e.min_x.min(x),
                    min_z: e.min_z.min(z),
                    max_x: e.max_x.max(x),
                    max_z: e.max_z.max(z),
                },
            })
        });

        Self {
            seed: track.seed,
            planned_length: track.plan.total_length(),
            walked_length: track.centerline.total_length(),
            segments,
            sectors,
            point_count: track.centerline.len(),
            closure_gap: track.centerline.closure_gap(),
            extent,
            vertex_count: track.mesh.vertices.len(),
            triangle_count: track.mesh.triangle_count(),
        }
    }
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "  Planned length: {:.1} m", self.planned_length)?;
        writeln!(f, "  Walked length: {:.1} m", self.walked_length)?;
        for (name, count) in &self.sectors {
            writeln!(f, "  Sector {name}: {count}")?;
        }
        for (name, count) in &self.segments {
            writeln!(f, "  Segment {name}: {count}")?;
        }
        writeln!(f, "  Points: {}", self.point_count)?;
        writeln!(f, "  Closure gap: {:.4} m", self.closure_gap)?;
        if let Some(extent) = &self.extent {
            writeln!(f, "  Extent: {:.1} x {:.1} m", extent.width(), extent.depth())?;
        }
        write!(
            f,
            "  Mesh: {} vertices, {} triangles",
            self.vertex_count, self.triangle_count
        )
    }
}
