//! Ribbon mesh generation from a centerline.

use glam::DVec3;
use tracing::{debug, warn};

use crate::errors::{TrackError, ensure_positive};
use crate::models::{Centerline, RibbonMesh};
use crate::walker::MAX_CENTERLINE_POINTS;

/// Offsets a centerline by half the road width on each side and
/// triangulates the result as a quad strip.
#[derive(Debug, Clone)]
pub struct RibbonMesher {
    width: f64,
    up: DVec3,
}

impl RibbonMesher {
    pub fn new(width: f64) -> Result<Self, TrackError> {
        ensure_positive("road_width", width)?;
        Ok(Self { width, up: DVec3::Y })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Builds the ribbon, or an empty mesh when fewer than 2 points are given.
    pub fn mesh(&self, centerline: &Centerline) -> RibbonMesh {
        match self.try_mesh(centerline) {
            Ok(mesh) => mesh,
            Err(err) => {
                warn!("{err}, producing an empty mesh");
                RibbonMesh::empty()
            }
        }
    }

    /// Builds the ribbon, reporting a degenerate centerline as an error.
    pub fn try_mesh(&self, centerline: &Centerline) -> Result<RibbonMesh, TrackError> {
        let points = centerline.positions();
        if points.len() < 2 {
            return Err(TrackError::DegenerateInput {
                points: points.len(),
            });
        }
        if points.len() > MAX_CENTERLINE_POINTS {
            return Err(TrackError::config(format!(
                "centerline has {} points, at most {MAX_CENTERLINE_POINTS} can be meshed",
                points.len()
            )));
        }

        let half_width = self.width / 2.0;
        let mut vertices = Vec::with_capacity(points.len() * 2);
        let mut forward = DVec3::Z;

        for (i, &center) in points.iter().enumerate() {
            // The final point keeps the previous direction, as do zero-length hops.
            if let Some(&next) = points.get(i + 1) {
                let direction = (next - center).normalize_or_zero();
                if direction != DVec3::ZERO {
                    forward = direction;
                }
            }
            let offset = forward.cross(self.up) * half_width;
            vertices.push(center + offset);
            vertices.push(center - offset);
        }

        let mut indices = Vec::with_capacity((points.len() - 1) * 6);
        for i in 0..points.len() - 1 {
            let v = (i * 2) as u32;
            indices.extend_from_slice(&[v, v + 2, v + 1, v + 1, v + 2, v + 3]);
        }

        let normals = vertex_normals(&vertices, &indices, self.up);
        debug!(
            vertices = vertices.len(),
            triangles = indices.len() / 3,
            "Ribbon meshed"
        );

        Ok(RibbonMesh {
            vertices,
            indices,
            normals,
        })
    }
}

/// Area-weighted vertex normals recomputed from the triangles.
///
/// Vertices touched only by degenerate triangles fall back to `fallback`.
pub fn vertex_normals(vertices: &[DVec3], indices: &[u32], fallback: DVec3) -> Vec<DVec3> {
    let mut normals = vec![DVec3::ZERO; vertices.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == DVec3::ZERO { fallback } else { n }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PathPoint;

    fn line(positions: &[DVec3]) -> Centerline {
        let mut distance = 0.0;
        let mut points = Vec::new();
        for (i, &position) in positions.iter().enumerate() {
            if i > 0 {
                distance += position.distance(positions[i - 1]);
            }
            points.push(PathPoint {
                position,
                cumulative_distance: distance,
            });
        }
        Centerline::new(points)
    }

    #[test]
    fn test_rejects_non_positive_width() {
        assert!(RibbonMesher::new(0.0).is_err());
        assert!(RibbonMesher::new(-4.0).is_err());
    }

    #[test]
    fn test_degenerate_centerline() {
        let mesher = RibbonMesher::new(12.0).unwrap();
        let single = line(&[DVec3::ZERO]);
        assert!(mesher.mesh(&single).is_empty());
        assert!(mesher.mesh(&Centerline::default()).is_empty());
        assert_eq!(
            mesher.try_mesh(&single).unwrap_err(),
            TrackError::DegenerateInput { points: 1 }
        );
    }

    #[test]
    fn test_straight_strip_layout() {
        let mesher = RibbonMesher::new(12.0).unwrap();
        let centerline = line(&[
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 2.0),
        ]);
        let mesh = mesher.mesh(&centerline);

        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices.len(), 12);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[..6], &[0, 2, 1, 1, 2, 3]);

        // Right edge is -X when travelling along +Z.
        assert_eq!(mesh.vertices[0], DVec3::new(-6.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[1], DVec3::new(6.0, 0.0, 0.0));
        // Last point reuses the previous direction.
        assert_eq!(mesh.vertices[4], DVec3::new(-6.0, 0.0, 2.0));
    }

    #[test]
    fn test_normals_face_up_on_flat_track() {
        let mesher = RibbonMesher::new(8.0).unwrap();
        let positions: Vec<DVec3> = (0..40)
            .map(|i| DVec3::new((i as f64 * 0.05).sin() * 5.0, 0.0, i as f64))
            .collect();
        let mesh = mesher.mesh(&line(&positions));
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        for normal in &mesh.normals {
            assert!((normal.length() - 1.0).abs() < 1e-9);
            assert!(normal.y > 0.99, "normal {normal} does not face up");
        }
    }

    #[test]
    fn test_indices_in_range() {
        let mesher = RibbonMesher::new(12.0).unwrap();
        let positions: Vec<DVec3> = (0..50)
            .map(|i| DVec3::new((i as f64 * 0.1).sin() * 20.0, 0.0, i as f64))
            .collect();
        let mesh = mesher.mesh(&line(&positions));
        assert_eq!(mesh.vertices.len(), 2 * positions.len());
        assert_eq!(mesh.indices.len(), 6 * (positions.len() - 1));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }
}
