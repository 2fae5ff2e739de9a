//! Wavefront OBJ generation from a ribbon mesh.

use racetrack::RibbonMesh;

/// Generates an OBJ document for the mesh.
///
/// The output contains a single object with positions, the recomputed
/// normals and one `f v//vn` line per triangle (indices are 1-based).
pub fn write_obj(mesh: &RibbonMesh, name: &str) -> String {
    let mut obj = String::new();

    obj.push_str("# trackgen ribbon mesh\n");
    obj.push_str(&format!(
        "# {} vertices, {} triangles\n",
        mesh.vertices.len(),
        mesh.triangle_count()
    ));
    obj.push_str(&format!("o {}\n", sanitize_name(name)));

    for v in &mesh.vertices {
        obj.push_str(&format!("v {:.4} {:.4} {:.4}\n", v.x, v.y, v.z));
    }
    for n in &mesh.normals {
        obj.push_str(&format!("vn {:.4} {:.4} {:.4}\n", n.x, n.y, n.z));
    }
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        obj.push_str(&format!("f {a}//{a} {b}//{b} {c}//{c}\n"));
    }

    obj
}

/// OBJ object names end at whitespace.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "track".to_string()
    } else {
        cleaned
    }
}
