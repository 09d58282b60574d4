//! Fixed geometry for every part of the scene, in object space.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Interleaved position + flat colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// The meshes the scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshId {
    Water,
    Fan,
    Rudder,
    Hull,
    Searchlight,
    Posts,
}

impl MeshId {
    pub const ALL: [MeshId; 6] = [
        MeshId::Water,
        MeshId::Fan,
        MeshId::Rudder,
        MeshId::Hull,
        MeshId::Searchlight,
        MeshId::Posts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MeshId::Water => "water",
            MeshId::Fan => "fan",
            MeshId::Rudder => "rudder",
            MeshId::Hull => "hull",
            MeshId::Searchlight => "searchlight",
            MeshId::Posts => "posts",
        }
    }

    pub fn triangle_count(self) -> u32 {
        match self {
            MeshId::Water => 2,
            MeshId::Fan => 4,
            MeshId::Rudder => 6,
            MeshId::Hull => 12,
            MeshId::Searchlight => 12,
            MeshId::Posts => POST_COUNT * 8,
        }
    }

    pub fn vertices(self) -> Vec<Vertex> {
        match self {
            MeshId::Water => water_mesh(),
            MeshId::Fan => fan_mesh(),
            MeshId::Rudder => rudder_mesh(),
            MeshId::Hull => hull_mesh(),
            MeshId::Searchlight => searchlight_mesh(),
            MeshId::Posts => posts_mesh(),
        }
    }
}

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const PURPLE: [f32; 4] = [0.5, 0.0, 0.5, 1.0];
const ORANGE: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
const WATER_BLUE: [f32; 4] = [0.5, 0.5, 1.0, 1.0];
const LAMP_GRAY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
const POST_BROWN: [f32; 4] = [0.5, 0.3, 0.0, 1.0];

const POST_COUNT: u32 = 8;

/// Two triangles covering the quad `a b c d` (given in perimeter order).
fn quad(out: &mut Vec<Vertex>, corners: [Vec3; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, a, c, d] {
        out.push(Vertex {
            position: p.to_array(),
            color,
        });
    }
}

/// Axis-aligned box. Face colours in order: +Z, -Z, -Y, +Y, -X, +X.
fn cuboid(out: &mut Vec<Vertex>, min: Vec3, max: Vec3, colors: [[f32; 4]; 6]) {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    let v = Vec3::new;
    #[rustfmt::skip]
    let faces = [
        [v(x0, y0, z1), v(x1, y0, z1), v(x1, y1, z1), v(x0, y1, z1)],
        [v(x0, y0, z0), v(x1, y0, z0), v(x1, y1, z0), v(x0, y1, z0)],
        [v(x0, y0, z0), v(x1, y0, z0), v(x1, y0, z1), v(x0, y0, z1)],
        [v(x0, y1, z0), v(x1, y1, z0), v(x1, y1, z1), v(x0, y1, z1)],
        [v(x0, y0, z0), v(x0, y0, z1), v(x0, y1, z1), v(x0, y1, z0)],
        [v(x1, y0, z0), v(x1, y0, z1), v(x1, y1, z1), v(x1, y1, z0)],
    ];
    for (corners, color) in faces.into_iter().zip(colors) {
        quad(out, corners, color);
    }
}

/// Hull: 0.4 wide, 0.2 tall, 1.0 long, one colour per face.
pub fn hull_mesh() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(36);
    cuboid(
        &mut out,
        Vec3::new(-0.2, -0.1, -0.5),
        Vec3::new(0.2, 0.1, 0.5),
        [RED, GREEN, WHITE, BLUE, PURPLE, ORANGE],
    );
    out
}

/// Fan: two crossed blades just behind the stern, spun about Z.
pub fn fan_mesh() -> Vec<Vertex> {
    let w = 0.05 / 2.0;
    let h = 0.3;
    let z = -0.51;
    let mut out = Vec::with_capacity(12);
    quad(
        &mut out,
        [
            Vec3::new(-w, -h, z),
            Vec3::new(w, -h, z),
            Vec3::new(w, h, z),
            Vec3::new(-w, h, z),
        ],
        RED,
    );
    quad(
        &mut out,
        [
            Vec3::new(-h, -w, z),
            Vec3::new(h, -w, z),
            Vec3::new(h, w, z),
            Vec3::new(-h, w, z),
        ],
        RED,
    );
    out
}

/// Rudder: three vertical fins trailing the stern, yawed about Y.
pub fn rudder_mesh() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(18);
    for x in [0.2, 0.0, -0.2] {
        quad(
            &mut out,
            [
                Vec3::new(x, -0.125, -0.7),
                Vec3::new(x, -0.125, -0.55),
                Vec3::new(x, 0.1, -0.55),
                Vec3::new(x, 0.1, -0.7),
            ],
            BLUE,
        );
    }
    out
}

/// Water: a 6 x 4 plane just under the hull.
pub fn water_mesh() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(6);
    quad(
        &mut out,
        [
            Vec3::new(-3.0, -0.1, 2.0),
            Vec3::new(3.0, -0.1, 2.0),
            Vec3::new(3.0, -0.1, -2.0),
            Vec3::new(-3.0, -0.1, -2.0),
        ],
        WATER_BLUE,
    );
    out
}

/// Searchlight: a small cube ahead of the bow, yawed about Y.
pub fn searchlight_mesh() -> Vec<Vertex> {
    let half = 0.09;
    let z0 = 0.25 + half * 2.0;
    let mut out = Vec::with_capacity(36);
    cuboid(
        &mut out,
        Vec3::new(-half, -half, z0),
        Vec3::new(half, half, z0 + half * 2.0),
        [LAMP_GRAY; 6],
    );
    out
}

/// Posts: brown poles at the water's corners and edge midpoints.
pub fn posts_mesh() -> Vec<Vertex> {
    let base = 0.05;
    let (bottom, top) = (-0.1, 1.5);
    let mut out = Vec::with_capacity(POST_COUNT as usize * 24);
    for px in [-3.0, 0.0, 3.0] {
        for pz in [2.0, 0.0, -2.0] {
            if px == 0.0 && pz == 0.0 {
                continue;
            }
            let (x0, x1) = (px, px + base);
            let (z0, z1) = (pz - base, pz + base);
            let v = Vec3::new;
            #[rustfmt::skip]
            let faces = [
                [v(x0, bottom, z0), v(x1, bottom, z0), v(x1, bottom, z1), v(x0, bottom, z1)],
                [v(x0, top, z0), v(x1, top, z0), v(x1, top, z1), v(x0, top, z1)],
                [v(x0, bottom, z1), v(x1, bottom, z1), v(x1, top, z1), v(x0, top, z1)],
                [v(x0, bottom, z0), v(x1, bottom, z0), v(x1, top, z0), v(x0, top, z0)],
            ];
            for corners in faces {
                quad(&mut out, corners, POST_BROWN);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_counts_match_tables() {
        for mesh in MeshId::ALL {
            let verts = mesh.vertices();
            assert_eq!(verts.len() % 3, 0, "{}", mesh.name());
            assert_eq!(verts.len() as u32 / 3, mesh.triangle_count(), "{}", mesh.name());
        }
    }

    #[test]
    fn hull_has_six_colored_faces() {
        let hull = hull_mesh();
        assert_eq!(hull.len(), 36);
        let mut colors: Vec<[u32; 4]> = hull
            .iter()
            .map(|v| v.color.map(f32::to_bits))
            .collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn posts_sit_on_the_water_edge() {
        let posts = posts_mesh();
        assert_eq!(posts.len(), 8 * 24);
        assert!(posts.iter().all(|v| v.position[0].abs() < 3.1));
        assert!(posts.iter().all(|v| v.position[2].abs() < 2.1));
        // Nothing at the centre of the water.
        assert!(!posts
            .iter()
            .any(|v| v.position[0].abs() < 0.01 && v.position[2].abs() < 0.01));
    }

    #[test]
    fn searchlight_sits_ahead_of_the_bow() {
        assert!(searchlight_mesh().iter().all(|v| v.position[2] > 0.25));
    }

    #[test]
    fn rudder_trails_the_stern() {
        assert!(rudder_mesh().iter().all(|v| v.position[2] < -0.5));
    }

    #[test]
    fn water_covers_bounds() {
        let water = water_mesh();
        let max_x = water.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_z = water.iter().map(|v| v.position[2]).fold(f32::MIN, f32::max);
        assert!(max_x > 2.8 && max_z > 1.8);
    }

    #[test]
    fn vertex_is_pod_sized() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        let water = water_mesh();
        let bytes: &[u8] = bytemuck::cast_slice(&water);
        assert_eq!(bytes.len(), 6 * 28);
    }
}
