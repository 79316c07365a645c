use std::fmt;
use std::str::FromStr;

use glam::{Mat4, Quat, Vec3};

/// Which demo scene to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    /// A single flat-shaded triangle.
    Triangle,
    /// Ten rotated cubes over a floor grid.
    #[default]
    Cubes,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown scene {0:?}, expected \"triangle\" or \"cubes\"")]
pub struct UnknownScene(String);

impl FromStr for SceneKind {
    type Err = UnknownScene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangle" => Ok(Self::Triangle),
            "cubes" => Ok(Self::Cubes),
            _ => Err(UnknownScene(s.to_owned())),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangle => f.write_str("triangle"),
            Self::Cubes => f.write_str("cubes"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// One placement of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub model: Mat4,
    pub color: [f32; 4],
    /// Directional lighting on/off. Unlit instances draw their flat color.
    pub lit: bool,
}

/// Indexed triangle mesh plus the instances to draw it with.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMesh {
    pub name: &'static str,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub instances: Vec<Instance>,
}

/// Square line grid on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub half_extent: i32,
    pub spacing: f32,
    pub height: f32,
    pub color: [f32; 4],
}

impl GridSpec {
    /// Line-list endpoints, two per line.
    pub fn line_vertices(&self) -> Vec<Vec3> {
        let mut verts = Vec::new();
        let extent = self.half_extent as f32 * self.spacing;
        let y = self.height;

        for i in -self.half_extent..=self.half_extent {
            let offset = i as f32 * self.spacing;
            // Lines along X
            verts.push(Vec3::new(-extent, y, offset));
            verts.push(Vec3::new(extent, y, offset));
            // Lines along Z
            verts.push(Vec3::new(offset, y, -extent));
            verts.push(Vec3::new(offset, y, extent));
        }
        verts
    }
}

/// Static geometry for one demo, uploaded once by a GPU backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub kind: SceneKind,
    pub meshes: Vec<SceneMesh>,
    pub grid: Option<GridSpec>,
    pub clear_color: [f64; 4],
}

const CLEAR_COLOR: [f64; 4] = [0.2, 0.3, 0.3, 1.0];

/// World positions of the cubes in [`Scene::cubes`].
pub const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

const CUBE_COLORS: [[f32; 4]; 5] = [
    [0.9, 0.55, 0.25, 1.0],
    [0.25, 0.6, 0.95, 1.0],
    [0.45, 0.8, 0.35, 1.0],
    [0.85, 0.3, 0.45, 1.0],
    [0.9, 0.85, 0.35, 1.0],
];

impl Scene {
    pub fn new(kind: SceneKind) -> Self {
        let scene = match kind {
            SceneKind::Triangle => Self::triangle(),
            SceneKind::Cubes => Self::cubes(),
        };
        tracing::debug!(scene = %kind, instances = scene.instance_count(), "built scene");
        scene
    }

    /// The orange triangle in the z = 0 plane.
    pub fn triangle() -> Self {
        let normal = Vec3::Z;
        let vertices = vec![
            Vertex {
                position: Vec3::new(-0.5, -0.5, 0.0),
                normal,
            },
            Vertex {
                position: Vec3::new(0.5, -0.5, 0.0),
                normal,
            },
            Vertex {
                position: Vec3::new(0.0, 0.5, 0.0),
                normal,
            },
        ];
        Self {
            kind: SceneKind::Triangle,
            meshes: vec![SceneMesh {
                name: "triangle",
                vertices,
                indices: vec![0, 1, 2],
                instances: vec![Instance {
                    model: Mat4::IDENTITY,
                    color: [1.0, 0.5, 0.2, 1.0],
                    lit: false,
                }],
            }],
            grid: None,
            clear_color: CLEAR_COLOR,
        }
    }

    /// Ten unit cubes, the i-th rotated 20°·i about (1, 0.3, 0.5), over a grid.
    pub fn cubes() -> Self {
        let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
        let instances = CUBE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let rotation = Quat::from_axis_angle(axis, (20.0 * i as f32).to_radians());
                Instance {
                    model: Mat4::from_rotation_translation(rotation, position),
                    color: CUBE_COLORS[i % CUBE_COLORS.len()],
                    lit: true,
                }
            })
            .collect();
        let (vertices, indices) = cube_mesh();

        Self {
            kind: SceneKind::Cubes,
            meshes: vec![SceneMesh {
                name: "cube",
                vertices,
                indices,
                instances,
            }],
            grid: Some(GridSpec {
                half_extent: 25,
                spacing: 1.0,
                height: -3.0,
                color: [0.4, 0.45, 0.45, 1.0],
            }),
            clear_color: CLEAR_COLOR,
        }
    }

    pub fn instance_count(&self) -> usize {
        self.meshes.iter().map(|m| m.instances.len()).sum()
    }
}

/// Unit cube vertices and indices, four vertices per face for flat normals.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let v = |x: f32, y: f32, z: f32, normal: Vec3| Vertex {
        position: Vec3::new(x, y, z),
        normal,
    };
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        v(-p, -p,  p, Vec3::Z), v( p, -p,  p, Vec3::Z), v( p,  p,  p, Vec3::Z), v(-p,  p,  p, Vec3::Z),
        // -Z face
        v( p, -p, -p, Vec3::NEG_Z), v(-p, -p, -p, Vec3::NEG_Z), v(-p,  p, -p, Vec3::NEG_Z), v( p,  p, -p, Vec3::NEG_Z),
        // +X face
        v( p, -p,  p, Vec3::X), v( p, -p, -p, Vec3::X), v( p,  p, -p, Vec3::X), v( p,  p,  p, Vec3::X),
        // -X face
        v(-p, -p, -p, Vec3::NEG_X), v(-p, -p,  p, Vec3::NEG_X), v(-p,  p,  p, Vec3::NEG_X), v(-p,  p, -p, Vec3::NEG_X),
        // +Y face
        v(-p,  p,  p, Vec3::Y), v( p,  p,  p, Vec3::Y), v( p,  p, -p, Vec3::Y), v(-p,  p, -p, Vec3::Y),
        // -Y face
        v(-p, -p, -p, Vec3::NEG_Y), v( p, -p, -p, Vec3::NEG_Y), v( p, -p,  p, Vec3::NEG_Y), v(-p, -p,  p, Vec3::NEG_Y),
    ];
    let indices = (0..6u16)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_scene() {
        let scene = Scene::triangle();
        assert_eq!(scene.kind, SceneKind::Triangle);
        assert_eq!(scene.instance_count(), 1);
        assert_eq!(scene.meshes[0].indices, vec![0, 1, 2]);
        assert_eq!(scene.meshes[0].instances[0].color, [1.0, 0.5, 0.2, 1.0]);
        assert!(scene.grid.is_none());
    }

    #[test]
    fn cube_scene_layout() {
        let scene = Scene::cubes();
        assert_eq!(scene.instance_count(), 10);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        // First cube is unrotated at the origin.
        assert_eq!(mesh.instances[0].model, Mat4::IDENTITY);
        let translation = mesh.instances[3].model.w_axis.truncate();
        assert_eq!(translation, CUBE_POSITIONS[3]);
    }

    #[test]
    fn grid_line_count() {
        let grid = Scene::cubes().grid.unwrap();
        // (2n + 1) lines in each of the two directions, two endpoints per line.
        assert_eq!(grid.line_vertices().len(), (2 * 25 + 1) * 2 * 2);
        assert!(grid.line_vertices().iter().all(|v| v.y == -3.0));
    }

    #[test]
    fn scene_kind_parses() {
        assert_eq!("cubes".parse::<SceneKind>().unwrap(), SceneKind::Cubes);
        assert_eq!("Triangle".parse::<SceneKind>().unwrap(), SceneKind::Triangle);
        assert!("teapot".parse::<SceneKind>().is_err());
        assert_eq!(SceneKind::Cubes.to_string(), "cubes");
        assert_eq!(Scene::new(SceneKind::Triangle), Scene::triangle());
    }
}
