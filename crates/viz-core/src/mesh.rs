use crate::constants::*;
use crate::drive::DriveSignal;
use fnv::FnvHashMap;
use glam::Vec3;
use noise::{NoiseFn, Simplex};

/// Interleaved vertex layout shared with the renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Seeded 3D coherent-noise field used to perturb vertex radii.
pub struct NoiseField {
    simplex: Simplex,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
        }
    }

    /// Sample the field; returns a value in [-1, 1].
    pub fn sample(&self, p: [f64; 3]) -> f32 {
        self.simplex.get(p) as f32
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(NOISE_SEED)
    }
}

/// Deformable sphere.
///
/// Every vertex keeps an immutable unit-length home direction and a mutable
/// radius. Deformation always recomputes positions from the home direction,
/// never from the previous frame's displaced position, so no drift can
/// accumulate.
pub struct SphereMesh {
    home: Vec<Vec3>,
    radii: Vec<f32>,
    vertices: Vec<MeshVertex>,
    triangles: Vec<[u32; 3]>,
    edges: Vec<u32>,
}

impl SphereMesh {
    /// Build an icosphere with the given subdivision order.
    pub fn icosphere(subdivisions: u32) -> Self {
        let (home, triangles) = build_icosphere(subdivisions);
        let vertices = home
            .iter()
            .map(|d| MeshVertex {
                position: (*d * BASE_RADIUS).to_array(),
                normal: d.to_array(),
            })
            .collect();
        let radii = vec![BASE_RADIUS; home.len()];
        let edges = collect_edges(&triangles);
        Self {
            home,
            radii,
            vertices,
            triangles,
            edges,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.home.len()
    }

    /// Home direction of vertex `i` (unit length).
    pub fn home(&self, i: usize) -> Vec3 {
        self.home[i]
    }

    /// Current radius of vertex `i`.
    pub fn radius(&self, i: usize) -> f32 {
        self.radii[i]
    }

    /// Place vertex `i` at `radius` along its home direction.
    pub fn set_radius(&mut self, i: usize, radius: f32) {
        self.radii[i] = radius;
        self.vertices[i].position = (self.home[i] * radius).to_array();
    }

    /// Recompute every radius from the drive signal and elapsed time.
    ///
    /// For each vertex the noise field is evaluated at the home direction
    /// offset by per-axis time drifts, then the radius is
    /// `BASE_RADIUS + bass + noise * NOISE_AMPLITUDE * treble * 2`.
    /// Pure given its inputs apart from the vertex mutation.
    pub fn deform(&mut self, field: &NoiseField, drive: &DriveSignal, elapsed_ms: f64) {
        let t = elapsed_ms * NOISE_TIME_RATE;
        let [rx, ry, rz] = NOISE_AXIS_RATES;
        for i in 0..self.home.len() {
            let d = self.home[i];
            let n = field.sample([
                d.x as f64 + t * rx,
                d.y as f64 + t * ry,
                d.z as f64 + t * rz,
            ]);
            let radius = BASE_RADIUS + drive.bass + n * NOISE_AMPLITUDE * drive.treble * 2.0;
            self.set_radius(i, radius);
        }
    }

    /// Refresh vertex normals after a deformation so lighting stays correct.
    ///
    /// Face normals are accumulated unnormalized (area-weighted) into each
    /// corner vertex, then normalized.
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for tri in &self.triangles {
            let a = Vec3::from(self.vertices[tri[0] as usize].position);
            let b = Vec3::from(self.vertices[tri[1] as usize].position);
            let c = Vec3::from(self.vertices[tri[2] as usize].position);
            let face = (b - a).cross(c - a);
            for &i in tri {
                acc[i as usize] += face;
            }
        }
        for (v, n) in self.vertices.iter_mut().zip(acc) {
            v.normal = n.normalize_or_zero().to_array();
        }
    }

    /// Interleaved vertex data for the renderer.
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Line-list indices covering each unique edge once.
    pub fn edge_indices(&self) -> &[u32] {
        &self.edges
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self::icosphere(SPHERE_SUBDIVISIONS)
    }
}

/// Unit icosahedron refined by recursive edge midpoint subdivision.
fn build_icosphere(subdivisions: u32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut verts: Vec<Vec3> = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|v| Vec3::from_array(*v).normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut verts, &mut midpoints, a, b);
            let bc = midpoint(&mut verts, &mut midpoints, b, c);
            let ca = midpoint(&mut verts, &mut midpoints, c, a);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }
    (verts, faces)
}

fn midpoint(
    verts: &mut Vec<Vec3>,
    cache: &mut FnvHashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&i) = cache.get(&key) {
        return i;
    }
    let m = ((verts[a as usize] + verts[b as usize]) * 0.5).normalize();
    let i = verts.len() as u32;
    verts.push(m);
    cache.insert(key, i);
    i
}

fn collect_edges(faces: &[[u32; 3]]) -> Vec<u32> {
    let mut seen: FnvHashMap<(u32, u32), ()> = FnvHashMap::default();
    let mut edges = Vec::with_capacity(faces.len() * 3);
    for [a, b, c] in faces {
        for (u, v) in [(*a, *b), (*b, *c), (*c, *a)] {
            let key = if u < v { (u, v) } else { (v, u) };
            if seen.insert(key, ()).is_none() {
                edges.push(u);
                edges.push(v);
            }
        }
    }
    edges
}
