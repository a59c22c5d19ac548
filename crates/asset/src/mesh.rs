//! CPU-side mesh representation produced by the OBJ loader.

use glam::Vec3;

/// Axis-aligned bounding box in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| b.including(*p)))
    }

    /// Grow the box to contain `p`.
    #[inline]
    pub fn including(self, p: Vec3) -> Self {
        Self::new(self.min.min(p), self.max.max(p))
    }

    /// Component-wise midpoint of `min` and `max`.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest absolute coordinate touched by the box.
    pub fn max_abs_coordinate(&self) -> f32 {
        self.min.abs().max(self.max.abs()).max_element()
    }
}

/// Per-vertex layout of [`Mesh::draw_buffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexLayout {
    /// `[x, y, z]`
    Position,
    /// `[x, y, z, nx, ny, nz]`
    PositionNormal,
}

impl VertexLayout {
    #[inline]
    pub const fn floats_per_vertex(self) -> usize {
        match self {
            VertexLayout::Position => 3,
            VertexLayout::PositionNormal => 6,
        }
    }

    #[inline]
    pub const fn stride_bytes(self) -> usize {
        self.floats_per_vertex() * std::mem::size_of::<f32>()
    }
}

/// One triangle, as 0-based indices into [`Mesh::positions`] and [`Mesh::normals`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub positions: [u32; 3],
    /// Present for every face when the mesh has normals, absent otherwise.
    pub normals: Option<[u32; 3]>,
}

/// Triangle mesh loaded from an OBJ file, with a de-indexed draw stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub has_normals: bool,
    pub faces: Vec<Triangle>,
    pub draw_buffer: Vec<f32>,
    pub bounds: Bounds,
    pub center: Vec3,
}

impl Mesh {
    pub fn layout(&self) -> VertexLayout {
        if self.has_normals {
            VertexLayout::PositionNormal
        } else {
            VertexLayout::Position
        }
    }

    #[inline]
    pub fn stride_bytes(&self) -> usize {
        self.layout().stride_bytes()
    }

    /// Number of vertices in the draw buffer (three per face).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.faces.len() * 3
    }

    /// Flattened position indices, for indexed drawing of `positions`.
    pub fn index_buffer(&self) -> Vec<u32> {
        self.faces.iter().flat_map(|f| f.positions).collect()
    }

    /// The draw buffer reinterpreted as bytes for upload.
    #[inline]
    pub fn draw_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.draw_buffer)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
