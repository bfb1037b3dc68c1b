//! Grid geometry seams and the particle/spring topology built from them.

use crate::config::Anchors;
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::spring::{Spring, SpringKind};
use crate::vec::{Vec, Vec3};
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// Read side of the externally owned cloth grid.
///
/// The simulator only consults this once, at construction.
pub trait GridGeometry<F: Float> {
    /// Number of columns.
    fn width(&self) -> usize;
    /// Number of rows.
    fn height(&self) -> usize;
    /// Distance between axis-aligned neighbors in the rest pose.
    fn spacing(&self) -> F;
    /// Rest-pose position of node `(col, row)`.
    fn rest_position(&self, col: usize, row: usize) -> Vec3<F>;
    /// Flat index of node `(col, row)`. Must be a bijection onto `0..width*height`.
    fn index(&self, col: usize, row: usize) -> usize {
        row * self.width() + col
    }
}

/// Write side of the grid: receives live particle positions every tick.
///
/// Every index in `0..particle_count` is written on each sync, so slice and
/// `Vec` sinks must be at least that long or the write panics.
pub trait PositionSink<F: Float> {
    fn set_position(&mut self, index: usize, position: Vec3<F>);
}

impl<F: Float> PositionSink<F> for [Vec3<F>] {
    fn set_position(&mut self, index: usize, position: Vec3<F>) {
        self[index] = position;
    }
}

impl<F: Float> PositionSink<F> for AllocVec<Vec3<F>> {
    fn set_position(&mut self, index: usize, position: Vec3<F>) {
        self[index] = position;
    }
}

/// A flat rectangular grid: the default rendering-side cloth.
///
/// Node `(col, row)` rests at `origin + u·col·spacing + v·row·spacing`.
/// Row 0 is the top edge; by default `u = +X` and `v = -Y`, so the cloth
/// hangs downward from its first row.
#[derive(Clone, Debug)]
pub struct RectGrid<F: Float> {
    width: usize,
    height: usize,
    spacing: F,
    origin: Vec3<F>,
    u: Vec3<F>,
    v: Vec3<F>,
    positions: AllocVec<Vec3<F>>,
}

impl<F: Float> RectGrid<F> {
    pub fn new(width: usize, height: usize, spacing: F) -> Self {
        let mut grid = RectGrid {
            width,
            height,
            spacing,
            origin: Vec3::zero(),
            u: Vec3::new(F::one(), F::zero(), F::zero()),
            v: Vec3::new(F::zero(), -F::one(), F::zero()),
            positions: AllocVec::new(),
        };
        grid.reset();
        grid
    }

    pub fn with_origin(mut self, origin: Vec3<F>) -> Self {
        self.origin = origin;
        self.reset();
        self
    }

    /// Set the in-plane directions of columns (`u`) and rows (`v`).
    ///
    /// Both are normalized and must be non-zero and perpendicular, otherwise
    /// neighbor distances would not match the spring rest lengths.
    pub fn with_axes(mut self, u: Vec3<F>, v: Vec3<F>) -> Result<Self, ClothError> {
        let (u, v) = (u.normalize(), v.normalize());
        if u == Vec3::zero() || v == Vec3::zero() || !u.dot(v).is_near_zero(F::from_f32(1e-6)) {
            return Err(ClothError::InvalidAxes);
        }
        self.u = u;
        self.v = v;
        self.reset();
        Ok(self)
    }

    /// Put every node back at its rest position.
    pub fn reset(&mut self) {
        let mut positions = AllocVec::with_capacity(self.width * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                positions.push(self.rest_position(col, row));
            }
        }
        self.positions = positions;
    }

    pub fn positions(&self) -> &[Vec3<F>] { &self.positions }

    pub fn position_at(&self, col: usize, row: usize) -> Vec3<F> {
        self.positions[GridGeometry::index(self, col, row)]
    }
}

impl<F: Float> GridGeometry<F> for RectGrid<F> {
    fn width(&self) -> usize { self.width }
    fn height(&self) -> usize { self.height }
    fn spacing(&self) -> F { self.spacing }

    fn rest_position(&self, col: usize, row: usize) -> Vec3<F> {
        let du = F::from_usize(col) * self.spacing;
        let dv = F::from_usize(row) * self.spacing;
        self.origin + self.u.scale(du) + self.v.scale(dv)
    }
}

impl<F: Float> PositionSink<F> for RectGrid<F> {
    fn set_position(&mut self, index: usize, position: Vec3<F>) {
        self.positions[index] = position;
    }
}

/// Particles and springs derived from a grid.
#[derive(Clone, Debug)]
pub struct Topology<F: Float> {
    pub particles: AllocVec<Particle<F>>,
    pub springs: AllocVec<Spring<F>>,
    pub width: usize,
    pub height: usize,
}

/// Neighbor offsets `(dcol, drow)` whose springs a node owns. Mirror
/// directions belong to the other endpoint, so each pair appears once.
const OWNED_NEIGHBORS: [(isize, isize, SpringKind); 4] = [
    (1, 0, SpringKind::Structural),
    (0, 1, SpringKind::Structural),
    (1, 1, SpringKind::Shear),
    (-1, 1, SpringKind::Shear),
];

/// Number of springs in a `width × height` 8-connected grid.
pub fn expected_spring_count(width: usize, height: usize) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let (w, h) = (width, height);
    h * (w - 1) + w * (h - 1) + 2 * (w - 1) * (h - 1)
}

impl<F: Float> Topology<F> {
    /// Build `width·height` particles and every structural and shear spring.
    ///
    /// Mass is spread evenly: each particle gets `total_mass / (width·height)`.
    /// Mass, stiffness and the grid are all checked before anything is allocated.
    pub fn build<G: GridGeometry<F> + ?Sized>(
        grid: &G,
        total_mass: F,
        stiffness: F,
        anchors: Anchors,
    ) -> Result<Self, ClothError> {
        if !(total_mass.is_finite() && total_mass > F::zero()) {
            return Err(ClothError::InvalidMass);
        }
        if !(stiffness.is_finite() && stiffness > F::zero()) {
            return Err(ClothError::InvalidStiffness);
        }
        let width = grid.width();
        let height = grid.height();
        let count = width.checked_mul(height).unwrap_or(0);
        if width == 0 || height == 0 || count <= 1 {
            return Err(ClothError::InvalidGridDimensions { width, height });
        }
        let spacing = grid.spacing();
        if !(spacing.is_finite() && spacing > F::zero()) {
            return Err(ClothError::InvalidSpacing);
        }

        let mass = total_mass / F::from_usize(count);
        let mut slots: AllocVec<Option<Particle<F>>> = vec![None; count];
        for row in 0..height {
            for col in 0..width {
                let index = grid.index(col, row);
                if index >= count {
                    return Err(ClothError::GridIndexOutOfRange { col, row, index, count });
                }
                if slots[index].is_some() {
                    return Err(ClothError::DuplicateGridIndex { index });
                }
                let position = grid.rest_position(col, row);
                slots[index] = Some(if is_anchor(anchors, col, row, width) {
                    Particle::anchored(position, mass)
                } else {
                    Particle::new(position, mass)
                });
            }
        }
        // Every slot is filled: `count` distinct in-range indices were written.
        let mut particles: AllocVec<Particle<F>> = slots.into_iter().flatten().collect();

        let diagonal = spacing * F::two().sqrt();
        let mut springs = AllocVec::with_capacity(expected_spring_count(width, height));
        for row in 0..height {
            for col in 0..width {
                for &(dc, dr, kind) in OWNED_NEIGHBORS.iter() {
                    let Some(ncol) = col.checked_add_signed(dc).filter(|&c| c < width) else {
                        continue;
                    };
                    let Some(nrow) = row.checked_add_signed(dr).filter(|&r| r < height) else {
                        continue;
                    };
                    let from = grid.index(col, row);
                    let to = grid.index(ncol, nrow);
                    let rest_length = match kind {
                        SpringKind::Structural => spacing,
                        SpringKind::Shear => diagonal,
                    };
                    let spring_index = springs.len();
                    springs.push(Spring::new(from, to, stiffness, rest_length, kind));
                    particles[from].link_outgoing(spring_index);
                    particles[to].link_incoming(spring_index);
                }
            }
        }

        Ok(Topology { particles, springs, width, height })
    }
}

fn is_anchor(anchors: Anchors, col: usize, row: usize, width: usize) -> bool {
    match anchors {
        Anchors::TopCorners => row == 0 && (col == 0 || col == width - 1),
        Anchors::TopRow => row == 0,
        Anchors::None => false,
    }
}
