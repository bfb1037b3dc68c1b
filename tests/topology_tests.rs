use std::collections::HashSet;

use drape::grid::expected_spring_count;
use drape::{
    Anchors, ClothConfig, ClothError, ClothSimulator, GridGeometry, RectGrid, SpringKind, Topology,
    Vec3,
};
use float_cmp::approx_eq;
use test_case::test_case;

fn build(width: usize, height: usize, total_mass: f64) -> ClothSimulator<f64> {
    let grid = RectGrid::new(width, height, 0.1);
    let config = ClothConfig::new().with_total_mass(total_mass);
    ClothSimulator::new(&grid, &config).unwrap()
}

#[test_case(2, 1 ; "two by one")]
#[test_case(1, 3 ; "one column")]
#[test_case(2, 2 ; "two by two")]
#[test_case(5, 4 ; "five by four")]
#[test_case(40, 30 ; "forty by thirty")]
fn particle_and_spring_counts(width: usize, height: usize) {
    let cloth = build(width, height, 1.0);
    assert_eq!(cloth.particle_count(), width * height);
    assert_eq!(cloth.spring_count(), expected_spring_count(width, height));
}

#[test_case(2, 2, 1.0 ; "unit mass")]
#[test_case(7, 3, 2.5 ; "odd grid")]
#[test_case(40, 30, 1.0 ; "large grid")]
fn masses_sum_to_total(width: usize, height: usize, total: f64) {
    let cloth = build(width, height, total);
    assert!(approx_eq!(f64, cloth.total_mass(), total, epsilon = 1e-12));
    let expected = total / (width * height) as f64;
    for p in cloth.particles() {
        assert!(approx_eq!(f64, p.mass(), expected, ulps = 2));
    }
}

#[test]
fn every_pair_appears_once_and_is_a_king_move() {
    let (width, height) = (6, 5);
    let cloth = build(width, height, 1.0);
    let mut seen = HashSet::new();
    for s in cloth.springs() {
        assert!(s.from < cloth.particle_count() && s.to < cloth.particle_count());
        let pair = (s.from.min(s.to), s.from.max(s.to));
        assert!(seen.insert(pair), "duplicate spring {:?}", pair);

        let (fc, fr) = (s.from % width, s.from / width);
        let (tc, tr) = (s.to % width, s.to / width);
        let dc = fc.abs_diff(tc);
        let dr = fr.abs_diff(tr);
        assert!(dc <= 1 && dr <= 1 && (dc, dr) != (0, 0));
        let expected_kind = if dc + dr == 2 { SpringKind::Shear } else { SpringKind::Structural };
        assert_eq!(s.kind, expected_kind);
    }
}

#[test]
fn spring_bookkeeping_matches_endpoints() {
    let cloth = build(4, 4, 1.0);
    for (i, p) in cloth.particles().iter().enumerate() {
        for &s in p.outgoing_springs() {
            assert_eq!(cloth.springs()[s].from, i);
        }
        for &s in p.incoming_springs() {
            assert_eq!(cloth.springs()[s].to, i);
        }
    }
    let linked: usize = cloth
        .particles()
        .iter()
        .map(|p| p.outgoing_springs().len() + p.incoming_springs().len())
        .sum();
    assert_eq!(linked, 2 * cloth.spring_count());
}

#[test]
fn rest_lengths_follow_spacing_not_positions() {
    let grid = RectGrid::new(3, 3, 0.2f64)
        .with_axes(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, -0.5, 0.866))
        .unwrap();
    let cloth = ClothSimulator::new(&grid, &ClothConfig::new()).unwrap();
    for s in cloth.springs() {
        let expected = match s.kind {
            SpringKind::Structural => 0.2,
            SpringKind::Shear => 0.2 * std::f64::consts::SQRT_2,
        };
        assert!(approx_eq!(f64, s.rest_length, expected, epsilon = 1e-12));
        assert_eq!(s.stiffness, 40.0);
    }
}

#[test_case(0, 5 ; "zero width")]
#[test_case(5, 0 ; "zero height")]
#[test_case(1, 1 ; "single node")]
fn degenerate_grids_rejected(width: usize, height: usize) {
    let grid = RectGrid::new(width, height, 1.0f32);
    let err = ClothSimulator::new(&grid, &ClothConfig::new()).unwrap_err();
    assert_eq!(err, ClothError::InvalidGridDimensions { width, height });
}

#[test]
fn invalid_parameters_rejected_before_building() {
    let grid = RectGrid::new(3, 3, 1.0f32);
    let bad_mass = ClothConfig::new().with_total_mass(0.0);
    assert_eq!(ClothSimulator::new(&grid, &bad_mass).unwrap_err(), ClothError::InvalidMass);
    let bad_k = ClothConfig::new().with_stiffness(-2.0);
    assert_eq!(ClothSimulator::new(&grid, &bad_k).unwrap_err(), ClothError::InvalidStiffness);

    let flat = RectGrid::new(3, 3, 0.0f32);
    assert_eq!(
        ClothSimulator::new(&flat, &ClothConfig::new()).unwrap_err(),
        ClothError::InvalidSpacing
    );
}

#[test_case(0.0, 40.0, ClothError::InvalidMass ; "zero mass")]
#[test_case(f64::NAN, 40.0, ClothError::InvalidMass ; "nan mass")]
#[test_case(1.0, -5.0, ClothError::InvalidStiffness ; "negative stiffness")]
#[test_case(1.0, f64::NAN, ClothError::InvalidStiffness ; "nan stiffness")]
#[test_case(1.0, f64::INFINITY, ClothError::InvalidStiffness ; "infinite stiffness")]
fn topology_rejects_bad_mass_or_stiffness(total_mass: f64, stiffness: f64, expected: ClothError) {
    let grid = RectGrid::new(2, 2, 1.0f64);
    let err = Topology::build(&grid, total_mass, stiffness, Anchors::None).unwrap_err();
    assert_eq!(err, expected);
}

#[test_case(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, -1.0, 0.0) ; "skewed")]
#[test_case(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0) ; "parallel")]
#[test_case(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0) ; "zero column axis")]
fn non_perpendicular_axes_rejected(u: Vec3<f64>, v: Vec3<f64>) {
    let err = RectGrid::new(3, 3, 0.5f64).with_axes(u, v).unwrap_err();
    assert_eq!(err, ClothError::InvalidAxes);
}

#[test]
fn perpendicular_axes_keep_neighbor_distances_at_rest_length() {
    let grid = RectGrid::new(3, 3, 0.5f64)
        .with_axes(Vec3::new(0.0, 0.0, 2.0), Vec3::new(3.0, -4.0, 0.0))
        .unwrap();
    let cloth = ClothSimulator::new(&grid, &ClothConfig::new()).unwrap();
    assert!(cloth.potential_energy() < 1e-20);
}

/// Grid whose index mapping collapses two nodes onto one slot.
struct BrokenIndexGrid;

impl GridGeometry<f32> for BrokenIndexGrid {
    fn width(&self) -> usize { 2 }
    fn height(&self) -> usize { 2 }
    fn spacing(&self) -> f32 { 1.0 }
    fn rest_position(&self, col: usize, row: usize) -> Vec3<f32> {
        Vec3::new(col as f32, -(row as f32), 0.0)
    }
    fn index(&self, col: usize, _row: usize) -> usize { col }
}

#[test]
fn non_bijective_index_rejected() {
    let err = ClothSimulator::new(&BrokenIndexGrid, &ClothConfig::new()).unwrap_err();
    assert_eq!(err, ClothError::DuplicateGridIndex { index: 0 });
}

/// Column-major grid: particles must land at the grid's own indices.
struct ColumnMajorGrid;

impl GridGeometry<f64> for ColumnMajorGrid {
    fn width(&self) -> usize { 3 }
    fn height(&self) -> usize { 2 }
    fn spacing(&self) -> f64 { 1.0 }
    fn rest_position(&self, col: usize, row: usize) -> Vec3<f64> {
        Vec3::new(col as f64, -(row as f64), 0.0)
    }
    fn index(&self, col: usize, row: usize) -> usize { col * 2 + row }
}

#[test]
fn custom_index_mapping_respected() {
    let cloth = ClothSimulator::new(&ColumnMajorGrid, &ClothConfig::new()).unwrap();
    assert_eq!(cloth.particles()[3].position, Vec3::new(1.0, -1.0, 0.0));
    assert_eq!(cloth.particle_at(2, 0).unwrap().position, Vec3::new(2.0, 0.0, 0.0));
    // Top corners under this mapping are flat indices 0 and 4.
    let pinned: Vec<usize> = (0..6).filter(|&i| cloth.particles()[i].is_pinned()).collect();
    assert_eq!(pinned, vec![0, 4]);
}

#[test_case(Anchors::TopCorners, 2 ; "corners")]
#[test_case(Anchors::TopRow, 5 ; "row")]
#[test_case(Anchors::None, 0 ; "free")]
fn anchor_counts(anchors: Anchors, expected: usize) {
    let grid = RectGrid::new(5, 4, 0.1f32);
    let config = ClothConfig::new().with_anchors(anchors);
    let cloth = ClothSimulator::new(&grid, &config).unwrap();
    assert_eq!(cloth.particles().iter().filter(|p| p.is_pinned()).count(), expected);
}
