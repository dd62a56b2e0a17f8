use drape::constraint::relax_edge;
use drape::graph::NEIGHBOR_FLEX;
use drape::integrator::{integrate_vertex, velocity_raw};
use drape::{
    Cloth, ClothConfig, ClothGraph, FixedPointArrangement, FloorPlane, Forces, Ray, Slot, Vec3,
    VertexId,
};
use drape::vec::Vec as _;

fn pair() -> ClothGraph<f64> {
    // n = 2, spacing 0.5: vertex 0 at the origin, vertex 1 at (0.5, 0, 0)
    ClothGraph::build(2, 1.0, FixedPointArrangement::Loose)
}

#[test]
fn zero_force_motion_does_not_drift() {
    let mut g = pair();
    let v = g.vertex_mut(VertexId(0));
    v.pos = Vec3::new(1.0, 2.0, 3.0);
    v.pos_old = Vec3::new(0.5, 1.5, 2.5);
    let step = Vec3::new(0.5, 0.5, 0.5);

    for _ in 0..100 {
        let before = v.pos;
        assert!(integrate_vertex(v, &Forces::none(), 1.0 / 60.0));
        assert_eq!(v.pos - before, step);
        assert_eq!(velocity_raw(v), step);
    }
}

#[test]
fn free_fall_gravity() {
    let mut g = pair();
    let v = g.vertex_mut(VertexId(0));
    v.pos = Vec3::new(0.0, 100.0, 0.0);
    v.pos_old = v.pos;
    let forces = Forces { gravity: Vec3::new(0.0, -9.8, 0.0), wind: Vec3::zero() };

    for _ in 0..60 {
        integrate_vertex(v, &forces, 1.0 / 60.0);
    }

    let expected_y = 100.0 - 0.5 * 9.8 * 1.0;
    assert!((v.pos.y - expected_y).abs() < 1.0, "pos.y = {}, expected ~ {}", v.pos.y, expected_y);
}

#[test]
fn gravity_is_independent_of_mass() {
    let mut g = pair();
    let forces = Forces { gravity: Vec3::new(0.0, -9.8, 0.0), wind: Vec3::zero() };
    g.vertex_mut(VertexId(1)).mass = 5.0;
    for id in [VertexId(0), VertexId(1)] {
        integrate_vertex(g.vertex_mut(id), &forces, 0.1);
    }
    let dy0 = g.vertex(VertexId(0)).pos.y;
    let dy1 = g.vertex(VertexId(1)).pos.y;
    assert!((dy0 - dy1).abs() < 1e-12);
    assert!((dy0 + 0.098).abs() < 1e-12);
}

#[test]
fn wind_accelerates_light_vertices_more() {
    let mut g = pair();
    let forces = Forces { gravity: Vec3::zero(), wind: Vec3::new(1.0, 0.0, 0.0) };
    g.vertex_mut(VertexId(0)).mass = 2.0;
    integrate_vertex(g.vertex_mut(VertexId(0)), &forces, 1.0);
    integrate_vertex(g.vertex_mut(VertexId(1)), &forces, 1.0);
    assert!((g.vertex(VertexId(0)).pos.x - 0.5).abs() < 1e-12);
    assert!((g.vertex(VertexId(1)).pos.x - 1.5).abs() < 1e-12);
}

#[test]
fn pinned_vertex_stays_fixed() {
    let mut g = pair();
    let v = g.vertex_mut(VertexId(0));
    v.fixed = true;
    let forces = Forces { gravity: Vec3::new(0.0, -1000.0, 0.0), wind: Vec3::new(1000.0, 0.0, 0.0) };
    assert!(!integrate_vertex(v, &forces, 1.0 / 60.0));
    assert_eq!(v.pos, Vec3::zero());
}

fn stretched_pair(b_x: f64) -> ClothGraph<f64> {
    let mut g = pair();
    g.vertex_mut(VertexId(1)).pos = Vec3::new(b_x, 0.0, 0.0);
    g
}

// band limits for the 0.5 rest length, from the shipped f32 flex constant
fn upper() -> f64 {
    0.5 * (1.0 + NEIGHBOR_FLEX as f64)
}

fn lower() -> f64 {
    0.5 * (1.0 - NEIGHBOR_FLEX as f64)
}

fn right_edge(g: &ClothGraph<f64>) -> drape::Edge<f64> {
    let e = g.vertex(VertexId(0)).neighbor(Slot::Right).unwrap();
    g.edge(e).clone()
}

#[test]
fn within_band_is_left_alone() {
    // rest 0.5, flex 0.01: anything in [0.495, 0.505] is accepted
    let mut g = stretched_pair(0.503);
    let e = right_edge(&g);
    assert!(!relax_edge(&e, g.vertices_mut()));
    assert_eq!(g.vertex(VertexId(1)).pos.x, 0.503);
}

#[test]
fn stretched_edge_meets_upper_band_halfway() {
    let mut g = stretched_pair(1.0);
    let e = right_edge(&g);
    assert!(relax_edge(&e, g.vertices_mut()));
    let a = g.vertex(VertexId(0)).pos;
    let b = g.vertex(VertexId(1)).pos;
    assert!((a.distance(b) - upper()).abs() < 1e-12);
    assert!((a.x - (1.0 - upper()) / 2.0).abs() < 1e-12, "each endpoint takes half: {:?}", a);
}

#[test]
fn compressed_edge_meets_lower_band() {
    let mut g = stretched_pair(0.1);
    let e = right_edge(&g);
    relax_edge(&e, g.vertices_mut());
    let d = g.vertex(VertexId(0)).pos.distance(g.vertex(VertexId(1)).pos);
    assert!((d - lower()).abs() < 1e-12);
}

#[test]
fn fixed_endpoint_takes_no_correction() {
    let mut g = stretched_pair(1.0);
    g.vertex_mut(VertexId(0)).fixed = true;
    let e = right_edge(&g);
    relax_edge(&e, g.vertices_mut());
    assert_eq!(g.vertex(VertexId(0)).pos, Vec3::zero());
    assert!((g.vertex(VertexId(1)).pos.x - upper()).abs() < 1e-12);

    let mut g = stretched_pair(1.0);
    g.vertex_mut(VertexId(1)).fixed = true;
    relax_edge(&e, g.vertices_mut());
    assert!((g.vertex(VertexId(0)).pos.x - (1.0 - upper())).abs() < 1e-12);
    assert_eq!(g.vertex(VertexId(1)).pos.x, 1.0);
}

#[test]
fn both_fixed_is_a_no_op() {
    let mut g = stretched_pair(1.0);
    g.vertex_mut(VertexId(0)).fixed = true;
    g.vertex_mut(VertexId(1)).fixed = true;
    let e = right_edge(&g);
    assert!(!relax_edge(&e, g.vertices_mut()));
    assert_eq!(g.vertex(VertexId(1)).pos.x, 1.0);
}

#[test]
fn coincident_endpoints_produce_no_nan() {
    let mut g = stretched_pair(0.0);
    let e = right_edge(&g);
    assert!(!relax_edge(&e, g.vertices_mut()));
    for v in g.vertices() {
        assert!(v.pos.x.is_finite() && v.pos.y.is_finite() && v.pos.z.is_finite());
    }
}

const FLOOR: f64 = -1.15;

fn floor() -> FloorPlane<f64> {
    FloorPlane::new(FLOOR, 0.1)
}

#[test]
fn falling_vertex_is_rewound_onto_floor() {
    let mut g = pair();
    let v = g.vertex_mut(VertexId(0));
    v.pos_old = Vec3::new(0.0, -1.0, 0.0);
    v.pos = Vec3::new(0.2, -1.3, 0.0);
    assert!(floor().resolve(v));
    // half the step was below the plane: x rewinds 0.1, then replays 10% of that
    assert!((v.pos.x - 0.11).abs() < 1e-12, "x = {}", v.pos.x);
    assert!((v.pos.y - (FLOOR + 1e-4)).abs() < 1e-9);
}

#[test]
fn sliding_under_floor_only_loses_speed() {
    let mut g = pair();
    let v = g.vertex_mut(VertexId(0));
    v.pos_old = Vec3::new(0.0, -1.2, 0.0);
    v.pos = Vec3::new(0.2, -1.2, 0.0);
    assert!(floor().resolve(v));
    assert!((v.pos.x - 0.02).abs() < 1e-12, "x = {}", v.pos.x);
    assert!(v.pos.y >= FLOOR);
    assert!(v.pos.x.is_finite() && v.pos.z.is_finite());
}

#[test]
fn step_starting_under_floor_is_not_flung_sideways() {
    // released after being dragged under the plane: the step never crossed it
    let mut g = pair();
    let v = g.vertex_mut(VertexId(0));
    v.pos_old = Vec3::new(0.0, -2.0, 0.0);
    v.pos = Vec3::new(0.1, -2.0001, 0.0);
    assert!(floor().resolve(v));
    assert!((v.pos.x - 0.01).abs() < 1e-12, "x = {}", v.pos.x);
    assert!((v.pos.y - (FLOOR + 1e-4)).abs() < 1e-9);
}

#[test]
fn released_grab_under_floor_lands_nearby() {
    let config = ClothConfig::new()
        .with_vertex_count(6)
        .with_arrangement(FixedPointArrangement::Loose);
    let mut cloth: Cloth<f64> = Cloth::new(config).unwrap();
    let id = cloth.graph().index(5, 2);
    let start = cloth.model_matrix().transform_point(cloth.vertex(id).pos);
    let ray = Ray::new(start + Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(cloth.grab(&ray), Some(id));

    // drag well below the floor, nudge once more so pos_old is under it too
    let below = Vec3::new(start.x, -3.0, start.z);
    assert!(cloth.update_grab(below));
    assert!(cloth.update_grab(below + Vec3::new(0.05, -0.001, 0.0)));
    cloth.release_grab();
    cloth.step(1.0 / 50.0);

    let floor = cloth.floor().height;
    let v = cloth.vertex(id);
    assert!(v.pos.y >= floor);
    let dragged_x = cloth.model_matrix().affine_inverse().unwrap().transform_point(below).x;
    assert!((v.pos.x - dragged_x).abs() < 1.0, "x = {}", v.pos.x);
}

#[test]
fn vertex_above_floor_is_untouched() {
    let mut g = pair();
    let v = g.vertex_mut(VertexId(0));
    v.pos_old = Vec3::new(0.0, 0.0, 0.0);
    v.pos = Vec3::new(0.0, -1.0, 0.0);
    assert!(!floor().resolve(v));
    assert_eq!(v.pos.y, -1.0);
}
