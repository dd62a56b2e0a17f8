use drape::{ClothGraph, FixedPointArrangement, Slot, VertexId};

fn edge_count_for(n: usize) -> usize {
    let structural = 2 * n * (n - 1);
    let shear = 2 * (n - 1) * (n - 1);
    let bend = if n >= 3 { 2 * n * (n - 2) } else { 0 };
    structural + shear + bend
}

#[test]
fn lattice_sizes() {
    for n in [2, 3, 4, 7, 16] {
        let g: ClothGraph<f32> = ClothGraph::build(n, 1.0, FixedPointArrangement::Loose);
        assert_eq!(g.vertex_count(), n * n);
        assert_eq!(g.edge_count(), edge_count_for(n), "n = {}", n);
        assert_eq!(g.active_vertex_count(), n * n);
        assert_eq!(g.active_edge_count(), g.edge_count());
    }
}

#[test]
fn edges_are_canonical_and_mirrored() {
    let g: ClothGraph<f64> = ClothGraph::build(6, 2.0, FixedPointArrangement::Curtain);
    for v in g.vertices() {
        for slot in Slot::ALL {
            let Some(e) = v.neighbor(slot) else { continue };
            let edge = g.edge(e);
            assert!(edge.vertex_a < edge.vertex_b);
            let other = edge.opposite(v.index());
            assert_ne!(other, v.index());
            assert_eq!(g.vertex(other).neighbor(slot.opposite()), Some(e));
            assert!(v.incident_edges().any(|i| i == e));
        }
    }
}

#[test]
fn corner_vertex_slots() {
    let g: ClothGraph<f32> = ClothGraph::build(4, 1.0, FixedPointArrangement::Loose);
    let corner = g.vertex(VertexId(0));
    let present: Vec<Slot> = Slot::ALL.into_iter().filter(|&s| corner.has(s)).collect();
    assert_eq!(present, vec![Slot::Right, Slot::Down, Slot::DownRight, Slot::Right2, Slot::Down2]);
}

#[test]
fn bend_edges_flex_more() {
    let g: ClothGraph<f64> = ClothGraph::build(4, 2.0, FixedPointArrangement::Loose);
    let v = g.vertex(g.index(1, 1));
    let flex = |slot| g.edge(v.neighbor(slot).unwrap()).flex_coeff;
    assert!((flex(Slot::Right) - 0.01).abs() < 1e-7);
    assert!((flex(Slot::DownRight) - 0.01).abs() < 1e-7);
    assert!((flex(Slot::Down2) - 0.05).abs() < 1e-7);
    assert!((g.edge(v.neighbor(Slot::DownRight).unwrap()).resting_length - 0.5 * 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn positions_uvs_and_mass() {
    let g: ClothGraph<f64> = ClothGraph::build(4, 2.0, FixedPointArrangement::Loose);
    let v = g.vertex(g.index(3, 1));
    assert!((v.pos.x - 0.5).abs() < 1e-12);
    assert!((v.pos.y + 1.5).abs() < 1e-12);
    // the 0.001 depth factor passes through f32
    assert!((v.pos.z - 0.0015).abs() < 1e-9);
    assert_eq!(v.pos, v.pos_old);
    assert!((v.uv.x - 1.0 / 3.0).abs() < 1e-12);
    assert!((v.uv.y - 1.0).abs() < 1e-12);
    assert_eq!(v.mass, 2.0);
}

#[test]
fn arrangements_pin_expected_vertices() {
    let n = 4;
    let pinned = |a: FixedPointArrangement| -> Vec<usize> {
        let g: ClothGraph<f32> = ClothGraph::build(n, 1.0, a);
        g.vertices().iter().filter(|v| v.fixed).map(|v| v.index().0).collect()
    };
    assert_eq!(pinned(FixedPointArrangement::FourCorners), vec![0, 3, 12, 15]);
    assert_eq!(pinned(FixedPointArrangement::AllTop), vec![0, 1, 2, 3]);
    assert_eq!(pinned(FixedPointArrangement::Loose), Vec::<usize>::new());
    assert_eq!(pinned(FixedPointArrangement::Curtain), vec![0, 3]);
}

#[test]
fn curtain_adds_inner_pins_on_large_lattices() {
    let g: ClothGraph<f32> = ClothGraph::build(16, 1.0, FixedPointArrangement::Curtain);
    let pinned: Vec<usize> = g.vertices().iter().filter(|v| v.fixed).map(|v| v.index().0).collect();
    assert_eq!(pinned, vec![0, 15, 17, 30]);
}

#[test]
fn neighbor_vertex_walks_slots() {
    let g: ClothGraph<f32> = ClothGraph::build(4, 1.0, FixedPointArrangement::Loose);
    let v = g.index(1, 1);
    assert_eq!(g.neighbor_vertex(v, Slot::Up), Some(g.index(0, 1)));
    assert_eq!(g.neighbor_vertex(v, Slot::DownRight), Some(g.index(2, 2)));
    assert_eq!(g.neighbor_vertex(v, Slot::Left2), None);
    assert_eq!(g.neighbor_vertex(v, Slot::Right2), Some(g.index(1, 3)));
}
