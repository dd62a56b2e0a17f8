//! Vertex/edge arena for an n×n cloth lattice with structural, shear, and
//! bend edges.
//!
//! Both arenas are append-only: a restart builds a fresh graph, and tearing
//! only flips `active` flags. Ids therefore stay valid for the lifetime of
//! the graph they came from.

use alloc::collections::BTreeSet;
use alloc::vec::Vec as AllocVec;

use crate::arrangement::FixedPointArrangement;
use crate::float::Float;
use crate::vec::{Vec, Vec2, Vec3};

/// Tolerance band for structural and shear edges, as a fraction of rest length.
pub const NEIGHBOR_FLEX: f32 = 0.01;
/// Tolerance band for bend edges.
pub const BENDING_FLEX: f32 = 0.05;

/// Index of a vertex in its graph's vertex arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// Index of an edge in its graph's edge arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// One of the twelve neighbor links a lattice vertex can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Up,
    Right,
    Down,
    Left,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Up2,
    Right2,
    Down2,
    Left2,
}

impl Slot {
    pub const COUNT: usize = 12;

    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::Up,
        Slot::Right,
        Slot::Down,
        Slot::Left,
        Slot::UpLeft,
        Slot::UpRight,
        Slot::DownLeft,
        Slot::DownRight,
        Slot::Up2,
        Slot::Right2,
        Slot::Down2,
        Slot::Left2,
    ];

    /// The slot the same edge occupies on the other endpoint.
    pub fn opposite(self) -> Slot {
        match self {
            Slot::Up => Slot::Down,
            Slot::Right => Slot::Left,
            Slot::Down => Slot::Up,
            Slot::Left => Slot::Right,
            Slot::UpLeft => Slot::DownRight,
            Slot::UpRight => Slot::DownLeft,
            Slot::DownLeft => Slot::UpRight,
            Slot::DownRight => Slot::UpLeft,
            Slot::Up2 => Slot::Down2,
            Slot::Right2 => Slot::Left2,
            Slot::Down2 => Slot::Up2,
            Slot::Left2 => Slot::Right2,
        }
    }

    /// Bend slot running in the same direction as a primary slot.
    pub fn bending(self) -> Option<Slot> {
        match self {
            Slot::Up => Some(Slot::Up2),
            Slot::Right => Some(Slot::Right2),
            Slot::Down => Some(Slot::Down2),
            Slot::Left => Some(Slot::Left2),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A lattice vertex: verlet state plus its neighbor links.
#[derive(Clone, Debug)]
pub struct Vertex<F: Float> {
    pub pos: Vec3<F>,
    pub pos_old: Vec3<F>,
    /// Angle-weighted normal accumulator, rebuilt every frame.
    pub norm: Vec3<F>,
    pub uv: Vec2<F>,
    pub mass: F,
    pub fixed: bool,
    active: bool,
    index: VertexId,
    neighbors: [Option<EdgeId>; Slot::COUNT],
    edge_indices: BTreeSet<EdgeId>,
}

impl<F: Float> Vertex<F> {
    fn new(index: VertexId, pos: Vec3<F>, uv: Vec2<F>, mass: F) -> Self {
        Vertex {
            pos,
            pos_old: pos,
            norm: Vec3::zero(),
            uv,
            mass,
            fixed: false,
            active: true,
            index,
            neighbors: [None; Slot::COUNT],
            edge_indices: BTreeSet::new(),
        }
    }

    pub fn index(&self) -> VertexId { self.index }
    pub fn is_active(&self) -> bool { self.active }

    /// Active and not pinned: the integrator and solver may move it.
    pub fn is_free(&self) -> bool { self.active && !self.fixed }

    pub fn neighbor(&self, slot: Slot) -> Option<EdgeId> {
        self.neighbors[slot.index()]
    }

    pub fn has(&self, slot: Slot) -> bool {
        self.neighbors[slot.index()].is_some()
    }

    /// Incident active edges, in ascending id order.
    pub fn incident_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_indices.iter().copied()
    }

    pub fn degree(&self) -> usize {
        self.edge_indices.len()
    }

    /// Both vertical or both horizontal primary links are gone, so no quad
    /// can use this vertex any more.
    pub fn is_stranded(&self) -> bool {
        (!self.has(Slot::Up) && !self.has(Slot::Down))
            || (!self.has(Slot::Left) && !self.has(Slot::Right))
    }

    pub(crate) fn deactivate(&mut self) -> bool {
        core::mem::replace(&mut self.active, false)
    }

    pub(crate) fn set_neighbor(&mut self, slot: Slot, edge: Option<EdgeId>) {
        self.neighbors[slot.index()] = edge;
    }

    /// Drop `edge` from the incident set and from every slot naming it.
    /// Returns the slots that were cleared.
    pub(crate) fn detach(&mut self, edge: EdgeId) -> AllocVec<Slot> {
        self.edge_indices.remove(&edge);
        let mut cleared = AllocVec::new();
        for slot in Slot::ALL {
            if self.neighbors[slot.index()] == Some(edge) {
                self.neighbors[slot.index()] = None;
                cleared.push(slot);
            }
        }
        cleared
    }
}

/// A length constraint between two vertices. `vertex_a < vertex_b` always.
#[derive(Clone, Debug)]
pub struct Edge<F: Float> {
    pub vertex_a: VertexId,
    pub vertex_b: VertexId,
    pub resting_length: F,
    pub flex_coeff: F,
    active: bool,
}

impl<F: Float> Edge<F> {
    pub fn is_active(&self) -> bool { self.active }

    /// Given one endpoint, the other.
    pub fn opposite(&self, v: VertexId) -> VertexId {
        VertexId(v.0 ^ self.vertex_a.0 ^ self.vertex_b.0)
    }

    pub(crate) fn deactivate(&mut self) -> bool {
        core::mem::replace(&mut self.active, false)
    }
}

/// Arena-backed n×n cloth lattice.
///
/// Vertex `(row, col)` has index `row * n + col`; row 0 is the top edge.
pub struct ClothGraph<F: Float> {
    vertices: AllocVec<Vertex<F>>,
    edges: AllocVec<Edge<F>>,
    n: usize,
    scale: F,
}

impl<F: Float> ClothGraph<F> {
    /// Build a lattice with `n` vertices per side spanning `scale` units.
    ///
    /// Each vertex links backward only (up, left, both upper diagonals, and
    /// the two bend edges reaching up and left), so every unordered pair is
    /// added once and the earlier vertex receives the mirrored slot.
    /// Neighbors outside the lattice are skipped.
    pub fn build(n: usize, scale: F, arrangement: FixedPointArrangement) -> Self {
        let mut graph = ClothGraph {
            vertices: AllocVec::with_capacity(n * n),
            edges: AllocVec::new(),
            n,
            scale,
        };

        let nf = F::from_usize(n);
        let uv_div = F::from_usize(n.saturating_sub(1).max(1));
        let spacing = scale / nf;
        let diag_length = (spacing * spacing + spacing * spacing).sqrt();
        let bend_length = spacing * F::two();
        let neighbor_flex = F::from_f32(NEIGHBOR_FLEX);
        let bending_flex = F::from_f32(BENDING_FLEX);

        for r in 0..n {
            for c in 0..n {
                let index = VertexId(graph.vertices.len());
                let (rf, cf) = (F::from_usize(r), F::from_usize(c));
                // tiny depth offset per row keeps the sheet from being perfectly planar
                let pos = Vec3::new(
                    scale * cf / nf,
                    -(scale * rf) / nf,
                    F::from_f32(0.001) * scale * rf / nf,
                );
                let uv = Vec2::new(cf / uv_div, rf / uv_div);
                graph.vertices.push(Vertex::new(index, pos, uv, scale));

                if r >= 1 {
                    graph.link(index, r - 1, c, Slot::Up, spacing, neighbor_flex);
                }
                if c >= 1 {
                    graph.link(index, r, c - 1, Slot::Left, spacing, neighbor_flex);
                }
                if r >= 1 && c >= 1 {
                    graph.link(index, r - 1, c - 1, Slot::UpLeft, diag_length, neighbor_flex);
                }
                if r >= 1 && c + 1 < n {
                    graph.link(index, r - 1, c + 1, Slot::UpRight, diag_length, neighbor_flex);
                }
                if r >= 2 {
                    graph.link(index, r - 2, c, Slot::Up2, bend_length, bending_flex);
                }
                if c >= 2 {
                    graph.link(index, r, c - 2, Slot::Left2, bend_length, bending_flex);
                }
            }
        }

        for idx in arrangement.pinned_indices(n) {
            if let Some(v) = graph.vertices.get_mut(idx) {
                v.fixed = true;
            }
        }

        graph
    }

    fn link(&mut self, v: VertexId, r: usize, c: usize, slot: Slot, length: F, flex: F) {
        let other = self.index(r, c);
        let e = self.add_edge(v, other, length, flex);
        self.vertices[v.0].set_neighbor(slot, Some(e));
        self.vertices[other.0].set_neighbor(slot.opposite(), Some(e));
    }

    fn add_edge(&mut self, a: VertexId, b: VertexId, resting_length: F, flex_coeff: F) -> EdgeId {
        debug_assert_ne!(a, b, "edge endpoints must differ");
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { vertex_a: a, vertex_b: b, resting_length, flex_coeff, active: true });
        self.vertices[a.0].edge_indices.insert(id);
        self.vertices[b.0].edge_indices.insert(id);
        id
    }

    pub fn index(&self, row: usize, col: usize) -> VertexId {
        VertexId(row * self.n + col)
    }

    pub fn n(&self) -> usize { self.n }
    pub fn scale(&self) -> F { self.scale }
    pub fn spacing(&self) -> F { self.scale / F::from_usize(self.n) }

    pub fn vertex(&self, id: VertexId) -> &Vertex<F> { &self.vertices[id.0] }
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex<F> { &mut self.vertices[id.0] }
    pub fn edge(&self, id: EdgeId) -> &Edge<F> { &self.edges[id.0] }

    pub fn vertices(&self) -> &[Vertex<F>] { &self.vertices }
    pub fn vertices_mut(&mut self) -> &mut [Vertex<F>] { &mut self.vertices }
    pub fn edges(&self) -> &[Edge<F>] { &self.edges }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge<F> { &mut self.edges[id.0] }

    /// Split borrow for solvers that read edges while moving vertices.
    pub(crate) fn parts_mut(&mut self) -> (&[Edge<F>], &mut [Vertex<F>]) {
        (&self.edges, &mut self.vertices)
    }

    /// Vertex reached by following `slot` from `v`, if that link survives.
    pub fn neighbor_vertex(&self, v: VertexId, slot: Slot) -> Option<VertexId> {
        self.vertices[v.0].neighbor(slot).map(|e| self.edges[e.0].opposite(v))
    }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    pub fn active_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.active).count()
    }

    pub fn active_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.active).count()
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.vertices.iter().map(|v| v.pos).collect()
    }
}
