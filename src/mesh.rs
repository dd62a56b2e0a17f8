//! Renderable triangle mesh derived from the surviving lattice.

use alloc::vec;
use alloc::vec::Vec as AllocVec;

use crate::float::Float;
use crate::graph::{ClothGraph, Slot, VertexId};
use crate::vec::{Vec, Vec2, Vec3};

/// One corner of an emitted triangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RenderVertex<F: Float> {
    pub pos: Vec3<F>,
    pub norm: Vec3<F>,
    pub uv: Vec2<F>,
}

/// Recompute every vertex normal from the faces around it.
///
/// Each lattice cell is split along its up-right/down-left diagonal. A
/// face contributes its (unnormalized) cross product to each of its corners,
/// weighted by the corner's interior angle, so a vertex's normal does not
/// depend on how many faces a tear left around it. Faces with an inactive
/// corner contribute nothing.
pub fn compute_normals<F: Float>(graph: &mut ClothGraph<F>) {
    for v in graph.vertices_mut() {
        v.norm = Vec3::zero();
    }
    let n = graph.n();
    for r in 1..n {
        for c in 0..n.saturating_sub(1) {
            let bl = graph.index(r, c);
            let br = graph.index(r, c + 1);
            let al = graph.index(r - 1, c);
            let ar = graph.index(r - 1, c + 1);
            if !(graph.vertex(bl).is_active() && graph.vertex(ar).is_active()) {
                continue;
            }
            if graph.vertex(al).is_active() {
                accumulate_face(graph, al, ar, bl);
            }
            if graph.vertex(br).is_active() {
                accumulate_face(graph, br, ar, bl);
            }
        }
    }
}

/// Add one face's angle-weighted normal to its corners. `pivot` is the
/// corner opposite the shared `ar`–`bl` diagonal.
fn accumulate_face<F: Float>(graph: &mut ClothGraph<F>, pivot: VertexId, ar: VertexId, bl: VertexId) {
    let p_pos = graph.vertex(pivot).pos;
    let ar_pos = graph.vertex(ar).pos;
    let bl_pos = graph.vertex(bl).pos;

    // the upper-left and lower-right faces wind oppositely around the
    // diagonal; swapping the edge pair keeps both facing the same way
    let upper = pivot.0 < ar.0;
    let (to_bl, to_ar) = (bl_pos - p_pos, ar_pos - p_pos);
    let face = if upper { to_bl.cross(to_ar) } else { to_ar.cross(to_bl) };

    let to_bl = to_bl.normalize();
    let to_ar = to_ar.normalize();
    let diagonal = (bl_pos - ar_pos).normalize();

    let at_pivot = to_bl.angle(to_ar);
    let at_bl = to_bl.angle(diagonal);
    let at_ar = (-to_ar).angle(diagonal);

    let pv = graph.vertex_mut(pivot);
    pv.norm = pv.norm + face.scale(at_pivot);
    let av = graph.vertex_mut(ar);
    av.norm = av.norm + face.scale(at_ar);
    let bv = graph.vertex_mut(bl);
    bv.norm = bv.norm + face.scale(at_bl);
}

/// Reusable triangle-list buffer, sized for a fully intact lattice.
///
/// Only the first [`len`](MeshBuffer::len) entries are meaningful after a
/// rebuild; the rest is stale storage kept to avoid reallocating per frame.
pub struct MeshBuffer<F: Float> {
    vertices: AllocVec<RenderVertex<F>>,
    len: usize,
}

impl<F: Float> MeshBuffer<F> {
    /// Worst-case vertex count for an `n`×`n` lattice: two triangles per cell.
    pub fn capacity_for(n: usize) -> usize {
        let cells = n.saturating_sub(1);
        cells * cells * 6
    }

    pub fn new(n: usize) -> Self {
        MeshBuffer { vertices: vec![RenderVertex::default(); Self::capacity_for(n)], len: 0 }
    }

    /// Resize storage for a new lattice side; no-op when already sized.
    pub fn reserve_for(&mut self, n: usize) {
        let cap = Self::capacity_for(n);
        if self.vertices.len() != cap {
            self.vertices.resize(cap, RenderVertex::default());
        }
        self.len = 0;
    }

    /// Emit triangles for every surviving cell.
    ///
    /// A vertex with right and down links emits the cell below-right of it
    /// as `(right, self, down)`; a vertex with up and left links emits the
    /// cell above-left of it as `(up, left, self)`. Together these cover
    /// each intact half-cell exactly once. Storage is resized first if the
    /// graph's side differs from the one the buffer was sized for.
    pub fn rebuild(&mut self, graph: &ClothGraph<F>) {
        self.reserve_for(graph.n());
        for v in graph.vertices().iter().filter(|v| v.is_active()) {
            let me = v.index();
            if let (Some(right), Some(down)) = (
                graph.neighbor_vertex(me, Slot::Right),
                graph.neighbor_vertex(me, Slot::Down),
            ) {
                self.push_triangle(graph, [right, me, down]);
            }
            if let (Some(up), Some(left)) = (
                graph.neighbor_vertex(me, Slot::Up),
                graph.neighbor_vertex(me, Slot::Left),
            ) {
                self.push_triangle(graph, [up, left, me]);
            }
        }
    }

    fn push_triangle(&mut self, graph: &ClothGraph<F>, corners: [VertexId; 3]) {
        for id in corners {
            let v = graph.vertex(id);
            self.vertices[self.len] = RenderVertex { pos: v.pos, norm: v.norm.normalize(), uv: v.uv };
            self.len += 1;
        }
    }

    /// The triangle list written by the last rebuild.
    pub fn as_slice(&self) -> &[RenderVertex<F>] {
        &self.vertices[..self.len]
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn triangle_count(&self) -> usize { self.len / 3 }
    pub fn capacity(&self) -> usize { self.vertices.len() }
}
