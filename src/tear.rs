//! Tearing: cascading deactivation of lattice edges and vertices.
//!
//! Erasing an edge can strand a vertex, and erasing a vertex erases its
//! edges. The cascade runs off an explicit stack rather than recursion; an
//! item is only expanded the first time it goes inactive, so the loop ends
//! after at most `vertices + edges` expansions.

use alloc::vec;
use alloc::vec::Vec as AllocVec;

use crate::float::Float;
use crate::graph::{ClothGraph, EdgeId, Slot, VertexId};

/// Diagonal braces and the two primary links that frame each one.
const BRACES: [(Slot, Slot, Slot); 4] = [
    (Slot::Up, Slot::Left, Slot::UpLeft),
    (Slot::Up, Slot::Right, Slot::UpRight),
    (Slot::Down, Slot::Left, Slot::DownLeft),
    (Slot::Down, Slot::Right, Slot::DownRight),
];

#[derive(Copy, Clone, Debug)]
enum Pending {
    Edge(EdgeId),
    Vertex(VertexId),
}

/// What a tear deactivated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TearReport {
    pub vertices: usize,
    pub edges: usize,
}

impl TearReport {
    /// Nothing was active to begin with.
    pub fn is_empty(&self) -> bool {
        self.vertices == 0 && self.edges == 0
    }
}

/// Erase an edge and everything that can no longer stand without it.
pub fn erase_edge<F: Float>(graph: &mut ClothGraph<F>, edge: EdgeId) -> TearReport {
    cascade(graph, Pending::Edge(edge))
}

/// Erase a vertex, all of its edges, and whatever that strands.
pub fn erase_vertex<F: Float>(graph: &mut ClothGraph<F>, vertex: VertexId) -> TearReport {
    cascade(graph, Pending::Vertex(vertex))
}

fn cascade<F: Float>(graph: &mut ClothGraph<F>, seed: Pending) -> TearReport {
    let mut report = TearReport::default();
    let mut stack = vec![seed];

    while let Some(item) = stack.pop() {
        match item {
            Pending::Vertex(v) => {
                if !graph.vertex_mut(v).deactivate() {
                    continue;
                }
                report.vertices += 1;
                stack.extend(graph.vertex(v).incident_edges().map(Pending::Edge));
            }
            Pending::Edge(e) => {
                if !graph.edge_mut(e).deactivate() {
                    continue;
                }
                report.edges += 1;
                let (a, b) = {
                    let edge = graph.edge(e);
                    (edge.vertex_a, edge.vertex_b)
                };
                detach_endpoint(graph, a, e, &mut stack);
                detach_endpoint(graph, b, e, &mut stack);
                for v in [a, b] {
                    if graph.vertex(v).is_stranded() {
                        stack.push(Pending::Vertex(v));
                    }
                }
            }
        }
    }

    report
}

/// Unhook `edge` from `v`, queueing the bend edges and diagonal braces that
/// lost their supporting primary link.
fn detach_endpoint<F: Float>(
    graph: &mut ClothGraph<F>,
    v: VertexId,
    edge: EdgeId,
    stack: &mut AllocVec<Pending>,
) {
    let vertex = graph.vertex_mut(v);
    for slot in vertex.detach(edge) {
        if let Some(bend) = slot.bending().and_then(|s| vertex.neighbor(s)) {
            stack.push(Pending::Edge(bend));
        }
    }
    for (vertical, horizontal, diagonal) in BRACES {
        if vertex.has(vertical) || vertex.has(horizontal) {
            continue;
        }
        if let Some(brace) = vertex.neighbor(diagonal) {
            stack.push(Pending::Edge(brace));
        }
    }
}
