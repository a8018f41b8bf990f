use uuid::Uuid;

use crate::graph::arcgraph::ArcGraph;
use crate::graph::bezier2graph::Bezier2Graph;
use crate::graph::grip::Grip;
use crate::graph::interpolatedgraph::InterpolatedGraph;
use crate::graph::polylinegraph::PolylineGraph;
use crate::graph::sigmoidgraph::SigmoidGraph;
use crate::math::curve::intersection::IntersectionSettings;
use crate::serialization::chunk::Chunk;
use crate::serialization::chunkerror::ChunkError;

/// A 1D mapping y = f(t) over t ∈ [0, 1] shaped by its grips.
///
/// `value_at` is total: t at or below 0 and at or above 1 return the boundary values
/// without evaluating the curve. Inside, variants that intersect a parametric curve
/// return NaN when no unique point exists.
pub trait Graph {
    fn kind(&self) -> GraphKind;

    fn value_at_with(&self, t: f64, settings: &IntersectionSettings) -> f64;

    fn value_at(&self, t: f64) -> f64 {
        self.value_at_with(t, &IntersectionSettings::default())
    }

    fn grips(&self) -> Vec<Grip>;

    /// Moves grip `index` towards (x, y) within its constraint. Returns `false` for an
    /// unknown grip.
    fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool;

    /// Drops derived curve data; it is rebuilt on the next evaluation.
    fn clear_caches(&mut self);

    fn write(&self, chunk: &mut Chunk);

    fn read(chunk: &Chunk) -> Result<Self, ChunkError>
    where
        Self: Sized;
}

// ─────────────────────────────────────────────
// GraphKind
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphKind {
    Sigmoid,
    Arc,
    Polyline,
    Interpolated,
    Bezier2,
}

impl GraphKind {
    pub const ALL: [GraphKind; 5] = [
        GraphKind::Sigmoid,
        GraphKind::Arc,
        GraphKind::Polyline,
        GraphKind::Interpolated,
        GraphKind::Bezier2,
    ];

    /// Persisted discriminator, stable across versions.
    pub fn graph_type_id(&self) -> Uuid {
        match self {
            GraphKind::Sigmoid      => Uuid::from_u128(0xd221fdb4_a2a5_4861_a206_f7ac8f91f9cb),
            GraphKind::Arc          => Uuid::from_u128(0xc5363e79_994b_4030_8e69_02cd00bf5982),
            GraphKind::Polyline     => Uuid::from_u128(0xe4f68fba_e0ba_4bbb_98aa_96ecb7db5d4e),
            GraphKind::Interpolated => Uuid::from_u128(0x19f04c28_60bd_4807_9308_c961b1233cea),
            GraphKind::Bezier2      => Uuid::from_u128(0x34afa8f2_fee6_4e3b_82da_b980ffeb87aa),
        }
    }

    pub fn from_graph_type_id(id: Uuid) -> Option<GraphKind> {
        GraphKind::ALL
            .into_iter()
            .find(|kind| kind.graph_type_id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GraphKind::Sigmoid      => "Sigmoid",
            GraphKind::Arc          => "Arc",
            GraphKind::Polyline     => "Polyline",
            GraphKind::Interpolated => "Interpolated",
            GraphKind::Bezier2      => "Bezier2",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GraphKind::Sigmoid      => "Sigmoid curve evaluator",
            GraphKind::Arc          => "Arc curve evaluator",
            GraphKind::Polyline     => "Polyline curve evaluator",
            GraphKind::Interpolated => "Interpolated curve evaluator",
            GraphKind::Bezier2      => "Double bezier curve evaluator",
        }
    }

    /// Whether the number of control points is chosen by the caller.
    pub fn has_point_count(&self) -> bool {
        matches!(self, GraphKind::Polyline | GraphKind::Interpolated)
    }
}

// ─────────────────────────────────────────────
// AnyGraph
// ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum AnyGraph {
    Sigmoid(SigmoidGraph),
    Arc(ArcGraph),
    Polyline(PolylineGraph),
    Interpolated(InterpolatedGraph),
    Bezier2(Bezier2Graph),
}

impl AnyGraph {
    pub fn default_for(kind: GraphKind) -> AnyGraph {
        match kind {
            GraphKind::Sigmoid      => AnyGraph::Sigmoid(SigmoidGraph::new()),
            GraphKind::Arc          => AnyGraph::Arc(ArcGraph::new()),
            GraphKind::Polyline     => AnyGraph::Polyline(PolylineGraph::new()),
            GraphKind::Interpolated => AnyGraph::Interpolated(InterpolatedGraph::new()),
            GraphKind::Bezier2      => AnyGraph::Bezier2(Bezier2Graph::new()),
        }
    }

    /// Defaults for `kind`; the count only applies to kinds with a variable point count.
    pub fn with_point_count(kind: GraphKind, count: usize) -> AnyGraph {
        match kind {
            GraphKind::Polyline     => AnyGraph::Polyline(PolylineGraph::with_point_count(count)),
            GraphKind::Interpolated => AnyGraph::Interpolated(InterpolatedGraph::with_point_count(count)),
            _ => AnyGraph::default_for(kind),
        }
    }

    pub fn read_kind(kind: GraphKind, chunk: &Chunk) -> Result<AnyGraph, ChunkError> {
        Ok(match kind {
            GraphKind::Sigmoid      => AnyGraph::Sigmoid(SigmoidGraph::read(chunk)?),
            GraphKind::Arc          => AnyGraph::Arc(ArcGraph::read(chunk)?),
            GraphKind::Polyline     => AnyGraph::Polyline(PolylineGraph::read(chunk)?),
            GraphKind::Interpolated => AnyGraph::Interpolated(InterpolatedGraph::read(chunk)?),
            GraphKind::Bezier2      => AnyGraph::Bezier2(Bezier2Graph::read(chunk)?),
        })
    }

    /// Independent copy of the grip state.
    pub fn duplicate(&self) -> AnyGraph {
        let mut copy = self.clone();
        copy.clear_caches();
        copy
    }

    fn as_graph(&self) -> &dyn Graph {
        match self {
            AnyGraph::Sigmoid(g)      => g,
            AnyGraph::Arc(g)          => g,
            AnyGraph::Polyline(g)     => g,
            AnyGraph::Interpolated(g) => g,
            AnyGraph::Bezier2(g)      => g,
        }
    }

    fn as_graph_mut(&mut self) -> &mut dyn Graph {
        match self {
            AnyGraph::Sigmoid(g)      => g,
            AnyGraph::Arc(g)          => g,
            AnyGraph::Polyline(g)     => g,
            AnyGraph::Interpolated(g) => g,
            AnyGraph::Bezier2(g)      => g,
        }
    }
}

impl Graph for AnyGraph {
    fn kind(&self) -> GraphKind {
        self.as_graph().kind()
    }

    fn value_at_with(&self, t: f64, settings: &IntersectionSettings) -> f64 {
        self.as_graph().value_at_with(t, settings)
    }

    fn grips(&self) -> Vec<Grip> {
        self.as_graph().grips()
    }

    fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool {
        self.as_graph_mut().apply_grip_edit(index, x, y)
    }

    fn clear_caches(&mut self) {
        self.as_graph_mut().clear_caches();
    }

    fn write(&self, chunk: &mut Chunk) {
        self.as_graph().write(chunk);
    }

    /// Reads a graph tagged with its `type_id`.
    fn read(chunk: &Chunk) -> Result<AnyGraph, ChunkError> {
        let id = chunk.get_guid("type_id")?;
        let kind = GraphKind::from_graph_type_id(id).ok_or(ChunkError::UnknownGraphType(id))?;
        AnyGraph::read_kind(kind, chunk)
    }
}

impl From<SigmoidGraph> for AnyGraph {
    fn from(graph: SigmoidGraph) -> Self {
        AnyGraph::Sigmoid(graph)
    }
}

impl From<ArcGraph> for AnyGraph {
    fn from(graph: ArcGraph) -> Self {
        AnyGraph::Arc(graph)
    }
}

impl From<PolylineGraph> for AnyGraph {
    fn from(graph: PolylineGraph) -> Self {
        AnyGraph::Polyline(graph)
    }
}

impl From<InterpolatedGraph> for AnyGraph {
    fn from(graph: InterpolatedGraph) -> Self {
        AnyGraph::Interpolated(graph)
    }
}

impl From<Bezier2Graph> for AnyGraph {
    fn from(graph: Bezier2Graph) -> Self {
        AnyGraph::Bezier2(graph)
    }
}
