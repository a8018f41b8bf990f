use std::fmt;

use log::debug;

use crate::graph::graph::{
    AnyGraph,
    Graph,
    GraphKind
};
use crate::graph::grip::Grip;
use crate::math::curve::intersection::IntersectionSettings;
use crate::math::interval::Interval;
use crate::math::remap::remap;
use crate::serialization::chunk::Chunk;
use crate::serialization::chunkerror::ChunkError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphChange {
    Swapped(GraphKind),
    GripEdited(usize),
}

type Listener = Box<dyn FnMut(GraphChange)>;

/// One graph plus the affine mapping between sample space and the graph's unit square.
///
/// Samples in [x0, x1] map to t in [0, 1]; graph output in [0, 1] maps to [y0, y1].
pub struct GraphContainer {
    graph: AnyGraph,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    lock_grips: bool,
    settings: IntersectionSettings,
    listeners: Vec<Listener>,
}

impl GraphContainer {
    pub fn new(graph: AnyGraph) -> GraphContainer {
        GraphContainer {
            graph: graph,
            x0: 0.0,
            x1: 1.0,
            y0: 0.0,
            y1: 1.0,
            lock_grips: false,
            settings: IntersectionSettings::default(),
            listeners: Vec::new(),
        }
    }

    pub fn with_settings(graph: AnyGraph, settings: IntersectionSettings) -> GraphContainer {
        let mut container = GraphContainer::new(graph);
        container.settings = settings;
        container
    }

    pub fn graph(&self) -> &AnyGraph {
        &self.graph
    }

    pub fn kind(&self) -> GraphKind {
        self.graph.kind()
    }

    pub fn grips(&self) -> Vec<Grip> {
        self.graph.grips()
    }

    pub fn settings(&self) -> &IntersectionSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: IntersectionSettings) {
        self.settings = settings;
    }

    pub fn set_domains(&mut self, x0: f64, x1: f64, y0: f64, y1: f64) {
        self.x0 = x0;
        self.x1 = x1;
        self.y0 = y0;
        self.y1 = y1;
    }

    pub fn domains(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.x1, self.y0, self.y1)
    }

    pub fn source(&self) -> Interval {
        Interval::new(self.x0, self.x1)
    }

    pub fn target(&self) -> Interval {
        Interval::new(self.y0, self.y1)
    }

    pub fn normalize(&self, sample: f64) -> f64 {
        remap(sample, self.x0, self.x1, 0.0, 1.0)
    }

    pub fn denormalize(&self, y: f64) -> f64 {
        remap(y, 0.0, 1.0, self.y0, self.y1)
    }

    /// Graph output for a value already in [0, 1].
    pub fn graph_value_at(&self, t: f64) -> f64 {
        self.graph.value_at_with(t, &self.settings)
    }

    /// Sample space to target space through the graph. NaN when the graph has no value.
    pub fn value_at(&self, sample: f64) -> f64 {
        self.denormalize(self.graph_value_at(self.normalize(sample)))
    }

    pub fn is_locked(&self) -> bool {
        self.lock_grips
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.lock_grips = locked;
    }

    /// Installs `graph` and returns the previous one.
    pub fn swap_graph(&mut self, graph: AnyGraph) -> AnyGraph {
        let mut old = std::mem::replace(&mut self.graph, graph);
        old.clear_caches();
        let kind = self.graph.kind();
        debug!("graph swapped: {} -> {}", old.kind().name(), kind.name());
        self.notify(GraphChange::Swapped(kind));
        old
    }

    /// Ignored while locked or for an unknown grip.
    pub fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool {
        if self.lock_grips {
            debug!("grip {index} edit ignored: grips are locked");
            return false;
        }
        if !self.graph.apply_grip_edit(index, x, y) {
            return false;
        }
        debug!("{} grip {index} edited", self.graph.kind().name());
        self.notify(GraphChange::GripEdited(index));
        true
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(GraphChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, change: GraphChange) {
        for listener in self.listeners.iter_mut() {
            listener(change);
        }
    }

    pub fn write(&self, chunk: &mut Chunk) {
        chunk.set_guid("type_id", self.graph.kind().graph_type_id());
        chunk.set_double("x0", self.x0);
        chunk.set_double("x1", self.x1);
        chunk.set_double("y0", self.y0);
        chunk.set_double("y1", self.y1);
        chunk.set_boolean("lock", self.lock_grips);
        self.graph.write(chunk);
    }

    /// Rebuilds a container; domain and lock fields fall back to their defaults when absent.
    pub fn read(chunk: &Chunk) -> Result<GraphContainer, ChunkError> {
        let graph = <AnyGraph as Graph>::read(chunk)?;
        let mut container = GraphContainer::new(graph);
        container.x0 = read_double_or(chunk, "x0", 0.0)?;
        container.x1 = read_double_or(chunk, "x1", 1.0)?;
        container.y0 = read_double_or(chunk, "y0", 0.0)?;
        container.y1 = read_double_or(chunk, "y1", 1.0)?;
        if chunk.contains("lock") {
            container.lock_grips = chunk.get_boolean("lock")?;
        }
        Ok(container)
    }
}

fn read_double_or(chunk: &Chunk, key: &str, default: f64) -> Result<f64, ChunkError> {
    if chunk.contains(key) {
        chunk.get_double(key)
    } else {
        Ok(default)
    }
}

impl fmt::Debug for GraphContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphContainer")
            .field("graph", &self.graph)
            .field("domains", &self.domains())
            .field("lock_grips", &self.lock_grips)
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use approx::assert_abs_diff_eq;

    use super::{
        GraphChange,
        GraphContainer
    };
    use crate::graph::graph::{
        AnyGraph,
        Graph,
        GraphKind
    };
    use crate::serialization::chunk::Chunk;
    use crate::serialization::chunkerror::ChunkError;

    #[test]
    fn maps_through_both_domains() {
        let mut container = GraphContainer::new(AnyGraph::default_for(GraphKind::Polyline));
        container.set_domains(10.0, 20.0, -1.0, 1.0);
        assert_abs_diff_eq!(container.normalize(12.5), 0.25);
        assert_abs_diff_eq!(container.value_at(15.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(container.value_at(20.0), 1.0);
        assert_eq!(container.value_at(30.0), 1.0);
        assert_eq!(container.source().t1(), 20.0);
        assert_eq!(container.target().t0(), -1.0);
    }

    #[test]
    fn locked_edits_are_ignored() {
        let mut container = GraphContainer::new(AnyGraph::default_for(GraphKind::Polyline));
        let before = container.grips();
        container.set_locked(true);
        assert!(!container.apply_grip_edit(2, 0.5, 0.9));
        assert_eq!(container.grips(), before);
        container.set_locked(false);
        assert!(container.apply_grip_edit(2, 0.5, 0.9));
        assert_abs_diff_eq!(container.value_at(0.5), 0.9, epsilon = 1e-9);
    }

    #[test]
    fn listeners_see_swaps_and_edits() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut container = GraphContainer::new(AnyGraph::default_for(GraphKind::Sigmoid));
        let sink = Rc::clone(&seen);
        container.subscribe(move |change| sink.borrow_mut().push(change));

        let old = container.swap_graph(AnyGraph::default_for(GraphKind::Arc));
        assert_eq!(old.kind(), GraphKind::Sigmoid);
        assert!(container.apply_grip_edit(0, 0.3, 0.8));
        assert!(!container.apply_grip_edit(5, 0.3, 0.8));

        assert_eq!(
            *seen.borrow(),
            vec![GraphChange::Swapped(GraphKind::Arc), GraphChange::GripEdited(0)]
        );
    }

    #[test]
    fn written_container_reads_back() {
        let mut container = GraphContainer::new(AnyGraph::default_for(GraphKind::Bezier2));
        container.set_domains(-5.0, 5.0, 100.0, 200.0);
        container.set_locked(true);
        let mut chunk = Chunk::new("container");
        container.write(&mut chunk);

        let restored = GraphContainer::read(&chunk).unwrap();
        assert_eq!(restored.kind(), GraphKind::Bezier2);
        assert_eq!(restored.domains(), (-5.0, 5.0, 100.0, 200.0));
        assert!(restored.is_locked());
        assert_eq!(restored.grips(), container.grips());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut chunk = Chunk::new("container");
        GraphContainer::new(AnyGraph::default_for(GraphKind::Arc)).write(&mut chunk);
        chunk.set_guid("type_id", uuid::Uuid::from_u128(42));
        assert!(matches!(
            GraphContainer::read(&chunk),
            Err(ChunkError::UnknownGraphType(_))
        ));
    }
}
