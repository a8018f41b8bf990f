use std::collections::VecDeque;

use log::{
    debug,
    warn
};
use uuid::Uuid;

use crate::graph::graph::{
    AnyGraph,
    Graph,
    GraphKind
};
use crate::serialization::chunk::Chunk;

/// Last-used state per graph type within one session.
///
/// Entries are stored serialised, so a recalled graph is independent of the one that was
/// remembered. The oldest entry is evicted first once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct GraphHistory {
    capacity: usize,
    entries: VecDeque<(Uuid, Chunk)>,
}

impl GraphHistory {
    pub fn new(capacity: usize) -> GraphHistory {
        GraphHistory {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, kind: GraphKind) -> bool {
        let id = kind.graph_type_id();
        self.entries.iter().any(|(key, _)| *key == id)
    }

    pub fn remember(&mut self, graph: &AnyGraph) {
        let id = graph.kind().graph_type_id();
        self.entries.retain(|(key, _)| *key != id);
        let mut chunk = Chunk::new(graph.kind().name());
        graph.write(&mut chunk);
        self.entries.push_back((id, chunk));
        while self.entries.len() > self.capacity {
            if let Some((evicted, _)) = self.entries.pop_front() {
                debug!("graph history full, dropped {evicted}");
            }
        }
        debug!("remembered {} graph", graph.kind().name());
    }

    pub fn recall(&self, kind: GraphKind) -> Option<AnyGraph> {
        let id = kind.graph_type_id();
        let (_, chunk) = self.entries.iter().find(|(key, _)| *key == id)?;
        match AnyGraph::read_kind(kind, chunk) {
            Ok(graph) => {
                debug!("recalled {} graph", kind.name());
                Some(graph)
            }
            Err(error) => {
                warn!("cannot restore remembered {} graph: {error}", kind.name());
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for GraphHistory {
    fn default() -> Self {
        GraphHistory::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::GraphHistory;
    use crate::graph::graph::{
        AnyGraph,
        Graph,
        GraphKind
    };

    #[test]
    fn recalls_an_independent_copy() {
        let mut history = GraphHistory::default();
        let mut graph = AnyGraph::default_for(GraphKind::Polyline);
        graph.apply_grip_edit(1, 0.25, 0.6);
        history.remember(&graph);

        let recalled = history.recall(GraphKind::Polyline).unwrap();
        assert_eq!(recalled.grips(), graph.grips());
        graph.apply_grip_edit(1, 0.25, 0.1);
        assert_ne!(recalled.grips(), graph.grips());
        assert!(history.recall(GraphKind::Arc).is_none());
    }

    #[test]
    fn one_entry_per_type() {
        let mut history = GraphHistory::default();
        let mut graph = AnyGraph::default_for(GraphKind::Sigmoid);
        history.remember(&graph);
        graph.apply_grip_edit(0, 0.4, 0.0);
        history.remember(&graph);
        assert_eq!(history.len(), 1);
        assert_eq!(history.recall(GraphKind::Sigmoid).unwrap().grips(), graph.grips());
    }

    #[test]
    fn evicts_the_oldest_entry() {
        let mut history = GraphHistory::new(2);
        for kind in [GraphKind::Sigmoid, GraphKind::Arc, GraphKind::Bezier2] {
            history.remember(&AnyGraph::default_for(kind));
        }
        assert_eq!(history.len(), 2);
        assert!(!history.contains(GraphKind::Sigmoid));
        assert!(history.contains(GraphKind::Arc));
        assert!(history.contains(GraphKind::Bezier2));

        history.clear();
        assert!(history.is_empty());
    }
}
