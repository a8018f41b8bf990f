use std::cell::Cell;
use std::ops::RangeInclusive;
use std::rc::Rc;

use log::{
    debug,
    warn
};
use uuid::Uuid;

use crate::configuration::Configuration;
use crate::graph::controlpoints::{
    MAX_POINT_COUNT,
    MIN_POINT_COUNT
};
use crate::graph::graph::{
    AnyGraph,
    GraphKind
};
use crate::graph::graphcontainer::GraphContainer;
use crate::mapper::evaluation::{
    map_samples,
    MapOutput
};
use crate::mapper::graphhistory::GraphHistory;
use crate::mapper::mappererror::MapperError;
use crate::math::interval::Interval;
use crate::serialization::chunk::Chunk;
use crate::serialization::chunkerror::ChunkError;

const REMAP_KEY: &str = "remap";
const STATE_NAME: &str = "graphmapper";
const EMPTY_STATE: &str = "null";

/// Menu entry for one graph type.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphTypeEntry {
    pub kind: GraphKind,
    pub name: &'static str,
    pub type_id: Uuid,
    pub description: &'static str,
    /// Selectable point counts, for types that have them.
    pub point_counts: Option<RangeInclusive<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphSelection {
    /// Removes the graph.
    None,
    /// Remembered state of the type, or its defaults.
    Kind(GraphKind),
    /// Fresh defaults with the given point count.
    KindWithPointCount(GraphKind, usize),
}

/// One mapping session: an optional graph container, the per-type history and the last
/// sample batch.
#[derive(Debug)]
pub struct GraphMapper {
    configuration: Configuration,
    container: Option<GraphContainer>,
    history: GraphHistory,
    remap_to_target: bool,
    samples: Vec<f64>,
    expired: Rc<Cell<bool>>,
}

impl GraphMapper {
    pub fn new(configuration: Configuration) -> Result<GraphMapper, MapperError> {
        configuration.validate()?;
        Ok(GraphMapper {
            history: GraphHistory::new(configuration.history_capacity),
            remap_to_target: configuration.remap_to_target,
            configuration: configuration,
            container: None,
            samples: Vec::new(),
            expired: Rc::new(Cell::new(false)),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn container(&self) -> Option<&GraphContainer> {
        self.container.as_ref()
    }

    pub fn graph(&self) -> Option<&AnyGraph> {
        self.container.as_ref().map(|container| container.graph())
    }

    pub fn graph_kind(&self) -> Option<GraphKind> {
        self.container.as_ref().map(|container| container.kind())
    }

    pub fn history(&self) -> &GraphHistory {
        &self.history
    }

    /// Inputs of the last evaluated batch.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn evaluate(
        &mut self,
        values: &[f64],
        source: Option<Interval>,
        target: Option<Interval>,
    ) -> Result<MapOutput, MapperError> {
        if values.is_empty() {
            return Err(MapperError::InsufficientInput("no values"));
        }
        let source = source.ok_or(MapperError::InsufficientInput("no source interval"))?;
        let target = target.ok_or(MapperError::InsufficientInput("no target interval"))?;
        self.samples = values.to_vec();
        Ok(map_samples(
            self.container.as_mut(),
            values,
            source,
            target,
            self.remap_to_target,
        ))
    }

    pub fn graph_types(&self) -> Vec<GraphTypeEntry> {
        GraphKind::ALL
            .iter()
            .map(|&kind| GraphTypeEntry {
                kind: kind,
                name: kind.name(),
                type_id: kind.graph_type_id(),
                description: kind.description(),
                point_counts: kind
                    .has_point_count()
                    .then_some(MIN_POINT_COUNT..=MAX_POINT_COUNT),
            })
            .collect()
    }

    pub fn select_graph(&mut self, selection: GraphSelection) {
        let graph = match selection {
            GraphSelection::None => {
                self.clear_graph();
                return;
            }
            GraphSelection::Kind(kind) => {
                self.remember_current();
                self.history.recall(kind).unwrap_or_else(|| {
                    AnyGraph::with_point_count(kind, self.configuration.default_point_count)
                })
            }
            GraphSelection::KindWithPointCount(kind, count) => {
                self.remember_current();
                AnyGraph::with_point_count(kind, count.clamp(MIN_POINT_COUNT, MAX_POINT_COUNT))
            }
        };
        self.install_graph(graph);
    }

    /// Remembers and removes the current graph.
    pub fn clear_graph(&mut self) {
        if let Some(container) = self.container.take() {
            self.history.remember(container.graph());
            debug!("{} graph removed", container.kind().name());
            self.expire();
        }
    }

    /// Default grips for the current type, keeping its point count.
    pub fn reset_graph(&mut self) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        let kind = container.kind();
        let graph = AnyGraph::with_point_count(kind, container.grips().len());
        container.swap_graph(graph);
    }

    pub fn is_locked(&self) -> bool {
        self.container.as_ref().is_some_and(|container| container.is_locked())
    }

    pub fn set_locked(&mut self, locked: bool) {
        if let Some(container) = self.container.as_mut() {
            if container.is_locked() != locked {
                container.set_locked(locked);
                self.expire();
            }
        }
    }

    pub fn toggle_locked(&mut self) {
        let locked = self.is_locked();
        self.set_locked(!locked);
    }

    pub fn remap_to_target(&self) -> bool {
        self.remap_to_target
    }

    pub fn set_remap_to_target(&mut self, remap: bool) {
        if self.remap_to_target != remap {
            self.remap_to_target = remap;
            self.expire();
        }
    }

    pub fn apply_grip_edit(&mut self, index: usize, x: f64, y: f64) -> bool {
        self.container
            .as_mut()
            .is_some_and(|container| container.apply_grip_edit(index, x, y))
    }

    /// Installs `container` as is, keeping its domains and lock, and returns the previous one.
    pub fn replace_container(&mut self, container: GraphContainer) -> Option<GraphContainer> {
        let old = self.container.take();
        self.attach(container);
        old
    }

    pub fn is_expired(&self) -> bool {
        self.expired.get()
    }

    /// Reads and resets the expired flag.
    pub fn take_expired(&self) -> bool {
        self.expired.replace(false)
    }

    pub fn write(&self, chunk: &mut Chunk) {
        chunk.set_boolean(REMAP_KEY, self.remap_to_target);
        if let Some(container) = self.container.as_ref() {
            container.write(chunk);
        }
    }

    /// Restores the session from `chunk`. On failure the session is left without a graph.
    pub fn read(&mut self, chunk: &Chunk) -> Result<(), ChunkError> {
        match Self::read_parts(chunk) {
            Ok((remap, container)) => {
                if let Some(remap) = remap {
                    self.remap_to_target = remap;
                }
                match container {
                    Some(container) => {
                        debug!("restored {} graph", container.kind().name());
                        self.attach(container);
                    }
                    None => {
                        self.container = None;
                        self.expire();
                    }
                }
                Ok(())
            }
            Err(error) => {
                warn!("stored graph could not be restored: {error}");
                self.container = None;
                self.expire();
                Err(error)
            }
        }
    }

    fn read_parts(chunk: &Chunk) -> Result<(Option<bool>, Option<GraphContainer>), ChunkError> {
        let remap = if chunk.contains(REMAP_KEY) {
            Some(chunk.get_boolean(REMAP_KEY)?)
        } else {
            None
        };
        let container = if chunk.contains("type_id") {
            Some(GraphContainer::read(chunk)?)
        } else {
            None
        };
        Ok((remap, container))
    }

    /// `"null"` without a graph.
    pub fn save_state(&self) -> Result<String, ChunkError> {
        if self.container.is_none() {
            return Ok(EMPTY_STATE.to_owned());
        }
        let mut chunk = Chunk::new(STATE_NAME);
        self.write(&mut chunk);
        let json = chunk.to_json()?;
        debug!("saved graph state ({} bytes)", json.len());
        Ok(json)
    }

    pub fn load_state(&mut self, state: &str) -> Result<(), ChunkError> {
        if state.trim().eq_ignore_ascii_case(EMPTY_STATE) {
            self.container = None;
            self.expire();
            return Ok(());
        }
        let chunk = match Chunk::from_json(state) {
            Ok(chunk) => chunk,
            Err(error) => {
                warn!("stored graph state is not readable: {error}");
                self.container = None;
                self.expire();
                return Err(error);
            }
        };
        self.read(&chunk)
    }

    /// Ends the session: forgets remembered graphs and the last batch.
    pub fn close(&mut self) {
        self.history.clear();
        self.samples.clear();
    }

    fn remember_current(&mut self) {
        if let Some(container) = self.container.as_ref() {
            self.history.remember(container.graph());
        }
    }

    fn install_graph(&mut self, graph: AnyGraph) {
        match self.container.as_mut() {
            Some(container) => {
                container.swap_graph(graph);
            }
            None => {
                let container = GraphContainer::new(graph);
                self.attach(container);
            }
        }
    }

    fn attach(&mut self, mut container: GraphContainer) {
        container.set_settings(self.configuration.intersection);
        let expired = Rc::clone(&self.expired);
        container.subscribe(move |_| expired.set(true));
        debug!("{} graph installed", container.kind().name());
        self.container = Some(container);
        self.expire();
    }

    fn expire(&self) {
        self.expired.set(true);
    }
}

impl Default for GraphMapper {
    fn default() -> Self {
        GraphMapper {
            configuration: Configuration::default(),
            container: None,
            history: GraphHistory::default(),
            remap_to_target: false,
            samples: Vec::new(),
            expired: Rc::new(Cell::new(false)),
        }
    }
}
