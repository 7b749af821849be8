//! Engine loop: orchestrates snapshot → select → dispatch → cleanup.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace};

use crate::dispatch::{self, NearestSettings};
use crate::error::EngineError;
use crate::graph::GraphStore;
use crate::ident::VertexId;
use crate::label::Label;
use crate::matcher::CountCompare;
use crate::nearest::TieBreaker;
use crate::selector::{RuleTable, Transcription};

/// Engine configuration.
///
/// `Default` reproduces the reference defaults exactly: resettable
/// transcription, range-mode counting, unbounded vertex cap, a hundred-step
/// ceiling, depth-2 stable-tie-break nearest search, no RNG seed.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Seed label used only when constructing an engine from an empty graph.
    pub start_state: Label,
    /// Rule-table traversal discipline.
    pub transcription: Transcription,
    /// Numeric predicate interpretation.
    pub count_compare: CountCompare,
    /// Birth cap; `0` means unbounded.
    pub max_vertices: u32,
    /// Step cap; negative means unbounded.
    pub max_steps: i64,
    /// Depth limit for nearest-neighbor search.
    pub nearest_max_depth: u32,
    /// Tie-break rule for nearest-neighbor search.
    pub nearest_tie_breaker: TieBreaker,
    /// Whether nearest-neighbor search connects to every vertex it finds.
    pub nearest_connect_all: bool,
    /// Seed for the RNG used only when `nearest_tie_breaker == Random`.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_state: Label::from("A"),
            transcription: Transcription::Resettable,
            count_compare: CountCompare::Range,
            max_vertices: 0,
            max_steps: 100,
            nearest_max_depth: 2,
            nearest_tie_breaker: TieBreaker::Stable,
            nearest_connect_all: false,
            rng_seed: None,
        }
    }
}

/// Summary returned after a call to [`Engine::run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Number of steps executed.
    pub steps_run: u64,
}

/// The Graph Unfolding Machine engine.
pub struct Engine {
    graph: GraphStore,
    rules: RuleTable,
    config: EngineConfig,
    rng: Option<ChaCha8Rng>,
    steps_run: u64,
}

impl Engine {
    /// Constructs an engine over `graph` with the given rule table and
    /// configuration. If `graph` is empty, seeds it with a single vertex in
    /// `config.start_state`.
    ///
    /// A `tie_breaker = Random` configuration with no `rng_seed` degrades to
    /// `Stable` rather than erroring.
    #[must_use]
    pub fn new(mut graph: GraphStore, rules: RuleTable, mut config: EngineConfig) -> Self {
        if graph.is_empty() {
            graph.add_vertex(config.start_state.clone(), 0, true);
        }
        let rng = match (config.nearest_tie_breaker, config.rng_seed) {
            (TieBreaker::Random, Some(seed)) => Some(ChaCha8Rng::seed_from_u64(seed)),
            (TieBreaker::Random, None) => {
                debug!("tie_breaker=random with no rng_seed; degrading to stable");
                config.nearest_tie_breaker = TieBreaker::Stable;
                None
            }
            _ => None,
        };
        Self {
            graph,
            rules,
            config,
            rng,
            steps_run: 0,
        }
    }

    /// Builds an engine purely from configuration, validating the initial
    /// edge list before constructing the graph. Vertex ids are assigned by
    /// the store's own allocator, so they can never collide here; callers
    /// that need to detect caller-supplied duplicate ids must validate
    /// before calling this.
    ///
    /// # Errors
    /// Returns [`EngineError::Validation`] if any edge references a missing
    /// vertex or forms a self-loop.
    pub fn from_initial_graph(
        vertices: impl IntoIterator<Item = (Label, u32)>,
        edges: impl IntoIterator<Item = (u64, u64)>,
        rules: RuleTable,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let mut graph = GraphStore::new();
        for (state, parents_count) in vertices {
            graph.add_vertex(state, parents_count, false);
        }
        let edges: Vec<(VertexId, VertexId)> = edges
            .into_iter()
            .map(|(a, b)| (VertexId(a), VertexId(b)))
            .collect();
        graph.add_edges_validated(edges)?;
        Ok(Self::new(graph, rules, config))
    }

    /// Borrows the underlying graph store.
    #[must_use]
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Borrows the rule table.
    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Mutably borrows the rule table (e.g. to toggle `is_enabled`).
    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    /// Number of steps executed so far.
    #[must_use]
    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    /// Executes a single step and returns `true` if any rule fired.
    #[instrument(skip(self), fields(step = self.steps_run))]
    pub fn step(&mut self) -> bool {
        self.graph.snapshot_all();
        let ordered_ids = self.graph.ordered_ids();
        let nearest = NearestSettings {
            max_depth: self.config.nearest_max_depth,
            tie_breaker: self.config.nearest_tie_breaker,
            connect_all: self.config.nearest_connect_all,
        };

        let mut fired = false;
        for id in ordered_ids {
            if !self.graph.contains(id) {
                continue;
            }
            let is_deleted = self.graph.vertex(id).map(|v| v.marked_deleted).unwrap_or(true);
            if is_deleted {
                continue;
            }

            let matched = {
                let vertex = self.graph.vertex(id).expect("vertex present");
                self.rules.select(vertex, self.config.count_compare)
            };

            if let Some(index) = matched {
                let operation = self
                    .rules
                    .get(index)
                    .expect("selected index is valid")
                    .operation
                    .clone();
                dispatch::apply(
                    &mut self.graph,
                    id,
                    &operation,
                    &nearest,
                    self.config.max_vertices,
                    self.rng.as_mut(),
                );
                if let Some(vertex) = self.graph.vertex_mut(id) {
                    self.rules.advance_cursor(vertex, index);
                }
                if let Some(rule) = self.rules.get_mut(index) {
                    rule.record_activation();
                }
                fired = true;
                trace!(vertex = id.value(), rule = index, "rule fired");
            }

            if let Some(vertex) = self.graph.vertex_mut(id) {
                vertex.prior_state = vertex.saved_state.clone();
            }
        }

        self.steps_run += 1;
        fired
    }

    /// Runs steps until the step cap is reached or two consecutive steps
    /// fire no rule, then flushes any vertices marked for deletion.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> RunSummary {
        let mut consecutive_empty: u32 = 0;
        let mut steps = 0u64;
        loop {
            if self.config.max_steps >= 0 && steps >= self.config.max_steps as u64 {
                break;
            }
            let fired = self.step();
            steps += 1;
            if fired {
                consecutive_empty = 0;
            } else {
                consecutive_empty += 1;
            }
            if consecutive_empty >= 2 {
                break;
            }
        }
        self.graph.delete_marked();
        debug!(steps, "engine run complete");
        RunSummary { steps_run: steps }
    }

    /// Computes a deterministic BLAKE3 digest over the current graph state.
    ///
    /// Not used for correctness (GUM has no content-addressing requirement);
    /// exposed so the determinism harness and tests can compare two runs
    /// without walking every field by hand.
    #[must_use]
    pub fn state_digest(&self) -> [u8; 32] {
        crate::digest::graph_digest(&self.graph)
    }
}
