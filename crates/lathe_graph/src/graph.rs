//! The kind graph component.

use lathe_store::{Filter, RecordStore};
use tracing::debug;

use crate::error::GraphError;
use crate::model::{
    ConnectOutcome, Consumer, DefineOutcome, Edge, GraphSnapshot, Kind, Producer, RouteOutcome,
    ValidateOutcome,
};
use crate::traverse::Adjacency;

const KIND_RELATION: &str = "kind";
const EDGE_RELATION: &str = "edge";

/// Registry of artifact kinds and the directed edges between them.
///
/// All state lives in the record store handed to [`new`](Self::new);
/// two graphs over the same store see the same kinds and edges. The
/// edge set is kept acyclic at insert time, so every read-side query
/// may assume a DAG.
pub struct KindGraph<S> {
    store: S,
}

impl<S: RecordStore> KindGraph<S> {
    /// Creates a graph over `store`.
    pub fn new(store: S) -> Self {
        KindGraph { store }
    }

    /// Registers a kind under a unique name.
    ///
    /// A second `define` for the same name changes nothing, whatever
    /// category it carries; the stored kind is returned as
    /// [`DefineOutcome::Exists`].
    pub fn define(&mut self, name: &str, category: &str) -> Result<DefineOutcome, GraphError> {
        if let Some(record) = self.store.get(KIND_RELATION, name)? {
            let existing: Kind = serde_json::from_value(record)?;
            return Ok(DefineOutcome::Exists(existing));
        }
        let kind = Kind {
            name: name.to_string(),
            category: category.to_string(),
        };
        self.store
            .put(KIND_RELATION, name, serde_json::to_value(&kind)?)?;
        debug!(kind = name, category, "kind defined");
        Ok(DefineOutcome::Defined(kind))
    }

    /// Inserts a directed edge `from -> to` labeled `relation`.
    ///
    /// Rejected without mutation when the edge is a self-loop, when
    /// either endpoint is undefined, or when it would close a directed
    /// cycle. Re-connecting an existing `(from, to, relation)` triple
    /// upserts the stored edge, which is how a transform gets renamed.
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        relation: &str,
        transform: Option<&str>,
    ) -> Result<ConnectOutcome, GraphError> {
        if from == to {
            return Ok(ConnectOutcome::Invalid {
                message: format!("self-loop edge '{from}' -> '{to}' is not allowed"),
            });
        }
        if self.store.get(KIND_RELATION, from)?.is_none() {
            return Ok(ConnectOutcome::Invalid {
                message: format!("kind '{from}' is not defined"),
            });
        }
        if self.store.get(KIND_RELATION, to)?.is_none() {
            return Ok(ConnectOutcome::Invalid {
                message: format!("kind '{to}' is not defined"),
            });
        }
        let adjacency = Adjacency::from_edges(self.load_edges()?);
        if adjacency.reaches(to, from) {
            debug!(from, to, relation, "edge rejected");
            return Ok(ConnectOutcome::Invalid {
                message: format!("edge '{from}' -> '{to}' would close a cycle"),
            });
        }
        let edge = Edge {
            from: from.to_string(),
            to: to.to_string(),
            relation: relation.to_string(),
            transform: transform.map(str::to_string),
        };
        self.store
            .put(EDGE_RELATION, &edge.key(), serde_json::to_value(&edge)?)?;
        debug!(from, to, relation, "edge connected");
        Ok(ConnectOutcome::Connected(edge))
    }

    /// Shortest path from `from` to `to` by hop count.
    ///
    /// Returns [`RouteOutcome::Unreachable`] when no directed path
    /// exists, including when either endpoint was never defined.
    /// Routing a kind to itself yields an empty path.
    pub fn route(&self, from: &str, to: &str) -> Result<RouteOutcome, GraphError> {
        let adjacency = Adjacency::from_edges(self.load_edges()?);
        match adjacency.shortest_route(from, to) {
            Some(path) => Ok(RouteOutcome::Path(path)),
            None => Ok(RouteOutcome::Unreachable),
        }
    }

    /// Checks for a direct edge `from -> to` under any relation.
    ///
    /// Strict adjacency: a multi-hop path between the pair does not
    /// validate.
    pub fn validate(&self, from: &str, to: &str) -> Result<ValidateOutcome, GraphError> {
        let outgoing = self
            .store
            .find(EDGE_RELATION, &Filter::field_eq("from", from))?;
        for record in outgoing {
            let edge: Edge = serde_json::from_value(record)?;
            if edge.to == to {
                return Ok(ValidateOutcome::Valid);
            }
        }
        Ok(ValidateOutcome::Invalid {
            message: format!("no direct edge from '{from}' to '{to}'"),
        })
    }

    /// Every kind reachable downstream of `kind`, transitively.
    ///
    /// This is the impact query: when a kind's artifacts change, these
    /// are the kinds whose cached steps are suspect. Unknown kinds
    /// yield an empty list.
    pub fn dependents(&self, kind: &str) -> Result<Vec<String>, GraphError> {
        let adjacency = Adjacency::from_edges(self.load_edges()?);
        Ok(adjacency.closure_from(kind))
    }

    /// The edges that produce `kind`, seen from its side.
    pub fn producers(&self, kind: &str) -> Result<Vec<Producer>, GraphError> {
        let records = self
            .store
            .find(EDGE_RELATION, &Filter::field_eq("to", kind))?;
        records
            .into_iter()
            .map(|record| {
                let edge: Edge = serde_json::from_value(record)?;
                Ok(Producer {
                    kind: edge.from,
                    relation: edge.relation,
                    transform: edge.transform,
                })
            })
            .collect()
    }

    /// The edges that consume `kind`, seen from its side.
    pub fn consumers(&self, kind: &str) -> Result<Vec<Consumer>, GraphError> {
        let records = self
            .store
            .find(EDGE_RELATION, &Filter::field_eq("from", kind))?;
        records
            .into_iter()
            .map(|record| {
                let edge: Edge = serde_json::from_value(record)?;
                Ok(Consumer {
                    kind: edge.to,
                    relation: edge.relation,
                    transform: edge.transform,
                })
            })
            .collect()
    }

    /// Full dump of every kind and edge.
    pub fn snapshot(&self) -> Result<GraphSnapshot, GraphError> {
        let kinds = self
            .store
            .find(KIND_RELATION, &Filter::All)?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(GraphError::from))
            .collect::<Result<Vec<Kind>, _>>()?;
        Ok(GraphSnapshot {
            kinds,
            edges: self.load_edges()?,
        })
    }

    fn load_edges(&self) -> Result<Vec<Edge>, GraphError> {
        self.store
            .find(EDGE_RELATION, &Filter::All)?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(GraphError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lathe_store::MemoryStore;

    fn graph() -> KindGraph<MemoryStore> {
        KindGraph::new(MemoryStore::new())
    }

    fn define_all(graph: &mut KindGraph<MemoryStore>, names: &[&str]) {
        for name in names {
            graph.define(name, "stage").unwrap();
        }
    }

    fn connect_ok(graph: &mut KindGraph<MemoryStore>, from: &str, to: &str, relation: &str) {
        match graph.connect(from, to, relation, None).unwrap() {
            ConnectOutcome::Connected(_) => {}
            other => panic!("expected connected, got {other:?}"),
        }
    }

    #[test]
    fn define_registers_kind() {
        let mut graph = graph();
        match graph.define("ConceptSpec", "source").unwrap() {
            DefineOutcome::Defined(kind) => {
                assert_eq!(kind.name, "ConceptSpec");
                assert_eq!(kind.category, "source");
            }
            other => panic!("expected defined, got {other:?}"),
        }
    }

    #[test]
    fn redefine_keeps_original_category() {
        let mut graph = graph();
        graph.define("ConceptSpec", "source").unwrap();
        match graph.define("ConceptSpec", "artifact").unwrap() {
            DefineOutcome::Exists(kind) => assert_eq!(kind.category, "source"),
            other => panic!("expected exists, got {other:?}"),
        }
        let snapshot = graph.snapshot().unwrap();
        assert_eq!(snapshot.kinds.len(), 1);
        assert_eq!(snapshot.kinds[0].category, "source");
    }

    #[test]
    fn connect_requires_defined_endpoints() {
        let mut graph = graph();
        graph.define("A", "source").unwrap();
        match graph.connect("A", "Missing", "r", None).unwrap() {
            ConnectOutcome::Invalid { message } => assert!(message.contains("Missing")),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert!(graph.snapshot().unwrap().edges.is_empty());
    }

    #[test]
    fn connect_rejects_self_loop() {
        let mut graph = graph();
        graph.define("A", "source").unwrap();
        match graph.connect("A", "A", "r", None).unwrap() {
            ConnectOutcome::Invalid { message } => assert!(message.contains("self-loop")),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn connect_rejects_cycle() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B", "C"]);
        connect_ok(&mut graph, "A", "B", "r");
        connect_ok(&mut graph, "B", "C", "r");
        match graph.connect("C", "A", "r", None).unwrap() {
            ConnectOutcome::Invalid { message } => assert!(message.contains("cycle")),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert_eq!(graph.snapshot().unwrap().edges.len(), 2);
    }

    #[test]
    fn connect_rejects_two_node_cycle() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B"]);
        connect_ok(&mut graph, "A", "B", "r");
        match graph.connect("B", "A", "r", None).unwrap() {
            ConnectOutcome::Invalid { message } => assert!(message.contains("cycle")),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn reconnect_upserts_transform() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B"]);
        connect_ok(&mut graph, "A", "B", "generates");
        match graph.connect("A", "B", "generates", Some("SchemaGen")).unwrap() {
            ConnectOutcome::Connected(edge) => {
                assert_eq!(edge.transform.as_deref(), Some("SchemaGen"));
            }
            other => panic!("expected connected, got {other:?}"),
        }
        let snapshot = graph.snapshot().unwrap();
        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].transform.as_deref(), Some("SchemaGen"));
    }

    #[test]
    fn parallel_relations_are_independent_edges() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B"]);
        connect_ok(&mut graph, "A", "B", "generates");
        connect_ok(&mut graph, "A", "B", "documents");
        assert_eq!(graph.snapshot().unwrap().edges.len(), 2);
    }

    #[test]
    fn route_finds_shortest_path() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B", "C"]);
        connect_ok(&mut graph, "A", "B", "r");
        connect_ok(&mut graph, "B", "C", "r");
        graph.connect("A", "C", "direct", Some("FastGen")).unwrap();
        match graph.route("A", "C").unwrap() {
            RouteOutcome::Path(path) => {
                assert_eq!(path.len(), 1);
                assert_eq!(path[0].kind, "C");
                assert_eq!(path[0].relation, "direct");
                assert_eq!(path[0].transform.as_deref(), Some("FastGen"));
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn route_hops_name_each_kind_in_order() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B", "C"]);
        connect_ok(&mut graph, "A", "B", "r1");
        connect_ok(&mut graph, "B", "C", "r2");
        match graph.route("A", "C").unwrap() {
            RouteOutcome::Path(path) => {
                let kinds: Vec<&str> = path.iter().map(|h| h.kind.as_str()).collect();
                assert_eq!(kinds, vec!["B", "C"]);
                assert_eq!(path[0].relation, "r1");
                assert_eq!(path[1].relation, "r2");
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn route_carries_transforms_along_the_path() {
        let mut graph = graph();
        graph.define("ConceptSpec", "model").unwrap();
        graph.define("SchemaModel", "model").unwrap();
        graph.define("RustFile", "artifact").unwrap();
        graph
            .connect("ConceptSpec", "SchemaModel", "normalizes_to", Some("SchemaGen"))
            .unwrap();
        graph
            .connect("SchemaModel", "RustFile", "renders_to", Some("RustEmit"))
            .unwrap();
        match graph.route("ConceptSpec", "RustFile").unwrap() {
            RouteOutcome::Path(path) => {
                let hops: Vec<(&str, Option<&str>)> = path
                    .iter()
                    .map(|h| (h.kind.as_str(), h.transform.as_deref()))
                    .collect();
                assert_eq!(
                    hops,
                    vec![("SchemaModel", Some("SchemaGen")), ("RustFile", Some("RustEmit"))]
                );
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn route_to_self_is_empty() {
        let mut graph = graph();
        define_all(&mut graph, &["A"]);
        assert_eq!(graph.route("A", "A").unwrap(), RouteOutcome::Path(Vec::new()));
    }

    #[test]
    fn route_against_edge_direction_is_unreachable() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B"]);
        connect_ok(&mut graph, "A", "B", "r");
        assert_eq!(graph.route("B", "A").unwrap(), RouteOutcome::Unreachable);
    }

    #[test]
    fn validate_accepts_direct_edge_only() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B", "C"]);
        connect_ok(&mut graph, "A", "B", "r");
        connect_ok(&mut graph, "B", "C", "r");
        assert_eq!(graph.validate("A", "B").unwrap(), ValidateOutcome::Valid);
        match graph.validate("A", "C").unwrap() {
            ValidateOutcome::Invalid { message } => assert!(message.contains("direct")),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn dependents_cover_transitive_closure() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B", "C", "D"]);
        connect_ok(&mut graph, "A", "B", "r");
        connect_ok(&mut graph, "B", "C", "r");
        connect_ok(&mut graph, "B", "D", "r");
        assert_eq!(graph.dependents("A").unwrap(), vec!["B", "C", "D"]);
        assert_eq!(graph.dependents("B").unwrap(), vec!["C", "D"]);
        assert!(graph.dependents("D").unwrap().is_empty());
    }

    #[test]
    fn dependents_of_unknown_kind_is_empty() {
        let graph = graph();
        assert!(graph.dependents("Ghost").unwrap().is_empty());
    }

    #[test]
    fn producers_and_consumers_project_edges() {
        let mut graph = graph();
        define_all(&mut graph, &["Spec", "Schema", "Docs"]);
        graph.connect("Spec", "Schema", "generates", Some("SchemaGen")).unwrap();
        graph.connect("Schema", "Docs", "documents", Some("DocGen")).unwrap();

        let producers = graph.producers("Schema").unwrap();
        assert_eq!(producers.len(), 1);
        assert_eq!(producers[0].kind, "Spec");
        assert_eq!(producers[0].transform.as_deref(), Some("SchemaGen"));

        let consumers = graph.consumers("Schema").unwrap();
        assert_eq!(consumers.len(), 1);
        assert_eq!(consumers[0].kind, "Docs");
        assert_eq!(consumers[0].relation, "documents");
    }

    #[test]
    fn snapshot_lists_kinds_and_edges() {
        let mut graph = graph();
        define_all(&mut graph, &["A", "B"]);
        connect_ok(&mut graph, "A", "B", "r");
        let snapshot = graph.snapshot().unwrap();
        assert_eq!(snapshot.kinds.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].key(), "A:B:r");
    }
}
