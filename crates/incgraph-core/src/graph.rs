//! Include graph built on petgraph::StableDiGraph with a path registry

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::document::{EdgeRecord, GraphDocument, NodeRecord};
use crate::model::*;

/// Directed multigraph of files keyed by canonical path.
///
/// Nodes and edges are never removed, so identities coincide with
/// petgraph indices and stay in first-seen order.
pub struct IncludeGraph {
    inner: StableDiGraph<IncludeNode, IncludeEdge>,
    registry: HashMap<PathBuf, NodeId>,
    options: GraphOptions,
    rng: StdRng,
}

impl fmt::Debug for IncludeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncludeGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("relation", &self.options.relation)
            .finish()
    }
}

impl fmt::Display for IncludeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Graph: nodes = {}, edges = {}>",
            self.node_count(),
            self.edge_count()
        )
    }
}

impl IncludeGraph {
    pub fn new(options: GraphOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        IncludeGraph {
            inner: StableDiGraph::new(),
            registry: HashMap::new(),
            options,
            rng,
        }
    }

    /// Register a scanned file together with its resolved includes.
    ///
    /// The file's weight is fixed to `neighbors.len()` the first time it is
    /// registered as a scan target, whichever order files arrive in. One
    /// edge is appended per neighbor on every call.
    pub fn register<I, P>(&mut self, file: &Path, neighbors: I)
    where
        I: IntoIterator<Item = P>,
        I::IntoIter: ExactSizeIterator,
        P: AsRef<Path>,
    {
        let neighbors = neighbors.into_iter();
        let weight = u32::try_from(neighbors.len()).unwrap_or(u32::MAX);

        let color = self.options.palette.generate(&mut self.rng);
        let file_id = self.get_or_add_node(file, color, weight);
        if let Some(node) = self.node_mut(file_id) {
            if !node.scanned {
                node.scanned = true;
                node.weight = weight;
            }
        }

        for neighbor in neighbors {
            let color = self.options.palette.generate(&mut self.rng);
            let neighbor_id = self.get_or_add_node(neighbor.as_ref(), color, 1);
            self.add_edge(file_id, neighbor_id);
        }
    }

    /// Look up the node registered for a canonical path (or raw token).
    pub fn find(&self, path: impl AsRef<Path>) -> Option<&IncludeNode> {
        let id = self.registry.get(path.as_ref())?;
        self.node(*id)
    }

    pub fn node(&self, id: NodeId) -> Option<&IncludeNode> {
        self.inner.node_weight(NodeIndex::new(id.0 as usize))
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut IncludeNode> {
        self.inner.node_weight_mut(NodeIndex::new(id.0 as usize))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&IncludeEdge> {
        self.inner.edge_weight(EdgeIndex::new(id.0 as usize))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Nodes in identity order.
    pub fn nodes(&self) -> impl Iterator<Item = &IncludeNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Edges in identity order.
    pub fn edges(&self) -> impl Iterator<Item = &IncludeEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Snapshot the graph into its serializable form.
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes().map(NodeRecord::from).collect(),
            edges: self.edges().map(EdgeRecord::from).collect(),
        }
    }

    fn get_or_add_node(&mut self, path: &Path, color: String, weight: u32) -> NodeId {
        if let Some(id) = self.registry.get(path) {
            return *id;
        }

        let id = NodeId(self.inner.node_count() as u32);
        let placement = Placement {
            x: self.rng.r#gen::<f64>() * 0.01,
            y: self.rng.r#gen::<f64>() * 0.01,
        };
        let node = IncludeNode {
            id,
            path: path.to_path_buf(),
            label: node_label(path, self.options.full_path),
            group: group_key(path, self.options.group_granularity),
            weight,
            placement,
            color,
            scanned: false,
        };

        let idx = self.inner.add_node(node);
        debug_assert_eq!(idx.index(), id.0 as usize);
        self.registry.insert(path.to_path_buf(), id);
        tracing::trace!("node {} = {}", id.0, path.display());
        id
    }

    fn add_edge(&mut self, includer: NodeId, included: NodeId) -> EdgeId {
        let id = EdgeId(self.inner.edge_count() as u32);
        let (source, target) = self.options.relation.orient(includer, included);
        self.inner.add_edge(
            NodeIndex::new(source.0 as usize),
            NodeIndex::new(target.0 as usize),
            IncludeEdge { id, source, target },
        );
        id
    }
}

/// Display label: the full path, or only its final component.
pub fn node_label(path: &Path, full_path: bool) -> String {
    if full_path {
        return path.to_string_lossy().into_owned();
    }
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

/// Group key: the last `granularity` directory segments above the file.
///
/// Relative segments of unresolved tokens (`..`, `.`) count as directories.
pub fn group_key(path: &Path, granularity: usize) -> String {
    let directories: Vec<String> = path
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|component| match component {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    Component::CurDir | Component::ParentDir => {
                        Some(component.as_os_str().to_string_lossy().into_owned())
                    }
                    Component::RootDir | Component::Prefix(_) => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let begin = directories.len().saturating_sub(granularity);
    directories[begin..].join(MAIN_SEPARATOR_STR)
}
