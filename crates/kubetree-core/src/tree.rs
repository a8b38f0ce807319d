use crate::config_store::{Configuration, ContextEntry, SelectionTarget};
use crate::error::ListError;
use crate::lister::NamespaceLister;

/// Stable identity of a node: contexts by position in the kubeconfig,
/// namespaces by position under their context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Root,
    Context(usize),
    Namespace { context: usize, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextMarker {
    Normal,
    Active,
    Error(ListError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceMarker {
    Normal,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

/// What the event loop should do after handling an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    Quit,
    Switch(SelectionTarget),
}

#[derive(Debug, Clone)]
pub struct ContextNode {
    entry: ContextEntry,
    is_active: bool,
    marker: ContextMarker,
    load: LoadState,
    children: Vec<NamespaceNode>,
}

impl ContextNode {
    fn new(entry: &ContextEntry, active_context: &str) -> Self {
        let is_active = entry.name == active_context;
        Self {
            entry: entry.clone(),
            is_active,
            marker: if is_active { ContextMarker::Active } else { ContextMarker::Normal },
            load: LoadState::Unloaded,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn marker(&self) -> &ContextMarker {
        &self.marker
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn children(&self) -> &[NamespaceNode] {
        &self.children
    }

    pub fn label(&self) -> String {
        let name = self.name();
        if self.load == LoadState::Loading {
            return format!("{name} (loading…)");
        }
        match &self.marker {
            ContextMarker::Error(e) => format!("{name} ({e})"),
            ContextMarker::Active => format!("{name} (active)"),
            ContextMarker::Normal => name.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NamespaceNode {
    context: String,
    name: String,
    marker: NamespaceMarker,
}

impl NamespaceNode {
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker(&self) -> NamespaceMarker {
        self.marker
    }

    pub fn target(&self) -> SelectionTarget {
        SelectionTarget::new(self.context.clone(), self.name.clone())
    }
}

/// Contexts with lazily fetched namespace children.
///
/// At most one context is expanded at a time and exactly one node is
/// highlighted. The highlight doubles as the cursor and always points at a
/// visible node.
#[derive(Debug, Clone)]
pub struct SelectionTree {
    contexts: Vec<ContextNode>,
    expanded: Option<usize>,
    highlighted: NodeRef,
}

impl SelectionTree {
    pub fn new(config: &Configuration) -> Self {
        let active = config.active_context();
        let contexts = config.contexts().iter().map(|entry| ContextNode::new(entry, active)).collect();
        Self { contexts, expanded: None, highlighted: NodeRef::Root }
    }

    pub fn contexts(&self) -> &[ContextNode] {
        &self.contexts
    }

    pub fn context(&self, idx: usize) -> Option<&ContextNode> {
        self.contexts.get(idx)
    }

    pub fn namespace(&self, context: usize, index: usize) -> Option<&NamespaceNode> {
        self.contexts.get(context)?.children.get(index)
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn is_expanded(&self, idx: usize) -> bool {
        self.expanded == Some(idx)
    }

    pub fn highlighted(&self) -> NodeRef {
        self.highlighted
    }

    /// Rows in display order: the root, every context, and the children of
    /// the expanded context.
    pub fn visible(&self) -> Vec<NodeRef> {
        let mut rows = Vec::with_capacity(1 + self.contexts.len());
        rows.push(NodeRef::Root);
        for (idx, node) in self.contexts.iter().enumerate() {
            rows.push(NodeRef::Context(idx));
            if self.expanded == Some(idx) {
                rows.extend((0..node.children.len()).map(|index| NodeRef::Namespace { context: idx, index }));
            }
        }
        rows
    }

    pub fn move_up(&mut self) {
        self.move_by(-1);
    }

    pub fn move_down(&mut self) {
        self.move_by(1);
    }

    pub fn move_to_top(&mut self) {
        self.highlighted = NodeRef::Root;
    }

    pub fn move_to_bottom(&mut self) {
        if let Some(last) = self.visible().last() {
            self.highlighted = *last;
        }
    }

    fn move_by(&mut self, delta: isize) {
        let rows = self.visible();
        let pos = rows.iter().position(|r| *r == self.highlighted).unwrap_or(0);
        let next = pos.saturating_add_signed(delta).min(rows.len() - 1);
        self.highlighted = rows[next];
    }

    /// First half of a toggle. Flips visibility and, when the context has no
    /// namespaces yet, marks it loading and returns its name so the caller
    /// can fetch them.
    ///
    /// A populated context is never fetched again; a context whose last fetch
    /// failed is fetched again instead of collapsing.
    pub fn begin_expand(&mut self, idx: usize) -> Option<String> {
        let load = self.contexts.get(idx)?.load;
        let open = self.expanded == Some(idx);

        if open && load == LoadState::Loaded {
            self.collapse(idx);
            return None;
        }
        if !open {
            if let Some(prev) = self.expanded {
                self.collapse(prev);
            }
            self.expanded = Some(idx);
        }

        if load == LoadState::Loaded {
            return None;
        }
        let node = &mut self.contexts[idx];
        node.load = LoadState::Loading;
        Some(node.name().to_string())
    }

    /// Second half of a toggle: applies the outcome of the namespace fetch.
    pub fn finish_expand(&mut self, idx: usize, result: Result<Vec<String>, ListError>) {
        let Some(node) = self.contexts.get_mut(idx) else { return };

        match result {
            Ok(namespaces) => {
                let recorded = node.entry.active_namespace().to_string();
                node.children = namespaces
                    .into_iter()
                    .map(|name| NamespaceNode {
                        marker: if name == recorded { NamespaceMarker::Active } else { NamespaceMarker::Normal },
                        context: node.entry.name.clone(),
                        name,
                    })
                    .collect();
                node.marker = if node.is_active { ContextMarker::Active } else { ContextMarker::Normal };
                node.load = LoadState::Loaded;

                let active_child = node.children.iter().position(|c| c.marker == NamespaceMarker::Active);
                if let (Some(index), true) = (active_child, self.expanded == Some(idx)) {
                    self.highlighted = NodeRef::Namespace { context: idx, index };
                }
            }
            Err(e) => {
                node.marker = ContextMarker::Error(e);
                node.load = LoadState::Failed;
            }
        }
    }

    /// Expands or collapses a context, fetching its namespaces on first use.
    pub async fn toggle_expand<L: NamespaceLister>(&mut self, idx: usize, lister: &L) {
        if let Some(context) = self.begin_expand(idx) {
            let result = lister.list(&context).await;
            self.finish_expand(idx, result);
        }
    }

    /// Collapses `idx` if it is the expanded context. A highlight on one of
    /// its namespaces moves up to the context.
    pub fn collapse(&mut self, idx: usize) {
        if self.expanded != Some(idx) {
            return;
        }
        self.expanded = None;
        if let NodeRef::Namespace { context, .. } = self.highlighted {
            if context == idx {
                self.highlighted = NodeRef::Context(idx);
            }
        }
    }

    /// Collapses whichever context is expanded.
    pub fn collapse_expanded(&mut self) {
        if let Some(idx) = self.expanded {
            self.collapse(idx);
        }
    }

    /// Terminal action on a namespace node: ends the session with a switch to
    /// that namespace. Any other node leaves the session running.
    pub fn select(&self, node: NodeRef) -> SessionOutcome {
        match node {
            NodeRef::Namespace { context, index } => match self.namespace(context, index) {
                Some(ns) => SessionOutcome::Switch(ns.target()),
                None => SessionOutcome::Continue,
            },
            _ => SessionOutcome::Continue,
        }
    }

    /// Acts on the highlighted node: toggles a context, selects a namespace.
    pub async fn activate<L: NamespaceLister>(&mut self, lister: &L) -> SessionOutcome {
        match self.highlighted {
            NodeRef::Root => SessionOutcome::Continue,
            NodeRef::Context(idx) => {
                self.toggle_expand(idx, lister).await;
                SessionOutcome::Continue
            }
            node @ NodeRef::Namespace { .. } => self.select(node),
        }
    }
}
