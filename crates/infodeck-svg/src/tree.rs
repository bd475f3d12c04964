//! Arena-backed document tree.
//!
//! Every node lives in one `Vec` and is addressed by a [`NodeId`]. Parents hold
//! ordered child ids, so replacing a node only rebinds the data stored under its
//! id; sibling positions and every other pending id stay valid.

/// Unique identifier for a node within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document node (always 0).
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single attribute, name kept exactly as written (prefix included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element payload: qualified name plus attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute append.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Name with any namespace prefix stripped.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Prefix of the qualified name, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Attribute lookup by exact qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }
}

/// XML declaration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The invisible document node that owns the prolog and the root element.
    Document,
    Declaration(Declaration),
    Doctype(String),
    Element(Element),
    /// Unescaped character data.
    Text(String),
    CData(String),
    /// Raw comment body.
    Comment(String),
    /// Raw processing instruction content (target included).
    ProcessingInstruction(String),
}

/// A node in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(data: NodeData, parent: Option<NodeId>) -> Self {
        Self {
            data,
            parent,
            children: Vec::new(),
        }
    }
}

/// An ordered, mutable XML document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document, None)],
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Append a new node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data, Some(parent)));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Replace what `id` holds and drop its children.
    ///
    /// The node keeps its slot among its siblings. Former children stay in the
    /// arena but are no longer reachable.
    pub fn replace(&mut self, id: NodeId, data: NodeData) {
        let node = &mut self.nodes[id.index()];
        node.data = data;
        node.children.clear();
    }

    /// Element payload for `id`, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id).data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id).data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The top-level element.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&c| self.element(c).is_some())
    }

    /// All reachable element ids in document order whose local name matches.
    pub fn find_by_local_name(&self, name: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|e| e.local_name() == name))
            .collect()
    }

    /// First child element of `id` whose local name matches.
    pub fn first_child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.element(c).is_some_and(|e| e.local_name() == name))
    }

    /// Reachable descendants of `id` in pre-order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Whether `id` is still reachable from the document node.
    ///
    /// Nodes below a replaced node keep their parent link but are no longer
    /// listed among that parent's children.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            if !self.children(parent).contains(&current) {
                return false;
            }
            current = parent;
        }
        current == NodeId::ROOT
    }

    /// Concatenated text and CDATA content below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        for node in self.descendants(id) {
            match &self.node(node).data {
                NodeData::Text(t) | NodeData::CData(t) => text.push_str(t),
                _ => {}
            }
        }
        text
    }

    /// Count reachable elements with the given local name.
    pub fn count_local_name(&self, name: &str) -> usize {
        self.find_by_local_name(name).len()
    }

    fn subtree_eq(&self, id: NodeId, other: &Document, other_id: NodeId) -> bool {
        let (a, b) = (self.node(id), other.node(other_id));
        a.data == b.data
            && a.children.len() == b.children.len()
            && a
                .children
                .iter()
                .zip(&b.children)
                .all(|(&x, &y)| self.subtree_eq(x, other, y))
    }
}

/// Structural equality over reachable nodes; orphaned arena slots are ignored.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(NodeId::ROOT, other, NodeId::ROOT)
    }
}

/// Strip a namespace prefix from a qualified name.
pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map(|(_, local)| local)
        .unwrap_or(qualified)
}
