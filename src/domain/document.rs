//! Rendered content tree.
//!
//! All nodes live in a `Vec`-backed arena owned by [`Document`] and are
//! referenced by [`NodeId`]. Tree structure is encoded via
//! parent/child/sibling links stored on each node, so insertion and removal
//! are O(1). Detached nodes stay allocated until the document is dropped;
//! the document lives exactly as long as the page it mirrors.

/// A handle into the arena that uniquely identifies a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single attribute on an element (e.g. `data-bionic="true"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// Data specific to element nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag_name: String,
    pub attrs: Vec<Attr>,
    /// Class names, kept in sync with the `class` attribute.
    pub classes: Vec<String>,
    /// Inline style properties (name → value), e.g. `--motion-duration`.
    pub style: Vec<(String, String)>,
}

/// The payload that distinguishes element and text nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(ElementData),
    Text { data: String },
}

/// A single node in the content tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    /// If this is an element, return a reference to its [`ElementData`].
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// If this is a text node, return its text.
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { data } => Some(data),
            _ => None,
        }
    }
}

/// The complete content tree, rooted at a single element.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with an empty `html` root element.
    pub fn new() -> Self {
        let root_node = Node::new(NodeData::Element(ElementData {
            tag_name: "html".to_string(),
            attrs: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
        }));
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// The root element all document-level side effects attach to.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    // --- Node creation ---

    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached element with no attributes.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.allocate(Node::new(NodeData::Element(ElementData {
            tag_name: tag_name.to_string(),
            attrs: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
        })))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.allocate(Node::new(NodeData::Text {
            data: data.to_string(),
        }))
    }

    // --- Tree mutation ---

    /// Append `child` as the last child of `parent`, detaching it from any
    /// current position first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(child).and_then(|n| n.parent).is_some() {
            self.detach(child);
        }

        let old_last = self.get(parent).and_then(|n| n.last_child);

        if let Some(old_last_id) = old_last {
            if let Some(old_last_node) = self.get_mut(old_last_id) {
                old_last_node.next_sibling = Some(child);
            }
        }

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = old_last;
            child_node.next_sibling = None;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = Some(child);
            }
            parent_node.last_child = Some(child);
        }
    }

    /// Insert `child` into `parent`'s child list immediately before
    /// `reference`. With no reference this behaves like `append_child`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let reference = match reference {
            Some(r) => r,
            None => {
                self.append_child(parent, child);
                return;
            }
        };

        if self.get(child).and_then(|n| n.parent).is_some() {
            self.detach(child);
        }

        let prev_of_ref = self.get(reference).and_then(|n| n.prev_sibling);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = prev_of_ref;
            child_node.next_sibling = Some(reference);
        }

        if let Some(ref_node) = self.get_mut(reference) {
            ref_node.prev_sibling = Some(child);
        }

        if let Some(prev_id) = prev_of_ref {
            if let Some(prev_node) = self.get_mut(prev_id) {
                prev_node.next_sibling = Some(child);
            }
        } else if let Some(parent_node) = self.get_mut(parent) {
            parent_node.first_child = Some(child);
        }
    }

    /// Detach a node from its parent without deallocating it.
    pub fn detach(&mut self, node_id: NodeId) {
        let (parent_id, prev, next) = match self.get(node_id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.get_mut(prev_id) {
                prev_node.next_sibling = next;
            }
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.get_mut(next_id) {
                next_node.prev_sibling = prev;
            }
        }

        if let Some(pid) = parent_id {
            if let Some(parent_node) = self.get_mut(pid) {
                if parent_node.first_child == Some(node_id) {
                    parent_node.first_child = next;
                }
                if parent_node.last_child == Some(node_id) {
                    parent_node.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(node_id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Put `new` in `old`'s position and detach `old`. No-op if `old` has no
    /// parent.
    pub fn replace_child(&mut self, new: NodeId, old: NodeId) {
        let Some(parent) = self.parent(old) else {
            return;
        };
        self.insert_before(parent, new, Some(old));
        self.detach(old);
    }

    // --- Traversal ---

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    /// Immediate children of `parent` in document order.
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.get(parent).and_then(|n| n.first_child);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.get(id).and_then(|n| n.next_sibling);
        }
        out
    }

    /// Chain of ancestors from `node`'s direct parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.get(node).and_then(|n| n.parent);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.get(id).and_then(|n| n.parent);
        }
        out
    }

    /// All descendants of `node` in pre-order, not including `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node);
        stack.reverse();

        while let Some(id) = stack.pop() {
            out.push(id);
            let children = self.children(id);
            for &child in children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Concatenated text of every text node under `node`, in document order.
    /// A text node yields its own data.
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.get(node).and_then(Node::as_text) {
            return text.to_string();
        }
        let mut out = String::new();
        for id in self.descendants(node) {
            if let Some(text) = self.get(id).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    // --- Attributes ---

    /// Value of the named attribute, if `node` is an element that carries it.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)
            .and_then(Node::as_element)
            .and_then(|e| e.attrs.iter().find(|a| a.name == name))
            .map(|a| a.value.as_str())
    }

    /// Set (or overwrite) an attribute. Setting `class` refreshes the cached
    /// class list.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(elem) = self.get_mut(node).and_then(|n| match &mut n.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }) else {
            return;
        };

        match elem.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => elem.attrs.push(Attr {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }

        if name == "class" {
            elem.classes = value.split_whitespace().map(String::from).collect();
        }
    }

    // --- Class list ---

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .and_then(Node::as_element)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        if let Some(NodeData::Element(e)) = self.get_mut(node).map(|n| &mut n.data) {
            e.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(NodeData::Element(e)) = self.get_mut(node).map(|n| &mut n.data) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Add or remove `class` according to `on`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    // --- Inline style ---

    pub fn style_property(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)
            .and_then(Node::as_element)
            .and_then(|e| e.style.iter().find(|(n, _)| n == name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeData::Element(e)) = self.get_mut(node).map(|n| &mut n.data) {
            match e.style.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => e.style.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_style_property(&mut self, node: NodeId, name: &str) {
        if let Some(NodeData::Element(e)) = self.get_mut(node).map(|n| &mut n.data) {
            e.style.retain(|(n, _)| n != name);
        }
    }
}
