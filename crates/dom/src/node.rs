use serde::{Deserialize, Serialize};

use crate::style::CssDeclarations;

/// Handle into a [`DomTree`]. Copyable and stable for the life of the tree;
/// slots are never reused, so a stale id can only come from a different tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    DocumentFragment,
    DocumentType,
    Element,
    Text,
    Comment,
    ProcessingInstruction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

/// State of the contenteditable attribute on an element. Non-elements always
/// report `Inherit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEditable {
    True,
    False,
    Inherit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ElementData {
    tag: String,
    namespace: Namespace,
    attrs: Vec<Attr>,
    style: CssDeclarations,
}

impl ElementData {
    fn new(namespace: Namespace, tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            namespace,
            attrs: Vec::new(),
            style: CssDeclarations::default(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        if name == "style" {
            self.style = CssDeclarations::parse(value);
            let serialized = self.style.serialize();
            match self.attrs.iter_mut().find(|a| a.name == "style") {
                Some(attr) => attr.value = serialized,
                None => self.attrs.push(Attr {
                    name: "style".to_string(),
                    value: serialized,
                }),
            }
            return;
        }
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attr {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    fn remove_attr(&mut self, name: &str) {
        if name == "style" {
            self.style = CssDeclarations::default();
        }
        self.attrs.retain(|a| a.name != name);
    }

    /// Mirror the current declarations into the style attribute entry. A
    /// mutation through the declaration facade creates the attribute on
    /// demand but never removes it; removal is an explicit attribute-level
    /// operation, matching CSSOM behavior.
    fn sync_style_attr(&mut self) {
        let serialized = self.style.serialize();
        match self.attrs.iter_mut().find(|a| a.name == "style") {
            Some(attr) => attr.value = serialized,
            None => {
                if !self.style.is_empty() {
                    self.attrs.push(Attr {
                        name: "style".to_string(),
                        value: serialized,
                    });
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Payload {
    Document,
    DocumentFragment,
    DocumentType { name: String },
    Element(ElementData),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
}

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: Payload,
}

/// Arena-backed node tree. One document node is created as the root; all
/// other nodes start detached and join the tree through [`DomTree::insert`].
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<NodeData>,
    root: NodeId,
    design_mode: bool,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            design_mode: false,
        };
        tree.root = tree.alloc(Payload::Document);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn design_mode(&self) -> bool {
        self.design_mode
    }

    pub fn set_design_mode(&mut self, on: bool) {
        self.design_mode = on;
    }

    fn alloc(&mut self, payload: Payload) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            payload,
        });
        id
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    fn element(&self, id: NodeId) -> &ElementData {
        match &self.node(id).payload {
            Payload::Element(el) => el,
            other => panic!("node is not an element: {other:?}"),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> &mut ElementData {
        match &mut self.node_mut(id).payload {
            Payload::Element(el) => el,
            other => panic!("node is not an element: {other:?}"),
        }
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_ns(Namespace::Html, tag)
    }

    pub fn create_element_ns(&mut self, namespace: Namespace, tag: &str) -> NodeId {
        self.alloc(Payload::Element(ElementData::new(namespace, tag)))
    }

    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(Payload::Text(data.to_string()))
    }

    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(Payload::Comment(data.to_string()))
    }

    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.alloc(Payload::DocumentType {
            name: name.to_string(),
        })
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(Payload::DocumentFragment)
    }

    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> NodeId {
        self.alloc(Payload::ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        })
    }

    pub fn kind(&self, node: NodeId) -> NodeKind {
        match &self.node(node).payload {
            Payload::Document => NodeKind::Document,
            Payload::DocumentFragment => NodeKind::DocumentFragment,
            Payload::DocumentType { .. } => NodeKind::DocumentType,
            Payload::Element(_) => NodeKind::Element,
            Payload::Text(_) => NodeKind::Text,
            Payload::Comment(_) => NodeKind::Comment,
            Payload::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.kind(node) == NodeKind::Element
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.node(node).children.len()
    }

    pub fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.node(node).children.get(index).copied()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.first().copied()
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.last().copied()
    }

    /// Position of `node` among its parent's children, or `None` for a
    /// detached node.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.node(node).parent?;
        let index = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == node)
            .unwrap_or_else(|| panic!("node is not listed among its parent's children"));
        Some(index)
    }

    /// Attach a detached node under `parent` at `index`.
    ///
    /// Panics if `child` is attached, if `index` is out of bounds, or if the
    /// insertion would create a cycle.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        assert!(
            self.node(child).parent.is_none(),
            "child is already attached"
        );
        assert!(
            index <= self.node(parent).children.len(),
            "child index out of bounds"
        );
        let mut cursor = Some(parent);
        while let Some(n) = cursor {
            assert!(n != child, "insertion would create a cycle");
            cursor = self.node(n).parent;
        }
        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let index = self.node(parent).children.len();
        self.insert(parent, index, child);
    }

    /// Remove a node from its parent, keeping its subtree intact. No-op for
    /// detached nodes.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).parent else {
            return;
        };
        let index = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == node)
            .unwrap_or_else(|| panic!("node is not listed among its parent's children"));
        self.node_mut(parent).children.remove(index);
        self.node_mut(node).parent = None;
    }

    pub fn data(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).payload {
            Payload::Text(data) | Payload::Comment(data) => Some(data),
            Payload::ProcessingInstruction { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn set_data(&mut self, node: NodeId, new_data: &str) {
        match &mut self.node_mut(node).payload {
            Payload::Text(data) | Payload::Comment(data) => *data = new_data.to_string(),
            Payload::ProcessingInstruction { data, .. } => *data = new_data.to_string(),
            other => panic!("node has no character data: {other:?}"),
        }
    }

    pub fn pi_target(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).payload {
            Payload::ProcessingInstruction { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn doctype_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).payload {
            Payload::DocumentType { name } => Some(name),
            _ => None,
        }
    }

    /// Split a text node at `offset`, producing a new text node carrying the
    /// tail. The new node is inserted directly after the original when the
    /// original is attached. Range adjustment is the caller's concern.
    pub fn split_text(&mut self, node: NodeId, offset: usize) -> NodeId {
        let data = match &self.node(node).payload {
            Payload::Text(data) => data.clone(),
            other => panic!("split_text on a non-text node: {other:?}"),
        };
        assert!(offset <= data.len(), "split offset out of bounds");
        let tail = data[offset..].to_string();
        match &mut self.node_mut(node).payload {
            Payload::Text(data) => data.truncate(offset),
            _ => unreachable!(),
        }
        let new_node = self.alloc(Payload::Text(tail));
        if let Some(parent) = self.node(node).parent {
            let index = self
                .node(parent)
                .children
                .iter()
                .position(|&c| c == node)
                .unwrap_or_else(|| panic!("node is not listed among its parent's children"));
            self.insert(parent, index + 1, new_node);
        }
        new_node
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).payload {
            Payload::Element(el) => Some(&el.tag),
            _ => None,
        }
    }

    pub fn namespace(&self, node: NodeId) -> Option<Namespace> {
        match &self.node(node).payload {
            Payload::Element(el) => Some(el.namespace),
            _ => None,
        }
    }

    pub fn is_html_element(&self, node: NodeId) -> bool {
        matches!(
            &self.node(node).payload,
            Payload::Element(el) if el.namespace == Namespace::Html
        )
    }

    pub fn is_html_element_with_tag(&self, node: NodeId, tag: &str) -> bool {
        matches!(
            &self.node(node).payload,
            Payload::Element(el) if el.namespace == Namespace::Html && el.tag == tag
        )
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node).payload {
            Payload::Element(el) => el.attr(name),
            _ => None,
        }
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.element_mut(node).set_attr(name, value);
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if self.is_element(node) {
            self.element_mut(node).remove_attr(name);
        }
    }

    pub fn attr_count(&self, node: NodeId) -> usize {
        match &self.node(node).payload {
            Payload::Element(el) => el.attrs.len(),
            _ => 0,
        }
    }

    /// Attribute name/value pairs in document order, as an owned snapshot.
    pub fn attrs(&self, node: NodeId) -> Vec<(String, String)> {
        match &self.node(node).payload {
            Payload::Element(el) => el
                .attrs
                .iter()
                .map(|a| (a.name.clone(), a.value.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn style_value(&self, node: NodeId, property: &str) -> Option<String> {
        match &self.node(node).payload {
            Payload::Element(el) => el.style.get(property),
            _ => None,
        }
    }

    /// Set an inline style declaration. The empty string removes the
    /// declaration (and, for shorthands, its longhands) but leaves the style
    /// attribute in place; callers drop an emptied attribute explicitly.
    pub fn set_style_value(&mut self, node: NodeId, property: &str, value: &str) {
        let el = self.element_mut(node);
        el.style.set(property, value);
        el.sync_style_attr();
    }

    pub fn style_decl_count(&self, node: NodeId) -> usize {
        match &self.node(node).payload {
            Payload::Element(el) => el.style.len(),
            _ => 0,
        }
    }

    pub fn style_decl_names(&self, node: NodeId) -> Vec<String> {
        match &self.node(node).payload {
            Payload::Element(el) => el.style.names(),
            _ => Vec::new(),
        }
    }

    pub fn content_editable(&self, node: NodeId) -> ContentEditable {
        let Some(value) = self.attr(node, "contenteditable") else {
            return ContentEditable::Inherit;
        };
        if value.is_empty() || value.eq_ignore_ascii_case("true") {
            ContentEditable::True
        } else if value.eq_ignore_ascii_case("false") {
            ContentEditable::False
        } else {
            ContentEditable::Inherit
        }
    }
}

/// A (node, offset) pair. For text-like nodes the offset counts characters
/// of data; for everything else it counts child slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl Range {
    pub fn new(start_node: NodeId, start_offset: usize, end_node: NodeId, end_offset: usize) -> Self {
        Self {
            start: BoundaryPoint::new(start_node, start_offset),
            end: BoundaryPoint::new(end_node, end_offset),
        }
    }

    pub fn collapsed(node: NodeId, offset: usize) -> Self {
        Self::new(node, offset, node, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn set_start(&mut self, node: NodeId, offset: usize) {
        self.start = BoundaryPoint::new(node, offset);
    }

    pub fn set_end(&mut self, node: NodeId, offset: usize) {
        self.end = BoundaryPoint::new(node, offset);
    }
}
