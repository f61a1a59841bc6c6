use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{Attr, DomTree, Namespace, NodeId, NodeKind};

const DEFAULT_SCHEMA: &str = "scribe-dom";
const DEFAULT_VERSION: u32 = 1;

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_version() -> u32 {
    DEFAULT_VERSION
}

/// A serializable snapshot of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeValue {
    Document {
        #[serde(default)]
        children: Vec<NodeValue>,
    },
    DocumentFragment {
        #[serde(default)]
        children: Vec<NodeValue>,
    },
    DocumentType {
        name: String,
    },
    Element {
        tag: String,
        #[serde(default)]
        namespace: Namespace,
        #[serde(default)]
        attrs: Vec<Attr>,
        #[serde(default)]
        children: Vec<NodeValue>,
    },
    Text {
        data: String,
    },
    Comment {
        data: String,
    },
    ProcessingInstruction {
        target: String,
        data: String,
    },
}

fn value_children(value: &NodeValue) -> &[NodeValue] {
    match value {
        NodeValue::Document { children }
        | NodeValue::DocumentFragment { children }
        | NodeValue::Element { children, .. } => children,
        _ => &[],
    }
}

impl DomTree {
    pub fn to_value(&self, node: NodeId) -> NodeValue {
        let children: Vec<NodeValue> = self
            .children(node)
            .iter()
            .map(|&child| self.to_value(child))
            .collect();
        match self.kind(node) {
            NodeKind::Document => NodeValue::Document { children },
            NodeKind::DocumentFragment => NodeValue::DocumentFragment { children },
            NodeKind::DocumentType => NodeValue::DocumentType {
                name: self.doctype_name(node).unwrap_or_default().to_string(),
            },
            NodeKind::Element => NodeValue::Element {
                tag: self.tag(node).unwrap_or_default().to_string(),
                namespace: self.namespace(node).unwrap_or_default(),
                attrs: self
                    .attrs(node)
                    .into_iter()
                    .map(|(name, value)| Attr { name, value })
                    .collect(),
                children,
            },
            NodeKind::Text => NodeValue::Text {
                data: self.data(node).unwrap_or_default().to_string(),
            },
            NodeKind::Comment => NodeValue::Comment {
                data: self.data(node).unwrap_or_default().to_string(),
            },
            NodeKind::ProcessingInstruction => NodeValue::ProcessingInstruction {
                target: self.pi_target(node).unwrap_or_default().to_string(),
                data: self.data(node).unwrap_or_default().to_string(),
            },
        }
    }

    /// Materialize a snapshot under `parent` and return the new node.
    ///
    /// Panics when handed a document snapshot; documents only appear at the
    /// root and go through [`DomTree::from_value`].
    pub fn append_value(&mut self, parent: NodeId, value: &NodeValue) -> NodeId {
        let node = match value {
            NodeValue::Document { .. } => panic!("document snapshots cannot be appended"),
            NodeValue::DocumentFragment { .. } => self.create_fragment(),
            NodeValue::DocumentType { name } => self.create_doctype(name),
            NodeValue::Element {
                tag,
                namespace,
                attrs,
                ..
            } => {
                let element = self.create_element_ns(*namespace, tag);
                for attr in attrs {
                    self.set_attr(element, &attr.name, &attr.value);
                }
                element
            }
            NodeValue::Text { data } => self.create_text(data),
            NodeValue::Comment { data } => self.create_comment(data),
            NodeValue::ProcessingInstruction { target, data } => {
                self.create_processing_instruction(target, data)
            }
        };
        self.append(parent, node);
        for child in value_children(value) {
            self.append_value(node, child);
        }
        node
    }

    pub fn from_value(value: &NodeValue) -> DomTree {
        let mut tree = DomTree::new();
        let root = tree.root();
        match value {
            NodeValue::Document { children } => {
                for child in children {
                    tree.append_value(root, child);
                }
            }
            other => {
                tree.append_value(root, other);
            }
        }
        tree
    }
}

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("unsupported schema {0:?}")]
    UnsupportedSchema(String),
    #[error("unsupported version {0}")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomValue {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_version")]
    pub version: u32,
    pub document: NodeValue,
}

impl DomValue {
    pub fn from_document(document: NodeValue) -> Self {
        Self {
            schema: default_schema(),
            version: default_version(),
            document,
        }
    }

    pub fn into_document(self) -> NodeValue {
        self.document
    }

    pub fn capture(tree: &DomTree) -> Self {
        Self::from_document(tree.to_value(tree.root()))
    }

    pub fn instantiate(&self) -> DomTree {
        DomTree::from_value(&self.document)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ValueError> {
        let value: Self = serde_json::from_str(s)?;
        if value.schema != DEFAULT_SCHEMA {
            return Err(ValueError::UnsupportedSchema(value.schema));
        }
        if value.version != DEFAULT_VERSION {
            return Err(ValueError::UnsupportedVersion(value.version));
        }
        Ok(value)
    }
}
