use crate::node::{DomTree, NodeId, NodeKind};

/// HTML void elements, which serialize without an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn escape_text(out: &mut String, data: &str) {
    for c in data.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(out: &mut String, data: &str) {
    for c in data.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl DomTree {
    /// Serialize a node and its subtree to HTML-like markup. Attributes keep
    /// their stored order; text and attribute values are minimally escaped.
    pub fn outer_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(&mut out, node);
        out
    }

    /// Serialize only the children of a node, like innerHTML.
    pub fn inner_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        for i in 0..self.child_count(node) {
            if let Some(child) = self.child(node, i) {
                self.write_markup(&mut out, child);
            }
        }
        out
    }

    fn write_markup(&self, out: &mut String, node: NodeId) {
        match self.kind(node) {
            NodeKind::Text => escape_text(out, self.data(node).unwrap_or_default()),
            NodeKind::Comment => {
                out.push_str("<!--");
                out.push_str(self.data(node).unwrap_or_default());
                out.push_str("-->");
            }
            NodeKind::ProcessingInstruction => {
                out.push_str("<?");
                out.push_str(self.pi_target(node).unwrap_or_default());
                out.push(' ');
                out.push_str(self.data(node).unwrap_or_default());
                out.push_str("?>");
            }
            NodeKind::DocumentType => {
                out.push_str("<!DOCTYPE ");
                out.push_str(self.doctype_name(node).unwrap_or_default());
                out.push('>');
            }
            NodeKind::Document | NodeKind::DocumentFragment => {
                for i in 0..self.child_count(node) {
                    if let Some(child) = self.child(node, i) {
                        self.write_markup(out, child);
                    }
                }
            }
            NodeKind::Element => {
                let tag = self.tag(node).unwrap_or_default();
                out.push('<');
                out.push_str(tag);
                for (name, value) in self.attrs(node) {
                    out.push(' ');
                    out.push_str(&name);
                    out.push_str("=\"");
                    escape_attr(out, &value);
                    out.push('"');
                }
                out.push('>');
                if self.is_html_element(node) && VOID_ELEMENTS.contains(&tag) {
                    return;
                }
                for i in 0..self.child_count(node) {
                    if let Some(child) = self.child(node, i) {
                        self.write_markup(out, child);
                    }
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
