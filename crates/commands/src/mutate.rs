use scribe_dom::{DomTree, NodeId, NodeKind, Range};

use crate::geometry::is_contained;
use crate::traverse::{is_ancestor, next_node, next_node_descendants, node_index};

/// Mutation context for one command invocation: the tree, the live range
/// being tracked through every structural edit, and the CSS styling flag.
///
/// Structural methods here mirror the DOM's range mutation rules; the
/// formatting algorithms layer the "preserving ranges" move on top.
pub struct EditContext<'a> {
    pub tree: &'a mut DomTree,
    pub range: Range,
    pub css_styling: bool,
    span_probes: Option<(NodeId, NodeId)>,
}

impl<'a> EditContext<'a> {
    pub fn new(tree: &'a mut DomTree, range: Range, css_styling: bool) -> Self {
        Self {
            tree,
            range,
            css_styling,
            span_probes: None,
        }
    }

    /// Detached span pair used to compare property values through computed
    /// style. Created lazily and reused across comparisons.
    pub fn span_probes(&mut self) -> (NodeId, NodeId) {
        if let Some(probes) = self.span_probes {
            return probes;
        }
        let a = self.tree.create_element("span");
        let b = self.tree.create_element("span");
        self.span_probes = Some((a, b));
        (a, b)
    }

    fn adjust_boundary_for_insert(
        boundary: &mut scribe_dom::BoundaryPoint,
        parent: NodeId,
        index: usize,
    ) {
        if boundary.node == parent && boundary.offset > index {
            boundary.offset += 1;
        }
    }

    /// Insert a detached node, applying the standard range mutation rule:
    /// boundaries in the parent past the insertion point shift right.
    pub fn insert_node(&mut self, parent: NodeId, index: usize, node: NodeId) {
        self.tree.insert(parent, index, node);
        Self::adjust_boundary_for_insert(&mut self.range.start, parent, index);
        Self::adjust_boundary_for_insert(&mut self.range.end, parent, index);
    }

    pub fn append_node(&mut self, parent: NodeId, node: NodeId) {
        let index = self.tree.child_count(parent);
        self.insert_node(parent, index, node);
    }

    /// Remove a node, applying the standard rules: boundaries inside the
    /// removed subtree collapse to the old position, later siblings shift
    /// left.
    pub fn remove_node(&mut self, node: NodeId) {
        let Some(parent) = self.tree.parent(node) else {
            return;
        };
        let index = node_index(self.tree, node);
        let fix = |boundary: &mut scribe_dom::BoundaryPoint, tree: &DomTree| {
            if is_ancestor(tree, node, boundary.node) {
                boundary.node = parent;
                boundary.offset = index;
            } else if boundary.node == parent && boundary.offset > index {
                boundary.offset -= 1;
            }
        };
        fix(&mut self.range.start, self.tree);
        fix(&mut self.range.end, self.tree);
        self.tree.detach(node);
    }

    /// splitText with the standard range fixups.
    pub fn split_text(&mut self, node: NodeId, offset: usize) -> NodeId {
        let parent = self.tree.parent(node);
        let index = parent.map(|_| node_index(self.tree, node));
        let new_node = self.tree.split_text(node, offset);
        let fix = |boundary: &mut scribe_dom::BoundaryPoint| {
            if boundary.node == node && boundary.offset > offset {
                boundary.node = new_node;
                boundary.offset -= offset;
            } else if let (Some(parent), Some(index)) = (parent, index) {
                if boundary.node == parent && boundary.offset > index {
                    boundary.offset += 1;
                }
            }
        };
        fix(&mut self.range.start);
        fix(&mut self.range.end);
        new_node
    }

    /// Move a node to a new location while keeping the tracked range over
    /// the same content. Boundaries inside the moved subtree travel with
    /// it; boundaries at the old or new parent are rewritten.
    pub fn move_preserving_ranges(&mut self, node: NodeId, new_parent: NodeId, new_index: usize) {
        let Some(old_parent) = self.tree.parent(node) else {
            panic!("cannot move a detached node");
        };
        let old_index = node_index(self.tree, node);

        let orig_start = self.range.start;
        let orig_end = self.range.end;
        let mut start = (orig_start.node, orig_start.offset as isize);
        let mut end = (orig_end.node, orig_end.offset as isize);
        let delta = new_index as isize - old_index as isize;

        // Boundaries inside node itself stay put and travel with the move.
        if orig_start.node == new_parent && orig_start.offset > new_index {
            start.1 += 1;
        }
        if orig_end.node == new_parent && orig_end.offset > new_index {
            end.1 += 1;
        }
        if orig_start.node == old_parent
            && (orig_start.offset == old_index || orig_start.offset == old_index + 1)
        {
            start.0 = new_parent;
            start.1 += delta;
        }
        if orig_end.node == old_parent
            && (orig_end.offset == old_index || orig_end.offset == old_index + 1)
        {
            end.0 = new_parent;
            end.1 += delta;
        }
        if orig_start.node == old_parent && orig_start.offset > old_index + 1 {
            start.1 -= 1;
        }
        if orig_end.node == old_parent && orig_end.offset > old_index + 1 {
            end.1 -= 1;
        }

        let reference = self.tree.child(new_parent, new_index);
        self.tree.detach(node);
        match reference {
            None => self.tree.append(new_parent, node),
            Some(reference) if reference == node => {
                self.tree.insert(new_parent, old_index, node);
            }
            Some(reference) => {
                let index = node_index(self.tree, reference);
                self.tree.insert(new_parent, index, node);
            }
        }

        self.range.set_start(start.0, start.1.max(0) as usize);
        self.range.set_end(end.0, end.1.max(0) as usize);
    }

    /// Swap an element's tag, keeping attributes, children, and ranges.
    /// Returns the replacement, or the element itself when nothing needs
    /// doing.
    pub fn set_tag_name(&mut self, element: NodeId, new_name: &str) -> NodeId {
        let new_name = new_name.to_ascii_lowercase();
        if self.tree.is_html_element_with_tag(element, &new_name) {
            return element;
        }
        let Some(parent) = self.tree.parent(element) else {
            return element;
        };
        let replacement = self.tree.create_element(&new_name);
        let index = node_index(self.tree, element);
        self.insert_node(parent, index, replacement);
        for (name, value) in self.tree.attrs(element) {
            self.tree.set_attr(replacement, &name, &value);
        }
        while let Some(child) = self.tree.first_child(element) {
            let end = self.tree.child_count(replacement);
            self.move_preserving_ranges(child, replacement, end);
        }
        self.remove_node(element);
        replacement
    }

    /// Replace a node with its children, preserving ranges. Returns the
    /// children.
    pub fn remove_preserving_descendants(&mut self, node: NodeId) -> Vec<NodeId> {
        let children = self.tree.children(node).to_vec();
        if self.tree.parent(node).is_none() {
            for &child in &children {
                self.remove_node(child);
            }
            return children;
        }
        while let Some(child) = self.tree.first_child(node) {
            let Some(parent) = self.tree.parent(node) else {
                break;
            };
            let index = node_index(self.tree, node);
            self.move_preserving_ranges(child, parent, index);
        }
        self.remove_node(node);
        children
    }

    /// Remove every node in the range and collapse it where the content
    /// was, following the DOM Range deleteContents algorithm.
    pub fn delete_contents(&mut self) {
        if self.range.is_collapsed() {
            return;
        }
        let start = self.range.start;
        let end = self.range.end;
        let char_data = |tree: &DomTree, node: NodeId| {
            matches!(
                tree.kind(node),
                NodeKind::Text | NodeKind::Comment | NodeKind::ProcessingInstruction
            )
        };

        // Character data within a single node is a plain data edit.
        if start.node == end.node && char_data(self.tree, start.node) {
            let data = self.tree.data(start.node).unwrap_or_default().to_string();
            let mut new_data = String::with_capacity(data.len());
            new_data.push_str(&data[..start.offset.min(data.len())]);
            new_data.push_str(&data[end.offset.min(data.len())..]);
            self.tree.set_data(start.node, &new_data);
            self.range = Range::collapsed(start.node, start.offset);
            return;
        }

        let nodes_to_remove = self.contained_nodes_for_deletion();

        // Where the range ends up: the start itself if it contains the end,
        // otherwise just after the last ancestor of the start that does not
        // contain the end.
        let (new_node, new_offset) = if is_ancestor(self.tree, start.node, end.node) {
            (start.node, start.offset)
        } else {
            let mut reference = start.node;
            while let Some(parent) = self.tree.parent(reference) {
                if is_ancestor(self.tree, parent, end.node) {
                    break;
                }
                reference = parent;
            }
            match self.tree.parent(reference) {
                Some(parent) => (parent, node_index(self.tree, reference) + 1),
                None => (start.node, start.offset),
            }
        };

        if char_data(self.tree, start.node) {
            let data = self.tree.data(start.node).unwrap_or_default().to_string();
            self.tree
                .set_data(start.node, &data[..start.offset.min(data.len())]);
        }
        for node in nodes_to_remove {
            self.remove_node(node);
        }
        if char_data(self.tree, end.node) {
            let data = self.tree.data(end.node).unwrap_or_default().to_string();
            self.tree
                .set_data(end.node, &data[end.offset.min(data.len())..]);
        }

        self.range = Range::collapsed(new_node, new_offset);
    }

    fn contained_nodes_for_deletion(&self) -> Vec<NodeId> {
        let range = self.range;
        let stop = next_node_descendants(self.tree, range.end.node);
        let mut out = Vec::new();
        let mut node = Some(range.start.node);
        while let Some(n) = node {
            if stop == Some(n) {
                break;
            }
            if is_contained(self.tree, n, &range)
                && !self
                    .tree
                    .parent(n)
                    .is_some_and(|parent| is_contained(self.tree, parent, &range))
            {
                out.push(n);
            }
            node = next_node(self.tree, n);
        }
        out
    }
}
