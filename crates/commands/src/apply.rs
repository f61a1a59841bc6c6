use scribe_dom::{decoration_with, decoration_without, parse_simple_color, DomTree, NodeId, NodeKind};

use crate::classify::{
    is_editable, is_modifiable_element, is_simple_modifiable_element, is_unwrappable_node,
};
use crate::command::{Command, FONT_SIZE_SCALE};
use crate::mutate::EditContext;
use crate::traverse::{next_sibling, node_index, previous_sibling};
use crate::values::{effective_value, specified_value, values_equal};

pub(crate) fn remove_style_attr_if_empty(tree: &mut DomTree, element: NodeId) {
    if tree.attr(element, "style").is_some_and(str::is_empty) {
        tree.remove_attr(element, "style");
    }
}

pub(crate) fn unwrap_children(ctx: &mut EditContext, element: NodeId) {
    while let Some(child) = ctx.tree.first_child(element) {
        let Some(parent) = ctx.tree.parent(element) else {
            break;
        };
        let index = node_index(ctx.tree, element);
        ctx.move_preserving_ranges(child, parent, index);
    }
}

/// Strip everything `element` contributes to the command's value. Returns
/// the nodes that now sit where the element's influence used to be: its
/// children if the element was dissolved, a replacement span if the element
/// carried attributes that had to survive, or nothing.
pub fn clear_value(ctx: &mut EditContext, element: NodeId, command: Command) -> Vec<NodeId> {
    if specified_value(ctx.tree, element, command).is_none() {
        return Vec::new();
    }

    if is_simple_modifiable_element(ctx.tree, element) {
        let children = ctx.tree.children(element).to_vec();
        unwrap_children(ctx, element);
        ctx.remove_node(element);
        return children;
    }

    if command == Command::Strikethrough {
        if let Some(decoration) = ctx.tree.style_value(element, "text-decoration") {
            if decoration.contains("line-through") {
                let stripped = decoration_without(&decoration, "line-through");
                ctx.tree
                    .set_style_value(element, "text-decoration", &stripped);
                remove_style_attr_if_empty(ctx.tree, element);
            }
        }
    }

    if command == Command::Underline {
        if let Some(decoration) = ctx.tree.style_value(element, "text-decoration") {
            if decoration.contains("underline") {
                let stripped = decoration_without(&decoration, "underline");
                ctx.tree
                    .set_style_value(element, "text-decoration", &stripped);
                remove_style_attr_if_empty(ctx.tree, element);
            }
        }
    }

    if let Some(property) = command.relevant_css_property() {
        ctx.tree.set_style_value(element, property, "");
        remove_style_attr_if_empty(ctx.tree, element);
    }

    if ctx.tree.is_html_element_with_tag(element, "font") {
        match command {
            Command::ForeColor => ctx.tree.remove_attr(element, "color"),
            Command::FontName => ctx.tree.remove_attr(element, "face"),
            Command::FontSize => ctx.tree.remove_attr(element, "size"),
            _ => {}
        }
    }

    if ctx.tree.is_html_element_with_tag(element, "a")
        && matches!(command, Command::CreateLink | Command::Unlink)
    {
        ctx.tree.remove_attr(element, "href");
    }

    if specified_value(ctx.tree, element, command).is_none() {
        return Vec::new();
    }

    // The element still specifies a value through its tag alone, so swap it
    // for a span carrying the same attributes.
    let span = ctx.tree.create_element("span");
    for (name, value) in ctx.tree.attrs(element) {
        ctx.tree.set_attr(span, &name, &value);
    }
    let Some(parent) = ctx.tree.parent(element) else {
        panic!("cannot clear formatting on a detached element");
    };
    let index = node_index(ctx.tree, element);
    ctx.insert_node(parent, index, span);
    while let Some(child) = ctx.tree.first_child(element) {
        let end = ctx.tree.child_count(span);
        ctx.move_preserving_ranges(child, span, end);
    }
    ctx.remove_node(element);
    vec![span]
}

/// Reconcile the ancestors of `node` with the new value: every ancestor
/// whose effective value disagrees is cleared, and the value it used to
/// impose is re-applied to the siblings of `node` along the way so only
/// `node` itself ends up changed.
pub fn push_down_values(
    ctx: &mut EditContext,
    node: NodeId,
    command: Command,
    new_value: Option<&str>,
) {
    let Some(parent) = ctx.tree.parent(node) else {
        return;
    };
    if ctx.tree.kind(parent) != NodeKind::Element {
        return;
    }

    let effective = effective_value(ctx.tree, node, command);
    if values_equal(ctx, command, effective.as_deref(), new_value) {
        return;
    }

    let mut ancestor_list: Vec<NodeId> = Vec::new();
    let mut current = parent;
    loop {
        if !is_editable(ctx.tree, current) || ctx.tree.kind(current) != NodeKind::Element {
            break;
        }
        let effective = effective_value(ctx.tree, current, command);
        if values_equal(ctx, command, effective.as_deref(), new_value) {
            break;
        }
        ancestor_list.push(current);
        let Some(next) = ctx.tree.parent(current) else {
            break;
        };
        current = next;
    }

    let Some(&outermost) = ancestor_list.last() else {
        return;
    };
    let mut propagated = specified_value(ctx.tree, outermost, command);
    if propagated.is_none() && new_value.is_some() {
        return;
    }
    if new_value.is_some() {
        let above = ctx.tree.parent(outermost);
        if !above.is_some_and(|n| ctx.tree.kind(n) == NodeKind::Element) {
            return;
        }
    }

    while let Some(current) = ancestor_list.pop() {
        if let Some(specified) = specified_value(ctx.tree, current, command) {
            propagated = Some(specified);
        }
        let children = ctx.tree.children(current).to_vec();
        if specified_value(ctx.tree, current, command).is_some() {
            clear_value(ctx, current, command);
        }
        for child in children {
            if child == node {
                continue;
            }
            if ctx.tree.kind(child) == NodeKind::Element {
                if let Some(specified) = specified_value(ctx.tree, child, command) {
                    if !values_equal(ctx, command, propagated.as_deref(), Some(&specified)) {
                        continue;
                    }
                }
            }
            if ancestor_list.last() == Some(&child) {
                continue;
            }
            force_value(ctx, child, command, propagated.as_deref());
        }
    }
}

fn filtered_children(
    ctx: &mut EditContext,
    node: NodeId,
    command: Command,
    new_value: &str,
) -> Vec<NodeId> {
    let children = ctx.tree.children(node).to_vec();
    let mut kept = Vec::with_capacity(children.len());
    for child in children {
        if ctx.tree.kind(child) == NodeKind::Element {
            if let Some(specified) = specified_value(ctx.tree, child, command) {
                if !values_equal(ctx, command, Some(new_value), Some(&specified)) {
                    continue;
                }
            }
        }
        kept.push(child);
    }
    kept
}

fn is_matching_wrapper(
    ctx: &mut EditContext,
    candidate: NodeId,
    command: Command,
    new_value: &str,
) -> bool {
    if !is_simple_modifiable_element(ctx.tree, candidate) {
        return false;
    }
    let specified = specified_value(ctx.tree, candidate, command);
    if !values_equal(ctx, command, specified.as_deref(), Some(new_value)) {
        return false;
    }
    let effective = effective_value(ctx.tree, candidate, command);
    values_equal(ctx, command, effective.as_deref(), Some(new_value))
}

/// Walk down through single-child chains of modifiable elements looking for
/// a wrapper that already carries the wanted value.
fn descend_to_wrapper(
    ctx: &mut EditContext,
    start: Option<NodeId>,
    command: Command,
    new_value: &str,
) -> Option<NodeId> {
    let mut candidate = start?;
    loop {
        if !is_modifiable_element(ctx.tree, candidate) || ctx.tree.child_count(candidate) != 1 {
            break;
        }
        let child = ctx.tree.first_child(candidate)?;
        if !is_modifiable_element(ctx.tree, child) {
            break;
        }
        let specified = specified_value(ctx.tree, candidate, command);
        if is_simple_modifiable_element(ctx.tree, candidate)
            && values_equal(ctx, command, specified.as_deref(), Some(new_value))
        {
            break;
        }
        candidate = child;
    }
    Some(candidate)
}

/// If a matching wrapper is buried inside the given sibling of `node`, pull
/// it up so that it wraps the whole sibling and sits adjacent to `node`,
/// ready to be merged with.
fn merge_buried_wrapper(
    ctx: &mut EditContext,
    node: NodeId,
    sibling: Option<NodeId>,
    command: Command,
    new_value: &str,
) {
    let Some(candidate) = descend_to_wrapper(ctx, sibling, command, new_value) else {
        return;
    };
    if sibling == Some(candidate) || !is_matching_wrapper(ctx, candidate, command, new_value) {
        return;
    }
    unwrap_children(ctx, candidate);
    let (Some(parent), Some(reference)) = (ctx.tree.parent(node), sibling) else {
        return;
    };
    ctx.remove_node(candidate);
    let index = node_index(ctx.tree, reference);
    ctx.insert_node(parent, index, candidate);
    if let Some(next) = next_sibling(ctx.tree, candidate) {
        let end = ctx.tree.child_count(candidate);
        ctx.move_preserving_ranges(next, candidate, end);
    }
}

/// Make `node` render with the new value, reusing an adjacent wrapper when
/// one matches and synthesizing a new wrapper element otherwise.
pub fn force_value(ctx: &mut EditContext, node: NodeId, command: Command, new_value: Option<&str>) {
    if ctx.tree.parent(node).is_none() {
        return;
    }
    let Some(new_value) = new_value else {
        return;
    };

    let mergeable = matches!(
        ctx.tree.kind(node),
        NodeKind::Element | NodeKind::Text | NodeKind::Comment | NodeKind::ProcessingInstruction
    ) && !is_unwrappable_node(ctx.tree, node);

    if mergeable {
        let prev = previous_sibling(ctx.tree, node);
        merge_buried_wrapper(ctx, node, prev, command, new_value);
        let next = next_sibling(ctx.tree, node);
        merge_buried_wrapper(ctx, node, next, command, new_value);

        let prev = previous_sibling(ctx.tree, node);
        let next = next_sibling(ctx.tree, node);

        if let Some(prev_node) = prev {
            if is_matching_wrapper(ctx, prev_node, command, new_value) {
                let end = ctx.tree.child_count(prev_node);
                ctx.move_preserving_ranges(node, prev_node, end);
            }
        }
        if let Some(next_node) = next {
            if is_matching_wrapper(ctx, next_node, command, new_value) {
                if ctx.tree.parent(node) != prev {
                    ctx.move_preserving_ranges(node, next_node, 0);
                } else if let Some(prev_node) = prev {
                    while let Some(child) = ctx.tree.first_child(next_node) {
                        let end = ctx.tree.child_count(prev_node);
                        ctx.move_preserving_ranges(child, prev_node, end);
                    }
                    ctx.remove_node(next_node);
                }
            }
        }
    }

    let effective = effective_value(ctx.tree, node, command);
    if values_equal(ctx, command, effective.as_deref(), Some(new_value)) {
        return;
    }

    if is_unwrappable_node(ctx.tree, node) {
        for child in filtered_children(ctx, node, command, new_value) {
            force_value(ctx, child, command, Some(new_value));
        }
        return;
    }

    if matches!(
        ctx.tree.kind(node),
        NodeKind::Comment | NodeKind::ProcessingInstruction
    ) {
        return;
    }

    let mut new_parent = None;
    if !ctx.css_styling {
        new_parent = match command {
            Command::Bold if new_value == "bold" || new_value == "700" => {
                Some(ctx.tree.create_element("b"))
            }
            Command::Italic if new_value == "italic" => Some(ctx.tree.create_element("i")),
            Command::Strikethrough if new_value == "line-through" => {
                Some(ctx.tree.create_element("s"))
            }
            Command::Underline if new_value == "underline" => Some(ctx.tree.create_element("u")),
            Command::ForeColor => parse_simple_color(new_value).map(|color| {
                let font = ctx.tree.create_element("font");
                ctx.tree.set_attr(font, "color", &color);
                font
            }),
            Command::FontName => {
                let font = ctx.tree.create_element("font");
                ctx.tree.set_attr(font, "face", new_value);
                Some(font)
            }
            _ => None,
        };
    }
    if matches!(command, Command::CreateLink | Command::Unlink) {
        let anchor = ctx.tree.create_element("a");
        ctx.tree.set_attr(anchor, "href", new_value);
        new_parent = Some(anchor);
    }
    if command == Command::FontSize && (!ctx.css_styling || new_value == "xxx-large") {
        if let Some(position) = FONT_SIZE_SCALE.iter().position(|&k| k == new_value) {
            let font = ctx.tree.create_element("font");
            ctx.tree.set_attr(font, "size", &(position + 1).to_string());
            new_parent = Some(font);
        }
    }
    if matches!(command, Command::Subscript | Command::Superscript) {
        if new_value == "sub" {
            new_parent = Some(ctx.tree.create_element("sub"));
        } else if new_value == "super" {
            new_parent = Some(ctx.tree.create_element("sup"));
        }
    }
    let new_parent = match new_parent {
        Some(element) => element,
        None => ctx.tree.create_element("span"),
    };

    let Some(parent) = ctx.tree.parent(node) else {
        return;
    };
    let index = node_index(ctx.tree, node);
    ctx.insert_node(parent, index, new_parent);

    let property = command.relevant_css_property();
    if let Some(property) = property {
        let effective = effective_value(ctx.tree, new_parent, command);
        if !values_equal(ctx, command, effective.as_deref(), Some(new_value)) {
            ctx.tree.set_style_value(new_parent, property, new_value);
        }
    }
    if command == Command::Strikethrough
        && new_value == "line-through"
        && effective_value(ctx.tree, new_parent, command).as_deref() != Some("line-through")
    {
        ctx.tree
            .set_style_value(new_parent, "text-decoration", "line-through");
    }
    if command == Command::Underline
        && new_value == "underline"
        && effective_value(ctx.tree, new_parent, command).as_deref() != Some("underline")
    {
        ctx.tree
            .set_style_value(new_parent, "text-decoration", "underline");
    }

    let end = ctx.tree.child_count(new_parent);
    ctx.move_preserving_ranges(node, new_parent, end);

    if ctx.tree.kind(node) == NodeKind::Element {
        let effective = effective_value(ctx.tree, node, command);
        if !values_equal(ctx, command, effective.as_deref(), Some(new_value)) {
            // The wrapper was not enough. Unwind it and either style the
            // element inline or push the value into its children.
            let Some(grandparent) = ctx.tree.parent(new_parent) else {
                return;
            };
            let wrapper_index = node_index(ctx.tree, new_parent);
            let was_span = ctx.tree.is_html_element_with_tag(new_parent, "span");
            ctx.move_preserving_ranges(node, grandparent, wrapper_index);
            ctx.remove_node(new_parent);

            let style_inline = was_span
                && (matches!(command, Command::Underline | Command::Strikethrough)
                    || (command == Command::FontSize && new_value != "xxx-large")
                    || (command != Command::FontSize && property.is_some()));
            if style_inline {
                if let Some(property) = property {
                    ctx.tree.set_style_value(node, property, new_value);
                }
                if command == Command::Strikethrough && new_value == "line-through" {
                    let current = ctx
                        .tree
                        .style_value(node, "text-decoration")
                        .unwrap_or_default();
                    let updated = decoration_with(&current, "line-through");
                    ctx.tree.set_style_value(node, "text-decoration", &updated);
                }
                if command == Command::Underline && new_value == "underline" {
                    let current = ctx
                        .tree
                        .style_value(node, "text-decoration")
                        .unwrap_or_default();
                    let updated = decoration_with(&current, "underline");
                    ctx.tree.set_style_value(node, "text-decoration", &updated);
                }
            } else {
                for child in filtered_children(ctx, node, command, new_value) {
                    force_value(ctx, child, command, Some(new_value));
                }
            }
        }
    }
}

/// Set the command's value across `node` and everything below it: clear the
/// node's own contribution, push conflicting ancestor values down, force
/// the new value on, then recurse.
pub fn set_node_value(
    ctx: &mut EditContext,
    node: NodeId,
    command: Command,
    new_value: Option<&str>,
) {
    match ctx.tree.kind(node) {
        NodeKind::Document => {
            let children = ctx.tree.children(node).to_vec();
            for child in children {
                if ctx.tree.kind(child) == NodeKind::Element {
                    set_node_value(ctx, child, command, new_value);
                    break;
                }
            }
            return;
        }
        NodeKind::DocumentFragment => {
            let children = ctx.tree.children(node).to_vec();
            for child in children {
                set_node_value(ctx, child, command, new_value);
            }
            return;
        }
        _ => {}
    }

    if ctx.tree.parent(node).is_none() || ctx.tree.kind(node) == NodeKind::DocumentType {
        return;
    }

    if !is_editable(ctx.tree, node) {
        let children = ctx.tree.children(node).to_vec();
        for child in children {
            set_node_value(ctx, child, command, new_value);
        }
        return;
    }

    if ctx.tree.kind(node) == NodeKind::Element {
        let new_nodes = clear_value(ctx, node, command);
        for new_node in new_nodes {
            set_node_value(ctx, new_node, command, new_value);
        }
        if ctx.tree.parent(node).is_none() {
            return;
        }
    }

    push_down_values(ctx, node, command, new_value);
    force_value(ctx, node, command, new_value);

    let children = ctx.tree.children(node).to_vec();
    for child in children {
        set_node_value(ctx, child, command, new_value);
    }
}
