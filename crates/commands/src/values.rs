use scribe_dom::{decoration_contains, legacy_font_size_keyword, DomTree, NodeId, NodeKind};

use crate::command::Command;
use crate::mutate::EditContext;

/// The value an element itself sets for a command, through inline style,
/// presentational attributes, or its tag.
pub fn specified_value(tree: &DomTree, element: NodeId, command: Command) -> Option<String> {
    if command == Command::HiliteColor && tree.computed_style(element, "display") != "inline" {
        return None;
    }

    if matches!(command, Command::CreateLink | Command::Unlink) {
        if tree.is_html_element_with_tag(element, "a") && tree.has_attr(element, "href") {
            return tree.attr(element, "href").map(str::to_string);
        }
        return None;
    }

    if matches!(command, Command::Subscript | Command::Superscript) {
        let display = tree.computed_style(element, "display");
        if !matches!(display.as_str(), "inline" | "inline-block" | "inline-table") {
            return None;
        }
        if let Some(value) = tree.style_value(element, "vertical-align") {
            return Some(value);
        }
        if tree.is_html_element_with_tag(element, "sup") {
            return Some("super".to_string());
        }
        if tree.is_html_element_with_tag(element, "sub") {
            return Some("sub".to_string());
        }
        return None;
    }

    if command == Command::Strikethrough {
        if let Some(decoration) = tree.style_value(element, "text-decoration") {
            if decoration_contains(&decoration, "line-through") {
                return Some("line-through".to_string());
            }
            return None;
        }
        if tree.is_html_element_with_tag(element, "s")
            || tree.is_html_element_with_tag(element, "strike")
        {
            return Some("line-through".to_string());
        }
        return None;
    }

    if command == Command::Underline {
        if let Some(decoration) = tree.style_value(element, "text-decoration") {
            if decoration_contains(&decoration, "underline") {
                return Some("underline".to_string());
            }
            return None;
        }
        if tree.is_html_element_with_tag(element, "u") {
            return Some("underline".to_string());
        }
        return None;
    }

    let property = command.relevant_css_property()?;

    if let Some(value) = tree.style_value(element, property) {
        return Some(value);
    }

    if tree.is_html_element_with_tag(element, "font") {
        if property == "color" {
            if let Some(color) = tree.attr(element, "color") {
                return Some(color.to_string());
            }
        }
        if property == "font-family" {
            if let Some(face) = tree.attr(element, "face") {
                return Some(face.to_string());
            }
        }
        if property == "font-size" {
            if let Some(size) = tree.attr(element, "size") {
                if let Some(keyword) = legacy_font_size_keyword(size) {
                    return Some(keyword.to_string());
                }
            }
        }
    }

    if property == "font-weight"
        && (tree.is_html_element_with_tag(element, "b")
            || tree.is_html_element_with_tag(element, "strong"))
    {
        return Some("bold".to_string());
    }
    if property == "font-style"
        && (tree.is_html_element_with_tag(element, "i")
            || tree.is_html_element_with_tag(element, "em"))
    {
        return Some("italic".to_string());
    }

    None
}

/// The value a node actually renders with for a command, taking ancestors
/// into account.
pub fn effective_value(tree: &DomTree, node: NodeId, command: Command) -> Option<String> {
    if tree.kind(node) != NodeKind::Element {
        let parent = tree.parent(node)?;
        if tree.kind(parent) != NodeKind::Element {
            return None;
        }
        return effective_value(tree, parent, command);
    }

    if matches!(command, Command::CreateLink | Command::Unlink) {
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if tree.is_html_element_with_tag(n, "a") && tree.has_attr(n, "href") {
                return tree.attr(n, "href").map(str::to_string);
            }
            cursor = tree.parent(n);
        }
        return None;
    }

    if command == Command::HiliteColor {
        let transparent = |n: NodeId| {
            let color = tree.computed_style(n, "background-color");
            color == "rgba(0, 0, 0, 0)" || color.is_empty() || color == "transparent"
        };
        let mut cursor = node;
        while transparent(cursor) {
            match tree.parent(cursor) {
                Some(parent) if tree.kind(parent) == NodeKind::Element => cursor = parent,
                _ => break,
            }
        }
        if transparent(cursor) {
            return Some("rgb(255, 255, 255)".to_string());
        }
        return Some(tree.computed_style(cursor, "background-color"));
    }

    if matches!(command, Command::Subscript | Command::Superscript) {
        let mut affected_by_sub = false;
        let mut affected_by_super = false;
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if tree.kind(n) != NodeKind::Element || tree.computed_style(n, "display") != "inline" {
                break;
            }
            match tree.computed_style(n, "vertical-align").as_str() {
                "sub" => affected_by_sub = true,
                "super" => affected_by_super = true,
                "baseline" => {}
                _ => return Some("mixed".to_string()),
            }
            cursor = tree.parent(n);
        }
        if affected_by_sub && affected_by_super {
            return Some("mixed".to_string());
        }
        if affected_by_sub {
            return Some("sub".to_string());
        }
        if affected_by_super {
            return Some("super".to_string());
        }
        return Some("baseline".to_string());
    }

    if matches!(command, Command::Strikethrough | Command::Underline) {
        let token = if command == Command::Strikethrough {
            "line-through"
        } else {
            "underline"
        };
        let mut cursor = node;
        loop {
            if decoration_contains(&tree.computed_style(cursor, "text-decoration"), token) {
                return Some(token.to_string());
            }
            match tree.parent(cursor) {
                Some(parent) if tree.kind(parent) == NodeKind::Element => cursor = parent,
                _ => return None,
            }
        }
    }

    let property = command.relevant_css_property()?;
    Some(tree.computed_style(node, property))
}

/// Whether two command values are interchangeable. Values compare through a
/// probe element's computed style so that equivalent spellings of the same
/// value ("bold"/"700", "red"/"#ff0000", "x-large"/"24px") collapse.
/// Decoration, alignment, and link commands compare literally.
pub fn values_equal(
    ctx: &mut EditContext,
    command: Command,
    val1: Option<&str>,
    val2: Option<&str>,
) -> bool {
    let (Some(v1), Some(v2)) = (val1, val2) else {
        return val1.is_none() && val2.is_none();
    };

    match command {
        Command::Subscript
        | Command::Superscript
        | Command::Strikethrough
        | Command::Underline
        | Command::CreateLink
        | Command::Unlink => v1 == v2,
        Command::Bold => {
            let l1 = v1.to_ascii_lowercase();
            let l2 = v2.to_ascii_lowercase();
            v1 == v2
                || (l1 == "bold" && v2 == "700")
                || (l2 == "bold" && v1 == "700")
                || (l1 == "normal" && v2 == "400")
                || (l2 == "normal" && v1 == "400")
        }
        _ => {
            let Some(property) = command.relevant_css_property() else {
                return v1 == v2;
            };
            let (probe1, probe2) = ctx.span_probes();
            ctx.tree.set_style_value(probe1, property, v1);
            ctx.tree.set_style_value(probe2, property, v2);
            let computed1 = ctx.tree.computed_style(probe1, property);
            let computed2 = ctx.tree.computed_style(probe2, property);
            ctx.tree.set_style_value(probe1, property, "");
            ctx.tree.set_style_value(probe2, property, "");
            computed1 == computed2
        }
    }
}
