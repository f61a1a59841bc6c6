use scribe_dom::{font_size_keyword_px, parse_css_color, DomTree, NodeId, NodeKind, Range};

use crate::apply::{set_node_value, unwrap_children};
use crate::blocks::{indent_node, outdent_node};
use crate::classify::is_editable;
use crate::command::{Command, FONT_SIZE_SCALE};
use crate::geometry::{is_contained, is_effectively_contained};
use crate::mutate::EditContext;
use crate::ranges::{block_extend_range, decompose_range};
use crate::traverse::{
    is_ancestor, next_node, next_node_descendants, next_sibling, node_index, node_length,
};
use crate::values::effective_value;

#[derive(Debug, Clone)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone)]
pub struct QueryError {
    message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Elements that survive removeformat; everything else inside the selection
/// is unwrapped.
const REMOVE_FORMAT_KEEPS: &[&str] = &[
    "a", "audio", "br", "div", "hr", "img", "p", "td", "video", "wbr",
];

/// The clearing passes removeformat runs after unwrapping, in order.
const REMOVE_FORMAT_CLEARS: &[(Command, Option<&str>)] = &[
    (Command::Subscript, Some("baseline")),
    (Command::Bold, Some("normal")),
    (Command::FontName, None),
    (Command::FontSize, None),
    (Command::ForeColor, None),
    (Command::HiliteColor, None),
    (Command::Italic, Some("normal")),
    (Command::Strikethrough, None),
    (Command::Underline, None),
];

/// A document plus the selection commands operate on. The selection range
/// is kept consistent across every structural edit a command makes; any
/// other range held by the caller is not.
pub struct Editor {
    doc: DomTree,
    selection: Option<Range>,
    css_styling: bool,
}

impl Editor {
    pub fn new(doc: DomTree) -> Self {
        Self {
            doc,
            selection: None,
            css_styling: false,
        }
    }

    pub fn doc(&self) -> &DomTree {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut DomTree {
        &mut self.doc
    }

    pub fn selection(&self) -> Option<&Range> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, range: Range) {
        self.selection = Some(range);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn css_styling(&self) -> bool {
        self.css_styling
    }

    /// Run a command by its case-insensitive wire name. Unknown names are an
    /// error; a missing selection or an unusable value is a silent no-op.
    pub fn exec_command(&mut self, name: &str, value: Option<&str>) -> Result<(), CommandError> {
        let Some(command) = Command::from_name(name) else {
            return Err(CommandError::new(format!("Unknown command: {name}")));
        };

        // The styling flag commands work without a selection.
        match command {
            Command::StyleWithCss => {
                self.css_styling = bool_value(value);
                return Ok(());
            }
            Command::UseCss => {
                self.css_styling = !bool_value(value);
                return Ok(());
            }
            _ => {}
        }

        let Some(range) = self.selection else {
            return Ok(());
        };
        let mut ctx = EditContext::new(&mut self.doc, range, self.css_styling);
        run_command(&mut ctx, command, value);
        self.selection = Some(ctx.range);
        Ok(())
    }

    pub fn query_state(&self, name: &str) -> Result<bool, QueryError> {
        let Some(command) = Command::from_name(name) else {
            return Err(QueryError::new(format!("Unknown command: {name}")));
        };
        if command == Command::StyleWithCss {
            return Ok(self.css_styling);
        }
        let Some(range) = self.selection else {
            return Ok(false);
        };
        Ok(command_state(&self.doc, &range, command, self.css_styling))
    }

    /// Per-command value queries are not implemented; every known command
    /// reports the empty string.
    pub fn query_value(&self, name: &str) -> Result<String, QueryError> {
        if Command::from_name(name).is_none() {
            return Err(QueryError::new(format!("Unknown command: {name}")));
        }
        Ok(String::new())
    }
}

fn bool_value(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !v.is_empty() && !v.eq_ignore_ascii_case("false"),
    }
}

fn run_command(ctx: &mut EditContext, command: Command, value: Option<&str>) {
    match command {
        Command::Bold | Command::Italic => {
            let node_list = decompose_range(ctx);
            let on = command_state(ctx.tree, &ctx.range, command, ctx.css_styling);
            let new_value = match (command, on) {
                (_, true) => "normal",
                (Command::Bold, false) => "bold",
                (_, false) => "italic",
            };
            for node in node_list {
                set_node_value(ctx, node, command, Some(new_value));
            }
        }
        Command::Strikethrough | Command::Underline => {
            let node_list = decompose_range(ctx);
            let on = command_state(ctx.tree, &ctx.range, command, ctx.css_styling);
            let new_value = match (command, on) {
                (_, true) => None,
                (Command::Strikethrough, false) => Some("line-through"),
                (_, false) => Some("underline"),
            };
            for node in node_list {
                set_node_value(ctx, node, command, new_value);
            }
        }
        Command::Subscript | Command::Superscript => {
            let node_list = decompose_range(ctx);
            if command_state(ctx.tree, &ctx.range, command, ctx.css_styling) {
                for node in node_list {
                    set_node_value(ctx, node, command, Some("baseline"));
                }
            } else {
                for node in node_list {
                    set_node_value(ctx, node, command, Some("baseline"));
                }
                let target = if command == Command::Subscript {
                    "sub"
                } else {
                    "super"
                };
                let node_list = decompose_range(ctx);
                for node in node_list {
                    set_node_value(ctx, node, command, Some(target));
                }
            }
        }
        Command::CreateLink => {
            let Some(value) = value else {
                return;
            };
            if value.is_empty() {
                return;
            }
            let node_list = decompose_range(ctx);
            // Enclosing links keep their element but take the new target.
            for &node in &node_list {
                let mut candidate = ctx.tree.parent(node);
                while let Some(ancestor) = candidate {
                    if ctx.tree.is_html_element_with_tag(ancestor, "a")
                        && ctx.tree.has_attr(ancestor, "href")
                    {
                        ctx.tree.set_attr(ancestor, "href", value);
                    }
                    candidate = ctx.tree.parent(ancestor);
                }
            }
            for node in node_list {
                set_node_value(ctx, node, command, Some(value));
            }
        }
        Command::Unlink => {
            let node_list = decompose_range(ctx);
            for node in node_list {
                set_node_value(ctx, node, command, None);
            }
        }
        Command::FontName => {
            let Some(value) = value else {
                return;
            };
            let node_list = decompose_range(ctx);
            for node in node_list {
                set_node_value(ctx, node, command, Some(value));
            }
        }
        Command::FontSize => {
            let Some(value) = value else {
                return;
            };
            if value.is_empty() {
                return;
            }
            let value = value.trim();
            let value = match font_size_from_number(value) {
                Some(keyword) => keyword.to_string(),
                None => value.to_string(),
            };
            if font_size_keyword_px(&value).is_none() && !is_absolute_length(&value) {
                return;
            }
            let node_list = decompose_range(ctx);
            for node in node_list {
                set_node_value(ctx, node, command, Some(&value));
            }
        }
        Command::ForeColor | Command::HiliteColor => {
            let Some(value) = value else {
                return;
            };
            let Some(value) = color_value(value) else {
                return;
            };
            let node_list = decompose_range(ctx);
            for node in node_list {
                set_node_value(ctx, node, command, Some(&value));
            }
        }
        Command::Indent => {
            let mut new_range = block_extend_range(ctx.tree, &ctx.range);
            if let Some(end_child) = ctx.tree.child(new_range.end.node, new_range.end.offset) {
                if ctx.tree.is_html_element_with_tag(end_child, "br") {
                    ctx.remove_node(end_child);
                    while new_range.end.offset == node_length(ctx.tree, new_range.end.node) {
                        let Some(parent) = ctx.tree.parent(new_range.end.node) else {
                            break;
                        };
                        let index = node_index(ctx.tree, new_range.end.node);
                        new_range.set_end(parent, index + 1);
                    }
                }
            }
            let stop = next_node_descendants(ctx.tree, new_range.end.node);
            let mut node_list: Vec<NodeId> = Vec::new();
            let mut cursor = Some(new_range.start.node);
            while let Some(node) = cursor {
                if stop == Some(node) {
                    break;
                }
                cursor = next_node(ctx.tree, node);
                if !is_contained(ctx.tree, node, &new_range) || is_table_scaffold(ctx.tree, node)
                {
                    continue;
                }
                // No ancestor of a member can itself be in the list, so only
                // the last member needs checking.
                if node_list
                    .last()
                    .is_some_and(|&last| is_ancestor(ctx.tree, last, node))
                {
                    continue;
                }
                node_list.push(node);
            }
            for node in node_list {
                indent_node(ctx, node);
            }
        }
        Command::Outdent => {
            let new_range = block_extend_range(ctx.tree, &ctx.range);
            let stop = next_node_descendants(ctx.tree, new_range.end.node);
            let mut node_list = Vec::new();
            let mut cursor = Some(new_range.start.node);
            while let Some(node) = cursor {
                if stop == Some(node) {
                    break;
                }
                if is_contained(ctx.tree, node, &new_range) && ctx.tree.child_count(node) == 0 {
                    node_list.push(node);
                }
                cursor = next_node(ctx.tree, node);
            }
            for node in node_list {
                outdent_node(ctx, node);
            }
        }
        Command::RemoveFormat => {
            let node_list = decompose_range(ctx);
            for &member in &node_list {
                let stop = next_node_descendants(ctx.tree, member);
                let mut cursor = Some(member);
                while let Some(node) = cursor {
                    if stop == Some(node) {
                        break;
                    }
                    if ctx.tree.kind(node) == NodeKind::Element {
                        ctx.tree.remove_attr(node, "style");
                    }
                    cursor = next_node(ctx.tree, node);
                }
            }
            let mut elements_to_remove = Vec::new();
            for &member in &node_list {
                let stop = next_node_descendants(ctx.tree, member);
                let mut cursor = Some(member);
                while let Some(node) = cursor {
                    if stop == Some(node) {
                        break;
                    }
                    if ctx.tree.is_html_element(node)
                        && ctx.tree.parent(node).is_some()
                        && ctx
                            .tree
                            .tag(node)
                            .is_some_and(|tag| !REMOVE_FORMAT_KEEPS.contains(&tag))
                    {
                        elements_to_remove.push(node);
                    }
                    cursor = next_node(ctx.tree, node);
                }
            }
            for element in elements_to_remove {
                unwrap_children(ctx, element);
                ctx.remove_node(element);
            }
            for &(clear_command, clear_value) in REMOVE_FORMAT_CLEARS {
                let node_list = decompose_range(ctx);
                for node in node_list {
                    set_node_value(ctx, node, clear_command, clear_value);
                }
            }
        }
        Command::InsertHorizontalRule => {
            ctx.delete_contents();
            let anchor = ctx.range.start.node;
            let offset = ctx.range.start.offset;
            if ctx.tree.parent(anchor).is_none()
                && matches!(ctx.tree.kind(anchor), NodeKind::Text | NodeKind::Comment)
            {
                return;
            }
            let hr = ctx.tree.create_element("hr");
            insert_at_point(ctx, hr, anchor, offset);
            if let Some(parent) = ctx.tree.parent(hr) {
                let index = node_index(ctx.tree, hr);
                ctx.range.set_start(parent, index + 1);
                ctx.range.set_end(parent, index + 1);
            }
        }
        Command::InsertImage => {
            let Some(value) = value else {
                return;
            };
            if value.is_empty() {
                return;
            }
            ctx.delete_contents();
            let anchor = ctx.range.start.node;
            let offset = ctx.range.start.offset;
            if ctx.tree.parent(anchor).is_none()
                && matches!(ctx.tree.kind(anchor), NodeKind::Text | NodeKind::Comment)
            {
                return;
            }
            let img = ctx.tree.create_element("img");
            ctx.tree.set_attr(img, "src", value);
            insert_at_point(ctx, img, anchor, offset);
            if let Some(parent) = ctx.tree.parent(img) {
                let index = node_index(ctx.tree, img);
                ctx.range.set_start(parent, index + 1);
                ctx.range.set_end(parent, index + 1);
            }
        }
        Command::StyleWithCss | Command::UseCss => {}
    }
}

/// Place a freshly created node at a boundary point: split partially covered
/// text, then insert before the character data (or into the element) the
/// point lands on.
fn insert_at_point(ctx: &mut EditContext, new_node: NodeId, anchor: NodeId, offset: usize) {
    if ctx.tree.kind(anchor) == NodeKind::Text
        && offset != 0
        && offset != node_length(ctx.tree, anchor)
    {
        ctx.split_text(anchor, offset);
    }

    let anchor_parent = ctx.tree.parent(anchor);
    let mut reference = Some(anchor);
    if ctx.tree.kind(anchor) == NodeKind::Text && offset == node_length(ctx.tree, anchor) {
        reference = next_sibling(ctx.tree, anchor);
    }

    match reference {
        Some(reference)
            if !matches!(
                ctx.tree.kind(reference),
                NodeKind::Text | NodeKind::Comment
            ) =>
        {
            let index = offset.min(ctx.tree.child_count(reference));
            ctx.insert_node(reference, index, new_node);
        }
        Some(reference) => {
            let Some(parent) = ctx.tree.parent(reference) else {
                return;
            };
            let index = node_index(ctx.tree, reference);
            ctx.insert_node(parent, index, new_node);
        }
        None => {
            let Some(parent) = anchor_parent else {
                return;
            };
            ctx.append_node(parent, new_node);
        }
    }
}

fn is_table_scaffold(tree: &DomTree, node: NodeId) -> bool {
    ["tbody", "thead", "tr", "th", "td"]
        .iter()
        .any(|tag| tree.is_html_element_with_tag(node, tag))
}

fn command_state(tree: &DomTree, range: &Range, command: Command, css_styling: bool) -> bool {
    if command == Command::StyleWithCss {
        return css_styling;
    }
    if !command.has_state() {
        return false;
    }

    let mut node = range.start.node;
    while let Some(parent) = tree.parent(node) {
        if tree.first_child(parent) != Some(node) {
            break;
        }
        node = parent;
    }
    let stop = next_node_descendants(tree, range.end.node);

    let mut cursor = Some(node);
    while let Some(node) = cursor {
        if stop == Some(node) {
            break;
        }
        cursor = next_node(tree, node);
        if !is_effectively_contained(tree, node, range)
            || tree.kind(node) != NodeKind::Text
            || !is_editable(tree, node)
        {
            continue;
        }
        let effective = effective_value(tree, node, command);
        let on = match command {
            Command::Bold => matches!(effective.as_deref(), Some("bold" | "700" | "800" | "900")),
            Command::Italic => matches!(effective.as_deref(), Some("italic" | "oblique")),
            Command::Strikethrough => effective.as_deref() == Some("line-through"),
            Command::Underline => effective.as_deref() == Some("underline"),
            Command::Subscript => effective.as_deref() == Some("sub"),
            Command::Superscript => effective.as_deref() == Some("super"),
            _ => true,
        };
        if !on {
            return false;
        }
    }
    true
}

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// A decimal number as font size inputs allow one: optional sign, digits, an
/// optional fraction, an optional exponent.
fn is_decimal_number(value: &str) -> bool {
    let rest = value.strip_prefix(['-', '+']).unwrap_or(value);
    let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (rest, None),
    };
    let (int_part, fraction) = match mantissa.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (mantissa, None),
    };
    if !all_digits(int_part) {
        return false;
    }
    if let Some(fraction) = fraction {
        if !all_digits(fraction) {
            return false;
        }
    }
    if let Some(exponent) = exponent {
        let exponent = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
        if !all_digits(exponent) {
            return false;
        }
    }
    true
}

/// Translate a numeric font size argument onto the legacy 1..7 scale.
/// A leading "+" or "-" adjusts relative to the default size 3; the result
/// clamps into the scale.
fn font_size_from_number(value: &str) -> Option<&'static str> {
    if !is_decimal_number(value) {
        return None;
    }
    let (digits, sign) = match value.as_bytes().first().copied() {
        Some(b'+') => (&value[1..], Some(b'+')),
        Some(b'-') => (&value[1..], Some(b'-')),
        _ => (value, None),
    };
    let leading: String = digits
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let number: i64 = leading.parse().unwrap_or(i64::MAX);
    let number = match sign {
        Some(b'+') => number.saturating_add(3),
        Some(b'-') => 3_i64.saturating_sub(number),
        _ => number,
    };
    let index = number.clamp(1, 7) as usize;
    Some(FONT_SIZE_SCALE[index - 1])
}

fn is_absolute_length(value: &str) -> bool {
    let Some(number) = ["cm", "mm", "in", "pt", "pc"]
        .iter()
        .find_map(|unit| value.strip_suffix(unit))
    else {
        return false;
    };
    match number.split_once('.') {
        Some((int_part, fraction)) => all_digits(int_part) && all_digits(fraction),
        None => all_digits(number),
    }
}

/// Normalize a color argument: bare hex digits get a "#", then the value
/// must parse as a CSS color and not be currentcolor.
fn color_value(value: &str) -> Option<String> {
    let value = if matches!(value.len(), 3 | 6) && value.bytes().all(|b| b.is_ascii_hexdigit()) {
        format!("#{value}")
    } else {
        value.to_string()
    };
    if value.eq_ignore_ascii_case("currentcolor") {
        return None;
    }
    parse_css_color(&value).map(|_| value)
}
