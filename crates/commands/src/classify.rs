use scribe_dom::{ContentEditable, DomTree, NodeId, NodeKind};

/// Editable per the contenteditable model: an element whose contenteditable
/// is in the true state, a document with design mode on, or a node that does
/// not opt out and has an editable parent.
pub fn is_editable(tree: &DomTree, node: NodeId) -> bool {
    match tree.content_editable(node) {
        ContentEditable::True => true,
        ContentEditable::False => false,
        ContentEditable::Inherit => {
            if tree.kind(node) == NodeKind::Document && tree.design_mode() {
                return true;
            }
            match tree.parent(node) {
                Some(parent) => is_editable(tree, parent),
                None => false,
            }
        }
    }
}

pub fn is_editing_host(tree: &DomTree, node: NodeId) -> bool {
    is_editable(tree, node) && !tree.parent(node).is_some_and(|parent| is_editable(tree, parent))
}

pub fn is_inline_node(tree: &DomTree, node: NodeId) -> bool {
    match tree.kind(node) {
        NodeKind::Text => true,
        NodeKind::Element => matches!(
            tree.computed_style(node, "display").as_str(),
            "inline" | "inline-block" | "inline-table"
        ),
        _ => false,
    }
}

const UNWRAPPABLE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "hr", "pre", "blockquote", "ol", "ul", "li", "dl",
    "dt", "dd", "div", "table", "caption", "colgroup", "col", "tbody", "thead", "tfoot", "tr",
    "th", "td", "address",
];

/// A node that formatting wrappers must not cross: anything whose parent is
/// not editable, any non-inline element, and the block-level HTML elements.
pub fn is_unwrappable_node(tree: &DomTree, node: NodeId) -> bool {
    if !tree.parent(node).is_some_and(|parent| is_editable(tree, parent)) {
        return true;
    }
    if tree.kind(node) != NodeKind::Element {
        return false;
    }
    if !is_inline_node(tree, node) {
        return true;
    }
    if !tree.is_html_element(node) {
        return false;
    }
    tree.tag(node)
        .is_some_and(|tag| UNWRAPPABLE_TAGS.contains(&tag))
}

const MODIFIABLE_PHRASE_TAGS: &[&str] = &[
    "b", "em", "i", "s", "span", "strike", "strong", "sub", "sup", "u",
];

/// A modifiable element is a phrase element with no attributes except
/// possibly style; a font element with only style, color, face, and size;
/// or an a element with only style and href.
pub fn is_modifiable_element(tree: &DomTree, node: NodeId) -> bool {
    if !tree.is_html_element(node) {
        return false;
    }
    let Some(tag) = tree.tag(node) else {
        return false;
    };
    if MODIFIABLE_PHRASE_TAGS.contains(&tag) {
        let count = tree.attr_count(node);
        if count == 0 {
            return true;
        }
        if count == 1 && tree.has_attr(node, "style") {
            return true;
        }
    }
    if tag == "font" || tag == "a" {
        let mut extra = tree.attr_count(node);
        if tree.has_attr(node, "style") {
            extra -= 1;
        }
        if tag == "font" {
            for name in ["color", "face", "size"] {
                if tree.has_attr(node, name) {
                    extra -= 1;
                }
            }
        }
        if tag == "a" && tree.has_attr(node, "href") {
            extra -= 1;
        }
        if extra == 0 {
            return true;
        }
    }
    false
}

const SIMPLE_MODIFIABLE_TAGS: &[&str] = &[
    "a", "b", "em", "font", "i", "s", "span", "strike", "strong", "sub", "sup", "u",
];

pub fn is_simple_modifiable_element(tree: &DomTree, node: NodeId) -> bool {
    if !tree.is_html_element(node) {
        return false;
    }
    let Some(tag) = tree.tag(node) else {
        return false;
    };
    if !SIMPLE_MODIFIABLE_TAGS.contains(&tag) {
        return false;
    }
    if tree.attr_count(node) == 0 {
        return true;
    }
    if tree.attr_count(node) > 1 {
        return false;
    }
    // Exactly one attribute from here on.
    if tree.has_attr(node, "style") && tree.style_decl_count(node) == 0 {
        return true;
    }
    if tag == "a" && tree.has_attr(node, "href") {
        return true;
    }
    if tag == "font"
        && (tree.has_attr(node, "color")
            || tree.has_attr(node, "face")
            || tree.has_attr(node, "size"))
    {
        return true;
    }
    let single_decl = tree.has_attr(node, "style") && tree.style_decl_count(node) == 1;
    if (tag == "b" || tag == "strong")
        && single_decl
        && tree.style_value(node, "font-weight").is_some()
    {
        return true;
    }
    if (tag == "i" || tag == "em")
        && single_decl
        && tree.style_value(node, "font-style").is_some()
    {
        return true;
    }
    if (tag == "sub" || tag == "sup")
        && single_decl
        && tree.style_value(node, "vertical-align").is_some()
    {
        return true;
    }
    if (tag == "a" || tag == "font" || tag == "span")
        && single_decl
        && tree.style_value(node, "text-decoration").is_none()
    {
        return true;
    }
    if matches!(tag, "a" | "font" | "s" | "span" | "strike" | "u")
        && single_decl
        && matches!(
            tree.style_value(node, "text-decoration").as_deref(),
            Some("line-through" | "underline" | "overline" | "none")
        )
    {
        return true;
    }
    false
}

fn style_name_in_families(name: &str, families: &[&str]) -> bool {
    // Tolerate a vendor prefix before the family name.
    let base = match name.strip_prefix('-') {
        Some(rest) => match rest.find('-') {
            Some(i) => &rest[i + 1..],
            None => name,
        },
        None => name,
    };
    families.iter().any(|family| base.starts_with(family))
}

pub fn is_potential_indentation_element(tree: &DomTree, node: NodeId) -> bool {
    if !tree.is_html_element(node) {
        return false;
    }
    if tree.is_html_element_with_tag(node, "blockquote") {
        return true;
    }
    if !tree.is_html_element_with_tag(node, "div") {
        return false;
    }
    tree.style_decl_names(node)
        .iter()
        .any(|name| style_name_in_families(name, &["margin"]))
}

/// An indentation element is a potential indentation element that carries
/// nothing beyond box styling: allowed attributes are style, class, and dir,
/// and the style attribute may only set margin, border, or padding.
pub fn is_indentation_element(tree: &DomTree, node: NodeId) -> bool {
    if !is_potential_indentation_element(tree, node) {
        return false;
    }
    if !tree.is_html_element_with_tag(node, "blockquote")
        && !tree.is_html_element_with_tag(node, "div")
    {
        return false;
    }
    for (name, _) in tree.attrs(node) {
        if !matches!(name.as_str(), "style" | "class" | "dir") {
            return false;
        }
    }
    tree.style_decl_names(node)
        .iter()
        .all(|name| style_name_in_families(name, &["margin", "border", "padding"]))
}
