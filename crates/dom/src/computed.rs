use crate::color::{parse_css_color, Rgba};
use crate::node::{DomTree, NodeId};

const FONT_SIZE_KEYWORDS: &[(&str, f64)] = &[
    ("xx-small", 9.0),
    ("x-small", 10.0),
    ("small", 13.0),
    ("medium", 16.0),
    ("large", 18.0),
    ("x-large", 24.0),
    ("xx-large", 32.0),
    ("xxx-large", 48.0),
];

pub fn font_size_keyword_px(keyword: &str) -> Option<f64> {
    FONT_SIZE_KEYWORDS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, px)| *px)
}

/// Map a legacy font size attribute value (as carried by `<font size>`) to
/// the keyword it renders as. Accepts a leading sign the way `parseInt`
/// does and clamps to the 1..=7 range.
pub fn legacy_font_size_keyword(attr: &str) -> Option<&'static str> {
    let text = attr.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1i32, rest),
        None => (1i32, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i32 = digits[..end].parse().ok()?;
    let value = (sign * value).clamp(1, 7);
    Some(match value {
        1 => "xx-small",
        2 => "small",
        3 => "medium",
        4 => "large",
        5 => "x-large",
        6 => "xx-large",
        _ => "xxx-large",
    })
}

fn parse_length(value: &str, em_px: f64, percent_base: Option<f64>) -> Option<f64> {
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        let base = percent_base?;
        let v: f64 = percent.trim().parse().ok()?;
        return Some(base * v / 100.0);
    }
    for (suffix, scale) in [
        ("px", 1.0),
        ("pt", 4.0 / 3.0),
        ("pc", 16.0),
        ("in", 96.0),
        ("cm", 96.0 / 2.54),
        ("mm", 96.0 / 25.4),
        ("rem", 16.0),
        ("em", em_px),
    ] {
        if let Some(number) = value.strip_suffix(suffix) {
            let v: f64 = number.trim().parse().ok()?;
            return Some(v * scale);
        }
    }
    // Quirks-style unitless lengths count as pixels.
    let v: f64 = value.parse().ok()?;
    Some(v)
}

fn format_px(value: f64) -> String {
    if value == value.trunc() {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}

fn ua_display(tag: &str) -> &'static str {
    match tag {
        "address" | "article" | "aside" | "blockquote" | "body" | "center" | "dd" | "div"
        | "dl" | "dt" | "fieldset" | "figcaption" | "figure" | "footer" | "form" | "h1"
        | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hgroup" | "hr" | "html" | "main"
        | "menu" | "nav" | "ol" | "p" | "pre" | "section" | "ul" | "xmp" => "block",
        "li" => "list-item",
        "table" => "table",
        "caption" => "table-caption",
        "colgroup" => "table-column-group",
        "col" => "table-column",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "button" | "input" | "select" | "textarea" => "inline-block",
        _ => "inline",
    }
}

impl DomTree {
    /// Resolve the computed value of a CSS property the way the editing
    /// engine needs to observe it: inline declarations first, then the
    /// presentational hints and user-agent defaults that HTML rendering
    /// supplies, then inheritance where the property inherits.
    pub fn computed_style(&self, node: NodeId, property: &str) -> String {
        match property {
            "display" => self.computed_display(node).to_string(),
            "font-weight" => self.computed_font_weight(node).to_string(),
            "font-style" => self.computed_font_style(node),
            "font-family" => self.computed_font_family(node),
            "font-size" => format_px(self.computed_font_size_px(node)),
            "color" => self.computed_color(node).serialize(),
            "background-color" => self.computed_background_color(node).serialize(),
            "text-decoration" | "text-decoration-line" => self.computed_text_decoration(node),
            "vertical-align" => self.computed_vertical_align(node),
            "margin-top" | "margin-right" | "margin-bottom" | "margin-left" => {
                self.computed_margin(node, property)
            }
            _ => String::new(),
        }
    }

    fn computed_display(&self, node: NodeId) -> String {
        if !self.is_element(node) {
            return "inline".to_string();
        }
        if let Some(decl) = self.style_value(node, "display") {
            let decl = decl.trim().to_ascii_lowercase();
            if !decl.is_empty() {
                return decl;
            }
        }
        if self.is_html_element(node) {
            let Some(tag) = self.tag(node) else {
                return "inline".to_string();
            };
            return ua_display(tag).to_string();
        }
        "inline".to_string()
    }

    fn computed_font_weight(&self, node: NodeId) -> u32 {
        if !self.is_element(node) {
            return match self.parent(node) {
                Some(parent) => self.computed_font_weight(parent),
                None => 400,
            };
        }
        let inherited = || match self.parent(node) {
            Some(parent) => self.computed_font_weight(parent),
            None => 400,
        };
        if let Some(decl) = self.style_value(node, "font-weight") {
            let decl = decl.trim().to_ascii_lowercase();
            match decl.as_str() {
                "normal" => return 400,
                "bold" => return 700,
                "bolder" => {
                    let parent = inherited();
                    return match parent {
                        w if w < 350 => 400,
                        w if w < 550 => 700,
                        w if w < 900 => 900,
                        w => w,
                    };
                }
                "lighter" => {
                    let parent = inherited();
                    return match parent {
                        w if w < 100 => w,
                        w if w < 550 => 100,
                        w if w < 750 => 400,
                        _ => 700,
                    };
                }
                _ => {
                    if let Ok(n) = decl.parse::<u32>() {
                        if (1..=1000).contains(&n) {
                            return n;
                        }
                    }
                }
            }
        }
        if self.is_html_element(node)
            && matches!(self.tag(node), Some("b" | "strong" | "th"))
        {
            return 700;
        }
        inherited()
    }

    fn computed_font_style(&self, node: NodeId) -> String {
        if self.is_element(node) {
            if let Some(decl) = self.style_value(node, "font-style") {
                let decl = decl.trim().to_ascii_lowercase();
                if matches!(decl.as_str(), "normal" | "italic" | "oblique") {
                    return decl;
                }
            }
            if self.is_html_element(node)
                && matches!(
                    self.tag(node),
                    Some("i" | "em" | "cite" | "var" | "dfn" | "address")
                )
            {
                return "italic".to_string();
            }
        }
        match self.parent(node) {
            Some(parent) => self.computed_font_style(parent),
            None => "normal".to_string(),
        }
    }

    fn computed_font_family(&self, node: NodeId) -> String {
        if self.is_element(node) {
            if let Some(decl) = self.style_value(node, "font-family") {
                let decl = decl.trim().to_string();
                if !decl.is_empty() {
                    return decl;
                }
            }
            if self.is_html_element_with_tag(node, "font") {
                if let Some(face) = self.attr(node, "face") {
                    if !face.is_empty() {
                        return face.to_string();
                    }
                }
            }
            if self.is_html_element(node)
                && matches!(self.tag(node), Some("tt" | "code" | "kbd" | "samp" | "pre"))
            {
                return "monospace".to_string();
            }
        }
        match self.parent(node) {
            Some(parent) => self.computed_font_family(parent),
            None => "serif".to_string(),
        }
    }

    fn computed_font_size_px(&self, node: NodeId) -> f64 {
        let inherited = match self.parent(node) {
            Some(parent) => self.computed_font_size_px(parent),
            None => 16.0,
        };
        if !self.is_element(node) {
            return inherited;
        }
        if let Some(decl) = self.style_value(node, "font-size") {
            let decl = decl.trim().to_ascii_lowercase();
            if let Some(px) = font_size_keyword_px(&decl) {
                return px;
            }
            if decl == "larger" {
                return inherited * 1.2;
            }
            if decl == "smaller" {
                return inherited / 1.2;
            }
            if let Some(px) = parse_length(&decl, inherited, Some(inherited)) {
                return px;
            }
        }
        if self.is_html_element_with_tag(node, "font") {
            if let Some(size) = self.attr(node, "size") {
                if let Some(px) = legacy_font_size_keyword(size).and_then(font_size_keyword_px) {
                    return px;
                }
            }
        }
        if self.is_html_element(node) {
            let factor = match self.tag(node) {
                Some("h1") => Some(2.0),
                Some("h2") => Some(1.5),
                Some("h3") => Some(1.17),
                Some("h4") => Some(1.0),
                Some("h5") => Some(0.83),
                Some("h6") => Some(0.67),
                Some("small") => Some(1.0 / 1.2),
                Some("big") => Some(1.2),
                _ => None,
            };
            if let Some(factor) = factor {
                return inherited * factor;
            }
        }
        inherited
    }

    fn computed_color(&self, node: NodeId) -> Rgba {
        if self.is_element(node) {
            if let Some(decl) = self.style_value(node, "color") {
                if let Some(color) = parse_css_color(&decl) {
                    return color;
                }
            }
            if self.is_html_element_with_tag(node, "font") {
                if let Some(color) = self.attr(node, "color").and_then(parse_css_color) {
                    return color;
                }
            }
            if self.is_html_element_with_tag(node, "a") && self.has_attr(node, "href") {
                return Rgba::opaque(0, 0, 238);
            }
        }
        match self.parent(node) {
            Some(parent) => self.computed_color(parent),
            None => Rgba::opaque(0, 0, 0),
        }
    }

    // Background color does not inherit; the engine walks ancestors itself
    // when it wants the painted background.
    fn computed_background_color(&self, node: NodeId) -> Rgba {
        if self.is_element(node) {
            if let Some(decl) = self.style_value(node, "background-color") {
                if let Some(color) = parse_css_color(&decl) {
                    return color;
                }
            }
        }
        Rgba::transparent()
    }

    fn computed_text_decoration(&self, node: NodeId) -> String {
        if self.is_element(node) {
            if let Some(decl) = self.style_value(node, "text-decoration") {
                let decl = decl.trim().to_ascii_lowercase();
                if !decl.is_empty() {
                    return decl;
                }
            }
            if self.is_html_element(node) {
                match self.tag(node) {
                    Some("s" | "strike" | "del") => return "line-through".to_string(),
                    Some("u" | "ins") => return "underline".to_string(),
                    Some("a") if self.has_attr(node, "href") => return "underline".to_string(),
                    _ => {}
                }
            }
        }
        "none".to_string()
    }

    fn computed_vertical_align(&self, node: NodeId) -> String {
        if self.is_element(node) {
            if let Some(decl) = self.style_value(node, "vertical-align") {
                let decl = decl.trim().to_ascii_lowercase();
                if !decl.is_empty() {
                    return decl;
                }
            }
            if self.is_html_element(node) {
                match self.tag(node) {
                    Some("sub") => return "sub".to_string(),
                    Some("sup") => return "super".to_string(),
                    _ => {}
                }
            }
        }
        "baseline".to_string()
    }

    fn computed_margin(&self, node: NodeId, property: &str) -> String {
        if !self.is_element(node) {
            return "0px".to_string();
        }
        if let Some(decl) = self.style_value(node, property) {
            let decl = decl.trim().to_ascii_lowercase();
            if decl == "auto" {
                return "auto".to_string();
            }
            let em = self.computed_font_size_px(node);
            if let Some(px) = parse_length(&decl, em, None) {
                return format_px(px);
            }
        }
        if self.is_html_element(node) {
            let vertical = matches!(property, "margin-top" | "margin-bottom");
            match self.tag(node) {
                Some("blockquote") => {
                    return if vertical { "16px" } else { "40px" }.to_string();
                }
                Some("p" | "ul" | "ol" | "dl" | "pre") if vertical => {
                    return "16px".to_string();
                }
                _ => {}
            }
        }
        "0px".to_string()
    }
}
