/// Parsed inline style declarations, in declaration order. Shorthand margin
/// and padding declarations are expanded into their longhands on the way in,
/// the same way the CSS object model exposes them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CssDeclarations {
    decls: Vec<(String, String)>,
}

fn expand_box_shorthand(prefix: &str, value: &str) -> Option<[(String, String); 4]> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [top, right, bottom, left] = match parts.as_slice() {
        [a] => [*a, *a, *a, *a],
        [a, b] => [*a, *b, *a, *b],
        [a, b, c] => [*a, *b, *c, *b],
        [a, b, c, d] => [*a, *b, *c, *d],
        _ => return None,
    };
    Some([
        (format!("{prefix}-top"), top.to_string()),
        (format!("{prefix}-right"), right.to_string()),
        (format!("{prefix}-bottom"), bottom.to_string()),
        (format!("{prefix}-left"), left.to_string()),
    ])
}

fn family_prefix(property: &str) -> Option<&str> {
    // Strip an optional vendor prefix before matching the family name.
    let base = if let Some(rest) = property.strip_prefix('-') {
        match rest.find('-') {
            Some(i) => &rest[i + 1..],
            None => property,
        }
    } else {
        property
    };
    for family in ["margin", "padding", "border"] {
        if base == family || base.starts_with(&format!("{family}-")) {
            return Some(family);
        }
    }
    None
}

impl CssDeclarations {
    pub fn parse(text: &str) -> Self {
        let mut decls = Self::default();
        for piece in text.split(';') {
            let Some((name, value)) = piece.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            decls.set(&name, value);
        }
        decls
    }

    pub fn serialize(&self) -> String {
        self.decls
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn get(&self, property: &str) -> Option<String> {
        let property = property.to_ascii_lowercase();
        self.decls
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.clone())
    }

    /// Set a declaration. The empty string removes it; removing a box
    /// family shorthand (`margin`, `padding`, `border`) drops every
    /// declaration in that family, vendor-prefixed ones included.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            if matches!(property.as_str(), "margin" | "padding" | "border") {
                let family = property.clone();
                self.decls
                    .retain(|(name, _)| family_prefix(name) != Some(family.as_str()));
            } else {
                self.decls.retain(|(name, _)| *name != property);
            }
            return;
        }
        if matches!(property.as_str(), "margin" | "padding") {
            if let Some(longhands) = expand_box_shorthand(&property, value) {
                for (name, value) in longhands {
                    self.set_longhand(&name, &value);
                }
                return;
            }
        }
        self.set_longhand(&property, value);
    }

    fn set_longhand(&mut self, property: &str, value: &str) {
        match self.decls.iter_mut().find(|(name, _)| name == property) {
            Some(decl) => decl.1 = value.to_string(),
            None => self.decls.push((property.to_string(), value.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.decls.iter().map(|(name, _)| name.clone()).collect()
    }
}

/// Whether a text-decoration line list contains the given token.
pub fn decoration_contains(list: &str, token: &str) -> bool {
    list.split_whitespace().any(|t| t.eq_ignore_ascii_case(token))
}

pub fn decoration_without(list: &str, token: &str) -> String {
    list.split_whitespace()
        .filter(|t| !t.eq_ignore_ascii_case(token))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn decoration_with(list: &str, token: &str) -> String {
    if list.is_empty() || list.eq_ignore_ascii_case("none") {
        return token.to_string();
    }
    if decoration_contains(list, token) {
        return list.to_string();
    }
    format!("{list} {token}")
}
