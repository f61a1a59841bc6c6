use scribe_dom::{decoration_contains, decoration_with, decoration_without, CssDeclarations};

#[test]
fn parse_and_serialize() {
    let decls = CssDeclarations::parse("color: red; font-weight: bold");

    assert_eq!(decls.get("color"), Some("red".to_string()));
    assert_eq!(decls.get("COLOR"), Some("red".to_string()));
    assert_eq!(decls.get("font-weight"), Some("bold".to_string()));
    assert_eq!(decls.len(), 2);
    assert_eq!(decls.serialize(), "color: red; font-weight: bold;");
}

#[test]
fn parse_skips_malformed_pieces() {
    let decls = CssDeclarations::parse("color: red;; broken ; : nothing; font-style: italic");

    assert_eq!(decls.names(), vec!["color", "font-style"]);
}

#[test]
fn set_replaces_in_place() {
    let mut decls = CssDeclarations::parse("color: red; font-style: italic");
    decls.set("color", "blue");

    assert_eq!(decls.names(), vec!["color", "font-style"]);
    assert_eq!(decls.get("color"), Some("blue".to_string()));
}

#[test]
fn margin_shorthand_expands_to_longhands() {
    let decls = CssDeclarations::parse("margin: 0 40px");

    assert_eq!(
        decls.names(),
        vec!["margin-top", "margin-right", "margin-bottom", "margin-left"]
    );
    assert_eq!(decls.get("margin-top"), Some("0".to_string()));
    assert_eq!(decls.get("margin-right"), Some("40px".to_string()));
    assert_eq!(decls.get("margin-bottom"), Some("0".to_string()));
    assert_eq!(decls.get("margin-left"), Some("40px".to_string()));

    let three = CssDeclarations::parse("padding: 1px 2px 3px");
    assert_eq!(three.get("padding-top"), Some("1px".to_string()));
    assert_eq!(three.get("padding-left"), Some("2px".to_string()));
    assert_eq!(three.get("padding-bottom"), Some("3px".to_string()));
}

#[test]
fn clearing_a_family_removes_every_member() {
    let mut decls = CssDeclarations::parse("margin: 1px; color: red");
    decls.set("-webkit-margin-start", "2px");

    decls.set("margin", "");

    assert_eq!(decls.names(), vec!["color"]);
}

#[test]
fn clearing_border_family() {
    let mut decls = CssDeclarations::default();
    decls.set("border-left-width", "1px");
    decls.set("border-color", "red");
    decls.set("color", "green");

    decls.set("border", "");

    assert_eq!(decls.names(), vec!["color"]);
}

#[test]
fn empty_value_removes_plain_property() {
    let mut decls = CssDeclarations::parse("font-weight: bold");
    decls.set("font-weight", "");

    assert!(decls.is_empty());
    assert_eq!(decls.serialize(), "");
}

#[test]
fn decoration_token_helpers() {
    assert!(decoration_contains("underline line-through", "line-through"));
    assert!(decoration_contains("Underline", "underline"));
    assert!(!decoration_contains("none", "underline"));

    assert_eq!(
        decoration_without("underline line-through", "line-through"),
        "underline"
    );
    assert_eq!(decoration_without("underline", "underline"), "");

    assert_eq!(decoration_with("", "underline"), "underline");
    assert_eq!(decoration_with("none", "underline"), "underline");
    assert_eq!(
        decoration_with("underline", "line-through"),
        "underline line-through"
    );
    assert_eq!(decoration_with("underline", "underline"), "underline");
}
