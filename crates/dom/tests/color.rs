use scribe_dom::{parse_css_color, parse_simple_color, Rgba};

#[test]
fn hex_colors_pass_through() {
    assert_eq!(parse_simple_color("#ff0000"), Some("#ff0000".to_string()));
    assert_eq!(parse_simple_color("#FF0000"), Some("#ff0000".to_string()));
    assert_eq!(parse_simple_color("#f00"), Some("#ff0000".to_string()));
    assert_eq!(parse_simple_color("#abcdeg"), None);
    assert_eq!(parse_simple_color("#ab"), None);
}

#[test]
fn keywords_come_back_unchanged() {
    assert_eq!(parse_simple_color("red"), Some("red".to_string()));
    assert_eq!(parse_simple_color("blue"), Some("blue".to_string()));
    assert_eq!(parse_simple_color("cornsilk"), Some("cornsilk".to_string()));
    assert_eq!(parse_simple_color("Red"), Some("red".to_string()));
    assert_eq!(parse_simple_color("notacolor"), None);
}

#[test]
fn functional_notation_serializes_to_hex() {
    assert_eq!(parse_simple_color("rgb(255, 0, 0)"), Some("#ff0000".to_string()));
    assert_eq!(parse_simple_color("rgb(100%, 0, 0)"), Some("#ff0000".to_string()));
    assert_eq!(parse_simple_color("rgb( 255 ,0 ,0)"), Some("#ff0000".to_string()));
    assert_eq!(parse_simple_color("rgba(0, 0, 0, 1)"), Some("#000000".to_string()));
    assert_eq!(
        parse_simple_color("rgba(255, 255, 255, 1)"),
        Some("#ffffff".to_string())
    );
    assert_eq!(parse_simple_color("hsl(0%, 100%, 50%)"), Some("#ff0000".to_string()));
    assert_eq!(parse_simple_color("hsl(120, 100%, 25%)"), Some("#008000".to_string()));
}

#[test]
fn translucent_and_out_of_range_values_are_rejected() {
    assert_eq!(parse_simple_color("rgba(255, 0, 0, 0.5)"), None);
    assert_eq!(parse_simple_color("rgba(255, 0, 0, 0.0)"), None);
    assert_eq!(parse_simple_color("rgb(375, -10, 15)"), None);
    assert_eq!(parse_simple_color("transparent"), None);
    assert_eq!(parse_simple_color("currentColor"), None);
}

#[test]
fn css_color_parsing_keeps_alpha() {
    assert_eq!(parse_css_color("red"), Some(Rgba::opaque(255, 0, 0)));
    assert_eq!(parse_css_color("transparent"), Some(Rgba::transparent()));

    let half = parse_css_color("rgba(10, 20, 30, 0.5)").unwrap();
    assert_eq!((half.r, half.g, half.b), (10, 20, 30));
    assert_eq!(half.a, 0.5);
    assert_eq!(half.serialize(), "rgba(10, 20, 30, 0.5)");

    assert_eq!(Rgba::transparent().serialize(), "rgba(0, 0, 0, 0)");
    assert_eq!(Rgba::opaque(255, 0, 0).serialize(), "rgb(255, 0, 0)");
}
