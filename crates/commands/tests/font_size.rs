use scribe_commands::Editor;
use scribe_dom::{DomTree, NodeId, Range};

fn paragraph_doc(text: &str) -> (DomTree, NodeId, NodeId) {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let t = tree.create_text(text);
    tree.append(p, t);
    (tree, p, t)
}

fn markup(editor: &Editor) -> String {
    editor.doc().inner_markup(editor.doc().root())
}

fn select_all(editor: &mut Editor, text: NodeId, len: usize) {
    editor.set_selection(Range::new(text, 0, text, len));
}

#[test]
fn relative_size_adds_to_the_default() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("+2")).unwrap();
    assert_eq!(markup(&editor), "<p><font size=\"5\">abc</font></p>");
}

#[test]
fn numeric_size_is_clamped_to_seven() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("10")).unwrap();
    assert_eq!(markup(&editor), "<p><font size=\"7\">abc</font></p>");
}

#[test]
fn relative_size_is_clamped_to_one() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("-3")).unwrap();
    assert_eq!(markup(&editor), "<p><font size=\"1\">abc</font></p>");
}

#[test]
fn numeric_size_maps_onto_the_legacy_scale() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("4")).unwrap();
    assert_eq!(markup(&editor), "<p><font size=\"4\">abc</font></p>");
}

#[test]
fn keyword_size_is_accepted() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("x-large")).unwrap();
    assert_eq!(markup(&editor), "<p><font size=\"5\">abc</font></p>");
}

#[test]
fn absolute_length_becomes_an_inline_style() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("36pt")).unwrap();
    assert_eq!(
        markup(&editor),
        "<p><span style=\"font-size: 36pt;\">abc</span></p>"
    );
}

#[test]
fn unrecognized_size_is_ignored() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("gigantic")).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");

    editor.exec_command("fontsize", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}

#[test]
fn css_mode_styles_a_span() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("stylewithcss", Some("true")).unwrap();
    editor.exec_command("fontsize", Some("large")).unwrap();
    assert_eq!(
        markup(&editor),
        "<p><span style=\"font-size: large;\">abc</span></p>"
    );
}

#[test]
fn size_seven_uses_a_font_element_even_in_css_mode() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("stylewithcss", Some("true")).unwrap();
    editor.exec_command("fontsize", Some("7")).unwrap();
    assert_eq!(markup(&editor), "<p><font size=\"7\">abc</font></p>");
}

#[test]
fn default_size_dissolves_an_existing_wrapper() {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let font = tree.create_element("font");
    tree.set_attr(font, "size", "7");
    tree.append(p, font);
    let text = tree.create_text("abc");
    tree.append(font, text);
    let mut editor = Editor::new(tree);
    select_all(&mut editor, text, 3);

    editor.exec_command("fontsize", Some("3")).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}
