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

#[test]
fn bold_wraps_in_b_and_toggles_off() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    assert!(!editor.query_state("bold").unwrap());
    editor.exec_command("bold", None).unwrap();
    assert_eq!(markup(&editor), "<p><b>abc</b></p>");
    assert!(editor.query_state("bold").unwrap());

    editor.exec_command("bold", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
    assert!(!editor.query_state("bold").unwrap());
}

#[test]
fn italic_wraps_existing_inline_content() {
    let (mut tree, p, _) = paragraph_doc("hello ");
    let b = tree.create_element("b");
    tree.append(p, b);
    let world = tree.create_text("world");
    tree.append(b, world);
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(p, 0, p, 2));

    editor.exec_command("italic", None).unwrap();
    assert_eq!(markup(&editor), "<p><i>hello <b>world</b></i></p>");
    assert!(editor.query_state("italic").unwrap());

    editor.exec_command("italic", None).unwrap();
    assert_eq!(markup(&editor), "<p>hello <b>world</b></p>");
    assert!(!editor.query_state("italic").unwrap());
}

#[test]
fn strikethrough_uses_s_element() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor.exec_command("strikethrough", None).unwrap();
    assert_eq!(markup(&editor), "<p><s>abc</s></p>");
    assert!(editor.query_state("strikethrough").unwrap());

    editor.exec_command("strikethrough", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}

#[test]
fn underline_uses_u_element() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor.exec_command("underline", None).unwrap();
    assert_eq!(markup(&editor), "<p><u>abc</u></p>");
    assert!(editor.query_state("underline").unwrap());

    editor.exec_command("underline", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}

#[test]
fn subscript_toggles_through_sub_element() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor.exec_command("subscript", None).unwrap();
    assert_eq!(markup(&editor), "<p><sub>abc</sub></p>");
    assert!(editor.query_state("subscript").unwrap());
    assert!(!editor.query_state("superscript").unwrap());

    editor.exec_command("subscript", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}

#[test]
fn superscript_replaces_subscript() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor.exec_command("subscript", None).unwrap();
    editor.exec_command("superscript", None).unwrap();
    assert_eq!(markup(&editor), "<p><sup>abc</sup></p>");
    assert!(editor.query_state("superscript").unwrap());
    assert!(!editor.query_state("subscript").unwrap());
}

#[test]
fn bold_in_css_mode_styles_a_span() {
    let (tree, p, text) = paragraph_doc("abcde");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 1, text, 4));

    editor.exec_command("stylewithcss", Some("true")).unwrap();
    editor.exec_command("bold", None).unwrap();
    assert_eq!(
        markup(&editor),
        "<p>a<span style=\"font-weight: bold;\">bcd</span>e</p>"
    );

    // The selection ends up over the split-off text inside the span.
    let doc = editor.doc();
    let span = doc.child(p, 1).unwrap();
    let bcd = doc.first_child(span).unwrap();
    assert_eq!(doc.data(bcd), Some("bcd"));
    assert_eq!(editor.selection(), Some(&Range::new(bcd, 0, bcd, 3)));
    assert!(editor.query_state("bold").unwrap());
}

#[test]
fn partial_bold_leaves_rest_untouched() {
    let (tree, _, text) = paragraph_doc("abcde");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 1, text, 4));

    editor.exec_command("bold", None).unwrap();
    assert_eq!(markup(&editor), "<p>a<b>bcd</b>e</p>");

    editor.exec_command("bold", None).unwrap();
    assert_eq!(markup(&editor), "<p>abcde</p>");
}

#[test]
fn state_is_false_when_only_part_of_the_selection_is_bold() {
    let (mut tree, p, _) = paragraph_doc("plain ");
    let b = tree.create_element("b");
    tree.append(p, b);
    let strong = tree.create_text("loud");
    tree.append(b, strong);
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(p, 0, p, 2));

    assert!(!editor.query_state("bold").unwrap());

    // Bolding the mixed selection makes the whole of it bold.
    editor.exec_command("bold", None).unwrap();
    assert_eq!(markup(&editor), "<p><b>plain loud</b></p>");
    assert!(editor.query_state("bold").unwrap());
}

#[test]
fn collapsed_selection_is_a_no_op() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 1, text, 1));

    editor.exec_command("bold", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}

#[test]
fn non_editable_content_is_left_alone() {
    let mut tree = DomTree::new();
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let text = tree.create_text("abc");
    tree.append(p, text);
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor.exec_command("bold", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}

#[test]
fn contenteditable_host_makes_content_editable() {
    let mut tree = DomTree::new();
    let host = tree.create_element("div");
    tree.set_attr(host, "contenteditable", "");
    tree.append(tree.root(), host);
    let p = tree.create_element("p");
    tree.append(host, p);
    let text = tree.create_text("abc");
    tree.append(p, text);
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor.exec_command("bold", None).unwrap();
    assert_eq!(
        markup(&editor),
        "<div contenteditable=\"\"><p><b>abc</b></p></div>"
    );
}
