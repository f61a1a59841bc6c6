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
fn createlink_wraps_the_selection_in_an_anchor() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor
        .exec_command("createlink", Some("http://x.example/"))
        .unwrap();
    assert_eq!(
        markup(&editor),
        "<p><a href=\"http://x.example/\">abc</a></p>"
    );
}

#[test]
fn createlink_rewrites_an_enclosing_anchor_in_place() {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let a = tree.create_element("a");
    tree.set_attr(a, "href", "http://a.example/");
    tree.append(p, a);
    let ab = tree.create_text("ab");
    tree.append(a, ab);
    let b = tree.create_element("b");
    tree.append(a, b);
    let cd = tree.create_text("cd");
    tree.append(b, cd);
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(cd, 0, cd, 2));

    editor
        .exec_command("createlink", Some("http://new.example/"))
        .unwrap();
    assert_eq!(
        markup(&editor),
        "<p><a href=\"http://new.example/\">ab<b>cd</b></a></p>"
    );
}

#[test]
fn createlink_without_a_url_does_nothing() {
    let (tree, _, text) = paragraph_doc("abc");
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(text, 0, text, 3));

    editor.exec_command("createlink", Some("")).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");

    editor.exec_command("createlink", None).unwrap();
    assert_eq!(markup(&editor), "<p>abc</p>");
}

#[test]
fn unlink_removes_the_anchor_and_keeps_its_text() {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let a = tree.create_element("a");
    tree.set_attr(a, "href", "http://x.example/");
    tree.append(p, a);
    let x = tree.create_text("x");
    tree.append(a, x);
    let rest = tree.create_text("b");
    tree.append(p, rest);
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(p, 0, p, 2));

    editor.exec_command("unlink", None).unwrap();
    assert_eq!(markup(&editor), "<p>xb</p>");
    assert_eq!(editor.selection(), Some(&Range::new(p, 0, p, 2)));
}

#[test]
fn unlink_keeps_nested_formatting() {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let a = tree.create_element("a");
    tree.set_attr(a, "href", "http://x.example/");
    tree.append(p, a);
    let b = tree.create_element("b");
    tree.append(a, b);
    let x = tree.create_text("x");
    tree.append(b, x);
    let mut editor = Editor::new(tree);
    editor.set_selection(Range::new(p, 0, p, 1));

    editor.exec_command("unlink", None).unwrap();
    assert_eq!(markup(&editor), "<p><b>x</b></p>");
}
