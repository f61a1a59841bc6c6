use scribe_dom::DomTree;

#[test]
fn elements_text_and_attributes() {
    let mut tree = DomTree::new();
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    tree.set_attr(p, "id", "intro");
    let text = tree.create_text("hello ");
    tree.append(p, text);
    let b = tree.create_element("b");
    tree.append(p, b);
    let world = tree.create_text("world");
    tree.append(b, world);

    assert_eq!(
        tree.outer_markup(p),
        "<p id=\"intro\">hello <b>world</b></p>"
    );
    assert_eq!(tree.inner_markup(p), "hello <b>world</b>");
    assert_eq!(tree.inner_markup(tree.root()), tree.outer_markup(p));
}

#[test]
fn void_elements_have_no_end_tag() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    tree.append(tree.root(), div);
    let img = tree.create_element("img");
    tree.set_attr(img, "src", "cat.png");
    tree.append(div, img);
    let br = tree.create_element("br");
    tree.append(div, br);

    assert_eq!(
        tree.outer_markup(div),
        "<div><img src=\"cat.png\"><br></div>"
    );
}

#[test]
fn style_attribute_reflects_declarations() {
    let mut tree = DomTree::new();
    let span = tree.create_element("span");
    tree.append(tree.root(), span);
    tree.set_style_value(span, "color", "red");
    tree.set_style_value(span, "font-weight", "bold");

    assert_eq!(
        tree.outer_markup(span),
        "<span style=\"color: red; font-weight: bold;\"></span>"
    );
}

#[test]
fn text_and_attribute_escaping() {
    let mut tree = DomTree::new();
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    tree.set_attr(p, "title", "a \"b\" & c");
    let text = tree.create_text("1 < 2 && 3 > 2");
    tree.append(p, text);

    assert_eq!(
        tree.outer_markup(p),
        "<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp;&amp; 3 &gt; 2</p>"
    );
}

#[test]
fn comments_and_doctype() {
    let mut tree = DomTree::new();
    let doctype = tree.create_doctype("html");
    tree.append(tree.root(), doctype);
    let html = tree.create_element("html");
    tree.append(tree.root(), html);
    let note = tree.create_comment("note");
    tree.append(html, note);

    assert_eq!(
        tree.inner_markup(tree.root()),
        "<!DOCTYPE html><html><!--note--></html>"
    );
}
