//! Server-rendered list page.
//!
//! The projected items are embedded twice: as a JSON data island the page
//! script reads on load, and as a plain `<ul>` for clients without scripts.

use crate::api::TodoView;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Todo</title>
</head>
<body>
<h1>Todo</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Make JSON safe to place inside a `<script>` element.
fn escape_json_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_index(todos: &[TodoView]) -> Result<String, serde_json::Error> {
    let data = escape_json_for_script(&serde_json::to_string(todos)?);

    let mut html = String::from(PAGE_HEAD);
    html.push_str("<script id=\"todos-data\" type=\"application/json\">");
    html.push_str(&data);
    html.push_str("</script>\n<ul id=\"todo-list\">\n");
    for todo in todos {
        let class = if todo.done { " class=\"done\"" } else { "" };
        html.push_str(&format!(
            "<li data-id=\"{}\"{class}>{}</li>\n",
            todo.id,
            html_escape::encode_text(&todo.text)
        ));
    }
    html.push_str("</ul>\n");
    html.push_str(PAGE_TAIL);
    Ok(html)
}
