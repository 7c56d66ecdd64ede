//! Server-rendered wish wall page

use crate::types::Wish;

/// Escape a string for HTML text content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the wish wall page.
///
/// The list is rendered server-side and also embedded as `window.WISHES`
/// for client-side effects.
pub fn render_page(wishes: &[Wish], wish_entry_url: Option<&str>) -> String {
    // `<` escaped so a wish cannot break out of the script tag
    let wishes_json = serde_json::to_string(wishes)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c");

    let mut items = String::new();
    for wish in wishes {
        let author = if wish.author.is_empty() {
            "匿名"
        } else {
            wish.author.as_str()
        };
        items.push_str(&format!(
            "      <li class=\"wish\"><span class=\"content\">{}</span><span class=\"author\">{}</span></li>\n",
            escape_html(&wish.content),
            escape_html(author)
        ));
    }
    if wishes.is_empty() {
        items.push_str("      <li class=\"empty\">还没有愿望，来许下第一个吧</li>\n");
    }

    let entry_link = wish_entry_url
        .map(|url| {
            format!(
                "    <a class=\"entry\" href=\"{}\" target=\"_blank\" rel=\"noopener\">我也要许愿</a>\n",
                escape_html(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>许愿池</title>
  <style>
    body {{ margin: 0; font-family: system-ui, sans-serif; background: #7a1c1c; color: #fff; }}
    main {{ max-width: 640px; margin: 0 auto; padding: 2rem 1rem; }}
    h1 {{ text-align: center; }}
    .entry {{ display: block; text-align: center; color: #ffd98a; margin-bottom: 1.5rem; }}
    ul {{ list-style: none; padding: 0; }}
    .wish {{ background: rgba(255, 255, 255, 0.08); border-radius: 8px; padding: 0.75rem 1rem; margin-bottom: 0.5rem; }}
    .author {{ float: right; opacity: 0.7; }}
    .empty {{ text-align: center; opacity: 0.7; }}
  </style>
</head>
<body>
  <main>
    <h1>许愿池</h1>
{entry_link}    <ul id="wishes">
{items}    </ul>
  </main>
  <script>window.WISHES = {wishes_json};</script>
</body>
</html>
"#
    )
}
