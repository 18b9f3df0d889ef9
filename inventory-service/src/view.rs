use std::fmt::Write;

use shared::ListingPage;

/// Renders the listing page with its request form.
pub fn render_listing(page: &ListingPage) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Part Inventory</title>\n</head>\n<body>\n<h1>Part Inventory</h1>\n",
    );

    if !page.message.is_empty() {
        let _ = writeln!(html, "<p class=\"message\">{}</p>", escape(&page.message));
    }

    html.push_str("<table>\n<tr><th>Part No</th><th>Quantity</th></tr>\n");
    for part in &page.partlist {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&part.part_no),
            part.quant
        );
    }
    html.push_str("</table>\n");

    html.push_str(concat!(
        "<form method=\"post\" action=\"/requestparts\">\n",
        "<label>Part No <input type=\"text\" name=\"part_requested\"></label>\n",
        "<label>Quantity <input type=\"text\" name=\"amount_requested\"></label>\n",
        "<button type=\"submit\">Request Parts</button>\n",
        "</form>\n</body>\n</html>\n",
    ));
    html
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
