// src/render.rs
//
// String-building helpers for the generated pages. Cells are passed through
// verbatim: several of them legitimately carry markup (hrefs, <br/>-joined
// similarity annotations, <select> tallies), so callers own cell content.

pub fn mkhref(text: &str, href: &str) -> String {
    format!("<a href=\"{}\">{}</a>", href, text)
}

pub fn html_table(rows: &[Vec<String>], header: &[&str], class: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("<table class=\"{}\">\n", class));
    out.push_str("<tr>");
    for h in header {
        out.push_str(&format!("<th>{}</th>", h));
    }
    out.push_str("</tr>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body><h1>{title}</h1>\n{body}</body></html>\n"
    )
}

/// One-line summary shown above a publisher-year table.
pub fn pubyear_line(pubid: &str, year: u16, num_puzzles: usize) -> String {
    format!(
        "<p>{}: {} puzzles</p>\n",
        mkhref(&format!("{} {}", pubid, year), &format!("/pub/{}{}", pubid, year)),
        num_puzzles
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mkhref() {
        assert_eq!(
            mkhref("nyt1999-01-03", "/pub/nyt1999-01-03"),
            "<a href=\"/pub/nyt1999-01-03\">nyt1999-01-03</a>"
        );
    }

    #[test]
    fn test_html_table_header_and_rows() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        let html = html_table(&rows, &["H1", "H2"], "puzzle");
        assert!(html.starts_with("<table class=\"puzzle\">"));
        assert!(html.contains("<th>H1</th><th>H2</th>"));
        assert!(html.contains("<td>a</td><td>b</td>"));
        assert!(html.ends_with("</table>\n"));
    }

    #[test]
    fn test_html_page_wraps_title_and_body() {
        let page = html_page("nyt 1999", "<p>hi</p>");
        assert!(page.contains("<title>nyt 1999</title>"));
        assert!(page.contains("<p>hi</p>"));
    }
}
