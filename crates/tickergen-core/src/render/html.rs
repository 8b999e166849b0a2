use crate::render::ViewModel;

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

const PAGE_TITLE: &str = "Tickers";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:60rem;padding:0 1rem}\
table{border-collapse:collapse;margin-bottom:1.5rem;width:100%}\
td,th{border:1px solid #ccc;padding:.4rem .6rem;text-align:left;vertical-align:top}\
.generated{color:#666}";

/// Expand a view model into a complete HTML document.
pub fn render_html(view: &ViewModel) -> String {
    let mut page = String::with_capacity(4096);

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{PAGE_TITLE}</title>\n"));
    if let Some(analytics_id) = &view.analytics_id {
        push_analytics(&mut page, analytics_id);
    }
    page.push_str(&format!("<style>{STYLE}</style>\n"));
    page.push_str("</head>\n<body>\n");

    page.push_str(&format!("<h1>{PAGE_TITLE}</h1>\n"));
    page.push_str(&format!(
        "<p class=\"generated\">Generated: {}</p>\n",
        escape_html(&view.generation_date)
    ));

    for section in &view.sections {
        page.push_str("<section>\n");
        page.push_str(&format!(
            "<h2>{}</h2>\n",
            escape_html(&section.instrument_type)
        ));

        for table in &section.countries {
            let country = escape_html(&table.country);
            page.push_str(&format!("<h3>{country}</h3>\n"));
            page.push_str("<table>\n<thead><tr><th>Tickers</th><th>Screener</th></tr></thead>\n");
            page.push_str(&format!(
                "<tbody><tr><td>{}</td><td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{country}</a></td></tr></tbody>\n",
                escape_html(&table.tickers),
                escape_html(&table.screener_link),
            ));
            page.push_str("</table>\n");
        }

        page.push_str("</section>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn push_analytics(page: &mut String, analytics_id: &str) {
    let id = escape_html(analytics_id);
    page.push_str(&format!(
        "<script async src=\"https://www.googletagmanager.com/gtag/js?id={id}\"></script>\n"
    ));
    page.push_str(&format!(
        "<script>window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config','{id}');</script>\n"
    ));
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
