//! HTML rendering for the single-page research form.

use crate::config::ServerSettings;
use crate::research::ResearchResponse;

/// File name offered for the downloadable report.
pub const REPORT_FILE_NAME: &str = "research_report.txt";

/// What the page shows below the form.
#[derive(Debug)]
pub enum PageState<'a> {
    /// Nothing submitted yet, or an empty submission.
    Idle,
    /// A finished query.
    Success(&'a ResearchResponse),
    /// A failed query, with the error text.
    Error(&'a str),
}

/// Render the whole page.
pub fn render(settings: &ServerSettings, query: &str, state: PageState<'_>) -> String {
    let body = match state {
        PageState::Idle => String::new(),
        PageState::Success(response) => success_panel(response),
        PageState::Error(message) => format!(
            r#"<div class="panel error">Error: {}</div>"#,
            escape_html(message)
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<main>
<h1>{heading}</h1>
<form method="post" action="/">
<label for="query">What can I help you research?</label>
<input id="query" name="query" type="text" value="{query}" placeholder="Enter a research question..." autofocus>
<button type="submit">Run Research</button>
</form>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(&settings.page_title),
        heading = escape_html(&settings.heading),
        css = STYLE,
        query = escape_html(query),
        body = body,
    )
}

fn success_panel(response: &ResearchResponse) -> String {
    let sources = response
        .sources
        .iter()
        .map(|s| format!("<li>{}</li>", source_item(s)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div class="panel success">Research Completed</div>
<section><h2>Topic</h2><p>{topic}</p></section>
<section><h2>Summary</h2><p class="summary">{summary}</p></section>
<section><h2>Sources</h2><ul class="sources">
{sources}
</ul></section>
<section><h2>Tools Used</h2><p>{tools}</p></section>
<a class="download" download="{file}" href="{href}">Download Report (.txt)</a>"#,
        topic = escape_html(&response.topic),
        summary = escape_html(&response.summary),
        sources = sources,
        tools = escape_html(&response.tools_line()),
        file = REPORT_FILE_NAME,
        href = report_data_uri(&response.to_report()),
    )
}

/// Link sources that are web URLs, show the rest as text.
fn source_item(source: &str) -> String {
    let escaped = escape_html(source);
    if source.starts_with("http://") || source.starts_with("https://") {
        format!(r#"<a href="{0}" rel="noopener noreferrer">{0}</a>"#, escaped)
    } else {
        escaped
    }
}

/// Embed the report in a `data:` URI so the server keeps no per-result state.
pub fn report_data_uri(report: &str) -> String {
    format!("data:text/plain;charset=utf-8,{}", urlencoding::encode(report))
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #fafafa; color: #222; }
main { max-width: 46rem; margin: 3rem auto; padding: 0 1rem; }
form { display: flex; flex-direction: column; gap: .5rem; margin-bottom: 1.5rem; }
input[type=text] { padding: .6rem; font-size: 1rem; border: 1px solid #ccc; border-radius: 6px; }
button { align-self: flex-start; padding: .5rem 1rem; font-size: 1rem; border-radius: 6px; border: 1px solid #ff4b4b; background: #fff; color: #ff4b4b; cursor: pointer; }
.panel { padding: .8rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.success { background: #e6f4ea; color: #1e6b34; }
.error { background: #fdecea; color: #8a1c1c; white-space: pre-wrap; }
.summary { white-space: pre-wrap; }
.download { display: inline-block; margin-top: 1rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::{parse_research_response, QUANTUM};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_idle_page_has_form_only() {
        let html = render(&ServerSettings::default(), "", PageState::Idle);
        assert!(html.contains("Run Research"));
        assert!(!html.contains("Research Completed"));
        assert!(!html.contains("class=\"panel error\""));
    }

    #[test]
    fn test_success_page() {
        let response = parse_research_response(QUANTUM).unwrap();
        let html = render(
            &ServerSettings::default(),
            "quantum computing basics",
            PageState::Success(&response),
        );

        assert!(html.contains("Research Completed"));
        assert!(html.contains("<p>Quantum Computing</p>"));
        assert_eq!(html.matches("<li>").count(), 1);
        assert!(html.contains("<p>search</p>"));
        assert!(html.contains(r#"download="research_report.txt""#));
        assert!(html.contains(r#"value="quantum computing basics""#));
    }

    #[test]
    fn test_error_page_has_no_download() {
        let html = render(
            &ServerSettings::default(),
            "q",
            PageState::Error("connection <refused>"),
        );
        assert!(html.contains("Error: connection &lt;refused&gt;"));
        assert!(!html.contains("Research Completed"));
        assert!(!html.contains("download="));
    }

    #[test]
    fn test_report_data_uri_round_trips() {
        let report = "Research Report\n\nTopic:\nA & B\n";
        let uri = report_data_uri(report);
        let encoded = uri.strip_prefix("data:text/plain;charset=utf-8,").unwrap();
        assert!(!encoded.contains(' '));
        assert_eq!(urlencoding::decode(encoded).unwrap(), report);
    }

    #[test]
    fn test_non_url_source_is_plain_text() {
        assert_eq!(source_item("Smith 2020"), "Smith 2020");
        assert!(source_item("https://example.org").starts_with("<a href="));
    }
}
