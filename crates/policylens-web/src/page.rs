//! HTML pages for the browser form.
//!
//! Pages are plain strings built with `format!`; every piece of user text
//! goes through [`escape_html`]. The model's Markdown is rendered by
//! [`render_markdown`], with any raw HTML in it shown as text.

use policylens_analyzer::AnalysisReport;
use pulldown_cmark::{html, Event, Options, Parser};

/// Page and form title
pub const TITLE: &str = "Privacy Policy Check with Gemini AI";

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render model Markdown to HTML. Raw HTML blocks and inline tags are
/// emitted as escaped text.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, events);
    rendered
}

/// Kind of banner shown above the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Missing input; the user only needs to fill something in
    Warning,
    /// The run failed
    Error,
}

impl Notice {
    fn class(self) -> &'static str {
        match self {
            Notice::Warning => "notice warning",
            Notice::Error => "notice error",
        }
    }
}

/// The empty upload form
pub fn render_form() -> String {
    layout(&form())
}

/// The form with a warning or error banner above it
pub fn render_notice(notice: Notice, message: &str) -> String {
    let body = format!(
        "<div class=\"{}\" role=\"alert\">{}</div>\n{}",
        notice.class(),
        escape_html(message),
        form()
    );
    layout(&body)
}

/// A finished analysis below the form, preceded by the run's progress
/// messages and warnings
pub fn render_report(
    report: &AnalysisReport,
    statuses: &[String],
    warnings: &[String],
) -> String {
    let mut body = form();

    if !statuses.is_empty() {
        body.push_str("<ul class=\"statuses\">\n");
        for status in statuses {
            body.push_str(&format!("<li>{}</li>\n", escape_html(status)));
        }
        body.push_str("</ul>\n");
    }

    for warning in warnings {
        body.push_str(&format!(
            "<div class=\"notice warning\">{}</div>\n",
            escape_html(warning)
        ));
    }

    body.push_str("<section class=\"results\">\n<h2>Analysis Results</h2>\n");
    body.push_str(&format!(
        "<article class=\"report\">\n{}</article>\n",
        render_markdown(&report.markdown)
    ));

    let meta = &report.metadata;
    let references = meta
        .references
        .iter()
        .map(|name| escape_html(name))
        .collect::<Vec<_>>()
        .join(", ");
    body.push_str(&format!(
        "<p class=\"meta\">{} analyzed by {} against {} in {} ms (run {})</p>\n</section>\n",
        escape_html(&meta.policy_file),
        escape_html(&meta.model),
        references,
        meta.processing_time_ms,
        report.run_id
    ));

    layout(&body)
}

fn form() -> String {
    format!(
        r#"<form id="analyze" method="post" action="/analyze" enctype="multipart/form-data">
<label for="api_key">Enter your Gemini API Key:</label>
<input type="password" id="api_key" name="api_key" autocomplete="off">
<h3>1. Upload the company's Privacy Policy</h3>
<label for="policy">Choose a file (.pdf, .docx, .txt)</label>
<input type="file" id="policy" name="policy" accept="{accept}">
<button type="submit" id="submit" disabled>Analyze Policy</button>
<p id="status" hidden>Processing... Please wait a moment.</p>
</form>
"#,
        accept = ".pdf,.docx,.txt"
    )
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }}
form {{ display: grid; gap: 0.5rem; margin-bottom: 2rem; }}
.notice {{ padding: 0.75rem; border-radius: 4px; margin-bottom: 1rem; }}
.warning {{ background: #fff4d6; }}
.error {{ background: #fde2e1; }}
.statuses {{ color: #245; background: #e6f0fa; padding: 0.75rem 2rem; border-radius: 4px; }}
.report table {{ border-collapse: collapse; }}
.report th, .report td {{ border: 1px solid #ccc; padding: 0.25rem 0.5rem; }}
.meta {{ color: #666; font-size: 0.85rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}
<script>
const apiKey = document.getElementById("api_key");
const policy = document.getElementById("policy");
const submit = document.getElementById("submit");
function updateSubmit() {{
  submit.disabled = apiKey.value.trim() === "" || policy.files.length === 0;
}}
apiKey.addEventListener("input", updateSubmit);
policy.addEventListener("change", updateSubmit);
updateSubmit();
document.getElementById("analyze").addEventListener("submit", function () {{
  submit.disabled = true;
  document.getElementById("status").hidden = false;
}});
</script>
</body>
</html>
"#,
        title = TITLE,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use policylens_analyzer::AnalysisMetadata;
    use policylens_domain::RunId;

    fn report(markdown: &str) -> AnalysisReport {
        AnalysisReport {
            run_id: RunId::new(),
            markdown: markdown.to_string(),
            metadata: AnalysisMetadata {
                policy_file: "policy.txt".to_string(),
                model: "mock-model".to_string(),
                references: vec!["decree13.txt".to_string()],
                skipped_references: Vec::new(),
                policy_chars: 16,
                prompt_bytes: 100,
                processing_time_ms: 5,
            },
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_form_page() {
        let page = render_form();
        assert!(page.contains("<title>Privacy Policy Check with Gemini AI</title>"));
        assert!(page.contains(r#"name="api_key""#));
        assert!(page.contains(r#"accept=".pdf,.docx,.txt""#));
        assert!(page.contains("1. Upload the company's Privacy Policy"));
    }

    #[test]
    fn test_submit_starts_disabled() {
        let page = render_form();
        assert!(page.contains(
            r#"<button type="submit" id="submit" disabled>Analyze Policy</button>"#
        ));
        assert!(page.contains(r#"apiKey.value.trim() === """#));
        assert!(page.contains("policy.files.length === 0"));
    }

    #[test]
    fn test_markdown_is_rendered() {
        let rendered = render_markdown("## Summary\n**bold** text");
        assert!(rendered.contains("<h2>Summary</h2>"));
        assert!(rendered.contains("<strong>bold</strong> text"));
    }

    #[test]
    fn test_markdown_table() {
        let rendered = render_markdown("| Area | Score |\n|---|---|\n| Consent | 7/10 |\n");
        assert!(rendered.contains("<table>"));
        assert!(rendered.contains("<td>Consent</td>"));
    }

    #[test]
    fn test_report_is_escaped() {
        let page = render_report(
            &report("## Summary\n<script>alert(1)</script>\n\nSee <b>this</b>."),
            &[],
            &[],
        );
        assert!(page.contains("<h2>Analysis Results</h2>"));
        assert!(page.contains("<h2>Summary</h2>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("See &lt;b&gt;this&lt;/b&gt;."));
        assert!(!page.contains("<script>alert(1)"));
        assert!(!page.contains("<b>this</b>"));
    }

    #[test]
    fn test_report_warnings() {
        let warnings = vec!["Skipping reference file broken.pdf: bad".to_string()];
        let page = render_report(&report("ok"), &[], &warnings);
        assert!(page.contains("Skipping reference file broken.pdf: bad"));
        assert!(!page.contains(r#"class="statuses""#));
    }

    #[test]
    fn test_report_statuses() {
        let statuses = vec![
            "Reading reference file: decree13.txt".to_string(),
            "Sending request to mock-model... This may take a moment.".to_string(),
        ];
        let page = render_report(&report("ok"), &statuses, &[]);
        assert!(page.contains(r#"<ul class="statuses">"#));
        assert!(page.contains("<li>Reading reference file: decree13.txt</li>"));
        assert!(page.contains("<li>Sending request to mock-model... This may take a moment.</li>"));
        let statuses_at = page.find("class=\"statuses\"").unwrap();
        assert!(statuses_at < page.find("Analysis Results").unwrap());
    }

    #[test]
    fn test_notice_classes() {
        let page = render_notice(Notice::Warning, "Please upload a policy file.");
        assert!(page.contains(r#"<div class="notice warning" role="alert">Please upload a policy file.</div>"#));

        let page = render_notice(Notice::Error, "boom");
        assert!(page.contains(r#"class="notice error""#));
    }
}
