//! Static HTML report generation.
//!
//! Both dashboards are self-contained documents with inline CSS and
//! JavaScript; filtering and expand/collapse run entirely client-side. All
//! workbook-sourced text passes through [`escape_html`] before
//! interpolation.

pub mod initiatives;
pub mod targets;

/// Escape text for interpolation into HTML element content or a quoted
/// attribute value.
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
