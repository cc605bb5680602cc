//! Reusable HTML sections for result reports

use crate::decode::decode_numeric_payload;
use crate::figure::script_safe_json;
use crate::traits::Figure;
use crate::types::{CodeItem, TableItem, TextItem};

/// Builders for the per-item report sections
pub struct HtmlComponents;

impl HtmlComponents {
    /// One paragraph per line
    ///
    /// Lines are inserted verbatim so workflows can emit inline markup.
    pub fn text_section(text: &TextItem) -> String {
        let mut parts = vec!["    <div class='section'>".to_string()];
        parts.extend(text.content.iter().map(|line| format!("        <p>{}</p>", line)));
        parts.push("    </div>".to_string());
        parts.join("\n")
    }

    pub fn table_section(table: &TableItem) -> String {
        let mut parts = vec![
            "    <div class='section'>".to_string(),
            format!("        <h2>{}</h2>", html_escape(&table.title)),
            "        <table>".to_string(),
        ];

        let data = &table.data;
        if !data.is_empty() {
            parts.push("            <tr>".to_string());
            parts.extend(
                data.headers()
                    .map(|header| format!("                <th>{}</th>", html_escape(header))),
            );
            parts.push("            </tr>".to_string());

            for row in 0..data.row_count() {
                parts.push("            <tr>".to_string());
                parts.extend(data.row(row).into_iter().map(|cell| {
                    let value = cell.map(ToString::to_string).unwrap_or_default();
                    format!("                <td>{}</td>", html_escape(&value))
                }));
                parts.push("            </tr>".to_string());
            }
        }

        parts.push("        </table>".to_string());
        parts.push("    </div>".to_string());
        parts.join("\n")
    }

    pub fn code_section(code: &CodeItem) -> String {
        [
            "    <div class='section'>".to_string(),
            format!("        <h2>Code ({})</h2>", html_escape(&code.language)),
            format!("        <pre>{}</pre>", html_escape(&code.content.join("\n"))),
            "    </div>".to_string(),
        ]
        .join("\n")
    }

    /// Chart target `div_id` plus the inline script that draws into it
    pub fn plot_section(figure: &dyn Figure, title: Option<&str>, div_id: &str) -> String {
        let payload = decode_numeric_payload(figure.to_exchange_json());

        let mut parts = vec!["    <div class='section'>".to_string()];
        if let Some(title) = title.filter(|title| !title.is_empty()) {
            parts.push(format!("        <h2>{}</h2>", html_escape(title)));
        }
        parts.push(format!("        <div id='{}'></div>", div_id));
        parts.push("        <script>".to_string());
        parts.push(format!("            var plotData = {};", script_safe_json(&payload)));
        parts.push(format!(
            "            Plotly.newPlot('{}', plotData.data, plotData.layout, {{responsive: true}});",
            div_id
        ));
        parts.push("        </script>".to_string());
        parts.push("    </div>".to_string());
        parts.join("\n")
    }
}

/// Escape text for use in HTML element content and attribute values
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
