// src/dot.rs

//! Small helpers for writing GraphViz DOT text.

use crate::config::Settings;
use crate::model::BallColor;

pub const NODE_COLOR: &str = "black";
pub const DISABLED_NODE_COLOR: &str = "gray";

/// Quote `id` as a DOT string, escaping `"` and `\`.
pub fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Escape text placed inside an HTML-like `label=<...>`.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<td>` holding the status icon, or nothing when icons are switched off.
pub fn icon_cell(settings: &Settings, color: BallColor) -> String {
    if !settings.draw_balls {
        return String::new();
    }
    let src = match settings.image_path.as_deref() {
        Some(dir) if !dir.is_empty() => {
            format!("{}/{}", dir.trim_end_matches('/'), color.image())
        }
        _ => color.image(),
    };
    format!("<td><img src=\"{}\" /></td>", escape_html(&src))
}

/// Single-row borderless table used as a node label.
pub fn table_label(cells: &str) -> String {
    format!("<table border=\"0\"><tr>{cells}</tr></table>")
}
