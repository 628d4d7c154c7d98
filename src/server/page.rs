//! HTML rendering for the single form page.

use std::fmt::Write;

use crate::questions::{MARKET_QUESTIONS, STOCK_QUESTIONS};

use super::{Flash, FormState};

const HISTORY_LABEL_CHARS: usize = 60;

const HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Finance Agent</title>
  <style>
    body { font-family: system-ui, -apple-system, sans-serif; max-width: 60rem; margin: 2rem auto;
           padding: 0 1rem; }
    h1 { text-align: center; color: #1f77b4; }
    section { background: #f0f2f6; padding: 1rem 1.25rem; border-radius: 10px; margin: 1rem 0; }
    .flash-ok { border-left: 4px solid #28a745; padding: .5rem 1rem; background: #eaf7ee; }
    .flash-err { border-left: 4px solid #dc3545; padding: .5rem 1rem; background: #fbeaec; }
    .response { white-space: pre-wrap; background: #fff; border-left: 4px solid #28a745;
                padding: 1rem; }
    details { margin: .5rem 0; }
  </style>
</head>
<body>
  <h1>Finance Agent</h1>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Escape text for HTML element content and attribute values.
pub(super) fn escape(raw: &str) -> String {
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

/// First `max` characters of `text`, with an ellipsis when cut.
pub(super) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn select(out: &mut String, label: &str, questions: &[&str]) {
    let _ = write!(
        out,
        "<form method=\"post\" action=\"/ask\"><label>{}<br><select name=\"preset\">",
        escape(label)
    );
    for q in questions {
        let q = escape(q);
        let _ = write!(out, "<option value=\"{q}\">{q}</option>");
    }
    out.push_str("</select></label> <button type=\"submit\">Ask</button></form>\n");
}

pub(super) fn render(state: &FormState) -> String {
    let session = &state.session;
    let mut out = String::from(HEAD);

    match &state.flash {
        Some(Flash::Success(msg)) => {
            let _ = writeln!(out, "  <p class=\"flash-ok\">{}</p>", escape(msg));
        }
        Some(Flash::Error(msg)) => {
            let _ = writeln!(out, "  <p class=\"flash-err\">{}</p>", escape(msg));
        }
        None => {}
    }

    out.push_str(
        "  <section>\n    <h2>API Configuration</h2>\n    \
         <form method=\"post\" action=\"/credential\">\
         <input type=\"password\" name=\"api_key\" placeholder=\"gsk_...\" autocomplete=\"off\"> \
         <button type=\"submit\">Save key</button></form>\n    \
         <p>Get a key from <a href=\"https://console.groq.com/keys\">the Groq console</a>. \
         It is held in memory for this session only.</p>\n  </section>\n",
    );

    if !session.has_credential() {
        out.push_str("  <p>Please enter your Groq API key to get started.</p>\n");
        out.push_str(TAIL);
        return out;
    }

    out.push_str("  <section>\n    <h2>Ask Your Finance Question</h2>\n");
    select(&mut out, "Stock questions", STOCK_QUESTIONS);
    select(&mut out, "Market questions", MARKET_QUESTIONS);
    out.push_str(
        "    <form method=\"post\" action=\"/ask\"><label>Custom question<br>\
         <textarea name=\"custom\" rows=\"3\" cols=\"70\" \
         placeholder=\"e.g., What should I know about investing in renewable energy stocks?\">\
         </textarea>\
         </label><br><button type=\"submit\">Ask</button></form>\n",
    );
    out.push_str(
        "    <h3>Quick Stock Lookup</h3>\n    <form method=\"post\" action=\"/ask\">\
         <input name=\"symbol\" placeholder=\"AAPL, TSLA, MSFT, etc.\"> \
         <button type=\"submit\" name=\"lookup\" value=\"price\">Get Price</button> \
         <button type=\"submit\" name=\"lookup\" value=\"analysis\">Full Analysis</button>\
         </form>\n",
    );
    out.push_str(
        "    <form method=\"post\" action=\"/history/clear\">\
         <button type=\"submit\">Clear History</button></form>\n  </section>\n",
    );

    let history = session.history();
    if let Some(latest) = history.last() {
        let _ = writeln!(
            out,
            "  <section>\n    <h2>Agent Response</h2>\n    \
             <div class=\"response\">{}</div>\n  </section>",
            escape(&latest.response.normalize())
        );
    }

    if !history.is_empty() {
        out.push_str("  <section>\n    <h2>Conversation History</h2>\n");
        for (n, entry) in history.latest_first() {
            let _ = writeln!(
                out,
                "    <details><summary>Q{n}: {}</summary><p><small>Asked at {}</small></p>\
                 <p><strong>Question:</strong> {}</p>\
                 <div class=\"response\">{}</div></details>",
                escape(&truncate_chars(&entry.question, HISTORY_LABEL_CHARS)),
                entry.time_label(),
                escape(&entry.question),
                escape(&entry.response.normalize()),
            );
        }
        out.push_str("  </section>\n");
    }

    out.push_str(TAIL);
    out
}
