//! Index page: the question form.

use axum::response::Html;
use flightscope_core::{supported_airports, Airport};
use flightscope_llm::sample_questions;

/// Application title shown on the page.
pub const APP_NAME: &str = "Flights by Country";

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// GET / - Render the question form
pub async fn index() -> Html<String> {
    Html(render_index(supported_airports()))
}

/// Render the form listing `airports`, with one sample-question list per airport.
pub fn render_index(airports: &[Airport]) -> String {
    let options = airports
        .iter()
        .map(|airport| {
            format!(
                "            <option value=\"{}\">{} - {} ({}, {})</option>",
                escape_html(airport.code),
                escape_html(airport.code),
                escape_html(airport.name),
                escape_html(airport.city),
                escape_html(airport.country),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let samples = airports
        .iter()
        .enumerate()
        .map(|(i, airport)| {
            let items = sample_questions(airport)
                .iter()
                .map(|question| format!("            <li>{}</li>", escape_html(question)))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "        <ul data-airport=\"{}\"{}>\n{}\n        </ul>",
                escape_html(airport.code),
                if i == 0 { "" } else { " hidden" },
                items
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    INDEX_TEMPLATE
        .replace("{{app_name}}", &escape_html(APP_NAME))
        .replace("{{airport_options}}", &options)
        .replace("{{sample_questions}}", &samples)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_airport() {
        let html = render_index(supported_airports());
        for airport in supported_airports() {
            assert!(html.contains(&format!("value=\"{}\"", airport.code)));
        }
        assert!(html.contains("<title>Flights by Country</title>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_includes_sample_questions() {
        let html = render_index(supported_airports());
        assert!(html.contains("Dubai International"));
        assert!(html.contains("<li>Сколько рейсов прилетело в Dubai International из Германии?</li>"));
    }

    #[test]
    fn test_render_has_samples_for_each_airport() {
        let html = render_index(supported_airports());
        for airport in supported_airports() {
            assert!(html.contains(&format!("data-airport=\"{}\"", airport.code)));
        }
        assert!(html.contains("<ul data-airport=\"DXB\">"));
        assert!(html.contains("<ul data-airport=\"CDG\" hidden>"));
        assert!(html.contains("<li>Какие авиакомпании чаще всего летают в Charles de Gaulle (Paris)?</li>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
