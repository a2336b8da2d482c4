//! Server-rendered booking wizard.
//!
//! One route, `GET /`, renders whichever step the `UiState` in the query
//! string names. Every control is a plain GET form that carries the state
//! forward in hidden fields, so the server holds no session.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::state::{AppState, SiteMeta};
use crate::view::{UiState, WizardStep};

pub mod booking;
pub mod results;
pub mod search_form;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(page))
}

async fn page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let ui = UiState::from_pairs(&pairs);
    tracing::debug!(step = ui.step.slug(), seed = ?ui.seed, "Rendering page");

    match ui.step {
        WizardStep::Search => search_form::render(&state, &ui, None),
        WizardStep::Results => results::render(&state, ui, None),
        WizardStep::Review => booking::render_review(&state, ui),
        WizardStep::Payment => booking::render_payment(&state, ui),
    }
}

// ============================================================================
// Layout
// ============================================================================

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f3f4f6; color: #111827; }
main { max-width: 56rem; margin: 0 auto; padding: 1.5rem; }
header.brand { display: flex; align-items: center; gap: .5rem; color: #2563eb; font-size: 1.5rem; font-weight: 700; margin-bottom: 1.5rem; }
.card { background: #fff; border-radius: .75rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); padding: 1.5rem; margin-bottom: 1rem; }
.steps { display: flex; gap: .5rem; list-style: none; padding: 0; margin: 0 0 1.5rem; }
.steps li { flex: 1; text-align: center; padding: .5rem; border-radius: .5rem; background: #e5e7eb; color: #6b7280; font-size: .875rem; }
.steps li.done { background: #dbeafe; color: #1d4ed8; }
.steps li.current { background: #2563eb; color: #fff; font-weight: 600; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1rem; }
label { display: block; font-size: .875rem; font-weight: 500; margin-bottom: .25rem; }
select, input[type=date] { width: 100%; padding: .5rem; border: 1px solid #d1d5db; border-radius: .375rem; background: #fff; }
.trip-toggle { display: flex; gap: 1rem; margin-bottom: 1rem; }
.trip-toggle label { flex: 1; text-align: center; padding: .5rem; border: 1px solid #2563eb; border-radius: .375rem; cursor: pointer; }
.trip-toggle input { display: none; }
.trip-toggle input:checked + span { font-weight: 700; color: #2563eb; }
form.search:has(#trip-one-way:checked) .return-date { display: none; }
button { padding: .6rem 1.2rem; border: 0; border-radius: .375rem; background: #2563eb; color: #fff; font-weight: 600; cursor: pointer; }
button.secondary { background: #e5e7eb; color: #111827; }
button:disabled { background: #9ca3af; cursor: not-allowed; }
.wide { width: 100%; margin-top: 1.5rem; }
.error { background: #fee2e2; color: #991b1b; border-radius: .375rem; padding: .75rem 1rem; margin-bottom: 1rem; }
.notice { background: #fef3c7; color: #92400e; border-radius: .375rem; padding: .75rem 1rem; margin-bottom: 1rem; }
.flight { display: flex; align-items: center; justify-content: space-between; gap: 1rem; }
.flight.selected { outline: 2px solid #2563eb; }
.carrier { display: flex; align-items: center; gap: .75rem; min-width: 10rem; }
.badge { display: inline-flex; align-items: center; justify-content: center; width: 2.5rem; height: 2.5rem; border-radius: .5rem; color: #fff; font-weight: 700; font-size: .8rem; position: relative; overflow: hidden; }
.badge img { position: absolute; inset: 0; width: 100%; height: 100%; object-fit: contain; background: #fff; }
.time { text-align: center; }
.time strong { display: block; font-size: 1.1rem; }
.muted { color: #6b7280; font-size: .875rem; }
.price strong { display: block; font-size: 1.1rem; }
.controls { display: flex; flex-wrap: wrap; gap: 1.5rem; align-items: flex-end; }
.controls fieldset { border: 0; padding: 0; margin: 0; }
table.rules { width: 100%; border-collapse: collapse; font-size: .875rem; }
table.rules td { padding: .35rem 0; border-bottom: 1px solid #f3f4f6; }
.total { display: flex; justify-content: space-between; font-size: 1.2rem; font-weight: 700; }
"#;

/// Wrap page content in the document shell
pub(crate) fn layout(site: &SiteMeta, step: WizardStep, body: &str) -> String {
    let title = encode_text(&site.title);
    let icon = encode_text(&site.icon);
    // The favicon is an inline SVG data URL, so the icon is percent-encoded
    let icon_href = urlencoding::encode(&site.icon);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon_href}</text></svg>">
<style>{STYLE}</style>
</head>
<body>
<main>
<header class="brand"><span>{icon}</span><span>{title}</span></header>
{steps}
{body}
</main>
</body>
</html>"#,
        steps = step_indicator(step),
    )
}

fn step_indicator(current: WizardStep) -> String {
    let position = |step: WizardStep| WizardStep::ALL.iter().position(|s| *s == step).unwrap_or(0);
    let items: String = WizardStep::ALL
        .iter()
        .map(|step| {
            let class = match position(*step).cmp(&position(current)) {
                std::cmp::Ordering::Less => "done",
                std::cmp::Ordering::Equal => "current",
                std::cmp::Ordering::Greater => "",
            };
            format!(r#"<li class="{class}">{}</li>"#, step.label())
        })
        .collect();
    format!(r#"<ol class="steps">{items}</ol>"#)
}

pub(crate) fn html_response(status: StatusCode, html: String) -> Response {
    (status, Html(html)).into_response()
}

/// Hidden inputs carrying `ui` forward, minus the keys the form sets itself
pub(crate) fn hidden_inputs(ui: &UiState, skip: &[&str]) -> String {
    ui.to_pairs()
        .into_iter()
        .filter(|(key, _)| !skip.contains(key))
        .map(|(key, value)| format!(r#"<input type="hidden" name="{key}" value="{}">"#, encode_double_quoted_attribute(&value)))
        .collect()
}

// ============================================================================
// Formatting
// ============================================================================

/// Rupees with Indian digit grouping: `₹1,23,456`
pub(crate) fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("₹{},{}", groups.join(","), tail)
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%a, %d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(4_999), "₹4,999");
        assert_eq!(format_inr(35_000), "₹35,000");
        assert_eq!(format_inr(123_456), "₹1,23,456");
        assert_eq!(format_inr(31_500_000), "₹3,15,00,000");
    }

    #[test]
    fn test_layout_encodes_site_meta() {
        let site = SiteMeta {
            title: "Fly <Fast> & Far".to_string(),
            icon: "#%".to_string(),
        };
        let html = layout(&site, WizardStep::Search, "");
        assert!(html.contains("<title>Fly &lt;Fast&gt; &amp; Far</title>"));
        assert!(html.contains("font-size=%2290%22>%23%25</text>"));
        assert!(!html.contains(">#%</text>"));
        assert!(html.contains("<span>#%</span>"));
    }

    #[test]
    fn test_step_indicator_marks_progress() {
        let html = step_indicator(WizardStep::Review);
        assert!(html.contains(r#"<li class="done">Search</li>"#));
        assert!(html.contains(r#"<li class="done">Flights</li>"#));
        assert!(html.contains(r#"<li class="current">Review</li>"#));
        assert!(html.contains(r#"<li class="">Payment</li>"#));
    }

    #[test]
    fn test_hidden_inputs_skip_keys() {
        let mut ui = UiState {
            seed: Some(5),
            ..Default::default()
        };
        ui.search.origin = r#""><script>"#.to_string();
        let html = hidden_inputs(&ui, &["step", "sort"]);
        assert!(html.contains(r#"name="seed" value="5""#));
        assert!(html.contains(r#"name="origin" value="&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains(r#"name="step""#));
        assert!(!html.contains(r#"name="sort""#));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(format_date(date), "Wed, 25 Dec 2024");
    }
}
