use axum::{http::StatusCode, response::Response};
use skyway_catalog::{Airline, FareClass};
use skyway_core::{LegKind, SearchCriteria, SearchLeg};
use skyway_offer::{fresh_seed, Flight, SortKey};

use super::{format_date, format_inr, hidden_inputs, html_response, layout, search_form};
use crate::state::AppState;
use crate::view::{UiState, WizardStep};

/// Validate the search, regenerate its flights from the seed and render the
/// filtered lists. An invalid search goes back to the form with the message.
pub fn render(state: &AppState, mut ui: UiState, notice: Option<&str>) -> Response {
    let criteria = match ui.search.validate(&state.policy) {
        Ok(criteria) => criteria,
        Err(err) => {
            tracing::info!("Search rejected: {}", err);
            return search_form::render(state, &ui.with_step(WizardStep::Search), Some(&err.to_string()));
        }
    };

    ui.step = WizardStep::Results;
    let seed = *ui.seed.get_or_insert_with(|| {
        let seed = fresh_seed();
        tracing::info!(seed, "Starting new search");
        seed
    });

    let results = state.search(&criteria, seed);
    let shown = results.refine(&ui.filter, ui.sort);

    let mut body = String::new();
    body.push_str(&summary(&criteria, &ui));
    if let Some(msg) = notice {
        body.push_str(&format!(r#"<div class="notice">{}</div>"#, html_escape::encode_text(msg)));
    }
    body.push_str(&controls(&ui));
    body.push_str(&leg_section(&criteria.outbound(), &shown.outbound, results.outbound.len(), &ui, &criteria));
    if let (Some(leg), Some(flights)) = (criteria.inbound(), shown.inbound.as_deref()) {
        let total = results.inbound.as_ref().map_or(0, Vec::len);
        body.push_str(&leg_section(&leg, flights, total, &ui, &criteria));
    }
    if ui.selection_complete() {
        body.push_str(&format!(
            r#"<form method="get" action="/">{}<button type="submit" class="wide">Continue to review</button></form>"#,
            hidden_inputs(&ui.with_step(WizardStep::Review), &[]),
        ));
    }

    html_response(StatusCode::OK, layout(&state.site, WizardStep::Results, &body))
}

fn summary(criteria: &SearchCriteria, ui: &UiState) -> String {
    let return_part = criteria
        .return_date
        .map(|date| format!(" · returning {}", format_date(date)))
        .unwrap_or_default();
    let plural = if criteria.passengers > 1 { "s" } else { "" };

    format!(
        r#"<section class="card search-summary">
<strong>{origin} → {destination}</strong>
<div class="muted">{trip} · {departure}{return_part} · {passengers} Adult{plural}</div>
<form method="get" action="/">{hidden}<input type="hidden" name="step" value="search"><button type="submit" class="secondary">Modify search</button></form>
</section>"#,
        origin = criteria.origin.label(),
        destination = criteria.destination.label(),
        trip = criteria.trip_type,
        departure = format_date(criteria.departure_date),
        passengers = criteria.passengers,
        hidden = hidden_inputs(ui, &["step", "seed", "outbound", "inbound"]),
    )
}

fn controls(ui: &UiState) -> String {
    let sorts: String = SortKey::ALL
        .iter()
        .map(|key| {
            let selected = if *key == ui.sort { " selected" } else { "" };
            format!(r#"<option value="{}"{selected}>{}</option>"#, key.slug(), key.label())
        })
        .collect();

    let airlines: String = Airline::ALL
        .iter()
        .map(|airline| {
            let checked = if ui.filter.airlines.contains(airline) { " checked" } else { "" };
            format!(
                r#"<label><input type="checkbox" name="airline" value="{}"{checked}> {}</label>"#,
                airline.code(),
                airline.name()
            )
        })
        .collect();

    let classes: String = FareClass::ALL
        .iter()
        .map(|class| {
            let checked = if ui.filter.fare_classes.contains(class) { " checked" } else { "" };
            format!(
                r#"<label><input type="checkbox" name="class" value="{}"{checked}> {}</label>"#,
                class.slug(),
                class.name()
            )
        })
        .collect();

    format!(
        r#"<section class="card">
<form class="controls" method="get" action="/">
{hidden}
<div><label for="sort">Sort by</label><select id="sort" name="sort">{sorts}</select></div>
<fieldset><legend>Airlines</legend>{airlines}</fieldset>
<fieldset><legend>Class</legend>{classes}</fieldset>
<button type="submit">Apply</button>
</form>
</section>"#,
        hidden = hidden_inputs(ui, &["sort", "airline", "class"]),
    )
}

fn leg_section(leg: &SearchLeg, flights: &[Flight], total: usize, ui: &UiState, criteria: &SearchCriteria) -> String {
    let (title, id) = match leg.kind {
        LegKind::Outbound => ("Departing flights", "outbound"),
        LegKind::Return => ("Return flights", "inbound"),
    };

    let cards: String = if flights.is_empty() {
        r#"<p class="muted">No flights match your filters</p>"#.to_string()
    } else {
        flights
            .iter()
            .map(|flight| {
                let selected = match leg.kind {
                    LegKind::Outbound => ui.outbound == Some(flight.index),
                    LegKind::Return => ui.inbound == Some(flight.index),
                };
                let action = book_button(flight, leg.kind, ui);
                flight_card(flight, criteria.passengers, selected, &action)
            })
            .collect()
    };

    format!(
        r#"<section id="{id}">
<h2>{title}</h2>
<p class="muted">{origin} → {destination} · {date} · showing {shown} of {total}</p>
{cards}
</section>"#,
        origin = leg.origin.label(),
        destination = leg.destination.label(),
        date = format_date(leg.date),
        shown = flights.len(),
    )
}

/// "Book Now" records the selection and moves on to review once every
/// required leg has one.
fn book_button(flight: &Flight, kind: LegKind, ui: &UiState) -> String {
    let mut next = ui.clone();
    match kind {
        LegKind::Outbound => next.outbound = Some(flight.index),
        LegKind::Return => next.inbound = Some(flight.index),
    }
    next.step = if next.selection_complete() { WizardStep::Review } else { WizardStep::Results };

    format!(
        r#"<form method="get" action="/">{}<button type="submit">Book Now</button></form>"#,
        hidden_inputs(&next, &[])
    )
}

/// Result card shared by the results and review pages
pub(crate) fn flight_card(flight: &Flight, passengers: u32, selected: bool, action: &str) -> String {
    let airline = flight.airline;
    let logo = airline
        .logo_url()
        .map(|url| format!(r#"<img src="{url}" alt="" loading="lazy" onerror="this.remove()">"#))
        .unwrap_or_default();
    let next_day = if flight.arrives_next_day() { r#" <sup class="muted">+1</sup>"# } else { "" };
    let total = if passengers > 1 {
        format!(
            r#"<span class="muted">{} for {passengers}</span>"#,
            format_inr(flight.total_price(passengers))
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="card flight{selected}" data-flight-index="{index}">
<div class="carrier"><span class="badge" style="background:{color}">{code}{logo}</span><div><strong>{name}</strong><div class="muted">{number}</div></div></div>
<div class="time"><strong>{departure}</strong><span class="muted">{origin}</span></div>
<div class="time muted">{duration}<br>→</div>
<div class="time"><strong>{arrival}{next_day}</strong><span class="muted">{destination}</span></div>
<div class="price"><strong>{price}</strong><span class="muted">{class}</span> {total}</div>
{action}
</article>"#,
        selected = if selected { " selected" } else { "" },
        index = flight.index,
        color = airline.color(),
        code = airline.code(),
        name = airline.name(),
        number = flight.flight_number(),
        departure = flight.departure.format("%H:%M"),
        origin = flight.origin.code(),
        duration = flight.duration_label(),
        arrival = flight.arrival.format("%H:%M"),
        destination = flight.destination.code(),
        price = format_inr(u64::from(flight.price)),
        class = flight.fare_class,
    )
}
