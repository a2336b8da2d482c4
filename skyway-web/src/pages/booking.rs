use axum::{http::StatusCode, response::Response};
use skyway_catalog::FareClass;
use skyway_core::SearchCriteria;
use skyway_offer::Flight;

use super::{format_inr, hidden_inputs, html_response, layout, results, search_form};
use crate::state::AppState;
use crate::view::{UiState, WizardStep};

/// Selections resolved against the regenerated flights
struct Booking {
    criteria: SearchCriteria,
    outbound: Flight,
    inbound: Option<Flight>,
}

impl Booking {
    fn flights(&self) -> impl Iterator<Item = &Flight> {
        std::iter::once(&self.outbound).chain(self.inbound.as_ref())
    }

    fn total(&self) -> u64 {
        self.flights().map(|f| f.total_price(self.criteria.passengers)).sum()
    }
}

/// Re-validate the search and look up the selected flights. Anything missing
/// sends the visitor back to the step that can fix it.
fn resolve(state: &AppState, ui: &UiState) -> Result<Booking, Response> {
    let criteria = ui.search.validate(&state.policy).map_err(|err| {
        search_form::render(state, &ui.with_step(WizardStep::Search), Some(&err.to_string()))
    })?;

    let Some(seed) = ui.seed else {
        tracing::debug!("Review requested without a seed");
        return Err(results::render(state, ui.with_step(WizardStep::Results), Some("Please choose your flights.")));
    };

    let back_to_results = |msg: &str| results::render(state, ui.with_step(WizardStep::Results), Some(msg));

    let found = state.search(&criteria, seed);
    let outbound = ui
        .outbound
        .and_then(|index| found.outbound_flight(index).copied())
        .ok_or_else(|| back_to_results("Please select a departing flight."))?;

    let inbound = if criteria.is_round_trip() {
        let flight = ui
            .inbound
            .and_then(|index| found.inbound_flight(index).copied())
            .ok_or_else(|| back_to_results("Please select a return flight."))?;
        Some(flight)
    } else {
        None
    };

    Ok(Booking { criteria, outbound, inbound })
}

pub fn render_review(state: &AppState, ui: UiState) -> Response {
    let booking = match resolve(state, &ui) {
        Ok(booking) => booking,
        Err(response) => return response,
    };
    let passengers = booking.criteria.passengers;

    let mut body = String::from(r#"<section class="card"><h2>Review your trip</h2></section>"#);

    let legs = std::iter::once(("Departing flight", &booking.outbound))
        .chain(booking.inbound.as_ref().map(|f| ("Return flight", f)));
    for (title, flight) in legs {
        body.push_str(&format!("<h3>{title}</h3>"));
        body.push_str(&results::flight_card(flight, passengers, false, ""));
        body.push_str(&fare_rules(flight.fare_class));
        body.push_str(&format!(
            r#"<div class="muted">Subtotal {} × {passengers} = {}</div>"#,
            format_inr(u64::from(flight.price)),
            format_inr(flight.total_price(passengers)),
        ));
    }

    let plural = if passengers > 1 { "s" } else { "" };
    body.push_str(&format!(
        r#"<section class="card">
<div class="muted">{passengers} Adult{plural}</div>
<div class="total"><span>Total</span><span>{total}</span></div>
<form method="get" action="/">{proceed}<button type="submit" class="wide">Proceed to Payment</button></form>
<form method="get" action="/">{back}<button type="submit" class="secondary wide">Back to flights</button></form>
</section>"#,
        total = format_inr(booking.total()),
        proceed = hidden_inputs(&ui.with_step(WizardStep::Payment), &[]),
        back = hidden_inputs(&ui.with_step(WizardStep::Results), &[]),
    ));

    html_response(StatusCode::OK, layout(&state.site, WizardStep::Review, &body))
}

/// Inert payment screen; nothing is charged or booked.
pub fn render_payment(state: &AppState, ui: UiState) -> Response {
    let booking = match resolve(state, &ui) {
        Ok(booking) => booking,
        Err(response) => return response,
    };

    let flights: String = booking
        .flights()
        .map(|f| format!("<li>{} · {} → {} · {}</li>", f.flight_number(), f.origin.code(), f.destination.code(), f.departure.format("%H:%M")))
        .collect();

    tracing::info!(
        outbound = %booking.outbound.flight_number(),
        total = booking.total(),
        "Payment placeholder reached"
    );

    let body = format!(
        r#"<section class="card">
<h2>Payment</h2>
<ul>{flights}</ul>
<div class="total"><span>Amount due</span><span>{total}</span></div>
<div class="notice">Payment processing is not available in this demo. No booking has been made.</div>
<button type="button" class="wide" disabled>Pay now</button>
<form method="get" action="/">{back}<button type="submit" class="secondary wide">Back to review</button></form>
<form method="get" action="/"><button type="submit" class="secondary wide">Start a new search</button></form>
</section>"#,
        total = format_inr(booking.total()),
        back = hidden_inputs(&ui.with_step(WizardStep::Review), &[]),
    );

    html_response(StatusCode::OK, layout(&state.site, WizardStep::Payment, &body))
}

fn fare_rules(class: FareClass) -> String {
    let rules = class.rules();
    let fee = |amount: u32| if amount == 0 { "Free".to_string() } else { format_inr(u64::from(amount)) };

    format!(
        r#"<section class="card fare-rules">
<strong>{class} fare rules</strong>
<table class="rules">
<tr><td>Cancellation fee</td><td>{cancellation}</td></tr>
<tr><td>Date change fee</td><td>{change}</td></tr>
<tr><td>Baggage</td><td>{baggage}</td></tr>
<tr><td>Meal</td><td>{meal}</td></tr>
<tr><td>Refundable</td><td>{refundable}</td></tr>
</table>
</section>"#,
        cancellation = fee(rules.cancellation_fee),
        change = fee(rules.date_change_fee),
        baggage = rules.baggage,
        meal = rules.meal,
        refundable = if rules.refundable { "Yes" } else { "No" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fare_rules_table() {
        let html = fare_rules(FareClass::Economy);
        assert!(html.contains("Economy fare rules"));
        assert!(html.contains("₹3,500"));
        assert!(html.contains("₹2,500"));
        assert!(html.contains("15 kg check-in, 7 kg cabin"));
        assert!(html.contains("<td>No</td>"));

        let html = fare_rules(FareClass::Business);
        assert!(html.contains("<td>Free</td>"));
        assert!(html.contains("<td>Yes</td>"));
    }
}
