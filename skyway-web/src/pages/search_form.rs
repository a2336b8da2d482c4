use axum::{http::StatusCode, response::Response};
use html_escape::{encode_double_quoted_attribute, encode_text};
use skyway_catalog::{City, FareClass};
use skyway_core::{TripType, MAX_PASSENGERS};

use super::{html_response, layout};
use crate::state::AppState;
use crate::view::{UiState, WizardStep};

/// The search card. A validation message renders inline above the fields
/// and turns the response into a 422.
pub fn render(state: &AppState, ui: &UiState, error: Option<&str>) -> Response {
    let status = if error.is_some() { StatusCode::UNPROCESSABLE_ENTITY } else { StatusCode::OK };
    let body = search_card(ui, error);
    html_response(status, layout(&state.site, WizardStep::Search, &body))
}

fn search_card(ui: &UiState, error: Option<&str>) -> String {
    let search = &ui.search;
    let error = error
        .map(|msg| format!(r#"<div class="error" role="alert">{}</div>"#, encode_text(msg)))
        .unwrap_or_default();

    let trip_toggle = |trip: TripType, id: &str| {
        let checked = if search.trip_type == trip { " checked" } else { "" };
        format!(
            r#"<label for="{id}"><input type="radio" id="{id}" name="trip_type" value="{value}"{checked}><span>{trip}</span></label>"#,
            value = trip.slug(),
        )
    };

    let passengers: String = (1..=MAX_PASSENGERS)
        .map(|n| {
            let selected = if n == search.passengers { " selected" } else { "" };
            let plural = if n > 1 { "s" } else { "" };
            format!(r#"<option value="{n}"{selected}>{n} Adult{plural}</option>"#)
        })
        .collect();

    let chosen_class = search.fare_class.as_deref().and_then(|c| c.parse::<FareClass>().ok());
    let classes: String = FareClass::ALL
        .iter()
        .map(|class| {
            let selected = if chosen_class == Some(*class) { " selected" } else { "" };
            format!(r#"<option value="{}"{selected}>{}</option>"#, class.slug(), class.name())
        })
        .collect();

    format!(
        r#"<section class="card">
<h2>Search Flights</h2>
{error}
<form class="search" method="get" action="/">
<input type="hidden" name="step" value="results">
<div class="trip-toggle">{one_way}{round_trip}</div>
<div class="grid">
<div><label for="origin">From</label><select id="origin" name="origin">{origins}</select></div>
<div><label for="destination">To</label><select id="destination" name="destination">{destinations}</select></div>
<div><label for="departure_date">Departure</label><input type="date" id="departure_date" name="departure_date" value="{departure}"></div>
<div class="return-date"><label for="return_date">Return</label><input type="date" id="return_date" name="return_date" value="{return_date}"></div>
<div><label for="passengers">Travelers</label><select id="passengers" name="passengers">{passengers}</select></div>
<div><label for="fare_class">Class</label><select id="fare_class" name="fare_class"><option value="">Any class</option>{classes}</select></div>
</div>
<button type="submit" class="wide">Search Flights</button>
</form>
</section>"#,
        one_way = trip_toggle(TripType::OneWay, "trip-one-way"),
        round_trip = trip_toggle(TripType::RoundTrip, "trip-round-trip"),
        origins = city_options(&search.origin),
        destinations = city_options(&search.destination),
        departure = encode_double_quoted_attribute(&search.departure_date),
        return_date = encode_double_quoted_attribute(search.return_date.as_deref().unwrap_or_default()),
    )
}

fn city_options(current: &str) -> String {
    let chosen = current.parse::<City>().ok();
    let placeholder = if chosen.is_none() { " selected" } else { "" };
    let options: String = City::ALL
        .iter()
        .map(|city| {
            let selected = if chosen == Some(*city) { " selected" } else { "" };
            format!(r#"<option value="{}"{selected}>{}</option>"#, city.code(), city.label())
        })
        .collect();
    format!(r#"<option value="" disabled{placeholder}>Select city</option>{options}"#)
}
