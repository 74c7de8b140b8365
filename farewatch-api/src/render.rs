use farewatch_shared::{FlightRecord, LatestSnapshots, RouteResult};
use std::fmt::Write;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimal HTML escaping for text and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

pub fn dashboard_page(latest: &LatestSnapshots<'_>) -> String {
    let mut body = String::new();

    match latest.last_updated {
        Some(updated) if !latest.routes.is_empty() => {
            let _ = writeln!(body, "<p>Last updated: {}</p>", updated.format(TIME_FORMAT));
            for route in &latest.routes {
                route_section(&mut body, route);
            }
        }
        _ => body.push_str("<p class=\"empty\">No flight data available yet. Check back later!</p>\n"),
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Flight Deals Dashboard</title>\n</head>\n<body>\n<h1>Flight Deals Dashboard</h1>\n{}</body>\n</html>\n",
        body
    )
}

fn route_section(out: &mut String, route: &RouteResult) {
    let _ = writeln!(out, "<section>\n<h2>Route: {}</h2>", escape(&route.route_name));
    let _ = writeln!(
        out,
        "<p>{} &rarr; {}, checked {}</p>",
        escape(&route.from_city),
        escape(&route.to_city),
        route.timestamp().format(TIME_FORMAT)
    );

    out.push_str("<h3>Outbound Flights</h3>\n");
    flight_table(out, &route.outbound, "No outbound flights found");
    out.push_str("<h3>Return Flights</h3>\n");
    flight_table(out, &route.return_, "No return flights found");

    if let Some(pairing) = &route.best_round_trip {
        let _ = writeln!(
            out,
            "<p>Cheapest round trip: {} out, {} back, total {}</p>",
            escape(&pairing.outbound.airline),
            escape(&pairing.return_.airline),
            escape(&pairing.total_label())
        );
    }

    let _ = writeln!(out, "<h3>Analysis</h3>\n<pre>{}</pre>\n</section>", escape(&route.analysis));
}

fn flight_table(out: &mut String, records: &[FlightRecord], empty_message: &str) {
    if records.is_empty() {
        let _ = writeln!(out, "<p class=\"empty\">{}</p>", empty_message);
        return;
    }

    out.push_str("<table>\n<tr><th>Date</th><th>Departure</th><th>Arrival</th><th>Price</th><th>Airline</th><th>Stops</th></tr>\n");
    for record in records {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.date,
            record.departure_time.format(TIME_FORMAT),
            record.arrival_time.format(TIME_FORMAT),
            escape(&record.price_label()),
            escape(&record.airline),
            record.stops
        );
    }
    out.push_str("</table>\n");
}
