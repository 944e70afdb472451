//! Console presentation of tracker events.

use tokio::sync::mpsc;

use flightwatch_core::{TrackerEvent, TrackerEventEnvelope};

/// Print events until every handle is dropped.
pub async fn print_events(mut rx: mpsc::Receiver<TrackerEventEnvelope>) {
    while let Some(envelope) = rx.recv().await {
        if let Some(line) = render(&envelope.event) {
            println!("{}", line);
        }
    }
}

/// Console line for an event, if it has one.
pub fn render(event: &TrackerEvent) -> Option<String> {
    let line = match event {
        TrackerEvent::FetchStarted { source, .. } => format!("Started fetching {}", source),
        TrackerEvent::FetchFinished { source, .. } => format!("Finished fetching {}", source),
        TrackerEvent::FlightFetched {
            passenger,
            flight_number,
            ..
        } => format!("Fetched flight: {} ({})", passenger, flight_number),
        TrackerEvent::FlightsFound { flights } => {
            format!("Found flights for {}", flights.join(", "))
        }
        TrackerEvent::TrackingStarted { .. } => return None,
        TrackerEvent::BoardingUpdate {
            passenger, message, ..
        } => format!("{}: {}", passenger, message),
        TrackerEvent::TrackingFailed { passenger, reason } => format!("{}: {}", passenger, reason),
        TrackerEvent::TrackingFinished { passenger } => {
            format!("Finished tracking {}'s flight", passenger)
        }
        TrackerEvent::FlightsRemaining { count } => {
            format!("There are {} flights being tracked", count)
        }
        TrackerEvent::AllFlightsFinished => "Finished tracking all flights".to_string(),
    };
    Some(line)
}
