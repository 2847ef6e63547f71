use crate::{handlers, models, params::FieldError};
use utoipa::OpenApi;

/// OpenAPI 文档，由 `/docs/json` 提供
#[derive(OpenApi)]
#[openapi(
    info(title = "pass.in", description = "Event check-in API"),
    paths(
        handlers::attendee::check_in,
        handlers::attendee::get_attendee_badge,
        handlers::event::get_event,
        handlers::event::get_event_attendees,
    ),
    components(schemas(
        models::BadgeResponse,
        models::BadgeAttendee,
        models::BadgeEvent,
        models::AttendeesResponse,
        models::AttendeeItem,
        models::EventResponse,
        models::EventDetails,
        models::ErrorBody,
        FieldError,
    )),
    tags(
        (name = "check-ins", description = "Attendee check-in"),
        (name = "attendees", description = "Attendee badges"),
        (name = "events", description = "Events and their attendees"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_documented() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];

        let check_in = &paths["/attendees/{attendeeId}/check-in"]["get"];
        assert_eq!(check_in["summary"], "Check-in an attendee");
        assert_eq!(check_in["tags"][0], "check-ins");

        assert_eq!(
            paths["/events/{eventId}/attendees"]["get"]["summary"],
            "Get event attendees"
        );
        assert_eq!(paths["/events/{eventId}"]["get"]["summary"], "Get an event");
        assert_eq!(paths["/events/{eventId}"]["get"]["tags"][0], "events");
        assert!(paths["/attendees/{attendeeId}/badge"]["get"].is_object());

        assert!(doc["components"]["schemas"]["EventDetails"].is_object());
    }
}
