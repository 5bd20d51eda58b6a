// Access predicates
//
// Recomputed on every request; nothing here is cached.

use uuid::Uuid;

use crate::event::Event;

/// Only the creator may edit or delete an event.
pub fn can_modify(event: &Event, user_id: Uuid) -> bool {
    event.creator_id == user_id
}

/// Whether the user is already in the event's attendee list.
pub fn is_attendee(event: &Event, user_id: Uuid) -> bool {
    event.attendees.contains(&user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(creator_id: Uuid, attendees: Vec<Uuid>) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::now_v7(),
            name: "Meetup".to_string(),
            description: "Monthly meetup".to_string(),
            date: "2024-05-01".to_string(),
            location: "Hall A".to_string(),
            category_id: None,
            creator_id,
            attendees,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_creator_can_modify() {
        let creator = Uuid::now_v7();
        assert!(can_modify(&event(creator, vec![]), creator));
    }

    #[test]
    fn test_other_user_cannot_modify() {
        let creator = Uuid::now_v7();
        let other = Uuid::now_v7();
        let event = event(creator, vec![other]);

        // Attending does not grant edit rights
        assert!(!can_modify(&event, other));
    }

    #[test]
    fn test_is_attendee() {
        let creator = Uuid::now_v7();
        let guest = Uuid::now_v7();
        let event = event(creator, vec![guest]);

        assert!(is_attendee(&event, guest));
        assert!(!is_attendee(&event, creator));
    }
}
