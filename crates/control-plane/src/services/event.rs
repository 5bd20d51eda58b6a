// Event service
//
// Every mutating operation loads the event and re-checks ownership with the
// pure predicates from eventhub-core. References (category, creator,
// attendees) are resolved by explicit lookups on the read path.

use eventhub_core::validation::check_event_fields;
use eventhub_core::{
    can_modify, is_attendee, Category, Event, EventDetails, EventFields, EventView, EventsError,
    Result, UserProfile, UserSummary,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::events::{CreateEventRequest, UpdateEventRequest};
use crate::auth::AuthUser;
use crate::services::category::row_to_category;
use crate::storage::{
    AttendOutcome, CreateEventRow, EventFilter, EventRow, StorageBackend, UpdateEventRow,
    UpsertUserRow, UserRow,
};

pub struct EventService {
    db: Arc<StorageBackend>,
}

impl EventService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    // ============================================
    // Reads
    // ============================================

    /// All events with categories resolved and flags computed for `viewer`
    pub async fn list(&self, viewer: Option<Uuid>) -> Result<Vec<EventView>> {
        let rows = self.db.list_events(EventFilter::default()).await?;
        self.views(rows, viewer).await
    }

    /// Events in one category, paired with the category itself (None if it does not exist)
    pub async fn list_by_category(
        &self,
        category_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<(Option<Category>, Vec<EventView>)> {
        let category = self.db.get_category(category_id).await?.map(row_to_category);
        let rows = self
            .db
            .list_events(EventFilter::by_category(category_id))
            .await?;

        let views = rows
            .into_iter()
            .map(|row| Self::view(row_to_event(row), category.clone(), viewer))
            .collect();

        Ok((category, views))
    }

    /// Events created by `user_id`
    pub async fn list_by_creator(&self, user_id: Uuid) -> Result<Vec<EventView>> {
        let rows = self.db.list_events(EventFilter::by_creator(user_id)).await?;
        self.views(rows, Some(user_id)).await
    }

    /// Events `user_id` attends ("ongoing")
    pub async fn list_by_attendee(&self, user_id: Uuid) -> Result<Vec<EventView>> {
        let rows = self.db.list_events(EventFilter::by_attendee(user_id)).await?;
        self.views(rows, Some(user_id)).await
    }

    /// One event with category, creator and attendees resolved
    pub async fn details(&self, event_id: Uuid, viewer: Option<Uuid>) -> Result<EventDetails> {
        let event = self
            .db
            .get_event(event_id)
            .await?
            .map(row_to_event)
            .ok_or(EventsError::EventNotFound(event_id))?;

        let category = match event.category_id {
            Some(id) => self.db.get_category(id).await?.map(row_to_category),
            None => None,
        };

        let mut user_ids = Vec::with_capacity(event.attendees.len() + 1);
        user_ids.push(event.creator_id);
        user_ids.extend(event.attendees.iter().copied());
        let users: HashMap<Uuid, UserSummary> = self
            .db
            .get_users(&user_ids)
            .await?
            .into_iter()
            .map(|row| (row.id, row_to_summary(row)))
            .collect();

        let creator = users.get(&event.creator_id).cloned();
        let attendees = event
            .attendees
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect();

        Ok(EventDetails {
            is_attendee: viewer.is_some_and(|id| is_attendee(&event, id)),
            is_creator: viewer.is_some_and(|id| can_modify(&event, id)),
            event,
            category,
            creator,
            attendees,
        })
    }

    /// Categories offered by the event forms and the index page
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let rows = self.db.list_categories().await?;
        Ok(rows.into_iter().map(row_to_category).collect())
    }

    /// The caller's profile with the events they attend
    pub async fn profile(&self, user: &AuthUser) -> Result<UserProfile> {
        let rows = self.db.list_events(EventFilter::by_attendee(user.id)).await?;
        Ok(UserProfile {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            events: rows.into_iter().map(|row| row.id).collect(),
        })
    }

    // ============================================
    // Writes
    // ============================================

    #[tracing::instrument(skip(self, req, creator), fields(creator_id = %creator.id))]
    pub async fn create(&self, req: CreateEventRequest, creator: &AuthUser) -> Result<Event> {
        let fields = EventFields {
            name: req.name,
            description: req.description,
            date: req.date,
            location: req.location,
        }
        .trimmed();

        let mut errors = check_event_fields(&fields);
        if let Some(category_id) = req.category_id {
            if self.db.get_category(category_id).await?.is_none() {
                errors.push("category", "Category does not exist");
            }
        }
        errors.into_result()?;

        self.mirror_user(creator).await?;
        let row = self
            .db
            .create_event(CreateEventRow {
                name: fields.name,
                description: fields.description,
                date: fields.date,
                location: fields.location,
                category_id: req.category_id,
                creator_id: creator.id,
            })
            .await?;

        tracing::info!(event_id = %row.id, "Event created");
        Ok(row_to_event(row))
    }

    /// Load an event for its edit form; only the creator may open it
    pub async fn edit_form(&self, event_id: Uuid, requester: Uuid) -> Result<Event> {
        self.owned_event(event_id, requester, "edit").await
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn update(
        &self,
        event_id: Uuid,
        req: UpdateEventRequest,
        requester: Uuid,
    ) -> Result<Event> {
        self.owned_event(event_id, requester, "edit").await?;

        let fields = EventFields {
            name: req.name,
            description: req.description,
            date: req.date,
            location: req.location,
        }
        .trimmed();
        check_event_fields(&fields).into_result()?;

        let row = self
            .db
            .update_event(
                event_id,
                UpdateEventRow {
                    name: fields.name,
                    description: fields.description,
                    date: fields.date,
                    location: fields.location,
                },
            )
            .await?
            .ok_or(EventsError::EventNotFound(event_id))?;

        tracing::info!("Event updated");
        Ok(row_to_event(row))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, event_id: Uuid, requester: Uuid) -> Result<()> {
        self.owned_event(event_id, requester, "delete").await?;

        if !self.db.delete_event(event_id).await? {
            return Err(EventsError::EventNotFound(event_id));
        }

        tracing::info!("Event deleted");
        Ok(())
    }

    /// Add the user to the attendee list. Membership check, profile mirror
    /// and append are a single store operation, and the user's own event list
    /// is derived from the same relation.
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn attend(&self, event_id: Uuid, user: &AuthUser) -> Result<EventView> {
        match self.db.add_attendee(event_id, user_row(user)).await? {
            AttendOutcome::Added(row) => {
                tracing::info!(attendees = row.attendees.len(), "Attendee added");
                let category = match row.category_id {
                    Some(id) => self.db.get_category(id).await?.map(row_to_category),
                    None => None,
                };
                Ok(Self::view(row_to_event(row), category, Some(user.id)))
            }
            AttendOutcome::AlreadyAttending => Err(EventsError::AlreadyAttending {
                event_id,
                user_id: user.id,
            }),
            AttendOutcome::EventNotFound => Err(EventsError::EventNotFound(event_id)),
        }
    }

    // ============================================
    // Helpers
    // ============================================

    async fn owned_event(
        &self,
        event_id: Uuid,
        requester: Uuid,
        action: &'static str,
    ) -> Result<Event> {
        let event = self
            .db
            .get_event(event_id)
            .await?
            .map(row_to_event)
            .ok_or(EventsError::EventNotFound(event_id))?;

        if !can_modify(&event, requester) {
            tracing::warn!(%event_id, %requester, action, "Rejected non-creator");
            return Err(EventsError::forbidden(action));
        }

        Ok(event)
    }

    /// Keep the identity's profile current so creators and attendees resolve
    async fn mirror_user(&self, user: &AuthUser) -> Result<UserRow> {
        let row = self.db.upsert_user(user_row(user)).await?;
        Ok(row)
    }

    async fn views(&self, rows: Vec<EventRow>, viewer: Option<Uuid>) -> Result<Vec<EventView>> {
        let categories: HashMap<Uuid, Category> = self
            .categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let category = row.category_id.and_then(|id| categories.get(&id).cloned());
                Self::view(row_to_event(row), category, viewer)
            })
            .collect())
    }

    fn view(event: Event, category: Option<Category>, viewer: Option<Uuid>) -> EventView {
        EventView {
            is_attendee: viewer.is_some_and(|id| is_attendee(&event, id)),
            is_creator: viewer.is_some_and(|id| can_modify(&event, id)),
            event,
            category,
        }
    }
}

fn row_to_event(row: EventRow) -> Event {
    Event {
        id: row.id,
        name: row.name,
        description: row.description,
        date: row.date,
        location: row.location,
        category_id: row.category_id,
        creator_id: row.creator_id,
        attendees: row.attendees,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn user_row(user: &AuthUser) -> UpsertUserRow {
    UpsertUserRow {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
    }
}

fn row_to_summary(row: UserRow) -> UserSummary {
    UserSummary {
        id: row.id,
        name: row.name,
        email: row.email,
    }
}
