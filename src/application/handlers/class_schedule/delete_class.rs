//! DeleteClassHandler - removes a class, retaining ledger history.
//!
//! A class with zero bookings is hard-deleted. A class with ledger history
//! is soft-cancelled instead, so existing booking rows keep a valid class
//! reference.

use std::sync::Arc;

use tracing::info;

use crate::domain::class_schedule::ClassScheduleError;
use crate::domain::foundation::{ClassScheduleId, EventEnvelope};
use crate::ports::{ClassScheduleRepository, EventPublisher};

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteClassOutcome {
    /// The class had no bookings and was removed.
    Deleted,
    /// The class had bookings and was cancelled instead.
    Cancelled,
}

/// Command to delete a class.
#[derive(Debug, Clone)]
pub struct DeleteClassCommand {
    pub class_schedule_id: ClassScheduleId,
}

/// Handler for class deletion.
pub struct DeleteClassHandler {
    classes: Arc<dyn ClassScheduleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteClassHandler {
    pub fn new(
        classes: Arc<dyn ClassScheduleRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            classes,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteClassCommand,
    ) -> Result<DeleteClassOutcome, ClassScheduleError> {
        let mut class = self
            .classes
            .find_by_id(cmd.class_schedule_id)
            .await?
            .ok_or_else(|| ClassScheduleError::not_found(cmd.class_schedule_id))?;

        if class.current_bookings() == 0 {
            self.classes.delete(class.id()).await?;
            info!(class_id = %class.id(), "class deleted");
            return Ok(DeleteClassOutcome::Deleted);
        }

        let event = class.cancel(Some("Class removed by administrator".to_string()))?;
        self.classes.update(&class).await?;

        info!(
            class_id = %class.id(),
            retained_bookings = event.current_bookings,
            "class soft-cancelled on delete"
        );

        self.event_publisher
            .publish(EventEnvelope::from_event(&event))
            .await?;

        Ok(DeleteClassOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::application::handlers::booking::{CreateBookingCommand, CreateBookingHandler};
    use crate::domain::class_schedule::{ClassSchedule, ClassStatus, NewClassSchedule};
    use crate::domain::foundation::{Capacity, EmailAddress, Location, TimeRange, Timestamp};
    use crate::domain::instructor::NewInstructor;
    use crate::domain::user::{NewUser, User, UserRole};
    use crate::ports::{InstructorRepository, UserRepository};

    async fn seed_user(store: &InMemoryBookingStore, name: &str) -> User {
        UserRepository::insert(
            store,
            NewUser::new(
                name,
                EmailAddress::new(format!("{}@example.com", name)).unwrap(),
                "hash",
                "Test",
                "User",
                UserRole::User,
            )
            .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn seed_class(store: &InMemoryBookingStore) -> ClassSchedule {
        let teacher = seed_user(store, "teacher").await;
        let instructor =
            InstructorRepository::insert(store, NewInstructor::new(teacher.id(), "bio", None))
                .await
                .unwrap();
        let start = Timestamp::now().plus_days(1);
        ClassScheduleRepository::insert(
            store,
            NewClassSchedule::new(
                "Morning Yoga",
                "Vinyasa flow",
                instructor.id(),
                TimeRange::new(start, start.plus_hours(1)).unwrap(),
                Capacity::new(10).unwrap(),
                Location::new("Studio A").unwrap(),
            )
            .unwrap(),
        )
        .await
        .unwrap()
    }

    fn handler(store: &InMemoryBookingStore, bus: &Arc<InMemoryEventBus>) -> DeleteClassHandler {
        DeleteClassHandler::new(Arc::new(store.clone()), bus.clone())
    }

    #[tokio::test]
    async fn hard_deletes_class_without_bookings() {
        let store = InMemoryBookingStore::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let class = seed_class(&store).await;

        let outcome = handler(&store, &bus)
            .handle(DeleteClassCommand {
                class_schedule_id: class.id(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, DeleteClassOutcome::Deleted);
        assert!(ClassScheduleRepository::find_by_id(&store, class.id())
            .await
            .unwrap()
            .is_none());
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn soft_cancels_class_with_bookings() {
        let store = InMemoryBookingStore::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let class = seed_class(&store).await;
        let user = seed_user(&store, "alice").await;

        CreateBookingHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(InMemoryEventBus::new()),
        )
        .handle(CreateBookingCommand {
            user_id: user.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap();

        let outcome = handler(&store, &bus)
            .handle(DeleteClassCommand {
                class_schedule_id: class.id(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, DeleteClassOutcome::Cancelled);

        let stored = ClassScheduleRepository::find_by_id(&store, class.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), ClassStatus::Cancelled);
        assert_eq!(stored.current_bookings(), 1);
        assert!(bus.has_event("class.cancelled"));
    }

    #[tokio::test]
    async fn rejects_unknown_class() {
        let store = InMemoryBookingStore::new();
        let bus = Arc::new(InMemoryEventBus::new());

        let result = handler(&store, &bus)
            .handle(DeleteClassCommand {
                class_schedule_id: ClassScheduleId::new(99),
            })
            .await;

        assert!(matches!(result, Err(ClassScheduleError::NotFound(_))));
    }
}
