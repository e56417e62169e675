//! End-to-end booking flows over the in-memory store.

use std::sync::Arc;

use secrecy::SecretString;

use classbook::adapters::auth::HmacPasswordHasher;
use classbook::adapters::events::InMemoryEventBus;
use classbook::adapters::memory::InMemoryBookingStore;
use classbook::application::{
    BookingQueries, CancelBookingCommand, CancelBookingHandler, CompleteClassCommand,
    CompleteClassHandler, CreateBookingCommand, CreateBookingHandler, CreateClassCommand,
    CreateClassHandler, DeleteClassCommand, DeleteClassHandler, DeleteClassOutcome,
    RegisterInstructorCommand, RegisterInstructorHandler, RegisterUserCommand,
    RegisterUserHandler,
};
use classbook::domain::booking::{BookingError, BookingStatus};
use classbook::domain::class_schedule::{ClassScheduleError, ClassStatus};
use classbook::domain::foundation::{ErrorCode, TimeRange, Timestamp};
use classbook::domain::user::{User, UserRole};
use classbook::ports::ClassScheduleRepository;

struct TestApp {
    store: InMemoryBookingStore,
    bus: Arc<InMemoryEventBus>,
}

impl TestApp {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("classbook=debug")
            .with_test_writer()
            .try_init();
        Self {
            store: InMemoryBookingStore::new(),
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    fn hasher(&self) -> Arc<HmacPasswordHasher> {
        Arc::new(HmacPasswordHasher::new(SecretString::new(
            "integration-test-pepper".to_string(),
        )))
    }

    async fn register_user(&self, username: &str) -> User {
        RegisterUserHandler::new(Arc::new(self.store.clone()), self.hasher())
            .handle(RegisterUserCommand {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password: SecretString::new("a strong password".to_string()),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap()
    }

    async fn create_class(&self, capacity: u32, start_in_hours: i64) -> classbook::domain::class_schedule::ClassSchedule {
        let teacher = self.register_user(&format!("teacher{}", start_in_hours)).await;
        let instructor = RegisterInstructorHandler::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
        )
        .handle(RegisterInstructorCommand {
            user_id: teacher.id(),
            bio: "Certified".to_string(),
            specialization: None,
        })
        .await
        .unwrap();

        let start = Timestamp::now().plus_hours(start_in_hours);
        CreateClassHandler::new(Arc::new(self.store.clone()), Arc::new(self.store.clone()))
            .handle(CreateClassCommand {
                name: "Morning Yoga".to_string(),
                description: "Vinyasa flow".to_string(),
                instructor_id: instructor.id(),
                start_time: start,
                end_time: start.plus_hours(1),
                capacity,
                location: "Studio A".to_string(),
            })
            .await
            .unwrap()
    }

    fn create_booking(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            self.bus.clone(),
        )
    }

    fn cancel_booking(&self) -> CancelBookingHandler {
        CancelBookingHandler::new(Arc::new(self.store.clone()), Arc::new(self.store.clone()))
    }

    fn queries(&self) -> BookingQueries {
        BookingQueries::new(Arc::new(self.store.clone()), Arc::new(self.store.clone()))
    }

    async fn class_bookings(&self, id: classbook::domain::foundation::ClassScheduleId) -> u32 {
        ClassScheduleRepository::find_by_id(&self.store, id)
            .await
            .unwrap()
            .unwrap()
            .current_bookings()
    }
}

#[tokio::test]
async fn class_with_capacity_two_admits_exactly_two() {
    let app = TestApp::new();
    let class = app.create_class(2, 4).await;
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;
    let carol = app.register_user("carol").await;

    for user in [&alice, &bob] {
        app.create_booking()
            .handle(CreateBookingCommand {
                user_id: user.id(),
                class_schedule_id: class.id(),
                note: None,
            })
            .await
            .unwrap();
    }
    assert_eq!(app.class_bookings(class.id()).await, 2);

    let err = app
        .create_booking()
        .handle(CreateBookingCommand {
            user_id: carol.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap_err();

    match err {
        BookingError::RuleViolation { code, message } => {
            assert_eq!(code, ErrorCode::ClassFull);
            assert_eq!(message, "Class is full");
        }
        other => panic!("Expected ClassFull, got {:?}", other),
    }
    assert_eq!(app.class_bookings(class.id()).await, 2);
}

#[tokio::test]
async fn cancelling_a_confirmed_booking_releases_the_seat() {
    let app = TestApp::new();
    let class = app.create_class(10, 4).await;
    let alice = app.register_user("alice").await;

    let view = app
        .create_booking()
        .handle(CreateBookingCommand {
            user_id: alice.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap();
    assert_eq!(app.class_bookings(class.id()).await, 1);

    let cancelled = app
        .cancel_booking()
        .handle(CancelBookingCommand {
            user_id: alice.id(),
            booking_id: view.id,
        })
        .await
        .unwrap();

    assert_eq!(cancelled.status(), BookingStatus::Cancelled);
    assert!(cancelled.cancelled_at().is_some());
    assert_eq!(app.class_bookings(class.id()).await, 0);
}

#[tokio::test]
async fn rebooking_after_cancellation_is_rejected_as_duplicate() {
    // The ledger keeps one row per (user, class) regardless of status, so
    // a cancelled booking still blocks a second one.
    let app = TestApp::new();
    let class = app.create_class(10, 4).await;
    let alice = app.register_user("alice").await;

    let view = app
        .create_booking()
        .handle(CreateBookingCommand {
            user_id: alice.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap();

    app.cancel_booking()
        .handle(CancelBookingCommand {
            user_id: alice.id(),
            booking_id: view.id,
        })
        .await
        .unwrap();

    let err = app
        .create_booking()
        .handle(CreateBookingCommand {
            user_id: alice.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err, BookingError::DuplicateBooking);
}

#[tokio::test]
async fn time_range_enforces_minimum_duration() {
    let start = Timestamp::now().plus_hours(2);

    let too_short = TimeRange::new(start, start.plus_minutes(29));
    assert!(too_short.unwrap_err().to_string().contains("at least 30 minutes"));

    let just_long_enough = TimeRange::new(start, start.plus_minutes(30));
    assert_eq!(just_long_enough.unwrap().duration_minutes(), 30);
}

#[tokio::test]
async fn completing_a_future_class_fails() {
    let app = TestApp::new();
    let class = app.create_class(10, 4).await;

    let err = CompleteClassHandler::new(Arc::new(app.store.clone()), app.bus.clone())
        .handle(CompleteClassCommand {
            class_schedule_id: class.id(),
        })
        .await
        .unwrap_err();

    match err {
        ClassScheduleError::RuleViolation { message, .. } => {
            assert!(message.contains("must have ended"));
        }
        other => panic!("Expected rule violation, got {:?}", other),
    }
}

#[tokio::test]
async fn booked_events_flow_to_the_bus() {
    let app = TestApp::new();
    let class = app.create_class(10, 4).await;
    let alice = app.register_user("alice").await;

    app.create_booking()
        .handle(CreateBookingCommand {
            user_id: alice.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap();

    let events = app.bus.events_of_type("class.booked");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].aggregate_type, "ClassSchedule");
    assert_eq!(events[0].payload["current_bookings"], 1);
    assert_eq!(events[0].payload["capacity"], 10);
}

#[tokio::test]
async fn deleting_a_booked_class_soft_cancels_and_keeps_ledger() {
    let app = TestApp::new();
    let class = app.create_class(10, 4).await;
    let alice = app.register_user("alice").await;

    let view = app
        .create_booking()
        .handle(CreateBookingCommand {
            user_id: alice.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap();

    let outcome = DeleteClassHandler::new(Arc::new(app.store.clone()), app.bus.clone())
        .handle(DeleteClassCommand {
            class_schedule_id: class.id(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, DeleteClassOutcome::Cancelled);

    let stored = ClassScheduleRepository::find_by_id(&app.store, class.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status(), ClassStatus::Cancelled);

    // The user's booking history survives the delete.
    let bookings = app.queries().list_user_bookings(alice.id()).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, view.id);
}

#[tokio::test]
async fn listings_reflect_booking_activity() {
    let app = TestApp::new();
    let class = app.create_class(10, 4).await;
    let second_class = app.create_class(10, 8).await;
    let alice = app.register_user("alice").await;

    let first = app
        .create_booking()
        .handle(CreateBookingCommand {
            user_id: alice.id(),
            class_schedule_id: class.id(),
            note: None,
        })
        .await
        .unwrap();
    app.create_booking()
        .handle(CreateBookingCommand {
            user_id: alice.id(),
            class_schedule_id: second_class.id(),
            note: None,
        })
        .await
        .unwrap();

    app.cancel_booking()
        .handle(CancelBookingCommand {
            user_id: alice.id(),
            booking_id: first.id,
        })
        .await
        .unwrap();

    let all = app.queries().list_user_bookings(alice.id()).await.unwrap();
    assert_eq!(all.len(), 2);

    let active = app
        .queries()
        .list_active_user_bookings(alice.id())
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].class_schedule_id, second_class.id());

    let for_class = app.queries().list_class_bookings(class.id()).await.unwrap();
    assert_eq!(for_class.len(), 1);
    assert_eq!(for_class[0].status, BookingStatus::Cancelled);
}
