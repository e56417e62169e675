//! In-memory implementation of the persistence ports.
//!
//! Backs the integration tests and local experiments. The reservation
//! unit of work realizes the exclusive-lock contract with an owned async
//! mutex guard held for the lifetime of the work: concurrent mutators are
//! strictly serialized and uncommitted writes are discarded on drop.
//!
//! The lock is store-wide rather than per class row, which is coarser
//! than the Postgres adapter but satisfies the same serialization
//! contract.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::class_schedule::{ClassSchedule, ClassStatus, NewClassSchedule};
use crate::domain::foundation::{
    BookingId, ClassScheduleId, DomainError, EmailAddress, ErrorCode, InstructorId, Timestamp,
    UserId,
};
use crate::domain::instructor::{Instructor, NewInstructor};
use crate::domain::user::{NewUser, User};
use crate::ports::{
    BookingReader, BookingRepository, BookingView, ClassScheduleRepository, InstructorRepository,
    ReservationUnitOfWork, ReservationWork, UserRepository,
};

#[derive(Default)]
struct StoreState {
    users: HashMap<i64, User>,
    instructors: HashMap<i64, Instructor>,
    classes: HashMap<i64, ClassSchedule>,
    bookings: HashMap<i64, Booking>,
    next_user_id: i64,
    next_instructor_id: i64,
    next_class_id: i64,
    next_booking_id: i64,
}

impl StoreState {
    fn new() -> Self {
        Self {
            next_user_id: 1,
            next_instructor_id: 1,
            next_class_id: 1,
            next_booking_id: 1,
            ..Default::default()
        }
    }

    fn booking_exists_for(&self, user_id: UserId, class_id: ClassScheduleId) -> bool {
        self.bookings
            .values()
            .any(|b| b.user_id() == user_id && b.class_schedule_id() == class_id)
    }

    fn view_for(&self, booking: &Booking) -> Option<BookingView> {
        let user = self.users.get(&booking.user_id().as_i64())?;
        let class = self.classes.get(&booking.class_schedule_id().as_i64())?;
        Some(BookingView {
            id: booking.id(),
            user_id: booking.user_id(),
            user_email: user.email().value().to_string(),
            class_schedule_id: booking.class_schedule_id(),
            class_name: class.name().to_string(),
            class_start_time: class.time_range().start(),
            status: booking.status(),
            booked_at: booking.booked_at(),
            cancelled_at: booking.cancelled_at(),
            note: booking.note().map(str::to_string),
        })
    }

    fn sorted_views<'a, I>(&self, bookings: I) -> Vec<BookingView>
    where
        I: Iterator<Item = &'a Booking>,
    {
        let mut entries: Vec<&Booking> = bookings.collect();
        entries.sort_by(|a, b| {
            b.booked_at()
                .cmp(&a.booked_at())
                .then(b.id().as_i64().cmp(&a.id().as_i64()))
        });
        entries
            .into_iter()
            .filter_map(|booking| self.view_for(booking))
            .collect()
    }
}

/// In-memory store implementing every persistence port.
#[derive(Clone)]
pub struct InMemoryBookingStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryBookingStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::new())),
        }
    }
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryBookingStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email() == &new_user.email) {
            return Err(DomainError::validation("email", "Email is already registered"));
        }
        if state
            .users
            .values()
            .any(|u| u.username() == new_user.username)
        {
            return Err(DomainError::validation("username", "Username is already taken"));
        }

        let id = state.next_user_id;
        state.next_user_id += 1;
        let now = Timestamp::now();
        let user = User::reconstitute(
            UserId::new(id),
            new_user.username,
            new_user.email,
            new_user.password_hash,
            new_user.first_name,
            new_user.last_name,
            new_user.role,
            true,
            now,
            now,
            1,
        );
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let stored = state.users.get(&user.id().as_i64()).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user.id()))
        })?;
        if stored.version() != user.version() {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                "User was modified concurrently",
            ));
        }

        let updated = User::reconstitute(
            user.id(),
            user.username().to_string(),
            user.email().clone(),
            user.password_hash().to_string(),
            user.first_name().to_string(),
            user.last_name().to_string(),
            user.role(),
            user.is_active(),
            user.created_at(),
            user.updated_at(),
            user.version() + 1,
        );
        state.users.insert(user.id().as_i64(), updated);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id.as_i64()).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email() == email).cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, DomainError> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.email() == email))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.username() == username))
    }
}

#[async_trait]
impl InstructorRepository for InMemoryBookingStore {
    async fn insert(&self, new_instructor: NewInstructor) -> Result<Instructor, DomainError> {
        let mut state = self.state.lock().await;
        if state
            .instructors
            .values()
            .any(|i| i.user_id() == new_instructor.user_id)
        {
            return Err(DomainError::validation(
                "user_id",
                "User already has an instructor profile",
            ));
        }

        let id = state.next_instructor_id;
        state.next_instructor_id += 1;
        let now = Timestamp::now();
        let instructor = Instructor::reconstitute(
            InstructorId::new(id),
            new_instructor.user_id,
            new_instructor.bio,
            new_instructor.specialization,
            now,
            now,
            1,
        );
        state.instructors.insert(id, instructor.clone());
        Ok(instructor)
    }

    async fn update(&self, instructor: &Instructor) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let stored = state
            .instructors
            .get(&instructor.id().as_i64())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InstructorNotFound,
                    format!("Instructor not found: {}", instructor.id()),
                )
            })?;
        if stored.version() != instructor.version() {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                "Instructor was modified concurrently",
            ));
        }

        let updated = Instructor::reconstitute(
            instructor.id(),
            instructor.user_id(),
            instructor.bio().to_string(),
            instructor.specialization().to_string(),
            instructor.created_at(),
            instructor.updated_at(),
            instructor.version() + 1,
        );
        state.instructors.insert(instructor.id().as_i64(), updated);
        Ok(())
    }

    async fn find_by_id(&self, id: InstructorId) -> Result<Option<Instructor>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.instructors.get(&id.as_i64()).cloned())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Instructor>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .instructors
            .values()
            .find(|i| i.user_id() == user_id)
            .cloned())
    }
}

#[async_trait]
impl ClassScheduleRepository for InMemoryBookingStore {
    async fn insert(&self, new_class: NewClassSchedule) -> Result<ClassSchedule, DomainError> {
        let mut state = self.state.lock().await;
        let id = state.next_class_id;
        state.next_class_id += 1;
        let now = Timestamp::now();
        let class = ClassSchedule::reconstitute(
            ClassScheduleId::new(id),
            new_class.name,
            new_class.description,
            new_class.instructor_id,
            new_class.time_range,
            new_class.capacity,
            0,
            new_class.location,
            ClassStatus::Scheduled,
            now,
            now,
            1,
        );
        state.classes.insert(id, class.clone());
        Ok(class)
    }

    async fn update(&self, class: &ClassSchedule) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let stored = state.classes.get(&class.id().as_i64()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ClassNotFound,
                format!("Class not found: {}", class.id()),
            )
        })?;
        if stored.version() != class.version() {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                "Class was modified concurrently",
            ));
        }

        state
            .classes
            .insert(class.id().as_i64(), bump_class_version(class));
        Ok(())
    }

    async fn delete(&self, id: ClassScheduleId) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if state.classes.remove(&id.as_i64()).is_none() {
            return Err(DomainError::new(
                ErrorCode::ClassNotFound,
                format!("Class not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ClassScheduleId) -> Result<Option<ClassSchedule>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.classes.get(&id.as_i64()).cloned())
    }

    async fn find_by_status(&self, status: ClassStatus) -> Result<Vec<ClassSchedule>, DomainError> {
        let state = self.state.lock().await;
        let mut classes: Vec<ClassSchedule> = state
            .classes
            .values()
            .filter(|c| c.status() == status)
            .cloned()
            .collect();
        classes.sort_by_key(|c| c.id().as_i64());
        Ok(classes)
    }

    async fn find_by_instructor(
        &self,
        instructor_id: InstructorId,
    ) -> Result<Vec<ClassSchedule>, DomainError> {
        let state = self.state.lock().await;
        let mut classes: Vec<ClassSchedule> = state
            .classes
            .values()
            .filter(|c| c.instructor_id() == instructor_id)
            .cloned()
            .collect();
        classes.sort_by_key(|c| c.id().as_i64());
        Ok(classes)
    }

    async fn find_upcoming_by_status(
        &self,
        status: ClassStatus,
        now: Timestamp,
    ) -> Result<Vec<ClassSchedule>, DomainError> {
        let state = self.state.lock().await;
        let mut classes: Vec<ClassSchedule> = state
            .classes
            .values()
            .filter(|c| c.status() == status && c.time_range().start().is_after(&now))
            .cloned()
            .collect();
        classes.sort_by_key(|c| c.time_range().start());
        Ok(classes)
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingStore {
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.bookings.get(&id.as_i64()).cloned())
    }

    async fn exists_by_user_and_class(
        &self,
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
    ) -> Result<bool, DomainError> {
        let state = self.state.lock().await;
        Ok(state.booking_exists_for(user_id, class_schedule_id))
    }
}

#[async_trait]
impl BookingReader for InMemoryBookingStore {
    async fn find_view_by_id(&self, id: BookingId) -> Result<Option<BookingView>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .get(&id.as_i64())
            .and_then(|b| state.view_for(b)))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<BookingView>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.sorted_views(state.bookings.values().filter(|b| b.user_id() == user_id)))
    }

    async fn list_by_user_and_status(
        &self,
        user_id: UserId,
        status: BookingStatus,
    ) -> Result<Vec<BookingView>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.sorted_views(
            state
                .bookings
                .values()
                .filter(|b| b.user_id() == user_id && b.status() == status),
        ))
    }

    async fn list_by_class(
        &self,
        class_schedule_id: ClassScheduleId,
    ) -> Result<Vec<BookingView>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.sorted_views(
            state
                .bookings
                .values()
                .filter(|b| b.class_schedule_id() == class_schedule_id),
        ))
    }

    async fn list_all(&self) -> Result<Vec<BookingView>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.sorted_views(state.bookings.values()))
    }
}

fn bump_class_version(class: &ClassSchedule) -> ClassSchedule {
    ClassSchedule::reconstitute(
        class.id(),
        class.name().to_string(),
        class.description().to_string(),
        class.instructor_id(),
        *class.time_range(),
        class.capacity(),
        class.current_bookings(),
        class.location().clone(),
        class.status(),
        class.created_at(),
        class.updated_at(),
        class.version() + 1,
    )
}

fn bump_booking_version(booking: &Booking) -> Booking {
    Booking::reconstitute(
        booking.id(),
        booking.user_id(),
        booking.class_schedule_id(),
        booking.status(),
        booking.booked_at(),
        booking.cancelled_at(),
        booking.note().map(str::to_string),
        booking.version() + 1,
    )
}

/// Unit of work over the in-memory store.
///
/// Holds the store mutex for its whole lifetime, which serializes every
/// concurrent mutator. Writes are staged and only applied on commit;
/// dropping the work discards them.
struct InMemoryReservationWork {
    guard: OwnedMutexGuard<StoreState>,
    pending_class: Option<ClassSchedule>,
    pending_inserts: Vec<Booking>,
    pending_updates: Vec<Booking>,
}

#[async_trait]
impl ReservationUnitOfWork for InMemoryBookingStore {
    async fn begin(&self) -> Result<Box<dyn ReservationWork>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(InMemoryReservationWork {
            guard,
            pending_class: None,
            pending_inserts: Vec::new(),
            pending_updates: Vec::new(),
        }))
    }
}

#[async_trait]
impl ReservationWork for InMemoryReservationWork {
    async fn lock_class(
        &mut self,
        id: ClassScheduleId,
    ) -> Result<Option<ClassSchedule>, DomainError> {
        Ok(self.guard.classes.get(&id.as_i64()).cloned())
    }

    async fn find_booking(&mut self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.guard.bookings.get(&id.as_i64()).cloned())
    }

    async fn booking_exists(
        &mut self,
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
    ) -> Result<bool, DomainError> {
        let pending = self
            .pending_inserts
            .iter()
            .any(|b| b.user_id() == user_id && b.class_schedule_id() == class_schedule_id);
        Ok(pending || self.guard.booking_exists_for(user_id, class_schedule_id))
    }

    async fn insert_booking(&mut self, new_booking: NewBooking) -> Result<Booking, DomainError> {
        let duplicate = self
            .guard
            .booking_exists_for(new_booking.user_id, new_booking.class_schedule_id)
            || self.pending_inserts.iter().any(|b| {
                b.user_id() == new_booking.user_id
                    && b.class_schedule_id() == new_booking.class_schedule_id
            });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateBooking,
                "You have already booked this class",
            ));
        }

        let id = self.guard.next_booking_id;
        self.guard.next_booking_id += 1;
        let booking = Booking::reconstitute(
            BookingId::new(id),
            new_booking.user_id,
            new_booking.class_schedule_id,
            new_booking.status,
            new_booking.booked_at,
            None,
            new_booking.note,
            1,
        );
        self.pending_inserts.push(booking.clone());
        Ok(booking)
    }

    async fn update_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        if !self.guard.bookings.contains_key(&booking.id().as_i64()) {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id()),
            ));
        }
        self.pending_updates.push(booking.clone());
        Ok(())
    }

    async fn update_class(&mut self, class: &ClassSchedule) -> Result<(), DomainError> {
        if !self.guard.classes.contains_key(&class.id().as_i64()) {
            return Err(DomainError::new(
                ErrorCode::ClassNotFound,
                format!("Class not found: {}", class.id()),
            ));
        }
        self.pending_class = Some(class.clone());
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), DomainError> {
        for booking in self.pending_inserts.drain(..) {
            self.guard.bookings.insert(booking.id().as_i64(), booking);
        }
        for booking in self.pending_updates.drain(..) {
            let bumped = bump_booking_version(&booking);
            self.guard.bookings.insert(booking.id().as_i64(), bumped);
        }
        if let Some(class) = self.pending_class.take() {
            self.guard
                .classes
                .insert(class.id().as_i64(), bump_class_version(&class));
        }
        Ok(())
    }
}
