//! Read-only class queries.

use std::sync::Arc;

use crate::domain::class_schedule::{ClassSchedule, ClassScheduleError, ClassStatus};
use crate::domain::foundation::{ClassScheduleId, InstructorId, Timestamp};
use crate::ports::ClassScheduleRepository;

/// Query handler over class schedules.
pub struct ClassQueries {
    classes: Arc<dyn ClassScheduleRepository>,
}

impl ClassQueries {
    pub fn new(classes: Arc<dyn ClassScheduleRepository>) -> Self {
        Self { classes }
    }

    /// Returns a single class.
    pub async fn get_class_details(
        &self,
        id: ClassScheduleId,
    ) -> Result<ClassSchedule, ClassScheduleError> {
        self.classes
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClassScheduleError::not_found(id))
    }

    /// Lists classes with the given status.
    pub async fn list_by_status(
        &self,
        status: ClassStatus,
    ) -> Result<Vec<ClassSchedule>, ClassScheduleError> {
        Ok(self.classes.find_by_status(status).await?)
    }

    /// Lists classes taught by an instructor.
    pub async fn list_by_instructor(
        &self,
        instructor_id: InstructorId,
    ) -> Result<Vec<ClassSchedule>, ClassScheduleError> {
        Ok(self.classes.find_by_instructor(instructor_id).await?)
    }

    /// Lists scheduled classes that have not started yet, soonest first.
    pub async fn list_upcoming(&self) -> Result<Vec<ClassSchedule>, ClassScheduleError> {
        Ok(self
            .classes
            .find_upcoming_by_status(ClassStatus::Scheduled, Timestamp::now())
            .await?)
    }
}
