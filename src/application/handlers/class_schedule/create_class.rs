//! CreateClassHandler - schedules a new class.

use std::sync::Arc;

use tracing::info;

use crate::domain::class_schedule::{ClassSchedule, ClassScheduleError, NewClassSchedule};
use crate::domain::foundation::{Capacity, InstructorId, Location, TimeRange, Timestamp};
use crate::ports::{ClassScheduleRepository, InstructorRepository};

/// Command to schedule a class.
#[derive(Debug, Clone)]
pub struct CreateClassCommand {
    pub name: String,
    pub description: String,
    pub instructor_id: InstructorId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub capacity: u32,
    pub location: String,
}

/// Handler for class creation.
pub struct CreateClassHandler {
    classes: Arc<dyn ClassScheduleRepository>,
    instructors: Arc<dyn InstructorRepository>,
}

impl CreateClassHandler {
    pub fn new(
        classes: Arc<dyn ClassScheduleRepository>,
        instructors: Arc<dyn InstructorRepository>,
    ) -> Self {
        Self {
            classes,
            instructors,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateClassCommand,
    ) -> Result<ClassSchedule, ClassScheduleError> {
        // Time ordering is checked before any value object is built so the
        // caller gets the ordering message rather than a duration one.
        if !cmd.start_time.is_before(&cmd.end_time) {
            return Err(ClassScheduleError::validation(
                "time_range",
                "End time must be after start time",
            ));
        }

        let instructor = self
            .instructors
            .find_by_id(cmd.instructor_id)
            .await?
            .ok_or_else(|| ClassScheduleError::instructor_not_found(cmd.instructor_id))?;

        let time_range = TimeRange::new(cmd.start_time, cmd.end_time)
            .map_err(|e| ClassScheduleError::validation("time_range", e.to_string()))?;
        let capacity = Capacity::new(cmd.capacity)
            .map_err(|e| ClassScheduleError::validation("capacity", e.to_string()))?;
        let location = Location::new(cmd.location)
            .map_err(|e| ClassScheduleError::validation("location", e.to_string()))?;

        let new_class = NewClassSchedule::new(
            cmd.name,
            cmd.description,
            instructor.id(),
            time_range,
            capacity,
            location,
        )
        .map_err(|e| ClassScheduleError::validation("name", e.to_string()))?;

        let class = self.classes.insert(new_class).await?;

        info!(
            class_id = %class.id(),
            instructor_id = %instructor.id(),
            capacity = class.capacity().value(),
            "class scheduled"
        );

        Ok(class)
    }
}
