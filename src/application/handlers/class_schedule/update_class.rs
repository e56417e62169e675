//! UpdateClassHandler - structural changes to a scheduled class.
//!
//! Runs on the non-locked path: the write is guarded by the aggregate
//! version, so a concurrent edit surfaces as a conflict instead of a
//! silent overwrite.

use std::sync::Arc;

use tracing::info;

use crate::domain::class_schedule::{ClassSchedule, ClassScheduleError};
use crate::domain::foundation::{Capacity, ClassScheduleId, Location, TimeRange, Timestamp};
use crate::ports::ClassScheduleRepository;

/// Command to update a class.
#[derive(Debug, Clone)]
pub struct UpdateClassCommand {
    pub class_schedule_id: ClassScheduleId,
    pub name: String,
    pub description: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub capacity: u32,
    pub location: String,
}

/// Handler for class updates.
pub struct UpdateClassHandler {
    classes: Arc<dyn ClassScheduleRepository>,
}

impl UpdateClassHandler {
    pub fn new(classes: Arc<dyn ClassScheduleRepository>) -> Self {
        Self { classes }
    }

    pub async fn handle(
        &self,
        cmd: UpdateClassCommand,
    ) -> Result<ClassSchedule, ClassScheduleError> {
        if !cmd.start_time.is_before(&cmd.end_time) {
            return Err(ClassScheduleError::validation(
                "time_range",
                "End time must be after start time",
            ));
        }

        let mut class = self
            .classes
            .find_by_id(cmd.class_schedule_id)
            .await?
            .ok_or_else(|| ClassScheduleError::not_found(cmd.class_schedule_id))?;

        let time_range = TimeRange::new(cmd.start_time, cmd.end_time)
            .map_err(|e| ClassScheduleError::validation("time_range", e.to_string()))?;
        let capacity = Capacity::new(cmd.capacity)
            .map_err(|e| ClassScheduleError::validation("capacity", e.to_string()))?;
        let location = Location::new(cmd.location)
            .map_err(|e| ClassScheduleError::validation("location", e.to_string()))?;

        class.update(cmd.name, cmd.description, time_range, capacity, location)?;

        self.classes.update(&class).await?;

        info!(class_id = %class.id(), "class updated");

        Ok(class)
    }
}
