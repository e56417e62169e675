//! CompleteClassHandler - marks an ended class as completed.

use std::sync::Arc;

use tracing::info;

use crate::domain::class_schedule::{ClassSchedule, ClassScheduleError};
use crate::domain::foundation::{ClassScheduleId, EventEnvelope};
use crate::ports::{ClassScheduleRepository, EventPublisher};

/// Command to complete a class.
#[derive(Debug, Clone)]
pub struct CompleteClassCommand {
    pub class_schedule_id: ClassScheduleId,
}

/// Handler for class completion.
pub struct CompleteClassHandler {
    classes: Arc<dyn ClassScheduleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CompleteClassHandler {
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
        cmd: CompleteClassCommand,
    ) -> Result<ClassSchedule, ClassScheduleError> {
        let mut class = self
            .classes
            .find_by_id(cmd.class_schedule_id)
            .await?
            .ok_or_else(|| ClassScheduleError::not_found(cmd.class_schedule_id))?;

        let event = class.complete()?;
        self.classes.update(&class).await?;

        info!(
            class_id = %class.id(),
            final_bookings = event.final_bookings,
            "class completed"
        );

        self.event_publisher
            .publish(EventEnvelope::from_event(&event))
            .await?;

        Ok(class)
    }
}
