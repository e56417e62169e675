//! CancelClassHandler - cancels a scheduled class.

use std::sync::Arc;

use tracing::info;

use crate::domain::class_schedule::{ClassSchedule, ClassScheduleError};
use crate::domain::foundation::{ClassScheduleId, EventEnvelope};
use crate::ports::{ClassScheduleRepository, EventPublisher};

/// Command to cancel a class.
#[derive(Debug, Clone)]
pub struct CancelClassCommand {
    pub class_schedule_id: ClassScheduleId,
    pub reason: Option<String>,
}

/// Handler for class cancellation.
pub struct CancelClassHandler {
    classes: Arc<dyn ClassScheduleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelClassHandler {
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
        cmd: CancelClassCommand,
    ) -> Result<ClassSchedule, ClassScheduleError> {
        let mut class = self
            .classes
            .find_by_id(cmd.class_schedule_id)
            .await?
            .ok_or_else(|| ClassScheduleError::not_found(cmd.class_schedule_id))?;

        let event = class.cancel(cmd.reason)?;
        self.classes.update(&class).await?;

        info!(
            class_id = %class.id(),
            affected_bookings = event.current_bookings,
            "class cancelled"
        );

        self.event_publisher
            .publish(EventEnvelope::from_event(&event))
            .await?;

        Ok(class)
    }
}
