use std::sync::Arc;

use tracing::{error, info};

use crate::core::error::AppError;
use crate::features::relay::client::PushSender;
use crate::features::relay::dto::{StatusUpdateDto, TopicMessage};
use crate::features::relay::helpers::{build_data_payload, message_id_from_name};

pub struct RelayService {
    sender: Arc<dyn PushSender>,
    topic: String,
}

impl RelayService {
    pub fn new(sender: Arc<dyn PushSender>, topic: String) -> Self {
        Self { sender, topic }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub async fn relay(&self, update: StatusUpdateDto) -> Result<String, AppError> {
        info!(
            availability = ?update.availability,
            cart_count = ?update.cart_count,
            status_color = ?update.status_color,
            display_text = ?update.display_text,
            "incoming status update"
        );

        let message = TopicMessage {
            topic: self.topic.clone(),
            data: build_data_payload(&update),
        };

        match self.sender.send_to_topic(&message).await {
            Ok(name) => {
                info!(topic = %self.topic, message_id = message_id_from_name(&name), "push sent");
                Ok(name)
            }
            Err(err) => {
                error!(topic = %self.topic, error = %err, "failed to send push");
                Err(err)
            }
        }
    }
}
