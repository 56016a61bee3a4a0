pub mod client;
pub mod dto;
pub mod handler;
mod helpers;
pub mod service;

pub use client::{AccessTokenSource, FcmClient, PushSender};
pub use dto::{StatusUpdateDto, TopicMessage};
pub use handler::{handle_healthcheck, handle_method_not_allowed, handle_send};
pub use service::RelayService;
