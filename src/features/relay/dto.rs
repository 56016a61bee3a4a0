use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /send`. Either the storefront status triple or a display text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateDto {
    pub availability: Option<f64>,
    #[serde(rename = "cartcount")]
    pub cart_count: Option<i64>,
    pub status_color: Option<String>,
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicMessage {
    pub topic: String,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FcmSendRequest<'a> {
    pub message: &'a TopicMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FcmSendResponse {
    pub name: String,
}
