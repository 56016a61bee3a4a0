use std::collections::BTreeMap;

use crate::core::error::AppError;
use crate::features::relay::dto::StatusUpdateDto;

pub(crate) const AVAILABILITY_KEY: &str = "availability";
pub(crate) const CART_COUNT_KEY: &str = "cartcount";
pub(crate) const STATUS_COLOR_KEY: &str = "statusColor";
pub(crate) const DISPLAY_TEXT_KEY: &str = "displayText";

/// Decodes the first JSON value in the body. Trailing bytes are ignored and
/// `null` decodes to an empty update.
pub(crate) fn parse_status_update(body: &[u8]) -> Result<StatusUpdateDto, AppError> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<StatusUpdateDto>>()
        .next()
        .ok_or_else(|| AppError::bad_request("request body is empty".to_string()))?;

    first
        .map(Option::unwrap_or_default)
        .map_err(|err| AppError::bad_request(format!("failed to parse status update: {err}")))
}

/// Flattens the update into FCM data. Any status field pulls in the whole
/// status key set with zero values for the missing ones; without one, the
/// display text is always sent, empty if absent.
pub(crate) fn build_data_payload(update: &StatusUpdateDto) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();

    let has_status = update.availability.is_some()
        || update.cart_count.is_some()
        || update.status_color.is_some();

    if has_status {
        data.insert(
            AVAILABILITY_KEY.to_string(),
            update.availability.unwrap_or_default().to_string(),
        );
        data.insert(
            CART_COUNT_KEY.to_string(),
            update.cart_count.unwrap_or_default().to_string(),
        );
        data.insert(
            STATUS_COLOR_KEY.to_string(),
            update.status_color.clone().unwrap_or_default(),
        );
        if let Some(display_text) = &update.display_text {
            data.insert(DISPLAY_TEXT_KEY.to_string(), display_text.clone());
        }
    } else {
        data.insert(
            DISPLAY_TEXT_KEY.to_string(),
            update.display_text.clone().unwrap_or_default(),
        );
    }

    data
}

/// FCM names messages `projects/<id>/messages/<message id>`.
pub(crate) fn message_id_from_name(name: &str) -> &str {
    name.rsplit_once("/messages/")
        .map(|(_, id)| id)
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_storefront_status() {
        let update = parse_status_update(
            br#"{"availability": 87.5, "cartcount": 3, "statusColor": "green"}"#,
        )
        .unwrap();
        let data = build_data_payload(&update);

        assert_eq!(data.len(), 3);
        assert_eq!(data["availability"], "87.5");
        assert_eq!(data["cartcount"], "3");
        assert_eq!(data["statusColor"], "green");
    }

    #[test]
    fn partial_status_fills_zero_values() {
        let update = parse_status_update(br#"{"availability": 50}"#).unwrap();
        let data = build_data_payload(&update);

        assert_eq!(data.len(), 3);
        assert_eq!(data["availability"], "50");
        assert_eq!(data["cartcount"], "0");
        assert_eq!(data["statusColor"], "");
    }

    #[test]
    fn whole_number_availability_has_no_fraction() {
        let update = parse_status_update(br#"{"availability": 100}"#).unwrap();
        let data = build_data_payload(&update);
        assert_eq!(data["availability"], "100");
    }

    #[test]
    fn display_text_passes_through_and_extra_fields_are_ignored() {
        let update =
            parse_status_update(br#"{"displayText": "HELLO WORLD", "source": "kiosk"}"#).unwrap();
        let data = build_data_payload(&update);

        assert_eq!(data.len(), 1);
        assert_eq!(data["displayText"], "HELLO WORLD");
    }

    #[test]
    fn update_without_known_fields_sends_empty_display_text() {
        for body in [&br#"{}"#[..], &br#"{"unrelated": true}"#[..], &b"null"[..]] {
            let update = parse_status_update(body).unwrap();
            let data = build_data_payload(&update);

            assert_eq!(data.len(), 1);
            assert_eq!(data["displayText"], "");
        }
    }

    #[test]
    fn ignores_bytes_after_first_value() {
        let update = parse_status_update(br#"{"displayText":"a"} trailing"#).unwrap();
        assert_eq!(update.display_text.as_deref(), Some("a"));
    }

    #[test]
    fn rejects_malformed_json_and_wrong_types() {
        assert!(matches!(
            parse_status_update(b"{not json"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_status_update(b""),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_status_update(b"42"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_status_update(br#"{"cartcount": "three"}"#),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn extracts_message_id() {
        assert_eq!(
            message_id_from_name("projects/relay-test/messages/0:1500415314455276%31bd1c9631bd1c96"),
            "0:1500415314455276%31bd1c9631bd1c96"
        );
        assert_eq!(message_id_from_name("bare-id"), "bare-id");
    }
}
