use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::bot::{
    constants::messages::{DOCUMENT_PREFIX, SCREENSHOT_PREFIX},
    services::Attachment,
};

use super::time::format_file_timestamp;

// Make a one-time reply keyboard, one option per row.
pub fn make_keyboard(options: &[String]) -> KeyboardMarkup {
    let keyboard: Vec<Vec<KeyboardButton>> = options
        .iter()
        .map(|option| vec![KeyboardButton::new(option.clone())])
        .collect();

    KeyboardMarkup::new(keyboard)
        .resize_keyboard(true)
        .one_time_keyboard(true)
}

// Name under which an attachment is stored. Documents keep their own name,
// photos get a timestamped name.
pub fn attachment_file_name(
    attachment: &Attachment,
    sender: &str,
    now: DateTime<Utc>,
    time_zone: Tz,
) -> String {
    let stamp = format_file_timestamp(now, time_zone);
    match attachment {
        Attachment::Document {
            file_name: Some(file_name),
            ..
        } => file_name.clone(),
        Attachment::Document { .. } => format!("{} {} {}", DOCUMENT_PREFIX, stamp, sender),
        Attachment::Photo { .. } => format!("{} {} {}", SCREENSHOT_PREFIX, stamp, sender),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_make_keyboard_one_option_per_row() {
        let keyboard = make_keyboard(&["Income".to_string(), "Outcome".to_string()]);
        assert_eq!(keyboard.keyboard.len(), 2);
        assert_eq!(keyboard.keyboard[0].len(), 1);
        assert_eq!(keyboard.keyboard[1][0].text, "Outcome");
    }

    #[test]
    fn test_document_keeps_own_name() {
        let attachment = Attachment::Document {
            file_id: "doc".to_string(),
            file_name: Some("receipt.pdf".to_string()),
            mime_type: None,
        };
        assert_eq!(
            attachment_file_name(&attachment, "alice", noon(), Tz::UTC),
            "receipt.pdf"
        );
    }

    #[test]
    fn test_photo_name_is_synthesized() {
        let attachment = Attachment::Photo {
            file_id: "photo".to_string(),
        };
        assert_eq!(
            attachment_file_name(&attachment, "alice", noon(), Tz::UTC),
            "Screenshot 05-01-2024T12:00:00 alice"
        );
    }
}
