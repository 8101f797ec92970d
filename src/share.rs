//! Share-message templating into WhatsApp deep links.

use crate::progress::{TrackedItem, TrackerMode};
use crate::schedule::{arabic_weekday, format_date, PageRange};
use chrono::{Datelike, NaiveDateTime, Timelike};

const WHATSAPP_SEND_URL: &str = "https://api.whatsapp.com/send";
const DEFAULT_SHARE_TITLE: &str = "القرآن الكريم";

/// Message announcing a page range, with the reader deep link
pub fn pages_share_message(title: &str, range: &PageRange) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_SHARE_TITLE
    } else {
        title
    };
    if range.start == range.end {
        format!("{title} | الصفحة {} | الرابط: {}", range.label, range.link)
    } else {
        format!("{title} | الصفحات {} | الرابط: {}", range.label, range.link)
    }
}

/// Completion announcement for the most recently completed item, with
/// the remaining-unit count. `None` until something is completed.
pub fn progress_share_message(
    mode: TrackerMode,
    items: &[TrackedItem],
    now: NaiveDateTime,
) -> Option<String> {
    let last = items.iter().filter(|i| i.completed).next_back()?;
    let completed = items.iter().filter(|i| i.completed).count();
    let remaining = mode.unit_count() as usize - completed;

    let day = arabic_weekday(now.date().weekday());
    let date = format_date(now.date());
    let time = format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());

    Some(format!(
        "تم بحمد الله وتوفيقه إكمال {label} رقم {number}.\n\
         آخر قراءة وحفظ كان {label} رقم {number} في يوم {day}، بتاريخ {date}، والساعة {time}.\n\
         {plural} المتبقية: {remaining}.",
        label = mode.label(),
        number = last.number,
        plural = mode.plural_label(),
    ))
}

/// Deep link opening WhatsApp with the message prefilled
pub fn whatsapp_url(message: &str) -> String {
    format!("{WHATSAPP_SEND_URL}?text={}", percent_encode(message))
}

/// Percent-encode a query value, keeping RFC 3986 unreserved characters
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::page_ranges;
    use chrono::NaiveDate;

    fn item(number: u32, completed: bool) -> TrackedItem {
        TrackedItem {
            number,
            day: "الأحد".to_string(),
            completed,
            completed_at: None,
            note: None,
            color: "#1e1e2f".to_string(),
            hidden: false,
            audio_notes: Vec::new(),
        }
    }

    #[test]
    fn pages_message_uses_plural_wording_for_ranges() {
        let ranges = page_ranges(3).unwrap();
        let message = pages_share_message("ختمة الفجر", &ranges[0]);
        assert_eq!(
            message,
            "ختمة الفجر | الصفحات من 1 إلى 3 | الرابط: https://read-quran.github.io/quran/3-Pages/3-1"
        );
    }

    #[test]
    fn pages_message_defaults_the_title_and_singularizes() {
        let ranges = page_ranges(1).unwrap();
        let message = pages_share_message("  ", &ranges[0]);
        assert_eq!(
            message,
            "القرآن الكريم | الصفحة 1 | الرابط: https://read-quran.github.io/quran/1-Pages/1"
        );
    }

    #[test]
    fn progress_message_reports_last_completed_and_remaining() {
        let items = vec![item(1, true), item(2, true), item(3, false)];
        let now = NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .and_hms_opt(21, 15, 5)
            .unwrap();

        let message = progress_share_message(TrackerMode::Juz, &items, now).unwrap();
        assert!(message.contains("إكمال الجزء رقم 2"));
        assert!(message.contains("في يوم الأحد"));
        assert!(message.contains("بتاريخ الأحد، 30 أغسطس 2026"));
        assert!(message.contains("والساعة 21:15:05"));
        assert!(message.contains("الأجزاء المتبقية: 28."));
    }

    #[test]
    fn progress_message_is_absent_until_something_is_completed() {
        let items = vec![item(1, false)];
        let now = NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(progress_share_message(TrackerMode::Hizb, &items, now).is_none());
    }

    #[test]
    fn whatsapp_url_percent_encodes_the_message() {
        let url = whatsapp_url("صفحة 1 & more");
        assert!(url.starts_with("https://api.whatsapp.com/send?text="));
        assert!(!url.contains(' '));
        assert!(!url.contains('&'));
        assert!(url.contains("%20"));
        assert!(url.contains("%26"));
        // unreserved characters pass through
        assert!(url.contains("more"));
        assert!(url.contains('1'));
    }
}
