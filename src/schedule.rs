//! Page-range generation and day-by-day reading schedules over the fixed
//! 604-page text.

use crate::error::WirdError;
use crate::progress::WEEKDAYS;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Page count of the standard mushaf
pub const TOTAL_PAGES: u32 = 604;

const READER_BASE_URL: &str = "https://read-quran.github.io/quran";

/// Arabic Gregorian month names as rendered to the reader
const MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
    /// Display label, bare page number for single-page ranges
    pub label: String,
    /// Deep link into the external page reader
    pub link: String,
}

/// Partition 1..=604 into consecutive ranges of `per_group` pages, the
/// last range clipped at the end of the text.
pub fn page_ranges(per_group: u32) -> Result<Vec<PageRange>, WirdError> {
    if per_group == 0 {
        return Err(WirdError::InvalidQuery(
            "page group size must be at least 1".into(),
        ));
    }

    let mut ranges = Vec::new();
    if per_group == 1 {
        for page in 1..=TOTAL_PAGES {
            ranges.push(PageRange {
                start: page,
                end: page,
                label: page.to_string(),
                link: format!("{READER_BASE_URL}/1-Pages/{page}"),
            });
        }
    } else {
        let mut start = 1u32;
        while start <= TOTAL_PAGES {
            let end = start.saturating_add(per_group - 1).min(TOTAL_PAGES);
            ranges.push(PageRange {
                start,
                end,
                label: format!("من {start} إلى {end}"),
                link: format!("{READER_BASE_URL}/{per_group}-Pages/{end}-{start}"),
            });
            start = end + 1;
        }
    }
    Ok(ranges)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub start_page: u32,
    pub end_page: u32,
}

/// Day-by-day reading plan stepping one calendar date at a time. When
/// `num_days` is absent the plan runs to the end of the text; either way
/// it stops once page 604 is assigned.
pub fn reading_schedule(
    pages_per_day: u32,
    start_page: u32,
    start_date: NaiveDate,
    num_days: Option<u32>,
) -> Result<Vec<ScheduleDay>, WirdError> {
    if pages_per_day == 0 {
        return Err(WirdError::InvalidQuery(
            "pages per day must be at least 1".into(),
        ));
    }
    if start_page < 1 || start_page > TOTAL_PAGES {
        return Err(WirdError::OutOfRange(format!(
            "start page {start_page} outside [1, {TOTAL_PAGES}]"
        )));
    }

    let remaining = TOTAL_PAGES - start_page + 1;
    let days = num_days.unwrap_or_else(|| remaining.div_ceil(pages_per_day));

    let mut plan = Vec::new();
    let mut page = start_page;
    let mut date = start_date;
    for _ in 0..days {
        if page > TOTAL_PAGES {
            break;
        }
        let end = page.saturating_add(pages_per_day - 1).min(TOTAL_PAGES);
        plan.push(ScheduleDay {
            date,
            start_page: page,
            end_page: end,
        });
        page = end + 1;
        date += Duration::days(1);
    }
    Ok(plan)
}

pub fn arabic_weekday(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_sunday() as usize]
}

/// Render a date with Arabic weekday and month names
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{}، {} {} {}",
        arabic_weekday(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

fn month_label(date: NaiveDate) -> String {
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}

/// Plain-text rendering of a plan, grouped by month with separator
/// blocks, matching the clipboard export of the pages screen.
pub fn format_schedule(plan: &[ScheduleDay]) -> String {
    let mut out = String::from("تقسيم الصفحات:\n\n");
    let mut current_month = String::new();

    for day in plan {
        let month = month_label(day.date);
        if month != current_month {
            if !current_month.is_empty() {
                out.push('\n');
                out.push_str(&"=".repeat(20));
                out.push('\n');
                out.push_str(&month);
                out.push('\n');
                out.push_str(&"=".repeat(20));
                out.push_str("\n\n");
            }
            current_month = month;
        }
        out.push_str(&format!(
            "{}: الصفحات {} - {}\n",
            format_date(day.date),
            day.start_page,
            day.end_page
        ));
    }
    out
}
