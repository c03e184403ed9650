use chrono::NaiveDate;
use monlivre_types::{DueStatus, format_fr_date};

/// `dd/mm/yyyy`, or `-` when the date is unknown
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(format_fr_date).unwrap_or_else(|| "-".to_string())
}

pub fn plural(n: i64, word: &str) -> String {
    if n.abs() == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Human label for the due-date column
pub fn due_label(status: DueStatus) -> String {
    match status {
        DueStatus::Overdue { days_late: 0 } => "overdue".to_string(),
        DueStatus::Overdue { days_late } => format!("{} late", plural(days_late, "day")),
        DueStatus::DueSoon { days: 0 } => "due today".to_string(),
        DueStatus::DueSoon { days } if days < 0 => format!("{} past due", plural(-days, "day")),
        DueStatus::DueSoon { days } => format!("due in {}", plural(days, "day")),
        DueStatus::OnTime { days } => format!("{} left", plural(days, "day")),
        DueStatus::Unknown => "no due date".to_string(),
    }
}
