use chrono::{DateTime, Local, TimeZone};

/// Month label in `January_2006` form, used for both paid and due month lists.
pub fn month_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%B_%Y").to_string()
}

pub fn current_month_label() -> String {
    month_label(&Local::now())
}
