//! Weekly operating hours of a collection point.
//!
//! [`OperatingHours`] is the state behind the hours form: one entry per
//! weekday plus a "weekdays" group entry that fans its times out to
//! Monday through Friday.

use chrono::{NaiveTime, Weekday};
use serde::Serialize;

use crate::Result;
use crate::error::InvalidInputError;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Normalise free-form keypad input into `HH:MM`.
///
/// Non-digits are dropped and at most four digits are kept. A complete
/// hour is clamped to 23 and a complete minute to 59. Partial input is
/// returned as far as it goes, so the result can be fed back while typing.
///
/// ```
/// use ecomap_core::format_time;
///
/// assert_eq!(format_time("0830"), "08:30");
/// assert_eq!(format_time("2975"), "23:59");
/// assert_eq!(format_time("9"), "9");
/// ```
pub fn format_time(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.is_empty() {
        return String::new();
    }

    let (hours, minutes) = digits.split_at(digits.len().min(2));
    let hours = clamp_pair(hours, 23);
    let minutes = clamp_pair(minutes, 59);

    if minutes.is_empty() {
        hours
    } else {
        format!("{hours}:{minutes}")
    }
}

fn clamp_pair(part: &str, max: u32) -> String {
    if part.len() != 2 {
        return part.to_string();
    }
    let value = part.parse::<u32>().unwrap_or(0).min(max);
    format!("{value:02}")
}

/// Which entry of the form an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursSlot {
    Day(Weekday),
    /// Monday through Friday at once.
    Weekdays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Open,
    Close,
}

/// One row of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayHours {
    pub selected: bool,
    pub open: String,
    pub close: String,
}

impl DayHours {
    fn set(&mut self, field: TimeField, value: &str) {
        match field {
            TimeField::Open => self.open = value.to_string(),
            TimeField::Close => self.close = value.to_string(),
        }
    }
}

/// A validated opening interval for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpeningPeriod {
    pub weekday: Weekday,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

/// Form state for a point's weekly schedule.
///
/// ```
/// use chrono::Weekday;
/// use ecomap_core::{HoursSlot, OperatingHours, TimeField, format_time};
///
/// let mut hours = OperatingHours::new();
/// hours.toggle(HoursSlot::Weekdays);
/// hours.set_time(HoursSlot::Weekdays, TimeField::Open, &format_time("0800"));
/// hours.set_time(HoursSlot::Weekdays, TimeField::Close, &format_time("1800"));
///
/// let periods = hours.periods()?;
/// assert_eq!(periods.len(), 5);
/// assert_eq!(periods[4].weekday, Weekday::Fri);
/// assert!(!hours.is_open(Weekday::Sat));
/// # Ok::<(), ecomap_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatingHours {
    days: [DayHours; 7],
    weekdays: DayHours,
}

impl OperatingHours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: HoursSlot) -> &DayHours {
        match slot {
            HoursSlot::Day(day) => &self.days[day.num_days_from_monday() as usize],
            HoursSlot::Weekdays => &self.weekdays,
        }
    }

    fn get_mut(&mut self, slot: HoursSlot) -> &mut DayHours {
        match slot {
            HoursSlot::Day(day) => &mut self.days[day.num_days_from_monday() as usize],
            HoursSlot::Weekdays => &mut self.weekdays,
        }
    }

    fn working_days(&mut self) -> &mut [DayHours] {
        &mut self.days[..5]
    }

    /// Flip the selection of a slot.
    ///
    /// Selecting the weekdays group copies its times onto Monday to Friday.
    /// Deselecting a single day clears its times.
    pub fn toggle(&mut self, slot: HoursSlot) {
        match slot {
            HoursSlot::Weekdays => {
                self.weekdays.selected = !self.weekdays.selected;
                if self.weekdays.selected {
                    let (open, close) = (self.weekdays.open.clone(), self.weekdays.close.clone());
                    for day in self.working_days() {
                        day.open = open.clone();
                        day.close = close.clone();
                    }
                }
            }
            HoursSlot::Day(_) => {
                let entry = self.get_mut(slot);
                entry.selected = !entry.selected;
                if !entry.selected {
                    entry.open.clear();
                    entry.close.clear();
                }
            }
        }
    }

    /// Set a time on a slot. While the weekdays group is selected, its
    /// times are mirrored onto Monday to Friday.
    pub fn set_time(&mut self, slot: HoursSlot, field: TimeField, value: &str) {
        self.get_mut(slot).set(field, value);

        if slot == HoursSlot::Weekdays && self.weekdays.selected {
            for day in self.working_days() {
                day.set(field, value);
            }
        }
    }

    /// Whether a weekday is open, either on its own or through the group.
    pub fn is_open(&self, day: Weekday) -> bool {
        let working_day = day.num_days_from_monday() < 5;
        self.get(HoursSlot::Day(day)).selected || (working_day && self.weekdays.selected)
    }

    /// The opening periods of every open day, Monday first.
    ///
    /// # Errors
    ///
    /// Returns an error if an open day has an incomplete or invalid time.
    pub fn periods(&self) -> Result<Vec<OpeningPeriod>> {
        WEEK.iter()
            .filter(|day| self.is_open(**day))
            .map(|&weekday| {
                let entry = self.get(HoursSlot::Day(weekday));
                Ok(OpeningPeriod {
                    weekday,
                    open: parse_time(&entry.open, weekday)?,
                    close: parse_time(&entry.close, weekday)?,
                })
            })
            .collect()
    }
}

fn parse_time(value: &str, day: Weekday) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| {
        InvalidInputError::Time {
            value: value.to_string(),
            day: day.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
