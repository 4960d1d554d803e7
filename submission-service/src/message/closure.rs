// ============================================================================
// Recognized Pandemic Closure Periods
// ============================================================================
//
// Corona transfers must reference one of the officially recognized closure
// periods. The allow-list is fixed policy: entries may leave the end date
// open while a closure is ongoing, but submitted periods must always be
// fully specified.
//
// ============================================================================

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A closure period as submitted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosurePeriod {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// An allow-list entry. An open `to_date` accepts any submitted period that
/// starts on the entry's start date and does not end before it begins.
#[derive(Debug, Clone, Copy)]
struct RecognizedPeriod {
    from_date: NaiveDate,
    to_date: Option<NaiveDate>,
}

impl RecognizedPeriod {
    fn matches(&self, period: &ClosurePeriod) -> bool {
        if self.from_date != period.from_date {
            return false;
        }
        match self.to_date {
            Some(to_date) => to_date == period.to_date,
            None => period.to_date >= period.from_date,
        }
    }
}

static RECOGNIZED_PERIODS: Lazy<Vec<RecognizedPeriod>> = Lazy::new(|| {
    vec![
        // Spring 2020 school and kindergarten closure
        RecognizedPeriod {
            from_date: NaiveDate::from_ymd_opt(2020, 3, 13).expect("valid date"),
            to_date: Some(NaiveDate::from_ymd_opt(2020, 6, 30).expect("valid date")),
        },
        // 2021 calendar-year closure window
        RecognizedPeriod {
            from_date: NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date"),
            to_date: Some(NaiveDate::from_ymd_opt(2021, 12, 31).expect("valid date")),
        },
    ]
});

/// Whether the submitted period exactly matches a recognized closure.
pub fn is_recognized_closure_period(period: &ClosurePeriod) -> bool {
    RECOGNIZED_PERIODS.iter().any(|entry| entry.matches(period))
}
