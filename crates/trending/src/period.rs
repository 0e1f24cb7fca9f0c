use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime, Time, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Today, Period::Week, Period::Month];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
        }
    }

    /// First instant inside the window. `today` starts at midnight in
    /// `offset`; the trailing windows are relative to `now`.
    pub fn start(&self, now: OffsetDateTime, offset: UtcOffset) -> OffsetDateTime {
        match self {
            Period::Today => now.to_offset(offset).replace_time(Time::MIDNIGHT),
            Period::Week => now - Duration::days(7),
            Period::Month => now - Duration::days(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn test_window_starts() {
        let now = datetime!(2026-10-19 15:30 UTC);
        assert_eq!(Period::Today.start(now, UtcOffset::UTC), datetime!(2026-10-19 00:00 UTC));
        assert_eq!(Period::Week.start(now, UtcOffset::UTC), datetime!(2026-10-12 15:30 UTC));
        assert_eq!(Period::Month.start(now, UtcOffset::UTC), datetime!(2026-09-19 15:30 UTC));
    }

    #[test]
    fn test_today_follows_local_midnight() {
        // 22:00 UTC is already the next day in UTC+4.
        let now = datetime!(2026-10-19 22:00 UTC);
        let start = Period::Today.start(now, offset!(+4));
        assert_eq!(start, datetime!(2026-10-20 00:00 +4));
        assert_eq!(start, datetime!(2026-10-19 20:00 UTC));
    }
}
