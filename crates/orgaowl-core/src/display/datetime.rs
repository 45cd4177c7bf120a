//! Local-time rendering of store timestamps.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` in the system time zone as `YYYY-MM-DD HH:MM:SS TZ`.
///
/// The Unix epoch is what the store writes for records that were seeded
/// rather than edited, and is shown as `never`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self.0 == Timestamp::UNIX_EPOCH {
            return write!(f, "never");
        }
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}
