use time::{Date, OffsetDateTime};
use time_tz::{OffsetDateTimeExt, Tz};

use crate::Error;

/// Look up a canonical timezone name, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the name is not a known timezone.
pub fn get_timezone(canonical_timezone: &str) -> Result<&'static Tz, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))
}

/// The current calendar date in `timezone`.
pub fn today_in(timezone: &Tz) -> Date {
    OffsetDateTime::now_utc().to_timezone(timezone).date()
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::{
        Error,
        timezone::{get_timezone, today_in},
    };

    #[test]
    fn known_timezone() {
        assert!(get_timezone("Pacific/Auckland").is_ok());
    }

    #[test]
    fn unknown_timezone() {
        assert_eq!(
            get_timezone("Mars/Olympus_Mons").err(),
            Some(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[test]
    fn today_in_utc() {
        let today = today_in(get_timezone("Etc/UTC").unwrap());

        assert_eq!(today, OffsetDateTime::now_utc().date());
    }
}
