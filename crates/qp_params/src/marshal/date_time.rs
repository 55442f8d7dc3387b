use alloc::string::{String, ToString};

use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::config::{DateTimeFormat, QueryConfig};
use crate::value::DateTimeRef;

/// Renders a date-time according to the configured format.
///
/// - A pattern (with [`DateTimeFormat::Pattern`]) is applied with
///   `jiff::fmt::strtime`. If the value lacks a field the pattern needs,
///   the natural form is used and a warning is logged.
/// - [`DateTimeFormat::IsoLocalDateTime`] drops offsets and time zones,
///   instants are read in UTC.
/// - [`DateTimeFormat::IsoLocalDate`] keeps only the date.
/// - Otherwise the natural `Display` form.
pub(crate) fn render(value: DateTimeRef<'_>, config: &QueryConfig) -> String {
    if let Some(pattern) = config.active_pattern() {
        let formatted = match value {
            DateTimeRef::Date(date) => strtime::format(pattern, date),
            DateTimeRef::Time(time) => strtime::format(pattern, time),
            DateTimeRef::DateTime(dt) => strtime::format(pattern, dt),
            DateTimeRef::Zoned(zoned) => strtime::format(pattern, zoned),
            DateTimeRef::Timestamp(ts) => strtime::format(pattern, ts),
        };
        return match formatted {
            Ok(text) => text,
            Err(err) => {
                log::warn!("date-time pattern `{pattern}` cannot format `{}`: {err}", natural(value));
                natural(value)
            }
        };
    }

    match config.date_time_format() {
        DateTimeFormat::IsoLocalDateTime => match value {
            DateTimeRef::Zoned(zoned) => zoned.datetime().to_string(),
            DateTimeRef::Timestamp(ts) => ts.to_zoned(TimeZone::UTC).datetime().to_string(),
            other => natural(other),
        },
        DateTimeFormat::IsoLocalDate => match value {
            DateTimeRef::DateTime(dt) => dt.date().to_string(),
            DateTimeRef::Zoned(zoned) => zoned.date().to_string(),
            DateTimeRef::Timestamp(ts) => ts.to_zoned(TimeZone::UTC).date().to_string(),
            other => natural(other),
        },
        _ => natural(value),
    }
}

fn natural(value: DateTimeRef<'_>) -> String {
    match value {
        DateTimeRef::Date(date) => date.to_string(),
        DateTimeRef::Time(time) => time.to_string(),
        DateTimeRef::DateTime(dt) => dt.to_string(),
        DateTimeRef::Zoned(zoned) => zoned.to_string(),
        DateTimeRef::Timestamp(ts) => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use jiff::civil::{date, time};
    use jiff::tz::TimeZone;

    use super::render;
    use crate::config::{DateTimeFormat, QueryConfig};
    use crate::value::DateTimeRef;

    fn config(format: DateTimeFormat) -> QueryConfig {
        QueryConfig::new().with_date_time_format(format)
    }

    #[test]
    fn natural_forms() {
        let config = QueryConfig::new();
        let day = date(2024, 3, 9);
        assert_eq!(render(DateTimeRef::Date(day), &config), "2024-03-09");
        assert_eq!(render(DateTimeRef::Time(time(14, 5, 0, 0)), &config), "14:05:00");
        assert_eq!(
            render(DateTimeRef::DateTime(day.at(14, 5, 0, 0)), &config),
            "2024-03-09T14:05:00"
        );
        let ts = Timestamp::from_second(0).unwrap();
        assert_eq!(render(DateTimeRef::Timestamp(ts), &config), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn local_forms() {
        let zoned = date(2024, 3, 9)
            .at(14, 5, 0, 0)
            .to_zoned(TimeZone::fixed(jiff::tz::offset(-5)))
            .unwrap();

        let local = config(DateTimeFormat::IsoLocalDateTime);
        assert_eq!(render(DateTimeRef::Zoned(&zoned), &local), "2024-03-09T14:05:00");
        assert_eq!(
            render(DateTimeRef::Timestamp(zoned.timestamp()), &local),
            "2024-03-09T19:05:00"
        );

        let day = config(DateTimeFormat::IsoLocalDate);
        assert_eq!(render(DateTimeRef::Zoned(&zoned), &day), "2024-03-09");
        assert_eq!(render(DateTimeRef::Time(time(1, 2, 3, 0)), &day), "01:02:03");
    }

    #[test]
    fn patterns() {
        let config = config(DateTimeFormat::Pattern).with_pattern("%Y/%m/%d");
        let moment = date(2024, 3, 9).at(14, 5, 0, 0);
        assert_eq!(render(DateTimeRef::DateTime(moment), &config), "2024/03/09");

        // A time has no date fields.
        let text = render(DateTimeRef::Time(time(14, 5, 0, 0)), &config);
        assert_eq!(text, "14:05:00");

        // A pattern is only used with the pattern format.
        let ignored = QueryConfig::new().with_pattern("%Y");
        assert_eq!(render(DateTimeRef::DateTime(moment), &ignored), "2024-03-09T14:05:00");
    }
}
