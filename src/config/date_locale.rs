use crate::error::{
    BadDateTimeFormatterSnafu, InvalidLocaleSnafu, InvalidTimezoneSnafu, RegistrarResult,
};
use icu::{
    calendar::{Date as IcuDate, Iso},
    datetime::{DateTimeFormatter, DateTimeFormatterPreferences, fieldsets::YMD},
    locale::Locale,
};
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use jiff_icu::ConvertFrom;
use snafu::ResultExt;

/// Where "today" is, and how dates get shown to the admin.
#[derive(Debug, Clone)]
pub struct DateLocaleConfig {
    pub timezone: TimeZone,
    pub locale: Locale,
    dtf_prefs: DateTimeFormatterPreferences,
}

impl DateLocaleConfig {
    /// `None` for the timezone means whatever the host is set to.
    pub fn new(timezone: Option<String>, locale: String) -> RegistrarResult<Self> {
        let timezone = match timezone {
            Some(tz) => TimeZone::get(&tz).context(InvalidTimezoneSnafu { tz })?,
            None => TimeZone::system(),
        };

        let locale =
            Locale::try_from_str(&locale).context(InvalidLocaleSnafu { provided: locale })?;
        let mut dtf_prefs = DateTimeFormatterPreferences::default();
        dtf_prefs.locale_preferences = (&locale).into();

        Ok(Self {
            timezone,
            locale,
            dtf_prefs,
        })
    }

    pub fn today(&self) -> Date {
        Timestamp::now().to_zoned(self.timezone.clone()).date()
    }

    /// eg. `Mar 15, 2002` for `en-US`
    pub fn medium_date(&self, date: Date) -> RegistrarResult<String> {
        let formatter = DateTimeFormatter::try_new(self.dtf_prefs, YMD::medium())
            .context(BadDateTimeFormatterSnafu)?;
        let date = IcuDate::<Iso>::convert_from(date);

        Ok(formatter.format(&date).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn formats_medium_us_dates() {
        let config = DateLocaleConfig::new(Some("UTC".into()), "en-US".into()).unwrap();
        assert_eq!(config.medium_date(date(2002, 3, 15)).unwrap(), "Mar 15, 2002");
    }

    #[test]
    fn rejects_unknown_timezones() {
        assert!(DateLocaleConfig::new(Some("Mars/Olympus_Mons".into()), "en-US".into()).is_err());
    }
}
