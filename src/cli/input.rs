use std::{fmt::Display, path::PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use now::DateTimeNow;

use crate::{
    extract::{
        entities::SampleRange,
        export_source::DirectoryExportSource,
        tag::{TagPattern, DEFAULT_LAYOUT},
    },
    utils::time::next_day_start,
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Where exports are read from and which of their results are used. Shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    #[arg(
        long,
        default_value = ".",
        help = "Directory with messages.html, messages2.html, ..."
    )]
    pub dir: PathBuf,
    #[arg(long, default_value = DEFAULT_LAYOUT, help = "Keyboard layout named in result tags")]
    pub layout: String,
    #[arg(
        long = "start",
        short,
        help = "Ignore results before this date. Examples are \"yesterday\", \"1 week ago\", \"15/03/2025\", \"12:00 16/03/2025\""
    )]
    pub start_date: Option<String>,
    #[arg(
        long = "end",
        short,
        help = "Ignore results from this date on. Examples are \"yesterday\", \"1 week ago\", \"15/03/2025\", \"12:00 16/03/2025\""
    )]
    pub end_date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    pub date_style: DateStyle,
    #[arg(
        long = "days",
        default_value_t = false,
        help = "Take start and end as whole days. For example if both are 15/03/2025 the whole day is used"
    )]
    pub treat_as_days: bool,
}

impl InputArgs {
    pub fn source(&self) -> DirectoryExportSource {
        DirectoryExportSource::new(self.dir.clone())
    }

    pub fn pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.layout)
    }

    pub fn range(&self) -> Result<SampleRange> {
        parse_range(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.date_style,
            self.treat_as_days,
            Local::now(),
        )
    }
}

/// Export dates carry no zone, so the range is compared in local time.
fn parse_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
    date_style: DateStyle,
    treat_as_days: bool,
    now: DateTime<Local>,
) -> Result<SampleRange> {
    let dialect: chrono_english::Dialect = date_style.into();
    let parse = |value: Option<&str>, name: &str| -> Result<Option<DateTime<Local>>> {
        match value.map(|s| parse_date_string(s, now, dialect)) {
            Some(Ok(v)) => Ok(Some(v)),
            Some(Err(e)) => Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate {name} date {e}"),
                )
                .into()),
            None => Ok(None),
        }
    };

    let mut start = parse(start_date, "start")?;
    let mut end = parse(end_date, "end")?;
    if treat_as_days {
        start = start.map(|v| v.beginning_of_day());
        end = end.map(next_day_start);
    }

    Ok(SampleRange {
        start: start.map(|v| v.naive_local()),
        end: end.map(|v| v.naive_local()),
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Local, NaiveDate, TimeZone};

    use super::{parse_range, DateStyle};

    #[test]
    fn no_dates_is_unbounded() -> Result<()> {
        let range = parse_range(None, None, DateStyle::Uk, false, Local::now())?;
        assert!(range.start.is_none());
        assert!(range.end.is_none());
        Ok(())
    }

    #[test]
    fn whole_days() -> Result<()> {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let range = parse_range(Some("05/03/2024"), Some("05/03/2024"), DateStyle::Uk, true, now)?;

        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(range.start, day.and_hms_opt(0, 0, 0));
        assert_eq!(range.end, day.succ_opt().unwrap().and_hms_opt(0, 0, 0));
        Ok(())
    }

    #[test]
    fn date_style_changes_order() -> Result<()> {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let range = parse_range(Some("03/05/2024"), None, DateStyle::Us, true, now)?;
        assert_eq!(
            range.start.map(|v| v.date()),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        Ok(())
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(parse_range(Some("not a date at all"), None, DateStyle::Uk, false, Local::now()).is_err());
    }
}
