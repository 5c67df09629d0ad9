//! Time-of-day greeting shown on the home page.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::time::GREETING_DATETIME_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Greeting {
    #[serde(rename = "Доброй ночи")]
    Night,
    #[serde(rename = "Доброе утро")]
    Morning,
    #[serde(rename = "Добрый день")]
    Afternoon,
    #[serde(rename = "Добрый вечер")]
    Evening,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..6 => Greeting::Night,
            6..12 => Greeting::Morning,
            12..18 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Greeting::Night => "Доброй ночи",
            Greeting::Morning => "Доброе утро",
            Greeting::Afternoon => "Добрый день",
            Greeting::Evening => "Добрый вечер",
        }
    }
}

/// Greeting for a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn greeting(text: &str) -> Result<Greeting> {
    let at = NaiveDateTime::parse_from_str(text.trim(), GREETING_DATETIME_FORMAT).map_err(
        |source| ReportError::InvalidGreetingTime {
            value: text.to_string(),
            source,
        },
    )?;
    Ok(Greeting::for_hour(at.hour()))
}
