//! Site-wide settings singleton (address, phone, opening hours, platform
//! links and call-to-action toggles).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::menu::{describe_errors, Platform};

/// Primary key of the only settings row.
pub const SETTINGS_ID: i32 = 1;

/// Accepted keys of [`Settings::hours`].
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid clock time regex"));

/// Opening hours for one weekday: either `{open, close}` or `{closed: true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closed: bool,
}

impl DayHours {
    pub fn open(open: &str, close: &str) -> Self {
        Self {
            open: Some(open.to_string()),
            close: Some(close.to_string()),
            closed: false,
        }
    }

    pub fn closed() -> Self {
        Self {
            closed: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PlatformUrls {
    #[validate(url(message = "must be an absolute URL"))]
    pub doordash: String,
    #[validate(url(message = "must be an absolute URL"))]
    pub grubhub: String,
}

impl PlatformUrls {
    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::Doordash => &self.doordash,
            Platform::Grubhub => &self.grubhub,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaToggles {
    pub doordash: bool,
    pub grubhub: bool,
}

impl CtaToggles {
    pub fn get(&self, platform: Platform) -> bool {
        match platform {
            Platform::Doordash => self.doordash,
            Platform::Grubhub => self.grubhub,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub address: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub phone: String,
    #[validate(custom(function = "validate_hours"))]
    pub hours: BTreeMap<String, DayHours>,
    #[validate(nested)]
    pub platform_base_urls: PlatformUrls,
    pub cta_toggles: CtaToggles,
}

impl Settings {
    /// Run boundary validation, returning the settings unchanged on success.
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(describe_errors(&e)))?;
        Ok(self)
    }
}

fn hours_error(message: String) -> ValidationError {
    ValidationError::new("hours").with_message(message.into())
}

fn validate_hours(hours: &BTreeMap<String, DayHours>) -> Result<(), ValidationError> {
    for (day, entry) in hours {
        if !WEEKDAYS.contains(&day.as_str()) {
            return Err(hours_error(format!("unknown weekday '{day}'")));
        }
        if entry.closed {
            continue;
        }
        for (label, time) in [("open", &entry.open), ("close", &entry.close)] {
            match time {
                Some(t) if CLOCK_TIME.is_match(t) => {}
                Some(t) => {
                    return Err(hours_error(format!("{day}.{label} '{t}' is not HH:MM")));
                }
                None => return Err(hours_error(format!("{day}.{label} is required"))),
            }
        }
    }
    Ok(())
}
