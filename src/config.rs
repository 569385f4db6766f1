// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar configuration.

use chrono::FixedOffset;
use qtty::Days;

/// UTC offset of China Standard Time.
pub const CHINA_UTC_OFFSET_SECONDS: i32 = 8 * 3600;

/// Settings shared by every conversion of a [`ChineseCalendar`](crate::ChineseCalendar).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CalendarConfig {
    /// Treat 23:00–24:00 as the night Zi hour that still belongs to the
    /// current day's pillar.
    pub night_zi_hour: bool,
    /// Zone in which month and day boundaries are decided, seconds east of UTC.
    pub utc_offset_seconds: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            night_zi_hour: true,
            utc_offset_seconds: CHINA_UTC_OFFSET_SECONDS,
        }
    }
}

impl CalendarConfig {
    /// Default settings in the zone `offset`.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            utc_offset_seconds: offset.local_minus_utc(),
            ..Self::default()
        }
    }

    pub fn night_zi_hour(mut self, enabled: bool) -> Self {
        self.night_zi_hour = enabled;
        self
    }

    /// The zone offset as a fraction of a day.
    pub fn utc_offset(&self) -> Days {
        Days::new(self.utc_offset_seconds as f64 / 86_400.0)
    }

    /// The zone offset as a chrono value, if it is a valid one (under 24 h).
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_china_standard_time() {
        let cfg = CalendarConfig::default();
        assert!(cfg.night_zi_hour);
        assert_eq!(cfg.utc_offset_seconds, 28_800);
        assert!((cfg.utc_offset() - Days::new(1.0 / 3.0)).abs() < Days::new(1e-15));
    }

    #[test]
    fn offset_from_chrono() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let cfg = CalendarConfig::with_offset(tokyo).night_zi_hour(false);
        assert_eq!(cfg.utc_offset_seconds, 32_400);
        assert!(!cfg.night_zi_hour);
        assert_eq!(cfg.fixed_offset(), Some(tokyo));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields() {
        let cfg: CalendarConfig = serde_json::from_str(r#"{"night_zi_hour": false}"#).unwrap();
        assert!(!cfg.night_zi_hour);
        assert_eq!(cfg.utc_offset_seconds, CHINA_UTC_OFFSET_SECONDS);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("utc_offset_seconds"));
    }
}
