//! 만세력 레코드 타입: 와이어 형태와 정규화된 결과 형태.
//!
//! Record types: the camelCase wire shape delivered by the remote API and the
//! local dataset file, and the normalized value type handed to callers.

use crate::{DateKey, Error, Result};
use serde::{Deserialize, Serialize};

/// Which tier produced a record. Attached to every returned value for
/// observability; never affects the payload itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Remote,
    Local,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Remote => "remote",
            Source::Local => "local",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

/// Year and day pillars (간지), e.g. `갑진` / `병오`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ganji {
    pub year: String,
    pub day: String,
}

/// One normalized manseryeok record. Immutable once constructed; the cache
/// hands out clones of this type, never references into its own map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub ganji: Ganji,
    pub week_day: String,
    pub zodiac: String,
    pub term: Option<String>,
    pub source: Source,
}

impl CalendarDay {
    /// The same payload re-tagged with a different provenance. Used when a
    /// record stored from the remote or local tier is later served from cache.
    pub(crate) fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn key(&self) -> DateKey {
        DateKey::new(self.solar.year, self.solar.month, self.solar.day)
    }
}

/// Wire shape shared by the remote API response body and the local dataset
/// file. Field names follow the original doha.kr endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCalendarRecord {
    pub solar_year: i32,
    pub solar_month: u32,
    pub solar_day: u32,
    pub lunar_year: i32,
    pub lunar_month: u32,
    pub lunar_day: u32,
    #[serde(default)]
    pub is_leap_month: bool,
    pub year_ganji: String,
    pub day_ganji: String,
    pub week_day: String,
    pub zodiac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl RawCalendarRecord {
    /// Normalize into a [`CalendarDay`], failing fast on a shape that would
    /// otherwise produce a partially populated record.
    pub fn normalize(&self, source: Source) -> Result<CalendarDay> {
        let key = DateKey::new(self.solar_year, self.solar_month, self.solar_day);
        let invalid = |reason: &str| Error::InvalidRecord {
            key: key.canonical(),
            reason: reason.to_string(),
        };

        if !(1..=12).contains(&self.solar_month) || !(1..=31).contains(&self.solar_day) {
            return Err(invalid("solar date fields out of range"));
        }
        if !(1..=12).contains(&self.lunar_month) || !(1..=30).contains(&self.lunar_day) {
            return Err(invalid("lunar date fields out of range"));
        }
        if self.year_ganji.is_empty() || self.day_ganji.is_empty() {
            return Err(invalid("empty ganji"));
        }
        if self.week_day.is_empty() {
            return Err(invalid("empty week day"));
        }

        Ok(CalendarDay {
            solar: SolarDate {
                year: self.solar_year,
                month: self.solar_month,
                day: self.solar_day,
            },
            lunar: LunarDate {
                year: self.lunar_year,
                month: self.lunar_month,
                day: self.lunar_day,
                is_leap_month: self.is_leap_month,
            },
            ganji: Ganji {
                year: self.year_ganji.clone(),
                day: self.day_ganji.clone(),
            },
            week_day: self.week_day.clone(),
            zodiac: self.zodiac.clone(),
            term: self.term.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawCalendarRecord {
        RawCalendarRecord {
            solar_year: 2024,
            solar_month: 1,
            solar_day: 1,
            lunar_year: 2023,
            lunar_month: 11,
            lunar_day: 20,
            is_leap_month: false,
            year_ganji: "갑진".into(),
            day_ganji: "갑자".into(),
            week_day: "월".into(),
            zodiac: "용".into(),
            term: None,
        }
    }

    #[test]
    fn normalize_tags_source() {
        let day = sample_raw().normalize(Source::Remote).unwrap();
        assert_eq!(day.source, Source::Remote);
        assert_eq!(day.solar.year, 2024);
        assert_eq!(day.lunar.day, 20);
        assert_eq!(day.ganji.year, "갑진");
        assert_eq!(day.key().canonical(), "2024-01-01");
    }

    #[test]
    fn normalize_rejects_out_of_range_month() {
        let mut raw = sample_raw();
        raw.solar_month = 13;
        let err = raw.normalize(Source::Remote).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }

    #[test]
    fn normalize_rejects_empty_ganji() {
        let mut raw = sample_raw();
        raw.day_ganji.clear();
        assert!(raw.normalize(Source::Local).is_err());
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let json = serde_json::to_value(sample_raw()).unwrap();
        assert!(json.get("solarYear").is_some());
        assert!(json.get("yearGanji").is_some());
        assert!(json.get("weekDay").is_some());
        // absent optional term is omitted entirely
        assert!(json.get("term").is_none());
    }

    #[test]
    fn missing_leap_flag_defaults_to_false() {
        let json = r#"{
            "solarYear": 2024, "solarMonth": 1, "solarDay": 1,
            "lunarYear": 2023, "lunarMonth": 11, "lunarDay": 20,
            "yearGanji": "갑진", "dayGanji": "갑자",
            "weekDay": "월", "zodiac": "용"
        }"#;
        let raw: RawCalendarRecord = serde_json::from_str(json).unwrap();
        assert!(!raw.is_leap_month);
    }
}
