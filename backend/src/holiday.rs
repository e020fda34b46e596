use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;

use serde::{
    Serialize,
    Deserialize,
};

use log::warn;

use crate::error::HolidayError;

/// The UK's bank holiday jurisdictions, in the order they are read out
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    EnglandAndWales,
    Scotland,
    NorthernIreland,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::EnglandAndWales, Region::Scotland, Region::NorthernIreland];

    /// The key this region is stored under in the feed
    #[must_use] pub fn id(self) -> &'static str {
        match self {
            Region::EnglandAndWales => "england-and-wales",
            Region::Scotland        => "scotland",
            Region::NorthernIreland => "northern-ireland",
        }
    }

    #[must_use] pub fn display_name(self) -> &'static str {
        match self {
            Region::EnglandAndWales => "England and Wales",
            Region::Scotland        => "Scotland",
            Region::NorthernIreland => "Northern Ireland",
        }
    }

    /// Resolves what a user said when asked which part of the UK they are in.
    ///
    /// Case-insensitive, ignores surrounding and repeated whitespace, and also accepts the
    /// region ids themselves, so feeding it a region's own id or display name gives that region
    /// back.
    #[must_use] pub fn from_country(country: &str) -> Option<Self> {
        match normalize_key(country).as_str() {
            "england" | "wales" | "england-and-wales" => Some(Region::EnglandAndWales),
            "scotland"                                => Some(Region::Scotland),
            "ireland" | "northern-ireland"            => Some(Region::NorthernIreland),
            _ => None,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    /// Parses a feed key, e.g. "england-and-wales". Keys are normalized before matching.
    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(id);
        Region::ALL.into_iter()
            .find(|r| r.id() == key)
            .ok_or(UnknownRegion(key))
    }
}

/// Pure
///
/// Lowercases and collapses every run of whitespace into a single `-`
fn normalize_key(value: &str) -> String {
    value.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<String>>()
        .join("-")
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
pub struct HolidayEvent {
    pub title:   String,
    pub date:    NaiveDate,
    #[serde(default)]
    pub notes:   String,
    #[serde(default)]
    pub bunting: bool,
}

impl HolidayEvent {
    /// The note, if there is anything worth reading out, without any closing full stop
    #[must_use] pub fn note(&self) -> Option<&str> {
        Some(self.notes.trim().trim_end_matches('.').trim_end()).filter(|n| !n.is_empty())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Division {
    pub division: String,
    pub events:   Vec<HolidayEvent>,
}

/// One fetch worth of holiday data. Built per query and thrown away afterwards.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct HolidayDataset {
    divisions: BTreeMap<Region, Division>,
}

impl HolidayDataset {
    #[must_use] pub fn new(divisions: BTreeMap<Region, Division>) -> Self {
        Self { divisions }
    }

    /// Parses the body of the bank holiday feed.
    ///
    /// Keys that are not a known region are skipped.
    ///
    /// # Errors
    /// Returns `DataSourceUnavailable` if the body is not JSON of the expected shape, including
    /// any event whose date is not a valid calendar date
    pub fn from_json(body: &str) -> Result<Self, HolidayError> {
        let raw: BTreeMap<String, Division> = serde_json::from_str(body)
            .map_err(HolidayError::data_source)?;

        let mut divisions = BTreeMap::new();
        for (key, division) in raw {
            match key.parse::<Region>() {
                Ok(region) => { divisions.insert(region, division); },
                Err(UnknownRegion(key)) => warn!("event=feed_parse status=skipped unknown_region={key}"),
            }
        }

        Ok(Self { divisions })
    }

    /// The events for a region, in feed order. Empty if the feed had nothing for it.
    #[must_use] pub fn events(&self, region: Region) -> &[HolidayEvent] {
        self.divisions.get(&region)
            .map(|d| d.events.as_slice())
            .unwrap_or_default()
    }

    /// Every region present, in reading order
    pub fn regions(&self) -> impl Iterator<Item = (Region, &Division)> + '_ {
        self.divisions.iter().map(|(r, d)| (*r, d))
    }
}


#[allow(clippy::zero_prefixed_literal)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_normalization() {
        for country in ["ENGLAND", "England", "england", "  england ", "Wales"] {
            assert_eq!(Region::from_country(country), Some(Region::EnglandAndWales));
        }

        assert_eq!(Region::from_country("scotland"), Some(Region::Scotland));
        assert_eq!(Region::from_country("Ireland"), Some(Region::NorthernIreland));
        assert_eq!(Region::from_country("northern   Ireland"), Some(Region::NorthernIreland));

        assert_eq!(Region::from_country(""), None);
        assert_eq!(Region::from_country("france"), None);
        assert_eq!(Region::from_country("new england"), None);
    }

    #[test]
    fn test_country_normalization_is_idempotent() {
        for region in Region::ALL {
            assert_eq!(Region::from_country(region.id()), Some(region));
            assert_eq!(Region::from_country(region.display_name()), Some(region));
        }
    }

    #[test]
    fn test_region_from_str() {
        assert_eq!("england-and-wales".parse(), Ok(Region::EnglandAndWales));
        assert_eq!("Northern Ireland".parse(), Ok(Region::NorthernIreland));
        assert_eq!("wales".parse::<Region>(), Err(UnknownRegion("wales".into())));
    }

    #[test]
    fn test_dataset_from_feed_json() {
        let body = r#"{
            "england-and-wales": {
                "division": "england-and-wales",
                "events": [
                    {"title": "New Year’s Day", "date": "2025-01-01", "notes": "", "bunting": true}
                ]
            },
            "scotland": {
                "division": "scotland",
                "events": [
                    {"title": "2nd January", "date": "2025-01-02", "notes": "", "bunting": true},
                    {"title": "St Andrew’s Day", "date": "2024-12-02", "notes": "Substitute day", "bunting": true}
                ]
            },
            "isle-of-man": {
                "division": "isle-of-man",
                "events": []
            }
        }"#;

        let dataset = HolidayDataset::from_json(body).unwrap();

        assert_eq!(dataset.events(Region::EnglandAndWales).len(), 1);
        assert_eq!(dataset.events(Region::Scotland)[1].note(), Some("Substitute day"));
        assert_eq!(dataset.events(Region::Scotland)[0].note(), None);
        assert!(dataset.events(Region::NorthernIreland).is_empty());
        assert_eq!(dataset.regions().count(), 2);
    }

    #[test]
    fn test_dataset_rejects_malformed_bodies() {
        for body in [
            "<html>Service Unavailable</html>",
            r#"{"scotland": {"division": "scotland", "events": [{"title": "x", "date": "2024-02-30"}]}}"#,
            r#"{"scotland": {"division": "scotland"}}"#,
            "[]",
        ] {
            assert!(matches!(
                HolidayDataset::from_json(body),
                Err(HolidayError::DataSourceUnavailable(_))
            ));
        }
    }

    #[test]
    fn test_note_drops_closing_full_stops() {
        assert_eq!(fixtures::event("x", (2026,12,28), " Substitute day. ").note(), Some("Substitute day"));
        assert_eq!(fixtures::event("x", (2026,12,28), "...").note(), None);
        assert_eq!(fixtures::event("x", (2026,12,28), "St. Swithin").note(), Some("St. Swithin"));
    }

    #[test]
    fn test_missing_notes_default_to_empty() {
        let body = r#"{"scotland": {"division": "scotland", "events": [{"title": "x", "date": "2024-01-01"}]}}"#;
        let dataset = HolidayDataset::from_json(body).unwrap();

        assert_eq!(dataset.events(Region::Scotland)[0].notes, "");
        assert!(!dataset.events(Region::Scotland)[0].bunting);
    }
}
