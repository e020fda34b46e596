use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{
    holiday::{HolidayDataset, HolidayEvent, Region},
    utils::YearMonth,
};

/// A parsed and validated question about bank holidays
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UserQuery {
    NextHoliday(Region),
    IsDateHoliday(NaiveDate),
    HolidaysInMonth(YearMonth),
}

/// The result of running a [`UserQuery`] against a dataset
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Answer {
    NextHoliday {
        region:  Region,
        holiday: Option<HolidayEvent>,
    },
    DateMembership(DateMembership),
    MonthSummary(MonthSummary),
}

/// Pure
#[must_use] pub fn answer(query: UserQuery, dataset: &HolidayDataset, today: NaiveDate) -> Answer {
    match query {
        UserQuery::NextHoliday(region) => Answer::NextHoliday {
            region,
            holiday: next_holiday(dataset.events(region), today).cloned(),
        },
        UserQuery::IsDateHoliday(date)     => Answer::DateMembership(holidays_on_date(dataset, date)),
        UserQuery::HolidaysInMonth(month)  => Answer::MonthSummary(holidays_in_month(dataset, month)),
    }
}

/// Pure
///
/// Returns the earliest event dated strictly after `today`, or `None` if every event is today or
/// earlier. The events do not need to be sorted.
#[must_use] pub fn next_holiday(events: &[HolidayEvent], today: NaiveDate) -> Option<&HolidayEvent> {
    let mut sorted: Vec<&HolidayEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);

    sorted.into_iter()
        .find(|e| e.date > today)
}

/// One holiday title as it is read out, possibly shared between regions
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TitleEntry {
    pub title: String,
    pub notes: Vec<String>,
}

impl TitleEntry {
    fn new(title: &str) -> Self {
        Self {
            title: title.into(),
            notes: Vec::new(),
        }
    }

    fn add_note(&mut self, event: &HolidayEvent) {
        if let Some(note) = event.note() {
            if !self.notes.iter().any(|n| n == note) {
                self.notes.push(note.into());
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DateMembership {
    pub date:    NaiveDate,
    /// Every region the date is a holiday in, each once, in reading order
    pub regions: Vec<Region>,
    /// Distinct titles in the order they were first seen
    pub titles:  Vec<TitleEntry>,
}

impl DateMembership {
    #[must_use] pub fn is_holiday(&self) -> bool {
        !self.regions.is_empty()
    }
}

/// Pure
#[must_use] pub fn holidays_on_date(dataset: &HolidayDataset, date: NaiveDate) -> DateMembership {
    let mut membership = DateMembership {
        date,
        regions: Vec::new(),
        titles:  Vec::new(),
    };

    for (region, division) in dataset.regions() {
        for event in division.events.iter().filter(|e| e.date == date) {
            if !membership.regions.contains(&region) {
                membership.regions.push(region);
            }

            let position = match membership.titles.iter().position(|t| t.title == event.title) {
                Some(position) => position,
                None => {
                    membership.titles.push(TitleEntry::new(&event.title));
                    membership.titles.len() - 1
                },
            };
            membership.titles[position].add_note(event);
        }
    }

    membership
}

/// All the regions observing one holiday on one date
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HolidayGroup {
    pub date:    NaiveDate,
    pub title:   String,
    pub notes:   Vec<String>,
    pub regions: BTreeSet<Region>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MonthSummary {
    pub month:  YearMonth,
    /// Ordered by date, then title
    pub groups: Vec<HolidayGroup>,
}

/// Pure
#[must_use] pub fn holidays_in_month(dataset: &HolidayDataset, month: YearMonth) -> MonthSummary {
    let mut groups: Vec<HolidayGroup> = Vec::new();

    for (region, division) in dataset.regions() {
        for event in division.events.iter().filter(|e| month.contains(&e.date)) {
            let position = match groups.iter().position(|g| g.date == event.date && g.title == event.title) {
                Some(position) => position,
                None => {
                    groups.push(HolidayGroup {
                        date:    event.date,
                        title:   event.title.clone(),
                        notes:   Vec::new(),
                        regions: BTreeSet::new(),
                    });
                    groups.len() - 1
                },
            };
            let group = &mut groups[position];

            group.regions.insert(region);
            if let Some(note) = event.note() {
                if !group.notes.iter().any(|n| n == note) {
                    group.notes.push(note.into());
                }
            }
        }
    }

    groups.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));

    MonthSummary { month, groups }
}

#[allow(clippy::zero_prefixed_literal)]
#[cfg(test)]
mod tests {
    use chrono::Month;

    use super::*;
    use crate::holiday::fixtures::{dataset, event, substitute_boxing_day};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_holiday_is_strictly_after_today() {
        let events = vec![
            event("Boxing Day", (2024,12,26), ""),
            event("Christmas Day", (2024,12,25), ""),
            event("New Year’s Day", (2025,01,01), ""),
        ];

        assert_eq!(next_holiday(&events, date(2024,12,01)).unwrap().title, "Christmas Day");
        // A holiday today is not the next one
        assert_eq!(next_holiday(&events, date(2024,12,25)).unwrap().title, "Boxing Day");
        assert_eq!(next_holiday(&events, date(2024,12,31)).unwrap().title, "New Year’s Day");
    }

    #[test]
    fn test_next_holiday_exhausted_sequence() {
        let events = vec![
            event("Christmas Day", (2024,12,25), ""),
            event("Boxing Day", (2024,12,26), ""),
        ];

        assert_eq!(next_holiday(&events, date(2024,12,26)), None);
        assert_eq!(next_holiday(&events, date(2030,01,01)), None);
        assert_eq!(next_holiday(&[], date(2024,12,01)), None);
    }

    #[test]
    fn test_answer_next_holiday_per_region() {
        let data = dataset();

        let Answer::NextHoliday { region, holiday } = answer(UserQuery::NextHoliday(Region::Scotland), &data, date(2024,12,25)) else {
            panic!("expected a next holiday answer");
        };
        assert_eq!(region, Region::Scotland);
        assert_eq!(holiday.unwrap().title, "2nd January");
    }

    #[test]
    fn test_date_membership_merges_shared_titles() {
        let membership = holidays_on_date(&dataset(), date(2024,12,25));

        assert!(membership.is_holiday());
        assert_eq!(membership.regions, Region::ALL.to_vec());
        assert_eq!(membership.titles, vec![TitleEntry{ title: "Christmas Day".into(), notes: vec![] }]);
    }

    #[test]
    fn test_date_membership_keeps_notes_and_partial_regions() {
        let membership = holidays_on_date(&dataset(), date(2025,12,01));

        assert_eq!(membership.regions, vec![Region::Scotland]);
        assert_eq!(membership.titles[0].notes, vec!["Substitute day".to_string()]);

        let boxing_day = holidays_on_date(&dataset(), date(2024,12,26));
        assert_eq!(boxing_day.regions, vec![Region::EnglandAndWales, Region::NorthernIreland]);
    }

    #[test]
    fn test_date_membership_no_match() {
        let membership = holidays_on_date(&dataset(), date(2024,12,24));

        assert!(!membership.is_holiday());
        assert!(membership.titles.is_empty());
    }

    #[test]
    fn test_month_summary_groups_regions() {
        let summary = holidays_in_month(&dataset(), YearMonth::new(2024, Month::December));

        assert_eq!(summary.groups.len(), 2);

        assert_eq!(summary.groups[0].title, "Christmas Day");
        assert_eq!(summary.groups[0].date, date(2024,12,25));
        assert_eq!(summary.groups[0].regions, Region::ALL.into_iter().collect::<BTreeSet<_>>());

        assert_eq!(summary.groups[1].title, "Boxing Day");
        assert_eq!(
            summary.groups[1].regions,
            [Region::EnglandAndWales, Region::NorthernIreland].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_month_summary_matches_year_too() {
        // Christmas 2023 is in the fixture for England and Wales only
        let summary = holidays_in_month(&dataset(), YearMonth::new(2023, Month::December));

        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].regions.len(), 1);

        assert!(holidays_in_month(&dataset(), YearMonth::new(2024, Month::June)).groups.is_empty());
    }

    #[test]
    fn test_month_summary_adds_each_region_once() {
        let mut divisions = std::collections::BTreeMap::new();
        for (region, division) in dataset().regions() {
            let mut division = division.clone();
            if region == Region::Scotland {
                division.events.push(event("Christmas Day", (2024,12,25), ""));
            }
            divisions.insert(region, division);
        }
        let data = HolidayDataset::new(divisions);

        let summary = holidays_in_month(&data, YearMonth::new(2024, Month::December));
        assert_eq!(summary.groups[0].regions.len(), 3);
    }

    #[test]
    fn test_date_membership_merges_distinct_notes() {
        let membership = holidays_on_date(&substitute_boxing_day(), date(2026,12,28));

        assert_eq!(membership.regions, Region::ALL.to_vec());
        assert_eq!(membership.titles, vec![TitleEntry {
            title: "Boxing Day".into(),
            notes: vec!["Substitute day".into(), "Moved".into()],
        }]);
    }

    #[test]
    fn test_month_summary_merges_distinct_notes() {
        let summary = holidays_in_month(&substitute_boxing_day(), YearMonth::new(2026, Month::December));

        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].notes, vec!["Substitute day".to_string(), "Moved".to_string()]);
        assert_eq!(summary.groups[0].regions.len(), 3);
    }
}
