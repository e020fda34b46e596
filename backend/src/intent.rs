use chrono::{Datelike, NaiveDate};

use crate::{
    error::{HolidayError, Slot},
    holiday::Region,
    query::UserQuery,
    request::Intent,
    utils::{parse_date, parse_year_month},
};

pub const GET_NEXT_BANK_HOLIDAY: &str = "GetNextBankHoliday";
pub const IS_DATE_BANK_HOLIDAY: &str = "IsDateBankHoliday";
pub const GET_BANK_HOLIDAYS_MONTH: &str = "GetBankHolidaysMonth";
pub const HELP: &str = "AMAZON.HelpIntent";
pub const STOP: &str = "AMAZON.StopIntent";
pub const CANCEL: &str = "AMAZON.CancelIntent";

/// What the skill should do about an intent
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Query(UserQuery),
    Help,
    Stop,
}

/// Pure
///
/// Maps an intent to an action, validating the slots the query needs. `today` supplies the year
/// when the user names a month without one.
///
/// # Errors
/// - `MissingOrInvalidSlot` if a required slot is absent or cannot be understood
/// - `UnrecognizedIntent` if the intent is not one this skill handles
pub fn route(intent: &Intent, today: NaiveDate) -> Result<Action, HolidayError> {
    match intent.name.as_str() {
        GET_NEXT_BANK_HOLIDAY => {
            let region = intent.slot(Slot::Country.name())
                .and_then(Region::from_country)
                .ok_or_else(|| HolidayError::missing(Slot::Country))?;

            Ok(Action::Query(UserQuery::NextHoliday(region)))
        },
        IS_DATE_BANK_HOLIDAY => {
            let date = intent.slot(Slot::Date.name())
                .and_then(|d| parse_date(d).ok())
                .ok_or_else(|| HolidayError::missing(Slot::Date))?;

            Ok(Action::Query(UserQuery::IsDateHoliday(date)))
        },
        GET_BANK_HOLIDAYS_MONTH => {
            let month = intent.slot(Slot::Month.name())
                .and_then(|m| parse_year_month(m, intent.slot("Year"), today.year()).ok())
                .ok_or_else(|| HolidayError::missing(Slot::Month))?;

            Ok(Action::Query(UserQuery::HolidaysInMonth(month)))
        },
        HELP           => Ok(Action::Help),
        STOP | CANCEL  => Ok(Action::Stop),
        other          => Err(HolidayError::UnrecognizedIntent(other.into())),
    }
}
