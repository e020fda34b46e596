use std::fmt::Display;

use thiserror::Error;

/// The slots a query can be missing. Named as the voice platform names them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slot {
    Country,
    Date,
    Month,
}

impl Slot {
    #[must_use] pub fn name(self) -> &'static str {
        match self {
            Slot::Country => "Country",
            Slot::Date    => "Date",
            Slot::Month   => "Month",
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
pub enum HolidayError {
    /// The user can be asked again; the session carries on
    #[error("slot `{slot}` is missing or could not be understood")]
    MissingOrInvalidSlot { slot: Slot },

    #[error("unrecognized intent `{0}`")]
    UnrecognizedIntent(String),

    /// Fetching or parsing the holiday feed failed
    #[error("holiday data source unavailable: {0}")]
    DataSourceUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HolidayError {
    pub fn data_source<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        HolidayError::DataSourceUnavailable(error.into())
    }

    #[must_use] pub fn missing(slot: Slot) -> Self {
        HolidayError::MissingOrInvalidSlot { slot }
    }
}
