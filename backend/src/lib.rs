pub mod config;
pub use config::Config;

pub mod error;
pub use error::{HolidayError, Slot};

pub mod fetcher;
pub use fetcher::{GovUkFetcher, HolidaySource};

pub mod holiday;
pub use holiday::{HolidayDataset, HolidayEvent, Region};

pub mod intent;

pub mod logging;
pub use logging::{default_log_level, flush_logging, init_logging};

pub mod query;
pub use query::UserQuery;

pub mod request;
pub use request::RequestEnvelope;

pub mod response;
pub use response::ResponseEnvelope;

pub mod skill;
pub use skill::Skill;

pub mod speech;

pub mod utils;
