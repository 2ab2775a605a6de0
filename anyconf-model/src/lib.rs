//! Item identity and the session/day records that feed the anyconf pager.
#![allow(missing_docs)]

pub mod day;
pub mod error;
pub mod ids;
pub mod session;

pub use day::{Day, DayLabel};
pub use error::{ModelError, Result as ModelResult};
pub use ids::ItemId;
pub use session::{
    RawSession, Session, SessionInstance, make_date, parse_sessions,
};
