//! Domain types for the league simulator.

pub mod form;
pub mod ids;
pub mod record;
pub mod team;

pub use form::{FormWindow, FORM_WINDOW_CAPACITY};
pub use ids::TeamId;
pub use record::GameRecord;
pub use team::Team;
