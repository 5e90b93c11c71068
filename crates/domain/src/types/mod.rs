//! Domain types and models

pub mod observation;
pub mod user;

pub use observation::Observation;
pub use user::User;
