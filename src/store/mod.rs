//! Persistence for users and their saved locations.

pub mod locations;
pub mod users;

pub use locations::{LocationRecord, LocationSlots, LocationStore, SLOT_COUNT};
pub use users::{NewUser, User, UserStore};
