//! Shared test doubles for unit tests in this crate.

mod clock;

pub use clock::MutableClock;
