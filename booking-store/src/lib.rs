pub mod app_config;
pub mod clock;
pub mod memory;

pub use clock::MonotonicClock;
pub use memory::InMemoryBookingStore;
