pub mod actions;
pub mod fixtures;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use fixtures::{GameFixture, PredictionFixture};
#[allow(unused_imports)]
pub use mocks::FlakyPredictionRepository;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
