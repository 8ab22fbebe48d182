pub mod holding;
pub mod metrics;
pub mod portfolio;
pub mod session;
pub mod settings;
