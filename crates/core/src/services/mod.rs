pub mod bulk_entry;
pub mod edit_service;
pub mod valuation_service;
