pub mod benchmark;
pub mod contract;
pub mod holding;
