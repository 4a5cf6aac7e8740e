pub mod persistence;
pub mod study;
