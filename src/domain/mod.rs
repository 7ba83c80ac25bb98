pub mod dashboard;
pub mod records;
