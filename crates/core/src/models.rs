pub mod schedule;
pub mod slot;
pub mod teacher;
