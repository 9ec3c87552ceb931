//! Domain entities: subjects and the classes scheduled for them

pub mod class;
pub mod subject;

pub use class::{ClassForm, ClassStatus, Schedule};
pub use subject::{Department, Subject, seed_subjects};
