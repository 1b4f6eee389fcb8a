//! Subjects, their students, and each student's attendance status.

pub mod model;
pub mod repository;
pub mod shared;
pub mod store;

pub use model::{AttendanceStatus, Student, StudentId, Subject, SubjectId};
pub use repository::RosterRepository;
pub use shared::SharedRoster;
pub use store::{IdPolicy, RosterStore};
