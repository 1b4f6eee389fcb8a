use std::fmt;

use serde::{Deserialize, Serialize};

pub type SubjectId = u64;
pub type StudentId = u64;

/// Attendance of one student in one subject.
///
/// Serialized as a bare JSON string. `"Present"` and `"Absent"` map to their
/// variants; any other text is kept verbatim in `Other` and echoed back as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Present,
    #[default]
    Absent,
    Other(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Other(raw) => raw,
        }
    }

    /// True for the two named states.
    pub fn is_known(&self) -> bool {
        !matches!(self, AttendanceStatus::Other(_))
    }
}

impl From<String> for AttendanceStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Present" => AttendanceStatus::Present,
            "Absent" => AttendanceStatus::Absent,
            _ => AttendanceStatus::Other(raw),
        }
    }
}

impl From<&str> for AttendanceStatus {
    fn from(raw: &str) -> Self {
        AttendanceStatus::from(raw.to_string())
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub status: AttendanceStatus,
}

impl Student {
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), status: AttendanceStatus::default() }
    }
}

/// A named subject owning its enrolled students in insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub students: Vec<Student>,
    /// Last student id handed out under the counter policy.
    #[serde(skip)]
    pub(crate) last_student_id: StudentId,
}

impl Subject {
    pub fn new(id: SubjectId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), students: Vec::new(), last_student_id: 0 }
    }

    pub(crate) fn student_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|st| st.id == id)
    }
}
