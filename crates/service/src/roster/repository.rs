use async_trait::async_trait;

use crate::errors::ServiceError;

use super::model::{AttendanceStatus, Student, StudentId, Subject, SubjectId};
use super::shared::SharedRoster;

/// Trait abstraction for roster storage, used by the HTTP layer.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn list_subjects(&self) -> Vec<Subject>;
    async fn get_subject(&self, id: SubjectId) -> Result<Subject, ServiceError>;
    async fn add_subject(&self, name: Option<String>) -> Result<Subject, ServiceError>;
    async fn delete_subject(&self, id: SubjectId) -> bool;
    async fn add_student(&self, subject_id: SubjectId, name: String) -> Result<Student, ServiceError>;
    async fn delete_student(&self, subject_id: SubjectId, student_id: StudentId) -> Result<bool, ServiceError>;
    async fn set_attendance(
        &self,
        subject_id: SubjectId,
        student_id: StudentId,
        status: Option<AttendanceStatus>,
    ) -> Result<Student, ServiceError>;
}

#[async_trait]
impl RosterRepository for SharedRoster {
    async fn list_subjects(&self) -> Vec<Subject> { self.list_subjects().await }
    async fn get_subject(&self, id: SubjectId) -> Result<Subject, ServiceError> { self.get_subject(id).await }
    async fn add_subject(&self, name: Option<String>) -> Result<Subject, ServiceError> { self.add_subject(name).await }
    async fn delete_subject(&self, id: SubjectId) -> bool { self.delete_subject(id).await }
    async fn add_student(&self, subject_id: SubjectId, name: String) -> Result<Student, ServiceError> {
        self.add_student(subject_id, name).await
    }
    async fn delete_student(&self, subject_id: SubjectId, student_id: StudentId) -> Result<bool, ServiceError> {
        self.delete_student(subject_id, student_id).await
    }
    async fn set_attendance(
        &self,
        subject_id: SubjectId,
        student_id: StudentId,
        status: Option<AttendanceStatus>,
    ) -> Result<Student, ServiceError> {
        self.set_attendance(subject_id, student_id, status).await
    }
}
