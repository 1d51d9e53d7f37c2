use crate::entities::student;

#[derive(Debug, Clone)]
pub enum StudentWriteResult {
    Saved(student::Model),
    NotFound,
    ClassGroupNotFound,
    DuplicateAdmissionNumber,
}

impl StudentWriteResult {
    pub fn message(&self) -> &'static str {
        match self {
            StudentWriteResult::Saved(_) => "Student saved",
            StudentWriteResult::NotFound => "Student not found",
            StudentWriteResult::ClassGroupNotFound => "Class group not found",
            StudentWriteResult::DuplicateAdmissionNumber => {
                "A student with this admission number already exists"
            }
        }
    }
}
