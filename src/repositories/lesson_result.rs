use crate::entities::lesson_record;

#[derive(Debug, Clone)]
pub enum AddLessonResult {
    Created(lesson_record::Model),
    Duplicate,
    InvalidTimetable,
    WeekNotFound,
}

impl AddLessonResult {
    pub fn is_created(&self) -> bool {
        matches!(self, AddLessonResult::Created(_))
    }

    pub fn message(&self) -> &'static str {
        match self {
            AddLessonResult::Created(_) => "Lesson recorded successfully",
            AddLessonResult::Duplicate => "This lesson has already been scheduled for this week.",
            AddLessonResult::InvalidTimetable => "Select a valid timetable slot.",
            AddLessonResult::WeekNotFound => "Select a valid week.",
        }
    }
}

#[derive(Debug, Clone)]
pub enum MarkAttendedResult {
    Marked(lesson_record::Model),
    NotFound,
    NotAllowed,
}

impl MarkAttendedResult {
    pub fn message(&self) -> &'static str {
        match self {
            MarkAttendedResult::Marked(_) => "Lesson marked as pending",
            MarkAttendedResult::NotFound => "Lesson not found",
            MarkAttendedResult::NotAllowed => "Not allowed",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SwapResult {
    Assigned(lesson_record::Model),
    NotFound,
    NotAllowed,
    InvalidSubstitute,
}

impl SwapResult {
    pub fn message(&self) -> &'static str {
        match self {
            SwapResult::Assigned(_) => "Substitute updated",
            SwapResult::NotFound => "Lesson not found",
            SwapResult::NotAllowed => "Not allowed",
            SwapResult::InvalidSubstitute => "Substitute must be another existing teacher",
        }
    }
}
