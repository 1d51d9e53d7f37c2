pub mod catalog_repository;
pub mod lesson_repository;
pub mod lesson_result;
pub mod payment_repository;
pub mod student_repository;
pub mod student_result;
pub mod teacher_repository;
pub mod timetable_repository;
pub mod user_repository;

pub use catalog_repository::CatalogRepository;
pub use lesson_repository::{
    AdminLessonFilter, LessonFilter, LessonRepository, LessonUpdate, StaffLesson,
};
pub use lesson_result::{AddLessonResult, MarkAttendedResult, SwapResult};
pub use payment_repository::{PaymentEntry, PaymentRepository};
pub use student_repository::{NewStudent, StudentRepository, StudentUpdate};
pub use student_result::StudentWriteResult;
pub use teacher_repository::{NewTeacher, TeacherRepository};
pub use timetable_repository::{NewTimetable, TimetableRepository};
pub use user_repository::UserRepository;
