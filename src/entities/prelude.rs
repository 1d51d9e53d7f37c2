//! `SeaORM` Entity prelude

pub use super::class_group::Entity as ClassGroup;
pub use super::lesson_record::Entity as LessonRecord;
pub use super::student::Entity as Student;
pub use super::student_payment::Entity as StudentPayment;
pub use super::subject::Entity as Subject;
pub use super::teacher::Entity as Teacher;
pub use super::teacher_class_group::Entity as TeacherClassGroup;
pub use super::teacher_subject::Entity as TeacherSubject;
pub use super::timetable::Entity as Timetable;
pub use super::timetable_class_group::Entity as TimetableClassGroup;
pub use super::user::Entity as User;
pub use super::week::Entity as Week;
