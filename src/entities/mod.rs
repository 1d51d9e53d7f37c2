//! `SeaORM` entities

pub mod prelude;

pub mod class_group;
pub mod lesson_record;
pub mod sea_orm_active_enums;
pub mod student;
pub mod student_payment;
pub mod subject;
pub mod teacher;
pub mod teacher_class_group;
pub mod teacher_subject;
pub mod timetable;
pub mod timetable_class_group;
pub mod user;
pub mod week;
