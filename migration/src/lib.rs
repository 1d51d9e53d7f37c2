pub use sea_orm_migration::prelude::*;

mod m20251014_000001_create_table_user;
mod m20251014_000002_create_catalog_tables;
mod m20251014_000003_create_table_timetable;
mod m20251014_000004_create_table_week;
mod m20251014_000005_create_table_lesson_record;
mod m20251015_000006_create_table_student;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251014_000001_create_table_user::Migration),
            Box::new(m20251014_000002_create_catalog_tables::Migration),
            Box::new(m20251014_000003_create_table_timetable::Migration),
            Box::new(m20251014_000004_create_table_week::Migration),
            Box::new(m20251014_000005_create_table_lesson_record::Migration),
            Box::new(m20251015_000006_create_table_student::Migration),
        ]
    }
}
