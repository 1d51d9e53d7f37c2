pub mod admin_payments;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod lessons;
pub mod params;
pub mod profile;
pub mod students;
pub mod timetables;
