use crate::entities::{class_group, timetable};
use chrono::NaiveTime;

/// `HH:MM`
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn subject_label(subject_name: Option<&str>) -> &str {
    subject_name.unwrap_or("Unnamed")
}

pub fn class_names(classes: &[class_group::Model]) -> String {
    classes
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Dropdown label: `"{subject} - {day} {HH:MM} ({classes})"`
pub fn slot_display(
    slot: &timetable::Model,
    subject_name: Option<&str>,
    classes: &[class_group::Model],
) -> String {
    format!(
        "{} - {} {} ({})",
        subject_label(subject_name),
        slot.day.display_name(),
        format_time(slot.start_time),
        class_names(classes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::DayOfWeek;

    fn slot() -> timetable::Model {
        timetable::Model {
            id: 7,
            subject_id: Some(1),
            teacher_id: 1,
            day: DayOfWeek::Wed,
            start_time: NaiveTime::from_hms_opt(8, 5, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }
    }

    fn class(id: i32, name: &str) -> class_group::Model {
        class_group::Model {
            id,
            name: name.to_string(),
            class_teacher_id: None,
        }
    }

    #[test]
    fn display_lists_subject_day_time_and_classes() {
        let classes = vec![class(1, "Form 2A"), class(2, "Form 2B")];
        assert_eq!(
            slot_display(&slot(), Some("Mathematics"), &classes),
            "Mathematics - Wednesday 08:05 (Form 2A, Form 2B)"
        );
    }

    #[test]
    fn missing_subject_is_unnamed() {
        assert_eq!(slot_display(&slot(), None, &[]), "Unnamed - Wednesday 08:05 ()");
    }
}
