use crate::entities::{
    lesson_record,
    sea_orm_active_enums::{LessonStatus, PaymentStatus},
};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Counts and sums shown on the teacher dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct LessonStats {
    pub total: usize,
    pub attended: usize,
    pub not_attended: usize,
    pub pending: usize,
    pub paid: usize,
    pub unpaid: usize,
    pub total_paid_amount: Decimal,
    pub total_unpaid_amount: Decimal,
}

impl LessonStats {
    pub fn from_records(records: &[lesson_record::Model]) -> Self {
        let mut stats = LessonStats {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.status {
                LessonStatus::Attended => stats.attended += 1,
                LessonStatus::NotAttended => stats.not_attended += 1,
                LessonStatus::Pending => stats.pending += 1,
            }
            match record.payment_status {
                PaymentStatus::Paid => {
                    stats.paid += 1;
                    stats.total_paid_amount += record.amount;
                }
                PaymentStatus::Unpaid => {
                    stats.unpaid += 1;
                    stats.total_unpaid_amount += record.amount;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, status: LessonStatus, payment_status: PaymentStatus, amount: i64) -> lesson_record::Model {
        lesson_record::Model {
            id,
            timetable_id: id,
            week_id: 1,
            created_by: 1,
            swapped_with: None,
            status,
            payment_status,
            amount: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn empty_set_has_zero_sums() {
        let stats = LessonStats::from_records(&[]);
        assert_eq!(stats, LessonStats::default());
        assert_eq!(stats.total_paid_amount, Decimal::ZERO);
        assert_eq!(stats.total_unpaid_amount, Decimal::ZERO);
    }

    #[test]
    fn status_counts_add_up_to_total() {
        let records = vec![
            record(1, LessonStatus::Attended, PaymentStatus::Paid, 400),
            record(2, LessonStatus::Attended, PaymentStatus::Unpaid, 400),
            record(3, LessonStatus::NotAttended, PaymentStatus::Unpaid, 400),
            record(4, LessonStatus::Pending, PaymentStatus::Unpaid, 250),
            record(5, LessonStatus::Pending, PaymentStatus::Paid, 500),
        ];

        let stats = LessonStats::from_records(&records);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.attended, 2);
        assert_eq!(stats.not_attended, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.attended + stats.not_attended + stats.pending, stats.total);
        assert_eq!(stats.paid + stats.unpaid, stats.total);
    }

    #[test]
    fn amounts_are_split_by_payment_status() {
        let records = vec![
            record(1, LessonStatus::Attended, PaymentStatus::Paid, 400),
            record(2, LessonStatus::Pending, PaymentStatus::Paid, 500),
            record(3, LessonStatus::Pending, PaymentStatus::Unpaid, 250),
        ];

        let stats = LessonStats::from_records(&records);

        assert_eq!(stats.total_paid_amount, Decimal::new(900, 0));
        assert_eq!(stats.total_unpaid_amount, Decimal::new(250, 0));
    }
}
