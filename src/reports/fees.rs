use crate::config::TERM_FEE;
use crate::entities::{class_group, student};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum FeeStatus {
    FullyPaid,
    Partial,
    Unpaid,
}

impl FeeStatus {
    /// Bucket against the fixed term fee
    pub fn classify(amount_paid: Decimal) -> Self {
        if amount_paid >= TERM_FEE {
            FeeStatus::FullyPaid
        } else if amount_paid > Decimal::ZERO {
            FeeStatus::Partial
        } else {
            FeeStatus::Unpaid
        }
    }
}

/// Payment summary for a single class, as seen by its class teacher
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ClassPaymentSummary {
    pub total_students: usize,
    pub total_paid: Decimal,
    pub total_unpaid: Decimal,
    pub fully_paid: usize,
    pub partial: usize,
    pub unpaid: usize,
}

impl ClassPaymentSummary {
    pub fn from_students(students: &[student::Model]) -> Self {
        let mut summary = ClassPaymentSummary {
            total_students: students.len(),
            ..Default::default()
        };

        for student in students {
            summary.total_paid += student.amount_paid;
            match FeeStatus::classify(student.amount_paid) {
                FeeStatus::FullyPaid => summary.fully_paid += 1,
                FeeStatus::Partial => summary.partial += 1,
                FeeStatus::Unpaid => summary.unpaid += 1,
            }
        }

        summary.total_unpaid = Decimal::from(students.len()) * TERM_FEE - summary.total_paid;
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClassPaymentStats {
    pub class_group_id: i32,
    pub name: String,
    pub total_students: usize,
    pub total_paid: Decimal,
    pub total_fees: Decimal,
}

/// Totals across the selected students plus a per-class breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct AdminPaymentSummary {
    pub total_students: usize,
    pub total_paid: Decimal,
    pub total_fees: Decimal,
    pub total_unpaid: Decimal,
    pub fully_paid: usize,
    pub partial: usize,
    pub unpaid: usize,
    pub class_stats: Vec<ClassPaymentStats>,
}

impl AdminPaymentSummary {
    /// `students` is the filtered set; `all_students` feeds the per-class stats.
    pub fn build(
        students: &[student::Model],
        all_students: &[student::Model],
        class_groups: &[class_group::Model],
    ) -> Self {
        let total_paid: Decimal = students.iter().map(|s| s.amount_paid).sum();
        let total_fees: Decimal = students.iter().map(|s| s.term_fee).sum();

        let fully_paid = students
            .iter()
            .filter(|s| s.amount_paid >= s.term_fee)
            .count();
        let unpaid = students
            .iter()
            .filter(|s| s.amount_paid == Decimal::ZERO)
            .count();
        let partial = students.len().saturating_sub(fully_paid + unpaid);

        let class_stats = class_groups
            .iter()
            .map(|class| {
                let members: Vec<&student::Model> = all_students
                    .iter()
                    .filter(|s| s.class_group_id == class.id)
                    .collect();
                ClassPaymentStats {
                    class_group_id: class.id,
                    name: class.name.clone(),
                    total_students: members.len(),
                    total_paid: members.iter().map(|s| s.amount_paid).sum(),
                    total_fees: members.iter().map(|s| s.term_fee).sum(),
                }
            })
            .collect();

        AdminPaymentSummary {
            total_students: students.len(),
            total_paid,
            total_fees,
            total_unpaid: total_fees - total_paid,
            fully_paid,
            partial,
            unpaid,
            class_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i32, class_group_id: i32, term_fee: i64, amount_paid: i64) -> student::Model {
        student::Model {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            admission_number: format!("ADM{:03}", id),
            class_group_id,
            term_fee: Decimal::new(term_fee, 0),
            amount_paid: Decimal::new(amount_paid, 0),
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
    fn classify_buckets_against_term_fee() {
        assert_eq!(FeeStatus::classify(Decimal::new(1500, 0)), FeeStatus::FullyPaid);
        assert_eq!(FeeStatus::classify(Decimal::new(1800, 0)), FeeStatus::FullyPaid);
        assert_eq!(FeeStatus::classify(Decimal::new(700, 0)), FeeStatus::Partial);
        assert_eq!(FeeStatus::classify(Decimal::new(1, 2)), FeeStatus::Partial);
        assert_eq!(FeeStatus::classify(Decimal::ZERO), FeeStatus::Unpaid);
    }

    #[test]
    fn class_summary_counts_buckets_and_unpaid_total() {
        let students = vec![
            student(1, 1, 1500, 1500),
            student(2, 1, 1500, 0),
            student(3, 1, 1500, 700),
        ];

        let summary = ClassPaymentSummary::from_students(&students);

        assert_eq!(summary.total_students, 3);
        assert_eq!(summary.fully_paid, 1);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.unpaid, 1);
        assert_eq!(summary.total_paid, Decimal::new(2200, 0));
        assert_eq!(summary.total_unpaid, Decimal::new(2300, 0));
    }

    #[test]
    fn class_summary_of_no_students_is_zero() {
        assert_eq!(
            ClassPaymentSummary::from_students(&[]),
            ClassPaymentSummary::default()
        );
    }

    #[test]
    fn balances_reconcile_with_fees_minus_paid() {
        let students = vec![
            student(1, 1, 1500, 1500),
            student(2, 1, 1200, 300),
            student(3, 2, 1500, 0),
            student(4, 2, 1000, 1250),
        ];
        let classes = vec![class(1, "Form 1"), class(2, "Form 2")];

        let summary = AdminPaymentSummary::build(&students, &students, &classes);
        let balances: Decimal = students.iter().map(|s| s.balance()).sum();

        assert_eq!(balances, summary.total_fees - summary.total_paid);
        assert_eq!(summary.total_unpaid, balances);
    }

    #[test]
    fn admin_summary_uses_each_students_fee() {
        let students = vec![
            student(1, 1, 1200, 1200),
            student(2, 1, 1500, 0),
            student(3, 2, 1500, 900),
        ];
        let classes = vec![class(1, "Form 1"), class(2, "Form 2"), class(3, "Form 3")];

        let summary = AdminPaymentSummary::build(&students, &students, &classes);

        assert_eq!(summary.total_students, 3);
        assert_eq!(summary.fully_paid, 1);
        assert_eq!(summary.unpaid, 1);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.total_fees, Decimal::new(4200, 0));
        assert_eq!(summary.total_paid, Decimal::new(2100, 0));

        assert_eq!(summary.class_stats.len(), 3);
        assert_eq!(summary.class_stats[0].total_students, 2);
        assert_eq!(summary.class_stats[0].total_fees, Decimal::new(2700, 0));
        assert_eq!(summary.class_stats[1].total_paid, Decimal::new(900, 0));
        assert_eq!(summary.class_stats[2].total_students, 0);
        assert_eq!(summary.class_stats[2].total_paid, Decimal::ZERO);
    }
}
