use crate::entities::{student, student_payment};
use serde::Serialize;
use std::collections::HashMap;

const HEADER: [&str; 7] = [
    "payment_id",
    "admission_number",
    "student_name",
    "amount",
    "date_paid",
    "term",
    "recorded_by",
];

#[derive(Debug, Serialize)]
struct PaymentCsvRow<'a> {
    payment_id: i32,
    admission_number: &'a str,
    student_name: String,
    amount: String,
    date_paid: String,
    term: &'a str,
    recorded_by: &'a str,
}

/// Renders payments as CSV: a header line, then one row per payment.
/// The header is written even when there are no payments.
pub fn payments_csv(
    payments: &[(student_payment::Model, Option<student::Model>)],
    teacher_names: &HashMap<i32, String>,
) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for (payment, student) in payments {
        let (admission_number, student_name) = match student {
            Some(s) => (s.admission_number.as_str(), s.full_name()),
            None => ("", String::new()),
        };
        let recorded_by = payment
            .recorded_by
            .and_then(|id| teacher_names.get(&id))
            .map(String::as_str)
            .unwrap_or("");

        writer.serialize(PaymentCsvRow {
            payment_id: payment.id,
            admission_number,
            student_name,
            amount: format!("{:.2}", payment.amount),
            date_paid: payment.date_paid.format("%Y-%m-%d").to_string(),
            term: &payment.term,
            recorded_by,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn writes_header_and_one_line_per_payment() {
        let kid = student::Model {
            id: 3,
            first_name: "Amina".to_string(),
            last_name: "Otieno".to_string(),
            admission_number: "ADM-3".to_string(),
            class_group_id: 1,
            term_fee: Decimal::new(1500, 0),
            amount_paid: Decimal::new(500, 0),
        };
        let payment = student_payment::Model {
            id: 10,
            student_id: 3,
            amount: Decimal::new(500, 0),
            date_paid: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            term: "Term 1".to_string(),
            recorded_by: Some(4),
        };
        let names = HashMap::from([(4, "Jane Doe".to_string())]);

        let bytes = payments_csv(&[(payment, Some(kid))], &names).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "payment_id,admission_number,student_name,amount,date_paid,term,recorded_by"
        );
        assert_eq!(lines[1], "10,ADM-3,Amina Otieno,500.00,2025-02-03,Term 1,Jane Doe");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn no_payments_still_yields_header() {
        let bytes = payments_csv(&[], &HashMap::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec!["payment_id,admission_number,student_name,amount,date_paid,term,recorded_by"]
        );
    }
}
