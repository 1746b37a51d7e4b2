use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};

pub const DEPARTMENT_FIELD: &str = "department";
pub const SALARY_FIELD: &str = "salary";

/// Keeps the records whose `field` equals `value` exactly (case-sensitive).
/// Records without the field never match.
pub fn filter_by_field(records: &[Record], field: &str, value: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.get(field) == Some(value))
        .cloned()
        .collect()
}

pub fn filter_by_department(records: &[Record], department: &str) -> Vec<Record> {
    filter_by_field(records, DEPARTMENT_FIELD, department)
}

/// Scales `field` of every record by `1 + percentage / 100`, written back
/// with two decimals. Other fields pass through unchanged.
pub fn adjust_numeric(records: &[Record], field: &str, percentage: f64) -> Result<Vec<Record>> {
    if !percentage.is_finite() {
        return Err(EtlError::ValidationError {
            message: format!("percentage must be a finite number, got {}", percentage),
        });
    }
    let factor = 1.0 + percentage / 100.0;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let raw = record.get(field).ok_or_else(|| EtlError::MissingField {
                index,
                field: field.to_string(),
            })?;
            let amount = parse_number(raw).ok_or_else(|| EtlError::InvalidNumber {
                index,
                field: field.to_string(),
                value: raw.to_string(),
            })?;

            let mut adjusted = record.clone();
            adjusted.insert(field, to_fixed_2(amount * factor));
            Ok(adjusted)
        })
        .collect()
}

pub fn increase_salary(records: &[Record], percentage: f64) -> Result<Vec<Record>> {
    adjust_numeric(records, SALARY_FIELD, percentage)
}

// `f64::from_str` also accepts "NaN" and "inf"; those are not amounts.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Two-decimal rendering that rounds exact ties away from zero and prints
/// negative zero unsigned. `{:.2}` alone rounds ties to even.
fn to_fixed_2(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    // 40 places resolve every f64 of magnitude >= 0.005 from a third-place tie.
    let exact = format!("{:.40}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<char> = whole
        .chars()
        .chain(fraction.chars().chain(std::iter::repeat('0')).take(2))
        .collect();
    if fraction.chars().nth(2).is_some_and(|d| d >= '5') {
        increment_digits(&mut digits);
    }

    let split = digits.len() - 2;
    let whole: String = digits[..split].iter().collect();
    let cents: String = digits[split..].iter().collect();
    format!("{}{}.{}", sign, whole, cents)
}

fn increment_digits(digits: &mut Vec<char>) {
    for digit in digits.iter_mut().rev() {
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            return;
        }
    }
    digits.insert(0, '1');
}
