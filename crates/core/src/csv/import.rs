//! Mapping CSV rows to leads and payments.
//!
//! A missing required column rejects the whole file. Individual rows that
//! cannot be used are skipped and counted.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use super::CsvError;
use super::reader::CsvTable;
use crate::forms::{NewLeadInput, PaymentInput};
use crate::model::{Fundraiser, Lead, Payment};

/// Columns a lead import must have.
pub const LEAD_IMPORT_COLUMNS: [&str; 5] = ["name", "phone", "email", "instagram", "campaignId"];

/// Columns a payment import must have.
pub const PAYMENT_IMPORT_COLUMNS: [&str; 4] = [
    "payment_page_id",
    "payment_amount",
    "customer_name",
    "payment_date",
];

/// Method recorded for imported payments without a `method` column.
const DEFAULT_IMPORT_METHOD: &str = "Razorpay";

/// Result of a lead import.
#[derive(Debug, Clone, Default)]
pub struct LeadImport {
    /// Leads to insert.
    pub leads: Vec<Lead>,
    /// Rows without a name or any contact, or with a taken Instagram handle.
    pub skipped: usize,
}

/// Result of a payment import.
#[derive(Debug, Clone, Default)]
pub struct PaymentImport {
    /// Payments to insert.
    pub payments: Vec<Payment>,
    /// Rows with no matching fundraiser, a bad amount or date, or a used payment id.
    pub skipped: usize,
}

/// Builds leads owned by `owner` from a CSV document.
///
/// # Errors
///
/// `MissingColumns` if the header lacks any of [`LEAD_IMPORT_COLUMNS`].
pub fn import_leads(
    text: &str,
    owner: &str,
    now: DateTime<Utc>,
    existing: &[Lead],
) -> Result<LeadImport, CsvError> {
    let table = CsvTable::parse(text);
    let missing = table.missing_columns(&LEAD_IMPORT_COLUMNS);
    if !missing.is_empty() {
        return Err(CsvError::MissingColumns(missing));
    }

    let mut known: Vec<Lead> = existing.to_vec();
    let mut result = LeadImport::default();
    for row in &table.rows {
        let input = NewLeadInput {
            name: table.value(row, "name").to_string(),
            campaign_id: table.value(row, "campaignId").to_string(),
            phone: table.value(row, "phone").to_string(),
            email: table.value(row, "email").to_string(),
            instagram: table.value(row, "instagram").to_string(),
        };

        match input.into_lead(owner, now, &known) {
            Ok(lead) => {
                known.push(lead.clone());
                result.leads.push(lead);
            }
            Err(_) => result.skipped += 1,
        }
    }
    Ok(result)
}

/// Builds payments from a payment processor export.
///
/// Rows are matched to fundraisers by `payment_page_id`.
///
/// # Errors
///
/// `MissingColumns` if the header lacks any of [`PAYMENT_IMPORT_COLUMNS`].
pub fn import_payments(
    text: &str,
    recorded_by: &str,
    now: DateTime<Utc>,
    fundraisers: &[Fundraiser],
    existing: &[Payment],
) -> Result<PaymentImport, CsvError> {
    let table = CsvTable::parse(text);
    let missing = table.missing_columns(&PAYMENT_IMPORT_COLUMNS);
    if !missing.is_empty() {
        return Err(CsvError::MissingColumns(missing));
    }

    let mut seen: HashSet<String> = existing
        .iter()
        .filter_map(|p| p.external_payment_id.clone())
        .collect();
    let mut result = PaymentImport::default();

    for row in &table.rows {
        let page_id = table.value(row, "payment_page_id");
        let fundraiser = fundraisers
            .iter()
            .find(|f| !page_id.is_empty() && f.payment_page_id.as_deref() == Some(page_id));
        let amount = parse_amount(table.value(row, "payment_amount"));
        let date = parse_payment_date(table.value(row, "payment_date"));
        let external = table.value(row, "payment_id");

        let (Some(fundraiser), Some(amount), Some(date)) = (fundraiser, amount, date) else {
            result.skipped += 1;
            continue;
        };
        if !external.is_empty() && seen.contains(external) {
            result.skipped += 1;
            continue;
        }

        let method = match table.value(row, "method") {
            "" => DEFAULT_IMPORT_METHOD,
            method => method,
        };
        let input = PaymentInput {
            donor: table.value(row, "customer_name").to_string(),
            amount,
            date: Some(date),
            method: method.to_string(),
            external_payment_id: external.to_string(),
        };

        match input.into_payment(&fundraiser.id, recorded_by, now, &[]) {
            Ok(payment) => {
                if let Some(id) = &payment.external_payment_id {
                    seen.insert(id.clone());
                }
                result.payments.push(payment);
            }
            Err(_) => result.skipped += 1,
        }
    }
    Ok(result)
}

/// Parses an amount, allowing thousands separators.
fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.replace(',', "").trim().parse::<Decimal>().ok()
}

/// Parses an RFC 3339 timestamp, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD`.
#[must_use]
pub fn parse_payment_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}
