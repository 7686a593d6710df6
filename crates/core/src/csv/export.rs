//! Lead export.

use crate::model::Lead;

/// Columns of a lead export, in order.
pub const LEAD_EXPORT_HEADERS: [&str; 8] = [
    "id",
    "name",
    "phone",
    "email",
    "instagram",
    "campaignId",
    "owner",
    "createdAt",
];

/// Writes leads as CSV: a bare header line, then one line per lead with
/// every value double-quoted and embedded quotes doubled.
#[must_use]
pub fn export_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> String {
    let mut lines = vec![LEAD_EXPORT_HEADERS.join(",")];
    for lead in leads {
        let created_at = lead.created_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let values = [
            lead.id.as_str(),
            lead.name.as_str(),
            lead.phone.as_deref().unwrap_or_default(),
            lead.email.as_deref().unwrap_or_default(),
            lead.instagram.as_deref().unwrap_or_default(),
            lead.campaign_id.as_str(),
            lead.owner.as_str(),
            created_at.as_str(),
        ];
        lines.push(values.map(quote).join(","));
    }
    lines.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
