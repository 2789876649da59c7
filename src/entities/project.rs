//! Project records

use chrono::NaiveDate;
use serde::Serialize;

use super::contact::Contact;
use super::money::Money;

/// A construction project as stored in the database
///
/// `id` is the store-assigned surrogate key; `number` is the
/// business-assigned project number the CLI operates on. Money fields are
/// fixed-point cents. `completion_date` is `None` until the project is
/// finalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    /// Store-assigned id (0 until persisted)
    pub id: i64,
    pub number: i64,
    pub name: String,
    pub building_type: String,
    pub address: String,
    pub erf_number: String,
    pub total_fee: Money,
    pub amount_paid: Money,
    pub deadline: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub architect_id: i64,
    pub contractor_id: i64,
    pub customer_id: i64,
}

/// A project with its related contacts resolved
///
/// Contacts are `Option` because a relation id can point at a row that no
/// longer resolves; display code shows a placeholder in that case.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub architect: Option<Contact>,
    pub contractor: Option<Contact>,
    pub customer: Option<Contact>,
}
