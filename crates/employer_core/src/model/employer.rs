//! Employer domain model.
//!
//! # Responsibility
//! - Define the canonical employee record managed by the roster.
//! - Define the create/update payload shape shared by every caller.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - Field values are carried as supplied; the core performs no format checks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of an employer record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployerId = i64;

/// Employer record without its identity.
///
/// Used for inserts and full-replace updates. Missing text fields and salary
/// fall back to empty/zero; `hire_date` has no default and must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Free-form; no address validation.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    /// Exact decimal, carried over JSON as a number. Negative values are kept.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    /// Opaque date-like text, never parsed by core.
    pub hire_date: String,
}

/// Canonical stored employer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    pub id: EmployerId,
    #[serde(flatten)]
    pub fields: EmployerDraft,
}

impl Employer {
    /// Binds a draft to its store-assigned identity.
    pub fn from_draft(id: EmployerId, fields: EmployerDraft) -> Self {
        Self { id, fields }
    }
}

/// Request body for create and update.
///
/// `id` is ignored on create. On update it must equal the targeted id; an
/// absent `id` never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerPayload {
    #[serde(default)]
    pub id: Option<EmployerId>,
    #[serde(flatten)]
    pub fields: EmployerDraft,
}

impl EmployerPayload {
    /// Builds a payload without identity, as sent by a create form.
    pub fn new(fields: EmployerDraft) -> Self {
        Self { id: None, fields }
    }

    /// Builds a payload carrying an identity, as sent by an edit form.
    pub fn with_id(id: EmployerId, fields: EmployerDraft) -> Self {
        Self {
            id: Some(id),
            fields,
        }
    }
}
