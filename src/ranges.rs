//! Overlap validation for package quantity ranges.
//!
//! Among active definitions no two `[min_quantity, max_quantity]` ranges may
//! overlap. Ranges are closed intervals, so `[1,4]` and `[4,8]` conflict on
//! quantity 4.

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::PackageDefinition;
use crate::types::QuantityRange;

/// Outcome of a range check.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct RangeValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RangeValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            conflicting_name: None,
            message: None,
        }
    }

    fn conflict(candidate: QuantityRange, other: &PackageDefinition) -> Self {
        Self {
            valid: false,
            conflicting_name: Some(other.name.clone()),
            message: Some(format!(
                "Quantity range {} overlaps with \"{}\" ({})",
                candidate,
                other.name,
                other.quantity_range()
            )),
        }
    }
}

/// Checks `candidate` against every active definition except `exclude_id`.
///
/// Definitions are scanned in slice order and the first conflict is
/// reported, so the result is stable for a fixed input. Inactive
/// definitions never conflict.
pub fn validate_quantity_ranges(
    candidate: QuantityRange,
    definitions: &[PackageDefinition],
    exclude_id: Option<&str>,
) -> RangeValidation {
    definitions
        .iter()
        .filter(|p| p.is_active)
        .filter(|p| exclude_id != Some(p.id.as_str()))
        .find(|p| candidate.overlaps(&p.quantity_range()))
        .map(|p| RangeValidation::conflict(candidate, p))
        .unwrap_or_else(RangeValidation::ok)
}
