//! Data models for shipping package definitions.
//!
//! - `PackageDefinition`: an administrator-configured box template
//! - `PackageDraft`: the editable fields of a definition, as submitted on create/update
//! - `ValidationError`: field-level rejection of a draft

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::{Dimensions, QuantityRange, validation};

/// Validation error for package definition data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),
    #[error("Invalid quantity range: {0}")]
    InvalidQuantityRange(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
}

/// A named physical container an order can ship in.
///
/// # Fields
/// * `length`, `width`, `height` - Outer dimensions in inches
/// * `empty_weight` - Tare weight of box and packing material in pounds
/// * `min_quantity`, `max_quantity` - Inclusive item-count range
/// * `sort_order` - Display ordering only, never consulted by selection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "0b7a4c1e-5f7d-4a57-9d7b-2a0f3f0c9a11",
    "name": "Small Box",
    "length": 12.0,
    "width": 10.0,
    "height": 8.0,
    "empty_weight": 0.6,
    "min_quantity": 1,
    "max_quantity": 4,
    "is_default": false,
    "is_active": true,
    "sort_order": 0
}))]
pub struct PackageDefinition {
    pub id: String,
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub empty_weight: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub is_default: bool,
    pub is_active: bool,
    pub sort_order: i64,
}

impl PackageDefinition {
    /// Builds a definition from a validated draft.
    pub fn from_draft(
        id: impl Into<String>,
        draft: PackageDraft,
        sort_order: i64,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: id.into(),
            name: draft.name.trim().to_string(),
            length: draft.length,
            width: draft.width,
            height: draft.height,
            empty_weight: draft.empty_weight,
            min_quantity: draft.min_quantity,
            max_quantity: draft.max_quantity,
            is_default: draft.is_default,
            is_active: draft.is_active,
            sort_order,
        })
    }

    #[inline]
    pub fn quantity_range(&self) -> QuantityRange {
        QuantityRange::new(self.min_quantity, self.max_quantity)
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.length, self.width, self.height)
    }

    /// Replaces every editable field, keeping identity and ordering.
    pub fn apply_draft(&mut self, draft: PackageDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.name = draft.name.trim().to_string();
        self.length = draft.length;
        self.width = draft.width;
        self.height = draft.height;
        self.empty_weight = draft.empty_weight;
        self.min_quantity = draft.min_quantity;
        self.max_quantity = draft.max_quantity;
        self.is_default = draft.is_default;
        self.is_active = draft.is_active;
        Ok(())
    }
}

fn default_active() -> bool {
    true
}

/// Editable fields of a package definition as submitted by an administrator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Medium Box",
    "length": 16.0,
    "width": 12.0,
    "height": 10.0,
    "empty_weight": 1.0,
    "min_quantity": 5,
    "max_quantity": 10,
    "is_default": false,
    "is_active": true
}))]
pub struct PackageDraft {
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub empty_weight: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl PackageDraft {
    #[inline]
    pub fn quantity_range(&self) -> QuantityRange {
        QuantityRange::new(self.min_quantity, self.max_quantity)
    }

    /// Checks every field, reporting the first offending one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidName(
                "Name must not be empty".to_string(),
            ));
        }
        validation::validate_dimension(self.length, "Length")
            .map_err(ValidationError::InvalidDimension)?;
        validation::validate_dimension(self.width, "Width")
            .map_err(ValidationError::InvalidDimension)?;
        validation::validate_dimension(self.height, "Height")
            .map_err(ValidationError::InvalidDimension)?;
        validation::validate_weight(self.empty_weight, "Empty weight")
            .map_err(ValidationError::InvalidWeight)?;
        if self.min_quantity < 1 {
            return Err(ValidationError::InvalidQuantityRange(format!(
                "Minimum quantity must be at least 1, got: {}",
                self.min_quantity
            )));
        }
        if self.min_quantity > self.max_quantity {
            return Err(ValidationError::InvalidQuantityRange(format!(
                "Minimum quantity ({}) must not exceed maximum quantity ({})",
                self.min_quantity, self.max_quantity
            )));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::draft;
    use super::*;

    #[test]
    fn valid_draft_builds_definition() {
        let mut input = draft("  Small Box ", 1, 4);
        input.is_default = true;
        let def = PackageDefinition::from_draft("pkg-1", input, 3).unwrap();
        assert_eq!(def.name, "Small Box");
        assert_eq!(def.sort_order, 3);
        assert!(def.is_default);
        assert_eq!(def.quantity_range(), QuantityRange::new(1, 4));
        assert_eq!(def.dimensions().to_string(), "12 x 10 x 8 in");
    }

    #[test]
    fn rejects_empty_name() {
        let err = draft("   ", 1, 4).validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidName(_)));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut input = draft("Box", 1, 4);
        input.height = 0.0;
        let err = input.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDimension("Height must be positive, got: 0".to_string())
        );
    }

    #[test]
    fn rejects_negative_empty_weight() {
        let mut input = draft("Box", 1, 4);
        input.empty_weight = -1.0;
        assert!(matches!(
            input.validate(),
            Err(ValidationError::InvalidWeight(_))
        ));
    }

    #[test]
    fn rejects_zero_minimum_and_inverted_range() {
        assert!(matches!(
            draft("Box", 0, 4).validate(),
            Err(ValidationError::InvalidQuantityRange(_))
        ));
        assert!(matches!(
            draft("Box", 6, 4).validate(),
            Err(ValidationError::InvalidQuantityRange(_))
        ));
    }

    #[test]
    fn draft_defaults_to_active_non_default() {
        let json = r#"{
            "name": "Tray",
            "length": 20.0, "width": 14.0, "height": 4.0,
            "empty_weight": 0.3,
            "min_quantity": 1, "max_quantity": 6
        }"#;
        let parsed: PackageDraft = serde_json::from_str(json).expect("Should parse draft");
        assert!(parsed.is_active);
        assert!(!parsed.is_default);
    }

    #[test]
    fn apply_draft_keeps_identity_and_order() {
        let mut def = PackageDefinition::from_draft("pkg-1", draft("Small", 1, 4), 2).unwrap();
        def.apply_draft(draft("Small Plus", 1, 5)).unwrap();
        assert_eq!(def.id, "pkg-1");
        assert_eq!(def.sort_order, 2);
        assert_eq!(def.name, "Small Plus");
        assert_eq!(def.max_quantity, 5);
    }
}
