//! Picks the best-matching package definition for a single quantity.
//!
//! Selection runs an ordered chain of tiers and stops at the first one that
//! yields a package:
//! 1. exact fit (`min <= quantity <= max`), first in slice order
//! 2. overflow: quantity above every `max`, take the largest `max`
//! 3. undersized: quantity below every `min`, take the smallest `max` that still holds it
//! 4. the active default package
//! 5. the largest `max` overall
//!
//! As long as one active definition exists something is returned, so gaps
//! in the configured ranges never block checkout.

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::PackageDefinition;

/// Which tier of the fallback chain produced a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTier {
    ExactFit,
    Overflow,
    Undersized,
    Default,
    Largest,
}

impl SelectionTier {
    pub fn code(&self) -> &'static str {
        match self {
            SelectionTier::ExactFit => "exact_fit",
            SelectionTier::Overflow => "overflow",
            SelectionTier::Undersized => "undersized",
            SelectionTier::Default => "default",
            SelectionTier::Largest => "largest",
        }
    }
}

/// Returns the package a shipment of `quantity` items should use.
pub fn select_package_for_quantity(
    quantity: u64,
    definitions: &[PackageDefinition],
) -> Option<&PackageDefinition> {
    select_with_tier(quantity, definitions).map(|(package, _)| package)
}

/// Like [`select_package_for_quantity`], also reporting the tier that matched.
pub fn select_with_tier(
    quantity: u64,
    definitions: &[PackageDefinition],
) -> Option<(&PackageDefinition, SelectionTier)> {
    let active: Vec<&PackageDefinition> = definitions.iter().filter(|p| p.is_active).collect();
    if active.is_empty() {
        return None;
    }

    if let Some(p) = exact_fit(quantity, &active) {
        return Some((p, SelectionTier::ExactFit));
    }
    if let Some(p) = overflow(quantity, &active) {
        return Some((p, SelectionTier::Overflow));
    }
    if let Some(p) = undersized(quantity, &active) {
        return Some((p, SelectionTier::Undersized));
    }
    if let Some(p) = default_package(&active) {
        return Some((p, SelectionTier::Default));
    }
    largest(&active).map(|p| (p, SelectionTier::Largest))
}

fn exact_fit<'a>(quantity: u64, active: &[&'a PackageDefinition]) -> Option<&'a PackageDefinition> {
    active
        .iter()
        .copied()
        .find(|p| p.quantity_range().contains(quantity))
}

fn overflow<'a>(quantity: u64, active: &[&'a PackageDefinition]) -> Option<&'a PackageDefinition> {
    let biggest = largest(active)?;
    if quantity > u64::from(biggest.max_quantity) {
        Some(biggest)
    } else {
        None
    }
}

fn undersized<'a>(
    quantity: u64,
    active: &[&'a PackageDefinition],
) -> Option<&'a PackageDefinition> {
    if !active.iter().all(|p| quantity < u64::from(p.min_quantity)) {
        return None;
    }
    active
        .iter()
        .copied()
        .filter(|p| u64::from(p.max_quantity) >= quantity)
        .fold(None, |best: Option<&'a PackageDefinition>, p| match best {
            Some(current) if current.max_quantity <= p.max_quantity => Some(current),
            _ => Some(p),
        })
}

fn default_package<'a>(active: &[&'a PackageDefinition]) -> Option<&'a PackageDefinition> {
    active.iter().copied().find(|p| p.is_default)
}

/// Largest `max_quantity`, first encountered on ties.
fn largest<'a>(active: &[&'a PackageDefinition]) -> Option<&'a PackageDefinition> {
    active
        .iter()
        .copied()
        .fold(None, |best: Option<&'a PackageDefinition>, p| match best {
            Some(current) if current.max_quantity >= p.max_quantity => Some(current),
            _ => Some(p),
        })
}
