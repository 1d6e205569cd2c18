//! Splits an order's item quantity across one or more packages.
//!
//! The planner repeatedly asks the selector for a package that suits the
//! remaining quantity, fills one instance of it up to its `max_quantity`,
//! and continues until every item is assigned. Each iteration assigns at
//! least one item, so the loop always terminates.

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::PackageDefinition;
use crate::selector::{SelectionTier, select_with_tier};
use crate::summary::{NO_CONFIGURATION_SUMMARY, package_weight, round_weight, shipping_summary};

/// One package instance of a decomposition.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct DecomposedPackage {
    pub package: PackageDefinition,
    pub item_count: u64,
    /// Tare plus contents in pounds, rounded to 2 decimals.
    pub calculated_weight: f64,
}

/// Result of a package calculation.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "packages": [],
    "total_packages": 0,
    "total_weight": 0.0,
    "summary": "No package configuration available"
}))]
pub struct ShippingPlan {
    pub packages: Vec<DecomposedPackage>,
    pub total_packages: usize,
    pub total_weight: f64,
    pub summary: String,
}

impl ShippingPlan {
    /// Plan for an order with nothing to ship or no usable configuration.
    pub fn empty() -> Self {
        Self {
            packages: Vec::new(),
            total_packages: 0,
            total_weight: 0.0,
            summary: NO_CONFIGURATION_SUMMARY.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Sum of items across all package instances.
    pub fn total_items(&self) -> u64 {
        self.packages.iter().map(|p| p.item_count).sum()
    }
}

/// Events emitted while a plan is built.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum PlanEvent {
    /// A package instance was filled.
    PackageAssigned {
        index: usize,
        package_id: String,
        package_name: String,
        tier: SelectionTier,
        item_count: u64,
        remaining: u64,
    },
    /// Planning finished.
    Finished { packages: usize, total_weight: f64 },
}

/// Calculates the packages an order of `total_quantity` items ships in.
///
/// A non-positive quantity or a catalog without active definitions yields
/// [`ShippingPlan::empty`]. Negative or non-finite `weight_per_item`
/// counts as zero.
pub fn calculate_packages(
    total_quantity: i64,
    weight_per_item: f64,
    definitions: &[PackageDefinition],
) -> ShippingPlan {
    calculate_packages_with_progress(total_quantity, weight_per_item, definitions, |_| {})
}

/// Like [`calculate_packages`], calling `on_event` for every step.
pub fn calculate_packages_with_progress(
    total_quantity: i64,
    weight_per_item: f64,
    definitions: &[PackageDefinition],
    mut on_event: impl FnMut(&PlanEvent),
) -> ShippingPlan {
    let weight_per_item = sanitize_weight(weight_per_item);
    let Ok(total_quantity) = u64::try_from(total_quantity) else {
        on_event(&PlanEvent::Finished {
            packages: 0,
            total_weight: 0.0,
        });
        return ShippingPlan::empty();
    };

    let mut packages = Vec::new();
    let mut raw_total_weight = 0.0;
    let mut remaining = total_quantity;

    while remaining > 0 {
        let Some((package, tier)) = select_with_tier(remaining, definitions) else {
            break;
        };
        // A zero capacity would never make progress.
        let capacity = u64::from(package.max_quantity).max(1);
        let item_count = remaining.min(capacity);
        remaining -= item_count;

        let weight = package_weight(package.empty_weight, item_count, weight_per_item);
        raw_total_weight += weight;

        on_event(&PlanEvent::PackageAssigned {
            index: packages.len(),
            package_id: package.id.clone(),
            package_name: package.name.clone(),
            tier,
            item_count,
            remaining,
        });

        packages.push(DecomposedPackage {
            package: package.clone(),
            item_count,
            calculated_weight: round_weight(weight),
        });
    }

    if packages.is_empty() {
        on_event(&PlanEvent::Finished {
            packages: 0,
            total_weight: 0.0,
        });
        return ShippingPlan::empty();
    }

    let total_weight = round_weight(raw_total_weight);
    on_event(&PlanEvent::Finished {
        packages: packages.len(),
        total_weight,
    });

    let summary = shipping_summary(&packages);
    ShippingPlan {
        total_packages: packages.len(),
        total_weight,
        summary,
        packages,
    }
}

fn sanitize_weight(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
