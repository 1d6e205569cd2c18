//! Weight calculation and the human-readable shipping summary.

use crate::planner::DecomposedPackage;

/// Summary reported when nothing can be shipped.
pub const NO_CONFIGURATION_SUMMARY: &str = "No package configuration available";

/// Raw weight of one package instance: tare plus contents.
#[inline]
pub fn package_weight(empty_weight: f64, item_count: u64, weight_per_item: f64) -> f64 {
    empty_weight + item_count as f64 * weight_per_item
}

/// Rounds a weight to 2 decimals for display.
#[inline]
pub fn round_weight(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders the summary line for a decomposition.
///
/// Repeated package names are grouped in first-seen order, so the same
/// input always yields the same string:
/// `Ships in: 3 packages (2 Large + Medium)`.
pub fn shipping_summary(packages: &[DecomposedPackage]) -> String {
    match packages {
        [] => NO_CONFIGURATION_SUMMARY.to_string(),
        [only] => format!("Ships in: 1 {}", only.package.name),
        _ => {
            let parts: Vec<String> = group_by_name(packages)
                .into_iter()
                .map(|(name, count)| {
                    if count == 1 {
                        name.to_string()
                    } else {
                        format!("{} {}", count, name)
                    }
                })
                .collect();
            format!(
                "Ships in: {} packages ({})",
                packages.len(),
                parts.join(" + ")
            )
        }
    }
}

fn group_by_name(packages: &[DecomposedPackage]) -> Vec<(&str, usize)> {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for entry in packages {
        let name = entry.package.name.as_str();
        match groups.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, count)) => *count += 1,
            None => groups.push((name, 1)),
        }
    }
    groups
}
