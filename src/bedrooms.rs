use crate::constants::bedrooms::{LARGE, MEDIUM, SMALL};
use crate::data::{BedroomCounts, SaleRecord};

/// Tally `view` by recognized bedroom category.
///
/// Records with any other category (for example `studio`) count toward `total` but no
/// bucket. That shortfall is kept as-is.
pub fn bedroom_counts(view: &[&SaleRecord]) -> BedroomCounts {
    let mut counts = BedroomCounts {
        total: view.len(),
        ..BedroomCounts::default()
    };
    for record in view {
        match record.bedroom_category.as_str() {
            SMALL => counts.small += 1,
            MEDIUM => counts.medium += 1,
            LARGE => counts.large += 1,
            _ => {}
        }
    }
    counts
}
