//! Delivery configuration: regions, time slots, and the excluded weekday.

use chrono::Weekday;
use serde::Serialize;

use crate::order::DeliverySlot;

/// Regions the shop delivers to.
pub const REGIONS: &[&str] = &[
    "Downtown",
    "Riverside",
    "Northgate",
    "Southbank",
    "Eastwood",
    "Westfield",
];

/// The shop does not deliver on this weekday.
pub const EXCLUDED_WEEKDAY: Weekday = Weekday::Sun;

/// Whether a region name is one the shop delivers to.
pub fn is_valid_region(region: &str) -> bool {
    REGIONS.contains(&region)
}

/// Delivery options exposed on the public config endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryConfig {
    /// Deliverable region names.
    pub regions: Vec<&'static str>,
    /// Offered delivery slots.
    pub slots: Vec<SlotInfo>,
    /// Weekday with no deliveries.
    pub excluded_weekday: &'static str,
}

/// A delivery slot with its human-readable window.
#[derive(Debug, Clone, Serialize)]
pub struct SlotInfo {
    /// Slot identifier.
    pub slot: DeliverySlot,
    /// Time window, e.g. "09:00 - 12:00".
    pub window: &'static str,
}

impl DeliveryConfig {
    /// The current delivery configuration.
    pub fn current() -> Self {
        Self {
            regions: REGIONS.to_vec(),
            slots: DeliverySlot::all()
                .into_iter()
                .map(|slot| SlotInfo {
                    slot,
                    window: slot.window(),
                })
                .collect(),
            excluded_weekday: "sunday",
        }
    }
}
