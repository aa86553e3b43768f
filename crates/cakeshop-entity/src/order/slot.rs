//! Delivery time slot enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three delivery windows offered by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "delivery_slot", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliverySlot {
    /// 09:00 - 12:00.
    Morning,
    /// 12:00 - 16:00.
    Afternoon,
    /// 16:00 - 20:00.
    Evening,
}

impl DeliverySlot {
    /// Return the slot as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Human-readable delivery window for the slot.
    pub fn window(&self) -> &'static str {
        match self {
            Self::Morning => "09:00 - 12:00",
            Self::Afternoon => "12:00 - 16:00",
            Self::Evening => "16:00 - 20:00",
        }
    }

    /// All offered slots.
    pub fn all() -> [DeliverySlot; 3] {
        [Self::Morning, Self::Afternoon, Self::Evening]
    }
}

impl fmt::Display for DeliverySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliverySlot {
    type Err = cakeshop_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            _ => Err(cakeshop_core::AppError::validation(format!(
                "Invalid delivery slot: '{s}'. Expected one of: morning, afternoon, evening"
            ))),
        }
    }
}
