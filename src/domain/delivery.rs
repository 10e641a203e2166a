use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Id;

/// Address fields captured at checkout or on order edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressFields {
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub unit: Option<String>,
    pub floor: Option<String>,
    pub building: Option<String>,
    pub landmark: Option<String>,
    pub remarks: Option<String>,
}

impl AddressFields {
    /// Field label paired with its value, in display order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 10] {
        [
            ("Country", self.country.as_deref()),
            ("Province", self.province.as_deref()),
            ("City", self.city.as_deref()),
            ("Street", self.street.as_deref()),
            ("Barangay", self.barangay.as_deref()),
            ("Unit", self.unit.as_deref()),
            ("Floor", self.floor.as_deref()),
            ("Building", self.building.as_deref()),
            ("Landmark", self.landmark.as_deref()),
            ("Remarks", self.remarks.as_deref()),
        ]
    }

    /// Copies every non-blank field of `other` over this one.
    pub fn merge_present(&mut self, other: &AddressFields) {
        fn take(target: &mut Option<String>, source: &Option<String>) {
            if let Some(v) = source.as_ref().filter(|v| !v.trim().is_empty()) {
                *target = Some(v.clone());
            }
        }
        take(&mut self.country, &other.country);
        take(&mut self.province, &other.province);
        take(&mut self.city, &other.city);
        take(&mut self.street, &other.street);
        take(&mut self.barangay, &other.barangay);
        take(&mut self.unit, &other.unit);
        take(&mut self.floor, &other.floor);
        take(&mut self.building, &other.building);
        take(&mut self.landmark, &other.landmark);
        take(&mut self.remarks, &other.remarks);
    }
}

/// An address record owned by exactly one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Id,
    pub order_id: Id,
    pub customer_id: Option<Id>,
    #[serde(flatten)]
    pub address: AddressFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn new(order_id: Id, customer_id: Option<Id>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            order_id,
            customer_id,
            address: AddressFields::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
