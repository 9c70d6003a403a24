use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw value reported by one repository for a field, org unit and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedValue {
    pub field_id: String,
    pub value: String,
    pub org_unit: String,
    pub period: String,
}

impl ObservedValue {
    pub fn new(
        field_id: impl Into<String>,
        value: impl Into<String>,
        org_unit: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
            org_unit: org_unit.into(),
            period: period.into(),
        }
    }

    /// True when this value was reported for exactly this field, org unit and period.
    pub fn matches(&self, field_id: &str, org_unit: &str, period: &str) -> bool {
        self.field_id == field_id && self.org_unit == org_unit && self.period == period
    }
}

/// Observed values keyed by repository id.
pub type ValuesByRepository = BTreeMap<String, Vec<ObservedValue>>;
