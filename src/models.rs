//! Autify webhook payload types.
//!
//! Decoding is lenient: missing or `null` fields fall back to their zero value
//! and unknown fields are ignored. Only `scenarios` keeps its absence
//! observable, since that is what separates a test plan result from the
//! other webhook shapes Autify sends.

use serde::{Deserialize, Deserializer};

/// Decodes `null` as the type's zero value, the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Status string Autify reports for a scenario that passed.
pub const PASSED_STATUS: &str = "passed";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Capability {
    #[serde(deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(deserialize_with = "null_as_default")]
    pub os_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub browser: String,
    #[serde(deserialize_with = "null_as_default")]
    pub browser_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resolution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scenario {
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub started_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub finished_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scenario_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub scenario_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub review_needed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub test_plan_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub capability: Capability,
}

impl Scenario {
    pub fn passed(&self) -> bool {
        self.status == PASSED_STATUS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TestPlan {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Body of a "test plan finished" webhook.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TestPlanWebhook {
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub test_plan: TestPlan,
    #[serde(deserialize_with = "null_as_default")]
    pub started_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub finished_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub review_needed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// `None` when the field is absent or `null`.
    pub scenarios: Option<Vec<Scenario>>,
}
