use serde::Serialize;

use crate::models::Scenario;

/// A single point posted to Mackerel service metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    pub name: String,
    /// Unix epoch seconds.
    pub time: i64,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioTally {
    pub passed: u64,
    pub not_passed: u64,
}

impl ScenarioTally {
    /// Counts scenarios by status. Anything other than exactly `"passed"`
    /// lands in `not_passed`.
    pub fn from_scenarios(scenarios: &[Scenario]) -> Self {
        scenarios.iter().fold(Self::default(), |mut tally, s| {
            if s.passed() {
                tally.passed += 1;
            } else {
                tally.not_passed += 1;
            }
            tally
        })
    }

    pub fn total(&self) -> u64 {
        self.passed + self.not_passed
    }
}

pub fn not_passed_metric_name(service_name: &str) -> String {
    format!("{}.autify.tests.not_passed", service_name)
}

pub fn passed_metric_name(service_name: &str) -> String {
    format!("{}.autify.tests.passed", service_name)
}

/// Builds the `not_passed` and `passed` points, in that order, stamped
/// with the same `time`.
pub fn build_metric_values(service_name: &str, tally: ScenarioTally, time: i64) -> Vec<MetricValue> {
    vec![
        MetricValue {
            name: not_passed_metric_name(service_name),
            time,
            value: tally.not_passed,
        },
        MetricValue {
            name: passed_metric_name(service_name),
            time,
            value: tally.passed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenarios(statuses: &[&str]) -> Vec<Scenario> {
        statuses
            .iter()
            .map(|status| Scenario {
                status: status.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_tally_empty() {
        let tally = ScenarioTally::from_scenarios(&[]);
        assert_eq!(tally, ScenarioTally { passed: 0, not_passed: 0 });
    }

    #[test]
    fn test_tally_mixed() {
        let tally = ScenarioTally::from_scenarios(&scenarios(&["passed", "failed", "passed"]));
        assert_eq!(tally.passed, 2);
        assert_eq!(tally.not_passed, 1);
    }

    #[test]
    fn test_unknown_statuses_count_as_not_passed() {
        let tally = ScenarioTally::from_scenarios(&scenarios(&[
            "",
            "waiting",
            "running",
            "queuing",
            "canceled",
            "PASSED",
        ]));
        assert_eq!(tally.passed, 0);
        assert_eq!(tally.not_passed, 6);
    }

    #[test]
    fn test_tally_sums_to_len() {
        let pool = ["passed", "failed", "", "internal_error", "passed"];
        for len in 0..40 {
            let statuses: Vec<&str> = (0..len).map(|i| pool[(i * 7 + len) % pool.len()]).collect();
            let input = scenarios(&statuses);
            let tally = ScenarioTally::from_scenarios(&input);
            assert_eq!(tally.total() as usize, input.len());
            assert_eq!(
                tally.passed as usize,
                statuses.iter().filter(|s| **s == "passed").count()
            );
        }
    }

    #[test]
    fn test_metric_values_share_timestamp_and_order() {
        let tally = ScenarioTally { passed: 2, not_passed: 1 };
        let values = build_metric_values("web", tally, 1_600_000_000);

        assert_eq!(values.len(), 2);
        assert_eq!(values[0].name, "web.autify.tests.not_passed");
        assert_eq!(values[0].value, 1);
        assert_eq!(values[1].name, "web.autify.tests.passed");
        assert_eq!(values[1].value, 2);
        assert!(values.iter().all(|v| v.time == 1_600_000_000));
    }

    #[test]
    fn test_metric_value_serializes_to_mackerel_shape() {
        let value = MetricValue {
            name: "hoge.autify.tests.passed".to_string(),
            time: 1_600_000_000,
            value: 3,
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "hoge.autify.tests.passed", "time": 1_600_000_000, "value": 3})
        );
    }
}
