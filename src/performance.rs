//! Rolling performance history and anomaly detection, grounded on
//! `llm_guardian.monitoring.performance_monitor.PerformanceMonitor`: a
//! `deque(maxlen=10000)` of recent calls, a p95 baseline recomputed from the
//! last 1000 records every 100 new records, and an anomaly flagged when
//! latency exceeds twice the baseline once at least 100 samples exist.

use chrono::Utc;
use guardian_core::models::{AlertCategory, AlertSeverity, MonitoringAlert, PerformanceMetrics};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

struct Inner {
    history: VecDeque<PerformanceMetrics>,
    capacity: usize,
    baseline_p95_ms: Option<f64>,
    records_since_baseline_update: usize,
    alerts: Vec<MonitoringAlert>,
}

pub struct PerformanceRecorder {
    capacity: usize,
    anomaly_multiplier: f64,
    baseline_min_samples: usize,
    inner: Mutex<Inner>,
}

pub struct PerformanceSummary {
    pub total_calls: usize,
    pub success_rate: f64,
    pub average_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub total_cost_usd: f64,
}

impl PerformanceRecorder {
    pub fn new(capacity: usize, anomaly_multiplier: f64, baseline_min_samples: usize) -> Self {
        Self {
            capacity,
            anomaly_multiplier,
            baseline_min_samples,
            inner: Mutex::new(Inner {
                history: VecDeque::with_capacity(capacity.min(1024)),
                capacity,
                baseline_p95_ms: None,
                records_since_baseline_update: 0,
                alerts: Vec::new(),
            }),
        }
    }

    /// Records a call and returns an anomaly alert if its latency exceeds
    /// `anomaly_multiplier` times the current p95 baseline. Matches the
    /// original's ordering: the record is appended to history first, and
    /// only then is it checked against the (possibly just-updated) baseline.
    pub fn record(&self, metric: PerformanceMetrics) -> Option<MonitoringAlert> {
        let mut inner = self.inner.lock().unwrap();
        if inner.history.len() >= inner.capacity {
            inner.history.pop_front();
        }
        let latency_ms = metric.latency_ms as f64;
        inner.history.push_back(metric);

        inner.records_since_baseline_update += 1;
        if inner.records_since_baseline_update >= 100 {
            inner.records_since_baseline_update = 0;
            let window: Vec<f64> = inner
                .history
                .iter()
                .rev()
                .take(1000)
                .map(|m| m.latency_ms as f64)
                .collect();
            inner.baseline_p95_ms = Some(percentile(&window, 0.95));
        }

        if inner.history.len() < self.baseline_min_samples {
            return None;
        }

        let baseline = inner.baseline_p95_ms?;
        if latency_ms > baseline * self.anomaly_multiplier {
            let alert = MonitoringAlert {
                alert_id: format!("perf-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default()),
                severity: AlertSeverity::Warning,
                category: AlertCategory::Performance,
                message: format!(
                    "latency {:.0}ms exceeds {:.1}x baseline p95 of {:.0}ms",
                    latency_ms, self.anomaly_multiplier, baseline
                ),
                timestamp: Utc::now(),
                resolved: false,
            };
            inner.alerts.push(alert.clone());
            Some(alert)
        } else {
            None
        }
    }

    pub fn summary(&self) -> PerformanceSummary {
        let inner = self.inner.lock().unwrap();
        let total = inner.history.len();
        if total == 0 {
            return PerformanceSummary {
                total_calls: 0,
                success_rate: 1.0,
                average_latency_ms: 0.0,
                p95_latency_ms: 0.0,
                total_cost_usd: 0.0,
            };
        }
        let successes = inner.history.iter().filter(|m| m.success).count();
        let latencies: Vec<f64> = inner.history.iter().map(|m| m.latency_ms as f64).collect();
        let average_latency_ms = latencies.iter().sum::<f64>() / total as f64;
        let total_cost_usd: f64 = inner.history.iter().map(|m| m.cost_usd).sum();
        PerformanceSummary {
            total_calls: total,
            success_rate: successes as f64 / total as f64,
            average_latency_ms,
            p95_latency_ms: percentile(&latencies, 0.95),
            total_cost_usd,
        }
    }

    pub fn provider_breakdown(&self) -> HashMap<String, PerformanceSummary> {
        let inner = self.inner.lock().unwrap();
        let mut grouped: HashMap<String, Vec<&PerformanceMetrics>> = HashMap::new();
        for metric in &inner.history {
            grouped.entry(metric.provider.clone()).or_default().push(metric);
        }
        grouped
            .into_iter()
            .map(|(provider, metrics)| {
                let total = metrics.len();
                let successes = metrics.iter().filter(|m| m.success).count();
                let latencies: Vec<f64> = metrics.iter().map(|m| m.latency_ms as f64).collect();
                let average_latency_ms = latencies.iter().sum::<f64>() / total as f64;
                let total_cost_usd: f64 = metrics.iter().map(|m| m.cost_usd).sum();
                (
                    provider,
                    PerformanceSummary {
                        total_calls: total,
                        success_rate: successes as f64 / total as f64,
                        average_latency_ms,
                        p95_latency_ms: percentile(&latencies, 0.95),
                        total_cost_usd,
                    },
                )
            })
            .collect()
    }

    pub fn active_alerts(&self) -> Vec<MonitoringAlert> {
        self.inner.lock().unwrap().alerts.iter().filter(|a| !a.resolved).cloned().collect()
    }

    pub fn resolve_alert(&self, alert_id: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if let Some(alert) = inner.alerts.iter_mut().find(|a| a.alert_id == alert_id) {
            alert.resolved = true;
            true
        } else {
            false
        }
    }
}

fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let index = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[index.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(latency_ms: u64) -> PerformanceMetrics {
        PerformanceMetrics {
            request_id: "r1".to_string(),
            provider: "anthropic".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            latency_ms,
            tokens_used: 100,
            cost_usd: 0.01,
            success: true,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn no_anomaly_before_minimum_samples() {
        let recorder = PerformanceRecorder::new(10_000, 2.0, 100);
        for _ in 0..50 {
            assert!(recorder.record(metric(100)).is_none());
        }
        assert!(recorder.record(metric(100_000)).is_none());
    }

    #[test]
    fn summary_reflects_recorded_calls() {
        let recorder = PerformanceRecorder::new(10_000, 2.0, 100);
        for _ in 0..10 {
            recorder.record(metric(100));
        }
        let summary = recorder.summary();
        assert_eq!(summary.total_calls, 10);
        assert_eq!(summary.success_rate, 1.0);
    }
}
