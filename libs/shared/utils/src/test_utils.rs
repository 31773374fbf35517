use std::sync::Arc;

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use serde_json::json;

use shared_config::AppConfig;
use shared_models::{Appointment, AppointmentId, ClinicTime};
use shared_scheduling::{SchedulingClient, SchedulingService};

pub struct TestConfig {
    pub scheduling_service_url: String,
    pub request_timeout_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            scheduling_service_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 5,
        }
    }
}

impl TestConfig {
    /// Points the config at a mock Scheduling Service, e.g. `MockServer::uri()`.
    pub fn with_service_url(url: impl Into<String>) -> Self {
        Self {
            scheduling_service_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            scheduling_service_url: self.scheduling_service_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            ..AppConfig::default()
        }
    }

    /// A real client aimed at the configured URL, ready to hand to a router.
    pub fn to_scheduling(&self) -> Arc<dyn SchedulingService> {
        Arc::new(SchedulingClient::new(&self.to_app_config()))
    }
}

/// Appointment slots relative to the real clock, so "future" and "past"
/// fixtures stay valid whenever the tests run.
pub struct TestSlots;

impl TestSlots {
    fn on_day(days_from_today: i64, hour: u32, minute: u32) -> NaiveDateTime {
        let day = Local::now().naive_local() + Duration::days(days_from_today);
        day.with_hour(hour)
            .and_then(|dt| dt.with_minute(minute))
            .and_then(|dt| dt.with_second(0))
            .and_then(|dt| dt.with_nanosecond(0))
            .unwrap_or(day)
    }

    pub fn future(days_ahead: i64, hour: u32, minute: u32) -> ClinicTime {
        ClinicTime::new(Self::on_day(days_ahead, hour, minute))
    }

    pub fn past(days_ago: i64, hour: u32, minute: u32) -> ClinicTime {
        ClinicTime::new(Self::on_day(-days_ago, hour, minute))
    }

    pub fn appointment(id: &str, patient_name: &str, time: ClinicTime) -> Appointment {
        Appointment {
            id: AppointmentId::from(id),
            patient_name: patient_name.to_string(),
            time,
        }
    }
}

pub struct MockSchedulingResponses;

impl MockSchedulingResponses {
    pub fn appointment_response(id: u64, patient_name: &str, time: ClinicTime) -> serde_json::Value {
        json!({
            "id": id,
            "patientName": patient_name,
            "time": time.to_wire()
        })
    }

    pub fn wait_time_response(minutes: u32) -> serde_json::Value {
        json!({ "waitTime": minutes })
    }

    pub fn position_response(position: u32) -> serde_json::Value {
        json!({ "position": position })
    }

    pub fn not_found_response() -> serde_json::Value {
        json!({ "error": "not found" })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({ "error": message })
    }
}
