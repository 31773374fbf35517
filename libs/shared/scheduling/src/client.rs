use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::{
    Appointment, AppointmentDraft, AppointmentId, PositionLookup, QueuePosition, ServiceError,
    WaitTimeMinutes,
};

use crate::service::SchedulingService;

#[derive(Debug, Deserialize)]
struct WaitTimeBody {
    #[serde(rename = "waitTime")]
    wait_time: WaitTimeMinutes,
}

#[derive(Debug, Serialize)]
struct SetWaitTimeBody {
    #[serde(rename = "newWaitTime")]
    new_wait_time: WaitTimeMinutes,
}

#[derive(Debug, Deserialize)]
struct PositionBody {
    position: Option<QueuePosition>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: Option<AppointmentId>,
    error: Option<String>,
}

/// HTTP client for the clinic's Scheduling Service.
pub struct SchedulingClient {
    client: Client,
    base_url: String,
}

impl SchedulingClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(Self::default_headers())
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build configured HTTP client, using defaults: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.scheduling_service_url.trim_end_matches('/').to_string(),
        }
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Sends a request and returns the raw response, whatever its status.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, &url);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        req.send().await.map_err(|e| {
            error!("Scheduling service request to {} failed: {}", url, e);
            ServiceError::Transport(e.to_string())
        })
    }

    /// Turns a non-success response into [`ServiceError::Rejected`], keeping
    /// the service's own message.
    async fn ensure_success(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(status, &body);
        warn!("Scheduling service rejected request ({}): {}", status, message);

        Err(ServiceError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T>(response: Response) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
    {
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            error!("Undecodable scheduling service response: {} ({})", e, text);
            ServiceError::Decode(e.to_string())
        })
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        let response = Self::ensure_success(response).await?;
        Self::read_json(response).await
    }

    /// Like [`request`](Self::request) but ignores the body of a successful
    /// response, which the service does not guarantee to be JSON.
    pub async fn request_ack(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), ServiceError> {
        let response = self.send(method, path, body).await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl SchedulingService for SchedulingClient {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ServiceError> {
        self.request(Method::GET, "/api/appointments", None).await
    }

    async fn create_appointment(
        &self,
        draft: &AppointmentDraft,
    ) -> Result<Option<AppointmentId>, ServiceError> {
        let body = to_body(draft)?;
        let response = self.send(Method::POST, "/api/appointments", Some(body)).await?;
        let response = Self::ensure_success(response).await?;
        let status = response.status();

        // Only the id is of interest; the canonical record comes from the re-fetch.
        // The body is not guaranteed to be JSON, so a failed decode is not an error.
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<CreatedBody>(&text) {
            Ok(CreatedBody {
                id: None,
                error: Some(message),
            }) => {
                warn!("Scheduling service refused appointment ({}): {}", status, message);
                Err(ServiceError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            }
            Ok(created) => Ok(created.id),
            Err(_) => {
                debug!("Create acknowledged without a JSON body");
                Ok(None)
            }
        }
    }

    async fn replace_appointment(
        &self,
        id: &AppointmentId,
        draft: &AppointmentDraft,
    ) -> Result<(), ServiceError> {
        let path = format!("/api/appointments/{}", urlencoding::encode(id.as_str()));
        self.request_ack(Method::PUT, &path, Some(to_body(draft)?)).await
    }

    async fn delete_appointment(&self, id: &AppointmentId) -> Result<(), ServiceError> {
        let path = format!("/api/appointments/{}", urlencoding::encode(id.as_str()));
        self.request_ack(Method::DELETE, &path, None).await
    }

    async fn wait_time(&self) -> Result<WaitTimeMinutes, ServiceError> {
        let body: WaitTimeBody = self.request(Method::GET, "/api/wait-time", None).await?;
        Ok(body.wait_time)
    }

    async fn set_wait_time(&self, minutes: WaitTimeMinutes) -> Result<(), ServiceError> {
        let body = to_body(&SetWaitTimeBody {
            new_wait_time: minutes,
        })?;
        self.request_ack(Method::POST, "/api/wait-time", Some(body)).await
    }

    async fn register_arrival(&self, patient_name: &str) -> Result<QueuePosition, ServiceError> {
        let body: PositionBody = self
            .request(
                Method::POST,
                "/api/arrive",
                Some(json!({ "patientName": patient_name })),
            )
            .await?;

        match body {
            PositionBody {
                position: Some(position),
                ..
            } => Ok(position),
            PositionBody {
                error: Some(message),
                ..
            } => {
                warn!("Scheduling service refused arrival: {}", message);
                Err(ServiceError::Rejected {
                    status: StatusCode::OK.as_u16(),
                    message,
                })
            }
            _ => Err(ServiceError::Decode(
                "arrival response carried neither position nor error".to_string(),
            )),
        }
    }

    async fn queue_position(&self, patient_name: &str) -> Result<PositionLookup, ServiceError> {
        let path = format!("/api/queue-position/{}", urlencoding::encode(patient_name));
        let response = self.send(Method::GET, &path, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Ok(PositionLookup::NotQueued(rejection_message(
                StatusCode::NOT_FOUND,
                &body,
            )));
        }

        let response = Self::ensure_success(response).await?;
        let body: PositionBody = Self::read_json(response).await?;

        match body {
            PositionBody {
                position: Some(position),
                ..
            } => Ok(PositionLookup::Queued(position)),
            PositionBody {
                error: Some(message),
                ..
            } => Ok(PositionLookup::NotQueued(message)),
            _ => Err(ServiceError::Decode(
                "position response carried neither position nor error".to_string(),
            )),
        }
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ServiceError> {
    serde_json::to_value(value).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Extracts the human-readable message from an error body.
///
/// The service answers `{ "error": "..." }`; a `message` field or plain text
/// are accepted too. An empty body falls back to the status reason.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            match value.get(key) {
                Some(Value::String(message)) => return message.clone(),
                Some(Value::Object(nested)) => {
                    if let Some(Value::String(message)) = nested.get("message") {
                        return message.clone();
                    }
                }
                _ => {}
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Scheduling service error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_prefers_service_wording() {
        assert_eq!(
            rejection_message(StatusCode::CONFLICT, r#"{"error":"Time slot already booked"}"#),
            "Time slot already booked"
        );
        assert_eq!(
            rejection_message(StatusCode::BAD_REQUEST, r#"{"error":{"message":"bad time"}}"#),
            "bad time"
        );
        assert_eq!(
            rejection_message(StatusCode::BAD_REQUEST, r#"{"message":"nope"}"#),
            "nope"
        );
        assert_eq!(rejection_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
        assert_eq!(rejection_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }
}
