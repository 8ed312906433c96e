use chrono::NaiveDate;
use leptos::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload returned by `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: String,
    pub username: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Accepts `true`, `"true"` and `"TRUE"` alike; the login endpoint sends the
/// admin flag as a string.
pub(crate) fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(text)) => text.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBasicInfo {
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

/// Account linked to an employee record, as embedded in the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePartialDetails {
    pub id: i64,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub sss: String,
    #[serde(default)]
    pub philhealth: String,
    #[serde(default)]
    pub tin: String,
    #[serde(default)]
    pub pagibig: String,
    #[serde(default)]
    pub user: Option<LinkedAccount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    pub id: i64,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub sss: Option<String>,
    #[serde(default)]
    pub philhealth: Option<String>,
    #[serde(default)]
    pub tin: Option<String>,
    #[serde(default)]
    pub pagibig: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub immediate_supervisor: Option<String>,
    #[serde(default)]
    pub basic_salary: Option<f64>,
    #[serde(default)]
    pub rice_subsidy: Option<f64>,
    #[serde(default)]
    pub phone_allowance: Option<f64>,
    #[serde(default)]
    pub clothing_allowance: Option<f64>,
    #[serde(default)]
    pub gross_semi_monthly_rate: Option<f64>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCutoff {
    /// `YYYY-MM`
    pub year_month: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Net salary breakdown computed by the backend. Every figure is optional so a
/// partially populated response still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyNetSalary {
    #[serde(default)]
    pub monthly_worked_hours: Option<f64>,
    #[serde(default)]
    pub gross_monthly_salary: Option<f64>,
    #[serde(default)]
    pub monthly_sss_deduction: Option<f64>,
    #[serde(default)]
    pub monthly_philhealth_deduction: Option<f64>,
    #[serde(default)]
    pub monthly_pagibig_deduction: Option<f64>,
    #[serde(default)]
    pub monthly_withholding_tax: Option<f64>,
    #[serde(default)]
    pub total_deductions: Option<f64>,
    #[serde(default)]
    pub net_monthly_salary: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
            status: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "NETWORK_ERROR")
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "TIMEOUT")
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "DECODE_ERROR")
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            status: Some(401),
            ..Self::with_code(msg, "UNAUTHORIZED")
        }
    }

    /// Builds the error for a non-success response. JSON bodies carrying an
    /// `error` or `message` field are unwrapped, anything else is surfaced as
    /// sent.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::unauthorized(message_from_body(body).unwrap_or_else(|| {
                "Your session has expired. Please log in again.".to_string()
            }));
        }
        let details = serde_json::from_str::<Value>(body).ok();
        let message = message_from_body(body).unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status {}", status))
        });
        Self {
            error: message,
            code: "HTTP_ERROR".to_string(),
            details: details.filter(|value| value.is_object()),
            status: Some(status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED" || self.status == Some(401)
    }

    /// Transport failures are worth another attempt; anything the server
    /// answered is not.
    pub fn is_retryable(&self) -> bool {
        self.code == "NETWORK_ERROR" || self.code == "TIMEOUT"
    }
}

fn message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map
            .get("error")
            .or_else(|| map.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Ok(Value::String(text)) => Some(text),
        _ => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_accepts_string_admin_flag() {
        let payload: LoginResponse = serde_json::from_value(json!({
            "access": "a",
            "refresh": "r",
            "username": "10001",
            "is_admin": "true",
            "message": "10001 successfully logged in"
        }))
        .unwrap();
        assert!(payload.is_admin);

        let regular: LoginResponse = serde_json::from_value(json!({
            "access": "a",
            "refresh": "r",
            "username": "10002",
            "is_admin": false
        }))
        .unwrap();
        assert!(!regular.is_admin);
    }

    #[test]
    fn partial_details_read_camel_case_and_linked_account() {
        let employee: EmployeePartialDetails = serde_json::from_value(json!({
            "id": 1,
            "employeeNumber": "10001",
            "firstName": "Manuel III",
            "lastName": "Garcia",
            "sss": "44-4506057-3",
            "philhealth": "820126853951",
            "tin": "442-605-657-000",
            "pagibig": "691295330870",
            "user": { "id": 1, "username": "10001", "isAdmin": true, "password": "hash" }
        }))
        .unwrap();
        assert_eq!(employee.employee_number, "10001");
        let user = employee.user.unwrap();
        assert_eq!(user.username, "10001");
        assert!(user.is_admin);
    }

    #[test]
    fn monthly_net_salary_tolerates_missing_figures() {
        let salary: MonthlyNetSalary = serde_json::from_value(json!({
            "gross_monthly_salary": 45000.5,
            "net_monthly_salary": 39000.25
        }))
        .unwrap();
        assert_eq!(salary.gross_monthly_salary, Some(45000.5));
        assert!(salary.monthly_sss_deduction.is_none());
    }

    #[test]
    fn api_error_from_response_unwraps_json_and_plain_bodies() {
        let json_error = ApiError::from_response(400, r#"{"error":"Invalid month"}"#);
        assert_eq!(json_error.error, "Invalid month");
        assert_eq!(json_error.code, "HTTP_ERROR");
        assert_eq!(json_error.status, Some(400));
        assert!(json_error.details.is_some());

        let plain = ApiError::from_response(500, "Error calculating net monthly salary: boom");
        assert_eq!(plain.error, "Error calculating net monthly salary: boom");
        assert!(plain.details.is_none());

        let empty = ApiError::from_response(503, "");
        assert_eq!(empty.error, "Service Unavailable");
        assert_eq!(ApiError::from_response(599, "").error, "Request failed with status 599");
    }

    #[test]
    fn api_error_classification() {
        assert!(ApiError::from_response(401, "").is_unauthorized());
        assert!(ApiError::network("offline").is_retryable());
        assert!(ApiError::timeout("slow").is_retryable());
        assert!(!ApiError::from_response(500, "boom").is_retryable());
        assert!(!ApiError::unauthorized("expired").is_retryable());
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }
}
