//! Wire models for the routing backend

use domain::RouteResult;
use serde::{Deserialize, Serialize};

/// Success body of `POST /api/calculate-route`
///
/// Unknown fields (the backend may echo the request) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiRouteResponse {
    /// Service-formatted distance
    #[serde(default)]
    pub distance: Option<String>,
    /// Service-formatted duration
    #[serde(default)]
    pub duration: Option<String>,
    /// Encoded polyline of the route path
    #[serde(default)]
    pub polyline: Option<String>,
}

impl ApiRouteResponse {
    /// Convert into a [`RouteResult`], failing if distance or duration is absent
    pub fn into_route_result(self) -> Result<RouteResult, String> {
        let distance = self
            .distance
            .ok_or_else(|| "response is missing 'distance'".to_string())?;
        let duration = self
            .duration
            .ok_or_else(|| "response is missing 'duration'".to_string())?;
        Ok(RouteResult {
            distance,
            duration,
            encoded_polyline: self.polyline.filter(|p| !p.is_empty()),
        })
    }
}

/// Error body: `{error, details?}` or `{detail}`
///
/// `details` and `detail` may be plain strings or structured values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Short error message
    #[serde(default)]
    pub error: Option<String>,
    /// Additional context for `error`
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    /// Framework-style error detail
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Best user-facing message carried by the body
    #[must_use]
    pub fn message(&self) -> Option<String> {
        if let Some(error) = self.error.as_deref().filter(|e| !e.trim().is_empty()) {
            return Some(match self.details.as_ref().and_then(value_text) {
                Some(details) => format!("{error}: {details}"),
                None => error.to_string(),
            });
        }

        self.detail.as_ref().and_then(value_text)
    }
}

/// Strings as-is, other non-null values as compact JSON
fn value_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Null | serde_json::Value::String(_) => None,
        other => Some(other.to_string()),
    }
}
