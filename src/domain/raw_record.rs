use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Service identifier used when a record does not name one.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// One observed error event.
///
/// Field names follow the JSON emitted by the log fetcher (`httpRequest`).
/// Absent or `null` strings fall back to their defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawErrorRecord {
    #[serde(default = "default_service", deserialize_with = "service_or_unknown")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default, rename = "httpRequest")]
    pub http_request: Option<HttpRequest>,
}

/// HTTP metadata attached to a request-scoped error.
///
/// Serializes back to the shape it was read from: absent fields stay absent
/// and keys this type does not model are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub method: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub latency: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub user_agent: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub remote_ip: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawErrorRecord {
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            message: message.into(),
            timestamp: String::new(),
            revision: None,
            http_request: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn with_http_request(mut self, http_request: HttpRequest) -> Self {
        self.http_request = Some(http_request);
        self
    }

    /// Revision only when it carries a value; empty strings count as absent.
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref().filter(|r| !r.is_empty())
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_request.as_ref().and_then(|http| http.status)
    }
}

impl Default for RawErrorRecord {
    fn default() -> Self {
        Self::new(UNKNOWN_SERVICE, "")
    }
}

fn default_service() -> String {
    UNKNOWN_SERVICE.to_string()
}

fn service_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_service))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let record: RawErrorRecord = serde_json::from_str("{}").unwrap();

        assert_eq!(record.service, "unknown");
        assert_eq!(record.message, "");
        assert_eq!(record.timestamp, "");
        assert!(record.revision.is_none());
        assert!(record.http_request.is_none());
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let record: RawErrorRecord = serde_json::from_str(
            r#"{"service": null, "message": null, "timestamp": null, "httpRequest": null}"#,
        )
        .unwrap();

        assert_eq!(record.service, "unknown");
        assert_eq!(record.message, "");
        assert!(record.http_request.is_none());
    }

    #[test]
    fn test_http_request_camel_case_keys() {
        let record: RawErrorRecord = serde_json::from_str(
            r#"{
                "service": "crm-gyt",
                "message": "boom",
                "httpRequest": {
                    "method": "POST",
                    "url": "https://example.com/api/orders",
                    "status": 502,
                    "latency": "1.204s",
                    "userAgent": "curl/8.0",
                    "remoteIp": "10.1.2.3"
                }
            }"#,
        )
        .unwrap();

        let http = record.http_request.as_ref().unwrap();
        assert_eq!(http.method, "POST");
        assert_eq!(http.user_agent, "curl/8.0");
        assert_eq!(http.remote_ip, "10.1.2.3");
        assert_eq!(record.http_status(), Some(502));
    }

    #[test]
    fn test_http_request_round_trips_unchanged() {
        let as_received = serde_json::json!({
            "requestMethod": "GET",
            "status": 503,
            "userAgent": "GoogleHC/1.0",
            "protocol": "HTTP/1.1",
            "cacheLookup": false
        });

        let http: HttpRequest = serde_json::from_value(as_received.clone()).unwrap();
        assert_eq!(http.status, Some(503));
        assert_eq!(http.method, "");
        assert_eq!(http.extra["protocol"], "HTTP/1.1");

        assert_eq!(serde_json::to_value(&http).unwrap(), as_received);
    }

    #[test]
    fn test_empty_revision_is_absent() {
        let record = RawErrorRecord::new("svc", "msg").with_revision("");
        assert_eq!(record.revision(), None);

        let record = RawErrorRecord::new("svc", "msg").with_revision("svc-00042-abc");
        assert_eq!(record.revision(), Some("svc-00042-abc"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record: RawErrorRecord = serde_json::from_str(
            r#"{"id": "abc", "severity": "ERROR", "trace": "t", "spanId": "s", "message": "x"}"#,
        )
        .unwrap();

        assert_eq!(record.message, "x");
    }
}
