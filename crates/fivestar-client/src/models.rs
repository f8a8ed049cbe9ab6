//! Request options and response bodies of the FiveStar Support API.
//!
//! Field names are camelCase on the wire. Absent optional fields are omitted when serializing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form JSON object attached to a customer or a response
pub type Metadata = Map<String, Value>;

/// A kind of feedback the client accepts (bug, feature request, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseType {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub icon: String,
}

/// A customer id minted and signed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCustomerIdResult {
    pub customer_id: String,
    pub expires_at: String,
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseOptions {
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl SubmitResponseOptions {
    pub fn new(customer_id: &str, title: &str, description: &str, type_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            type_id: type_id.to_string(),
            email: None,
            name: None,
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseResult {
    pub success: bool,
    pub response_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterCustomerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub id: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCustomerResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCustomerResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyCustomerResult {
    pub(crate) fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_optionals_are_omitted() {
        let options = RegisterCustomerOptions::default();
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({}));

        let options = SubmitResponseOptions::new("CID", "Crash", "It crashed", "bug");
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "customerId": "CID",
                "title": "Crash",
                "description": "It crashed",
                "typeId": "bug"
            })
        );
    }

    #[test]
    fn metadata_is_an_object() {
        let mut metadata = Metadata::new();
        metadata.insert("plan".to_string(), json!("pro"));
        metadata.insert("seats".to_string(), json!(5));

        let options = RegisterCustomerOptions {
            email: Some("a@example.com".to_string()),
            metadata: Some(metadata),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"email": "a@example.com", "metadata": {"plan": "pro", "seats": 5}})
        );
    }

    #[test]
    fn parse_register_result() {
        let body = r#"{
            "success": true,
            "customer": {"id": "42", "customerId": "CID", "email": "a@example.com"}
        }"#;

        let result: RegisterCustomerResult = serde_json::from_str(body).unwrap();
        assert!(result.success);
        assert_eq!(result.message, None);

        let customer = result.customer.unwrap();
        assert_eq!(customer.customer_id, "CID");
        assert_eq!(customer.email.as_deref(), Some("a@example.com"));
        assert_eq!(customer.name, None);
    }

    #[test]
    fn parse_generate_result_ignores_unknown_fields() {
        let body = r#"{
            "customerId": "CID",
            "expiresAt": "2026-12-01T00:00:00Z",
            "deviceId": "dev-1",
            "signature": "ignored"
        }"#;

        let result: GenerateCustomerIdResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.customer_id, "CID");
        assert_eq!(result.expires_at, "2026-12-01T00:00:00Z");
        assert_eq!(result.device_id, "dev-1");
    }
}
