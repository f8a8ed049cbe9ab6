//! Client for the FiveStar Support API.
//!
//! # Quick Start
//!
//! ```no_run
//! use fivestar_client::{FiveStarClient, SubmitResponseOptions};
//!
//! let client = FiveStarClient::from_client_id("my-client-id");
//!
//! // The service mints and signs the customer id
//! let generated = client.generate_customer_id().unwrap();
//! client.register_customer(&generated.customer_id, None).unwrap();
//!
//! let types = client.get_response_types().unwrap();
//! let options = SubmitResponseOptions::new(
//!     &generated.customer_id,
//!     "Export fails",
//!     "Exporting a report to PDF shows a blank page",
//!     &types[0].id,
//! );
//! client.submit_response(&options).unwrap();
//! ```
//!
//! # Local customer ids
//!
//! Ids minted before generation moved server-side are checked offline with
//! [`FiveStarClient::verify_local_customer_id`]. New ones can still be produced locally with
//! [`FiveStarClient::generate_local_customer_id`].

use fivestar_customer_id::{decode, generate, is_valid_format, verify};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::models::{
    GenerateCustomerIdResult, RegisterCustomerOptions, RegisterCustomerResult, ResponseType,
    SubmitResponseOptions, SubmitResponseResult, VerifyCustomerResult,
};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method, UreqTransport};

/// Things that can go wrong talking to the service
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{0}' is not a well-formed customer id")]
    InvalidCustomerId(String),

    #[error("customer id: {0}")]
    CustomerId(#[from] fivestar_customer_id::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

pub struct FiveStarClient {
    config: ClientConfig,
    transport: Box<dyn HttpTransport>,
}

impl FiveStarClient {
    /// A client using a blocking HTTP transport honoring the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, Box::new(transport))
    }

    /// A client with default configuration for `client_id`.
    pub fn from_client_id(client_id: &str) -> Self {
        Self::new(ClientConfig::new(client_id))
    }

    pub fn with_transport(config: ClientConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client_id(&self) -> &str {
        self.config.client_id()
    }

    /// All response types (bug, feature request, ...) configured for this client.
    pub fn get_response_types(&self) -> Result<Vec<ResponseType>, ClientError> {
        #[derive(serde::Deserialize)]
        struct ResponseTypes {
            types: Option<Vec<ResponseType>>,
        }

        let path = format!(
            "/api/responses/types?clientId={}",
            urlencoding::encode(self.client_id())
        );
        let result: ResponseTypes = self.get(&path)?;

        Ok(result.types.unwrap_or_default())
    }

    /// Ask the service to mint a signed customer id.
    pub fn generate_customer_id(&self) -> Result<GenerateCustomerIdResult, ClientError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GenerateRequest<'a> {
            client_id: &'a str,
        }

        self.post(
            "/api/customers/generate",
            &GenerateRequest {
                client_id: self.client_id(),
            },
        )
    }

    /// Associate `customer_id` with this client, optionally attaching an email and name.
    pub fn register_customer(
        &self,
        customer_id: &str,
        options: Option<&RegisterCustomerOptions>,
    ) -> Result<RegisterCustomerResult, ClientError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct RegisterRequest<'a> {
            client_id: &'a str,
            customer_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            email: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
        }

        check_format(customer_id)?;

        self.post(
            "/api/customers",
            &RegisterRequest {
                client_id: self.client_id(),
                customer_id,
                email: options.and_then(|o| o.email.as_deref()),
                name: options.and_then(|o| o.name.as_deref()),
            },
        )
    }

    /// Ask the service whether `customer_id` is valid and registered for this client.
    ///
    /// Never fails on a rejected id: malformed ids and API errors are reported as
    /// `valid: false`. Transport failures are still errors.
    pub fn verify_customer(&self, customer_id: &str) -> Result<VerifyCustomerResult, ClientError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct VerifyRequest<'a> {
            client_id: &'a str,
            customer_id: &'a str,
        }

        if !is_valid_format(customer_id) {
            return Ok(VerifyCustomerResult::invalid("Invalid customer id format"));
        }

        let request = VerifyRequest {
            client_id: self.client_id(),
            customer_id,
        };

        match self.post("/api/customers/verify", &request) {
            Ok(result) => Ok(result),
            Err(ClientError::Api { message, status }) => {
                debug!("verification rejected ({status:?}): {message}");
                Ok(VerifyCustomerResult::invalid("Verification failed"))
            }
            Err(e) => Err(e),
        }
    }

    /// Submit feedback on behalf of a customer.
    pub fn submit_response(
        &self,
        options: &SubmitResponseOptions,
    ) -> Result<SubmitResponseResult, ClientError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SubmitRequest<'a> {
            client_id: &'a str,
            customer_id: &'a str,
            title: &'a str,
            description: &'a str,
            response_type_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            customer_email: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            customer_name: Option<&'a str>,
        }

        check_format(&options.customer_id)?;

        self.post(
            "/api/responses",
            &SubmitRequest {
                client_id: self.client_id(),
                customer_id: &options.customer_id,
                title: &options.title,
                description: &options.description,
                response_type_id: &options.type_id,
                customer_email: options.email.as_deref(),
                customer_name: options.name.as_deref(),
            },
        )
    }

    /// URL of this client's public feedback page. An empty `locale` is the same as none.
    pub fn public_url(&self, locale: Option<&str>) -> String {
        let client_id = urlencoding::encode(self.client_id());

        match locale.filter(|l| !l.is_empty()) {
            Some(locale) => format!(
                "{}/{}/c/{}",
                self.config.api_url(),
                urlencoding::encode(locale),
                client_id
            ),
            None => format!("{}/c/{}", self.config.api_url(), client_id),
        }
    }

    /// Mint a customer id locally, bound to this client. Needs no network.
    pub fn generate_local_customer_id(&self) -> Result<String, ClientError> {
        Ok(generate(self.client_id())?)
    }

    /// Offline check that `customer_id` was minted locally for this client.
    pub fn verify_local_customer_id(&self, customer_id: &str) -> bool {
        verify(customer_id, self.client_id())
    }

    /// Canonical unmasked form of a locally minted `customer_id`, for log correlation.
    pub fn decode_local_customer_id(&self, customer_id: &str) -> Option<String> {
        decode(customer_id, self.client_id())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url(), path)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];

        let device = [
            ("X-FiveStar-Platform", self.config.platform()),
            ("X-FiveStar-App-Version", self.config.app_version()),
            ("X-FiveStar-Device-Model", self.config.device_model()),
            ("X-FiveStar-OS-Version", self.config.os_version()),
        ];

        for (name, value) in device {
            if let Some(value) = value {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        headers
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = HttpRequest {
            method: Method::Get,
            url: self.url(path),
            headers: self.headers(),
            body: None,
        };

        parse_response(self.transport.execute(&request)?)
    }

    fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = HttpRequest {
            method: Method::Post,
            url: self.url(path),
            headers: self.headers(),
            body: Some(serde_json::to_string(body)?),
        };

        parse_response(self.transport.execute(&request)?)
    }
}

fn check_format(customer_id: &str) -> Result<(), ClientError> {
    if is_valid_format(customer_id) {
        Ok(())
    } else {
        Err(ClientError::InvalidCustomerId(customer_id.to_string()))
    }
}

fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ClientError> {
    if response.status != 200 {
        let message = error_message(&response.body)
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        warn!("request failed with HTTP {}: {}", response.status, message);

        return Err(ClientError::Api {
            message,
            status: Some(response.status),
        });
    }

    Ok(serde_json::from_str(&response.body)?)
}

/// The `error` or `message` field of a JSON error body
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    ["error", "message"]
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::to_string)
}
