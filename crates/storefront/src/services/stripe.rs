//! Stripe API client for payment intents.
//!
//! A payment intent is a gateway-side reservation of a charge amount; the
//! client secret it returns is what the browser uses to complete payment.
//! Creating an intent is independent of order creation - the caller may do
//! either first.

use luxecuffs_core::OrderId;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::StripeConfig;

/// Stripe API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The secret key could not be used as a header value.
    #[error("Invalid API key format")]
    InvalidKey,

    /// The created intent carried no client secret.
    #[error("Payment intent {0} has no client secret")]
    MissingClientSecret(String),
}

/// A created payment intent.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
}

impl PaymentIntent {
    /// The client secret, or an error naming the intent.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::MissingClientSecret`] when absent.
    pub fn into_client_secret(self) -> Result<String, StripeError> {
        self.client_secret
            .ok_or(StripeError::MissingClientSecret(self.id))
    }
}

/// Error envelope returned by the Stripe API.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: reqwest::Client,
}

impl StripeClient {
    /// Create a new Stripe API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the key is not
    /// a valid header value.
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value).map_err(|_| StripeError::InvalidKey)?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { client })
    }

    /// Create a payment intent for the given amount in cents.
    ///
    /// The order id, when known, travels as metadata so the charge can be
    /// traced back from the Stripe dashboard; nothing in this system relies
    /// on it.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::Api`] when Stripe rejects the request, or
    /// [`StripeError::Http`] on transport failure.
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
        order_id: Option<OrderId>,
    ) -> Result<PaymentIntent, StripeError> {
        let mut form = vec![
            ("amount", amount_cents.to_string()),
            ("currency", "usd".to_string()),
        ];
        if let Some(order_id) = order_id {
            form.push(("metadata[order_id]", order_id.to_string()));
        }

        let response = self
            .client
            .post(format!("{BASE_URL}/payment_intents"))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorEnvelope>().await {
                Ok(envelope) => envelope
                    .error
                    .message
                    .unwrap_or_else(|| "unknown gateway error".to_string()),
                Err(_) => "unknown gateway error".to_string(),
            };
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<PaymentIntent>().await?)
    }
}
