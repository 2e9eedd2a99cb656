//! SupplyMind REST API client implementation

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;

use super::api::{AuthApi, FinanceApi, InventoryApi, PaymentApi, ProfileApi, SupplierApi};
use super::models::{
    AuthToken, ConnectStatus, CreatedInvoice, CreatedReceipt, InventoryItem, Invoice,
    OnboardingLink, PaymentIntent, PaymentIntentStatus, PurchaseOrder, ReceiptLine, Refund,
    ReturnCase, ReturnDisposition, Supplier, SupplierPayment, UserProfile,
};
use crate::config::DEFAULT_API_HOST;
use crate::error::{ApiError, Result};
use crate::payments::{ConfirmOutcome, RefundRequest, confirm_outcome};

/// Fixed base path of the SupplyMind API
const API_BASE_PATH: &str = "/api/v1";

/// Rate limit: 6 requests per second (360 per minute)
const RATE_LIMIT_PER_SECOND: u32 = 6;

/// SupplyMind REST API client
pub struct RestClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    token: Arc<RwLock<Option<String>>>,
}

impl RestClient {
    /// Create a client against the production API host
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_host(token, None)
    }

    /// Create a client against a custom host (development, tests)
    pub fn with_host(token: Option<String>, host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let host = host.unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        Ok(Self {
            http,
            base_url: format!("{}{}", host.trim_end_matches('/'), API_BASE_PATH),
            rate_limiter,
            token: Arc::new(RwLock::new(token)),
        })
    }

    /// Replace the token slot (after login)
    pub async fn set_token(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    /// Send a request and parse the JSON response body
    async fn request<T: for<'de> Deserialize<'de>>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let response = self.send(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into())
    }

    /// Send a request, discarding any response body
    async fn request_empty(&self, method: Method, path: &str, body: Option<Value>) -> Result<()> {
        self.send(method, path, body).await?;
        Ok(())
    }

    /// Build, send, and status-check one request
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut builder = self.http.request(method, &url);
        if let Some(token) = self.token.read().await.as_deref() {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        Self::check_status(response).await
    }

    /// Map error statuses onto the API error taxonomy
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl AuthApi for RestClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let token: AuthToken = self
            .request(
                Method::POST,
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        self.set_token(token.token.clone()).await;
        Ok(token)
    }

    async fn logout(&self) -> Result<()> {
        self.request_empty(Method::POST, "/auth/logout", None).await
    }
}

#[async_trait]
impl FinanceApi for RestClient {
    async fn list_ready_pos(&self) -> Result<Vec<PurchaseOrder>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct PosResponse {
            purchase_orders: Vec<PurchaseOrder>,
        }

        let response: PosResponse = self.request(Method::GET, "/pos?status=READY", None).await?;
        Ok(response.purchase_orders)
    }

    async fn get_po(&self, po_id: &str) -> Result<PurchaseOrder> {
        self.request(Method::GET, &format!("/pos/{}", po_id), None)
            .await
    }

    async fn create_invoice(&self, po_id: &str) -> Result<CreatedInvoice> {
        self.request(
            Method::POST,
            "/invoices",
            Some(json!({ "poId": po_id })),
        )
        .await
    }

    async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice> {
        self.request(Method::GET, &format!("/invoices/{}", invoice_id), None)
            .await
    }

    async fn invoice_for_po(&self, po_id: &str) -> Result<Option<Invoice>> {
        #[derive(Deserialize)]
        struct InvoiceForPoResponse {
            invoice: Option<Invoice>,
        }

        // The server answers 200 with a null invoice before one exists;
        // older deployments answer 404. Both are "absent", not errors.
        let result: Result<InvoiceForPoResponse> = self
            .request(Method::GET, &format!("/pos/{}/invoice", po_id), None)
            .await;
        match result {
            Ok(response) => Ok(response.invoice),
            Err(crate::error::Error::Api(ApiError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn schedule_payment(&self, invoice_id: &str, amount_cents: Option<i64>) -> Result<i64> {
        let mut body = json!({ "invoiceId": invoice_id });
        if let Some(amount) = amount_cents {
            body["amountCents"] = json!(amount);
        }

        // The schedule endpoint returns a bare JSON number, not an object
        self.request(Method::POST, "/payments/schedule", Some(body))
            .await
    }

    async fn execute_payment(&self, payment_id: i64) -> Result<Value> {
        self.request(
            Method::POST,
            &format!("/payments/{}/execute", payment_id),
            None,
        )
        .await
    }

    async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<SupplierPayment>> {
        #[derive(Deserialize)]
        struct PaymentsResponse {
            payments: Vec<SupplierPayment>,
        }

        let response: PaymentsResponse = self
            .request(
                Method::GET,
                &format!("/invoices/{}/payments", invoice_id),
                None,
            )
            .await?;
        Ok(response.payments)
    }
}

#[async_trait]
impl SupplierApi for RestClient {
    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        #[derive(Deserialize)]
        struct SuppliersResponse {
            suppliers: Vec<Supplier>,
        }

        let response: SuppliersResponse = self.request(Method::GET, "/suppliers", None).await?;
        Ok(response.suppliers)
    }

    async fn connect_status(&self, supplier_id: &str) -> Result<ConnectStatus> {
        #[derive(Deserialize)]
        struct StatusResponse {
            status: ConnectStatus,
        }

        let response: StatusResponse = self
            .request(
                Method::GET,
                &format!("/suppliers/{}/connect-status", supplier_id),
                None,
            )
            .await?;
        Ok(response.status)
    }

    async fn create_onboarding_link(&self, supplier_id: &str) -> Result<OnboardingLink> {
        self.request(
            Method::POST,
            &format!("/suppliers/{}/connect-link", supplier_id),
            None,
        )
        .await
    }
}

#[async_trait]
impl PaymentApi for RestClient {
    async fn create_payment_intent(&self, po_id: &str, currency: &str) -> Result<PaymentIntent> {
        self.request(
            Method::POST,
            "/payment-intents",
            Some(json!({ "poId": po_id, "currency": currency })),
        )
        .await
    }

    async fn confirm_payment(
        &self,
        intent_id: &str,
        client_secret: &str,
    ) -> Result<ConfirmOutcome> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ConfirmResponse {
            status: super::models::IntentState,
            #[serde(default)]
            redirect_url: Option<String>,
            #[serde(default)]
            error: Option<String>,
        }

        let response: ConfirmResponse = self
            .request(
                Method::POST,
                &format!("/payment-intents/{}/confirm", intent_id),
                Some(json!({ "clientSecret": client_secret })),
            )
            .await?;
        Ok(confirm_outcome(
            response.status,
            response.redirect_url,
            response.error,
        ))
    }

    async fn get_intent(&self, intent_id: &str) -> Result<PaymentIntentStatus> {
        self.request(
            Method::GET,
            &format!("/payment-intents/{}", intent_id),
            None,
        )
        .await
    }

    async fn refund_payment(&self, intent_id: &str, request: &RefundRequest) -> Result<Refund> {
        let body = serde_json::to_value(request)?;
        self.request(
            Method::POST,
            &format!("/payment-intents/{}/refund", intent_id),
            Some(body),
        )
        .await
    }
}

#[async_trait]
impl InventoryApi for RestClient {
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>> {
        #[derive(Deserialize)]
        struct InventoryResponse {
            items: Vec<InventoryItem>,
        }

        let response: InventoryResponse = self.request(Method::GET, "/inventory", None).await?;
        Ok(response.items)
    }

    async fn record_receipt(&self, po_id: &str, lines: &[ReceiptLine]) -> Result<CreatedReceipt> {
        self.request(
            Method::POST,
            "/inventory/receipts",
            Some(json!({ "poId": po_id, "lines": lines })),
        )
        .await
    }

    async fn list_pending_returns(&self) -> Result<Vec<ReturnCase>> {
        #[derive(Deserialize)]
        struct ReturnsResponse {
            returns: Vec<ReturnCase>,
        }

        let response: ReturnsResponse = self
            .request(Method::GET, "/returns?status=PENDING", None)
            .await?;
        Ok(response.returns)
    }

    async fn submit_inspection(
        &self,
        return_id: &str,
        disposition: ReturnDisposition,
        notes: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({ "disposition": disposition });
        if let Some(notes) = notes {
            body["notes"] = json!(notes);
        }
        self.request_empty(
            Method::POST,
            &format!("/returns/{}/inspection", return_id),
            Some(body),
        )
        .await
    }
}

#[async_trait]
impl ProfileApi for RestClient {
    async fn get_profile(&self) -> Result<UserProfile> {
        self.request(Method::GET, "/profile", None).await
    }

    async fn upload_signature(&self, path: &Path) -> Result<String> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct SignatureResponse {
            signature_url: String,
        }

        self.rate_limiter.until_ready().await;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "signature.png".to_string());
        let bytes = std::fs::read(path)?;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("signature", part);

        let url = format!("{}/profile/signature", self.base_url);
        debug!("POST {} (multipart)", url);

        let mut builder = self.http.post(&url).multipart(form);
        if let Some(token) = self.token.read().await.as_deref() {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        let response = Self::check_status(response).await?;
        let parsed: SignatureResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(parsed.signature_url)
    }
}
