//! # Receipt API
//!
//! Issue and read boletas through `/api/boletas`.
//!
//! | Operation             | Request                         |
//! |-----------------------|---------------------------------|
//! | `create`              | `POST /api/boletas`             |
//! | `list`                | `GET  /api/boletas`             |
//! | `list_newest_first`   | `GET  /api/boletas/ordenadas`   |
//! | `get`                 | `GET  /api/boletas/{id}`        |
//! | `details`             | `GET  /api/boletas/{id}/detalles` |
//!
//! The backend scopes every call to the user in the bearer token.

use boleta_core::types::{ReceiptCreated, ReceiptDetail, ReceiptRecord, ReceiptRequest};
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

const BASE_PATH: &str = "/api/boletas";

#[derive(Debug, Clone)]
pub struct ReceiptApi {
    http: ApiClient,
}

impl ReceiptApi {
    pub fn new(http: ApiClient) -> Self {
        ReceiptApi { http }
    }

    /// Submits a receipt. A 2xx body with `success: false` becomes
    /// [`ClientError::Rejected`].
    pub async fn create(&self, request: &ReceiptRequest) -> ClientResult<ReceiptCreated> {
        let created: ReceiptCreated = self.http.post(BASE_PATH, request).await?;

        if !created.success {
            return Err(ClientError::Rejected(created.message));
        }

        info!(
            receipt_id = ?created.receipt_id,
            items = request.cart_items.len(),
            total = %request.total,
            "Receipt created"
        );
        Ok(created)
    }

    /// The user's receipts in backend order.
    pub async fn list(&self) -> ClientResult<Vec<ReceiptRecord>> {
        let receipts: Vec<ReceiptRecord> = self.http.get(BASE_PATH).await?;
        info!(count = receipts.len(), "Receipts fetched");
        Ok(receipts)
    }

    /// The user's receipts, newest first.
    pub async fn list_newest_first(&self) -> ClientResult<Vec<ReceiptRecord>> {
        let receipts: Vec<ReceiptRecord> =
            self.http.get(&format!("{}/ordenadas", BASE_PATH)).await?;
        info!(count = receipts.len(), "Receipts fetched (newest first)");
        Ok(receipts)
    }

    /// One receipt with its lines.
    pub async fn get(&self, id: i64) -> ClientResult<ReceiptRecord> {
        self.http.get(&format!("{}/{}", BASE_PATH, id)).await
    }

    /// Only the lines of one receipt.
    pub async fn details(&self, id: i64) -> ClientResult<Vec<ReceiptDetail>> {
        self.http.get(&format!("{}/{}/detalles", BASE_PATH, id)).await
    }
}
