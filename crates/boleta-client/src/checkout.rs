//! # Checkout
//!
//! Glue between the [`ReceiptForm`] and the [`ReceiptApi`]: validate, build
//! the request, submit, and reset the form only once the backend has
//! accepted the receipt.
//!
//! ```text
//! form.checkout_request() ──err──► CoreError (nothing sent)
//!        │
//!        ▼
//! api.create(request) ──err──► ClientError (form untouched)
//!        │
//!        ▼
//! form.reset() ──► ReceiptCreated
//! ```

use boleta_core::form::ReceiptForm;
use boleta_core::types::ReceiptCreated;
use tracing::warn;

use crate::error::ClientResult;
use crate::receipts::ReceiptApi;

/// Submits the form as a new receipt.
pub async fn submit(form: &mut ReceiptForm, api: &ReceiptApi) -> ClientResult<ReceiptCreated> {
    let request = form.checkout_request()?;

    match api.create(&request).await {
        Ok(created) => {
            form.reset();
            Ok(created)
        }
        Err(e) => {
            warn!(error = %e, "Receipt submission failed, keeping form");
            Err(e)
        }
    }
}
