use super::encode_email;
use crate::client::{ApiClient, ApiRequest};
use crate::error::Error;
use crate::models::Receipt;
use crate::types::{Email, ReceiptId, RentalId};

impl ApiClient {
    /// All receipts. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] without network I/O when no
    /// credential is stored, otherwise [`Error::Network`],
    /// [`Error::Http`], or [`Error::Decode`].
    pub async fn fetch_all_receipts(&self) -> Result<Vec<Receipt>, Error> {
        self.fetch(ApiRequest::get("/api/receipts").authenticated())
            .await
    }

    /// One receipt by ID.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_receipts`](Self::fetch_all_receipts).
    pub async fn fetch_receipt(&self, id: ReceiptId) -> Result<Receipt, Error> {
        self.fetch(ApiRequest::get(format!("/api/receipts/{id}")).authenticated())
            .await
    }

    /// Generate a receipt from a completed rental. The total price is the
    /// request body — a bare JSON number, which is what the server
    /// expects. Returns the generated receipt ID.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_receipts`](Self::fetch_all_receipts).
    pub async fn add_receipt(
        &self,
        email: &Email,
        rental: RentalId,
        total_price: f64,
    ) -> Result<ReceiptId, Error> {
        self.fetch(
            ApiRequest::post(format!(
                "/api/receipts/{}/{rental}",
                encode_email(email)
            ))
            .json(&total_price)?
            .authenticated(),
        )
        .await
    }

    /// Delete a receipt.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_receipts`](Self::fetch_all_receipts).
    pub async fn delete_receipt(&self, id: ReceiptId) -> Result<(), Error> {
        self.execute(ApiRequest::delete(format!("/api/receipts/{id}")).authenticated())
            .await
    }
}
