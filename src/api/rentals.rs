use super::encode_email;
use crate::client::{ApiClient, ApiRequest};
use crate::error::Error;
use crate::models::{NewRental, Rental};
use crate::types::{Email, ProviderId, RentalId};

impl ApiClient {
    /// All rentals. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] without network I/O when no
    /// credential is stored, otherwise [`Error::Network`],
    /// [`Error::Http`], or [`Error::Decode`].
    pub async fn fetch_all_rentals(&self) -> Result<Vec<Rental>, Error> {
        self.fetch(ApiRequest::get("/api/rentals").authenticated())
            .await
    }

    /// One rental by ID.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_rentals`](Self::fetch_all_rentals).
    pub async fn fetch_rental(&self, id: RentalId) -> Result<Rental, Error> {
        self.fetch(ApiRequest::get(format!("/api/rentals/{id}")).authenticated())
            .await
    }

    /// Book a rental for a user with a provider; returns the generated
    /// rental ID.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_rentals`](Self::fetch_all_rentals).
    pub async fn add_rental(
        &self,
        email: &Email,
        provider: ProviderId,
        rental: &NewRental,
    ) -> Result<RentalId, Error> {
        self.fetch(
            ApiRequest::post(format!(
                "/api/rentals/{}/{provider}",
                encode_email(email)
            ))
            .json(rental)?
            .authenticated(),
        )
        .await
    }

    /// Cancel a rental.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_rentals`](Self::fetch_all_rentals).
    pub async fn delete_rental(&self, id: RentalId) -> Result<(), Error> {
        self.execute(ApiRequest::delete(format!("/api/rentals/{id}")).authenticated())
            .await
    }
}
