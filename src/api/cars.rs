use crate::client::{ApiClient, ApiRequest};
use crate::error::Error;
use crate::models::{Car, NewCar};
use crate::types::CarId;

impl ApiClient {
    /// All cars in the catalog. Public.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`], [`Error::Http`], or [`Error::Decode`].
    pub async fn fetch_all_cars(&self) -> Result<Vec<Car>, Error> {
        self.fetch(ApiRequest::get("/api/cars")).await
    }

    /// One car by ID. Public; a missing car surfaces as
    /// [`Error::Http`] with status 404.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`], [`Error::Http`], or [`Error::Decode`].
    pub async fn fetch_car(&self, id: CarId) -> Result<Car, Error> {
        self.fetch(ApiRequest::get(format!("/api/cars/{id}"))).await
    }

    /// Add a car to the catalog. Admin only; returns the generated ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] without network I/O when no
    /// credential is stored, otherwise [`Error::Network`],
    /// [`Error::Http`], or [`Error::Decode`].
    pub async fn add_car(&self, car: &NewCar) -> Result<CarId, Error> {
        self.fetch(ApiRequest::post("/api/cars").json(car)?.authenticated())
            .await
    }

    /// Replace a car's fields. Admin only.
    ///
    /// # Errors
    ///
    /// As [`add_car`](Self::add_car).
    pub async fn update_car(&self, id: CarId, car: &NewCar) -> Result<(), Error> {
        self.execute(
            ApiRequest::put(format!("/api/cars/{id}"))
                .json(car)?
                .authenticated(),
        )
        .await
    }

    /// Remove a car from the catalog. Admin only.
    ///
    /// # Errors
    ///
    /// As [`add_car`](Self::add_car).
    pub async fn delete_car(&self, id: CarId) -> Result<(), Error> {
        self.execute(ApiRequest::delete(format!("/api/cars/{id}")).authenticated())
            .await
    }
}
