//! Wire data model for the DriveEasy REST API.
//!
//! The backend serializes camelCase JSON; nested collections are optional
//! on the wire, so every collection field tolerates absence.

use serde::{Deserialize, Serialize};

use crate::types::{CarId, Email, ProviderId, ReceiptId, RentalId, Role};

/// A rentable car model with its configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub configurations: Vec<Configuration>,
}

impl Car {
    /// Display name in "make model year" form.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.make, self.model, self.year)
    }
}

/// A concrete variation of a car (fuel, transmission, seats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: i64,
    pub name: String,
    pub fuel_type: String,
    pub transmission_type: String,
    pub number_of_seats: i32,
    #[serde(default)]
    pub extra_features: Vec<ExtraFeature>,
    #[serde(default)]
    pub providers: Vec<Provider>,
}

/// An extra feature bundled with a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFeature {
    pub id: i64,
    pub name: String,
}

/// A rental provider offering a configuration at a daily price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    /// Daily price in whole currency units.
    pub price: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub visible: bool,
}

/// A user account as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: i64,
    /// Milliseconds since the Unix epoch.
    pub date_of_birth: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub roles: Vec<UserRole>,
}

/// A role entry on a user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: Role,
}

/// A booked rental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: RentalId,
    /// Milliseconds since the Unix epoch.
    pub start_time: i64,
    /// Milliseconds since the Unix epoch.
    pub end_time: i64,
    #[serde(default)]
    pub provider: Option<Provider>,
}

/// A receipt generated from a completed rental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: ReceiptId,
    pub total_price: f64,
    #[serde(default)]
    pub car_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
}

/// Payload for account registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: i64,
    pub password: String,
    /// Milliseconds since the Unix epoch.
    pub date_of_birth: i64,
}

/// Payload for updating a user's profile fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: i64,
    /// Milliseconds since the Unix epoch.
    pub date_of_birth: i64,
}

/// Payload for a password change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// Payload for adding or replacing a car.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// Payload for booking a rental.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRental {
    /// Milliseconds since the Unix epoch.
    pub start_time: i64,
    /// Milliseconds since the Unix epoch.
    pub end_time: i64,
}
