use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Type, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum PropertyType {
    #[default]
    House,
    Apartment,
}

#[derive(Type, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum TransactionType {
    #[default]
    Sell,
    Rent,
}

#[derive(Type, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum ListingStatus {
    #[default]
    Available,
    Pending,
    Closed,
}

#[derive(FromRow, Deserialize, Serialize, PartialEq, Clone, Debug)]
pub struct Listing {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub title: String,
    pub location: String,
    pub street: String,
    pub price: i64,
    pub area: f64,
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub description: String,
    pub floor: String,
    pub num_of_floors: String,
    pub build_year: String,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Rounded price per unit of area; 0 by policy when area is zero so the
    /// projection never carries NaN or infinity.
    pub fn price_per_area(&self) -> f64 {
        if self.area != 0.0 {
            (self.price as f64 / self.area).round()
        } else {
            0.0
        }
    }
}
