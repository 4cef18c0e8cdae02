use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::listings::models::{Listing, ListingStatus, PropertyType, TransactionType};

// -- =====================
// -- IN
// -- =====================
#[derive(Deserialize, Serialize, Validate, Default, Debug)]
pub struct ListingIn {
    pub client_id: Option<Uuid>,
    #[validate(length(min = 1, message = "title must not be empty"))]
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
    #[serde(default)]
    pub status: ListingStatus,
}

/// Sparse partial update. A field left out of the JSON body is not touched;
/// `client_id` uses a double option so `"client_id": null` clears the value
/// while an absent key leaves it alone.
#[derive(Deserialize, Serialize, Default, Debug)]
pub struct ListingUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub client_id: Option<Option<Uuid>>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub street: Option<String>,
    pub price: Option<i64>,
    pub area: Option<f64>,
    pub property_type: Option<PropertyType>,
    pub transaction_type: Option<TransactionType>,
    pub description: Option<String>,
    pub floor: Option<String>,
    pub num_of_floors: Option<String>,
    pub build_year: Option<String>,
    pub status: Option<ListingStatus>,
}

impl ListingUpdate {
    pub fn is_empty(&self) -> bool {
        self.client_id.is_none()
            && self.title.is_none()
            && self.location.is_none()
            && self.street.is_none()
            && self.price.is_none()
            && self.area.is_none()
            && self.property_type.is_none()
            && self.transaction_type.is_none()
            && self.description.is_none()
            && self.floor.is_none()
            && self.num_of_floors.is_none()
            && self.build_year.is_none()
            && self.status.is_none()
    }
}

// -- =====================
// -- OUT
// -- =====================
#[derive(Serialize, Deserialize, Debug)]
pub struct ListingOut {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub title: String,
    pub location: String,
    pub street: String,
    pub price: i64,
    pub area: f64,
    pub price_per_area: f64,
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub description: String,
    pub floor: String,
    pub num_of_floors: String,
    pub build_year: String,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Listing> for ListingOut {
    fn from(listing: Listing) -> Self {
        let price_per_area = listing.price_per_area();
        ListingOut {
            id: listing.id,
            client_id: listing.client_id,
            title: listing.title,
            location: listing.location,
            street: listing.street,
            price: listing.price,
            area: listing.area,
            price_per_area,
            property_type: listing.property_type,
            transaction_type: listing.transaction_type,
            description: listing.description,
            floor: listing.floor,
            num_of_floors: listing.num_of_floors,
            build_year: listing.build_year,
            status: listing.status,
            created_at: listing.created_at,
        }
    }
}

// -- =====================
// -- QUERY
// -- =====================
#[derive(Deserialize, Debug)]
pub struct ListingsQuery {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// Raw filter expression, `field_operator=value`.
    pub filter: Option<String>,
}
