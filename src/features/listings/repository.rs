use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::features::listings::models::Listing;
use crate::features::listings::schemas::{ListingIn, ListingUpdate};
use crate::utilities::errors::AppError;

const RETURNING_LISTING: &str = " RETURNING id, client_id, title, location, street, price, area, \
     property_type, transaction_type, description, floor, num_of_floors, \
     build_year, status, created_at";

fn map_unique_violation(error: sqlx::Error, title: &str) -> AppError {
    if let sqlx::Error::Database(db_error) = &error
        && db_error.is_unique_violation()
    {
        return AppError::DuplicateTitleError(title.to_string());
    }
    AppError::SqlxError(error)
}

/// Inserts a whole batch inside one transaction and returns the persisted
/// rows in input order. An empty batch returns without a store round-trip.
/// Any unique-title violation rolls the whole batch back.
pub async fn save_listings(
    pool: &SqlitePool,
    listings: Vec<ListingIn>,
) -> Result<Vec<Listing>, AppError> {
    if listings.is_empty() {
        return Ok(Vec::new());
    }

    let insert = format!(
        "INSERT INTO listings (id, client_id, title, location, street, price, area, \
         property_type, transaction_type, description, floor, num_of_floors, \
         build_year, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?){RETURNING_LISTING}"
    );

    let mut tx = pool.begin().await?;
    let mut saved = Vec::with_capacity(listings.len());

    for listing in listings {
        let row = sqlx::query_as::<_, Listing>(&insert)
            .bind(Uuid::new_v4())
            .bind(listing.client_id)
            .bind(&listing.title)
            .bind(&listing.location)
            .bind(&listing.street)
            .bind(listing.price)
            .bind(listing.area)
            .bind(listing.property_type)
            .bind(listing.transaction_type)
            .bind(&listing.description)
            .bind(&listing.floor)
            .bind(&listing.num_of_floors)
            .bind(&listing.build_year)
            .bind(listing.status)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, &listing.title))?;

        saved.push(row);
    }

    tx.commit().await?;

    Ok(saved)
}

/// Executes a query composed by [`build_listing_query`] and materializes the
/// rows. Execution lives here so query construction stays free of I/O.
///
/// [`build_listing_query`]: crate::features::listings::query::build_listing_query
pub async fn get_listings(
    pool: &SqlitePool,
    mut query: QueryBuilder<'static, Sqlite>,
) -> Result<Vec<Listing>, AppError> {
    let listings = query.build_query_as::<Listing>().fetch_all(pool).await?;

    Ok(listings)
}

pub async fn get_single_listing(
    pool: &SqlitePool,
    listing_id: &Uuid,
) -> Result<Option<Listing>, AppError> {
    let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
        .bind(listing_id)
        .fetch_optional(pool)
        .await?;

    Ok(listing)
}

/// Fetch-then-delete so the caller can report the removed listing. A missing
/// id is a valid, non-error outcome.
pub async fn delete_listing(
    pool: &SqlitePool,
    listing_id: &Uuid,
) -> Result<Option<Listing>, AppError> {
    let mut tx = pool.begin().await?;

    let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
        .bind(listing_id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(listing) = listing else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM listings WHERE id = ?")
        .bind(listing_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(listing))
}

/// Applies only the fields explicitly present in the partial update, then
/// re-fetches the row. An empty partial is a no-op returning None, as is an
/// unknown id.
pub async fn patch_listing(
    pool: &SqlitePool,
    listing_id: &Uuid,
    update: &ListingUpdate,
) -> Result<Option<Listing>, AppError> {
    if update.is_empty() {
        return Ok(None);
    }

    let mut query = QueryBuilder::<Sqlite>::new("UPDATE listings SET ");

    {
        let mut fields = query.separated(", ");
        if let Some(client_id) = &update.client_id {
            fields.push("client_id = ").push_bind_unseparated(*client_id);
        }
        if let Some(title) = &update.title {
            fields.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(location) = &update.location {
            fields
                .push("location = ")
                .push_bind_unseparated(location.clone());
        }
        if let Some(street) = &update.street {
            fields
                .push("street = ")
                .push_bind_unseparated(street.clone());
        }
        if let Some(price) = update.price {
            fields.push("price = ").push_bind_unseparated(price);
        }
        if let Some(area) = update.area {
            fields.push("area = ").push_bind_unseparated(area);
        }
        if let Some(property_type) = update.property_type {
            fields
                .push("property_type = ")
                .push_bind_unseparated(property_type);
        }
        if let Some(transaction_type) = update.transaction_type {
            fields
                .push("transaction_type = ")
                .push_bind_unseparated(transaction_type);
        }
        if let Some(description) = &update.description {
            fields
                .push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(floor) = &update.floor {
            fields.push("floor = ").push_bind_unseparated(floor.clone());
        }
        if let Some(num_of_floors) = &update.num_of_floors {
            fields
                .push("num_of_floors = ")
                .push_bind_unseparated(num_of_floors.clone());
        }
        if let Some(build_year) = &update.build_year {
            fields
                .push("build_year = ")
                .push_bind_unseparated(build_year.clone());
        }
        if let Some(status) = update.status {
            fields.push("status = ").push_bind_unseparated(status);
        }
    }

    query.push(" WHERE id = ").push_bind(*listing_id);

    let result = query
        .build()
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, update.title.as_deref().unwrap_or_default()))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_single_listing(pool, listing_id).await
}
