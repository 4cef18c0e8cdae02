use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::listings::{
        query::{FilterSpec, SortSpec, build_listing_query},
        repository,
        schemas::{ListingIn, ListingOut, ListingUpdate, ListingsQuery},
    },
    services::database::Database,
    utilities::errors::AppError,
};

pub async fn add_listings_handler(
    State(database): State<Database>,
    Json(listings): Json<Vec<ListingIn>>,
) -> Result<impl IntoResponse, AppError> {
    for listing in &listings {
        listing.validate()?;
    }

    let saved = repository::save_listings(&database.pool, listings).await?;
    let listings: Vec<ListingOut> = saved.into_iter().map(ListingOut::from).collect();

    Ok((StatusCode::CREATED, Json(listings)))
}

pub async fn get_listings_handler(
    State(database): State<Database>,
    Query(params): Query<ListingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "listing query: sort_by={:?} sort_order={:?} filter={:?}",
        params.sort_by, params.sort_order, params.filter
    );

    let sort = SortSpec::new(params.sort_by, params.sort_order);
    let filter = params.filter.as_deref().map(FilterSpec::parse).transpose()?;

    let query = build_listing_query(&sort, filter.as_ref())?;
    let listings = repository::get_listings(&database.pool, query).await?;
    let listings: Vec<ListingOut> = listings.into_iter().map(ListingOut::from).collect();

    Ok(Json(listings))
}

pub async fn get_single_listing_handler(
    State(database): State<Database>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let listing = repository::get_single_listing(&database.pool, &listing_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFoundError(format!("No listing with id {listing_id} was found"))
        })?;

    Ok(Json(ListingOut::from(listing)))
}

pub async fn patch_listing_handler(
    State(database): State<Database>,
    Path(listing_id): Path<Uuid>,
    Json(update): Json<ListingUpdate>,
) -> Result<impl IntoResponse, AppError> {
    // An empty partial is a no-op: echo the current row instead of erroring.
    if update.is_empty() {
        let listing = repository::get_single_listing(&database.pool, &listing_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFoundError(format!("No listing with id {listing_id} was found"))
            })?;
        return Ok(Json(ListingOut::from(listing)));
    }

    let listing = repository::patch_listing(&database.pool, &listing_id, &update)
        .await?
        .ok_or_else(|| {
            AppError::NotFoundError(format!("No listing with id {listing_id} was found"))
        })?;

    Ok(Json(ListingOut::from(listing)))
}

pub async fn delete_listing_handler(
    State(database): State<Database>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = repository::delete_listing(&database.pool, &listing_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFoundError(format!("No listing with id {listing_id} was found"))
        })?;

    Ok(Json(ListingOut::from(deleted)))
}
