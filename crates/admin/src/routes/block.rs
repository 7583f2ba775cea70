//! Order stock block handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use stock_block_core::OrderGid;
use tracing::instrument;

use crate::{
    block::{BlockError, OrderBlockView, ProcessOutcome},
    error::AppError,
    state::AppState,
};

/// Build the block router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders/{id}/block", get(show_block))
        .route("/orders/{id}/block/process", post(process_block))
}

/// Show stock for an order's line items.
///
/// Served from the snapshot cache when possible.
///
/// # Errors
///
/// Returns 400 for a malformed ID, 404 for an unknown order and 502 if
/// loading fails.
#[instrument(skip(state))]
pub async fn show_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderBlockView>, AppError> {
    let order_id = parse_order_id(&id)?;

    if let Some(snapshot) = state.snapshot(&order_id).await {
        return Ok(Json(OrderBlockView::from_snapshot(&snapshot)));
    }

    Ok(Json(load_view(&state, &order_id).await?))
}

/// Tag the order and deduct its line items from stock.
///
/// Deltas come from the cached snapshot (loaded first if there is none).
/// After a deduction the snapshot is replaced with freshly loaded stock.
///
/// # Errors
///
/// Returns 409 while another run for the order is in flight, 422 if Shopify
/// rejects the tag or the adjustment, and 502 for other failures.
#[instrument(skip(state))]
pub async fn process_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderBlockView>, AppError> {
    let order_id = parse_order_id(&id)?;

    let Some(_guard) = state.begin_processing(&order_id) else {
        return Err(BlockError::AlreadyProcessing.into());
    };

    let mut view = match state.snapshot(&order_id).await {
        Some(snapshot) => OrderBlockView::from_snapshot(&snapshot),
        None => load_view(&state, &order_id).await?,
    };

    let outcome = view.process(state.shopify(), &state.config().block).await?;

    if matches!(outcome, ProcessOutcome::Adjusted { .. }) {
        state.invalidate_snapshot(&order_id).await;
        if view.error.is_none() {
            state.store_snapshot(order_id, view.snapshot()).await;
        }
    }

    Ok(Json(view))
}

fn parse_order_id(id: &str) -> Result<OrderGid, AppError> {
    OrderGid::parse(id).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Read the order, load its stock and cache the result.
async fn load_view(state: &AppState, order_id: &OrderGid) -> Result<OrderBlockView, AppError> {
    let location_id = &state.config().block.location_id;
    let view = OrderBlockView::open(state.shopify(), order_id, location_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {order_id}")))?;

    state
        .store_snapshot(order_id.clone(), view.snapshot())
        .await;
    Ok(view)
}
