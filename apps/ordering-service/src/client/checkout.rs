//! Checkout: validate the cart locally, submit it, clear it on success.

use thiserror::Error;

use crate::application::dto::{CustomerDto, PlacedOrderDto};
use crate::domain::ordering::{OrderError, OrderType};

use super::api_client::{ApiClientError, StorefrontClient};
use super::cart::Cart;
use super::cart_store::CartStore;

/// Contact and fulfilment details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// Contact block.
    pub customer: CustomerDto,
    /// Fulfilment type.
    pub order_type: OrderType,
    /// Table for dine-in orders.
    pub table_number: Option<String>,
    /// Order-level note.
    pub instructions: Option<String>,
}

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form would be rejected by the server; nothing was sent.
    #[error("{0}")]
    Invalid(#[from] OrderError),

    /// The server refused the order or could not be reached. The cart is
    /// left as it was.
    #[error(transparent)]
    Submit(#[from] ApiClientError),
}

impl<S: CartStore> Cart<S> {
    /// Submit the cart as an order.
    ///
    /// The payload goes through the same validation the server applies, so
    /// obvious mistakes never leave the device. The cart is cleared only
    /// after the server accepts the order.
    pub async fn checkout(
        &mut self,
        client: &StorefrontClient,
        details: CheckoutDetails,
        idempotency_key: Option<&str>,
    ) -> Result<PlacedOrderDto, CheckoutError> {
        let request = self.checkout_request(details);
        request.clone().into_command()?.validate()?;

        let placed = client.place_order(&request, idempotency_key).await?;

        if let Err(e) = self.clear() {
            tracing::warn!(error = %e, order_id = %placed.order_id, "Order placed but cart could not be cleared");
        }
        Ok(placed)
    }
}
