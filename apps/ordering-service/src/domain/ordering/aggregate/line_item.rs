//! Order line snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::services::Priced;
use crate::domain::shared::{DishId, Money};

/// One dish-and-quantity entry, copied from the cart at submission time.
///
/// Later menu edits never reach a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Dish the line was built from.
    pub dish_id: DishId,
    /// Dish name at order time.
    pub name: String,
    /// Unit price at order time.
    pub price: Money,
    /// Units ordered (≥ 1).
    pub quantity: u32,
    /// Dish image URL.
    pub image: Option<String>,
    /// Per-dish kitchen note.
    pub instructions: Option<String>,
}

impl Priced for LineItem {
    fn unit_price(&self) -> Money {
        self.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}
