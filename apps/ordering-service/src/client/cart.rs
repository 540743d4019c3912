//! Client Cart
//!
//! Lines the customer has picked, priced by the same [`PricingEngine`] the
//! server uses. Every mutation is written through to a [`CartStore`], but
//! only once the stored cart has been loaded, so a fresh session never
//! clobbers what an earlier one saved.

use serde::{Deserialize, Serialize};

use crate::application::dto::{CustomerDto, LineItemDto, PlaceOrderDto};
use crate::domain::ordering::{PriceBreakdown, Priced, PricingEngine};
use crate::domain::shared::{DishId, Money};

use super::cart_store::{CartStorageError, CartStore};
use super::checkout::CheckoutDetails;

/// A menu dish as the storefront shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    /// Dish ID.
    pub id: DishId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    pub image: Option<String>,
    /// Menu category.
    pub category: Option<String>,
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Dish ID. Unique within a cart.
    pub dish_id: DishId,
    /// Dish name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Units, always at least 1.
    pub quantity: u32,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Menu category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Per-dish note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Priced for CartLine {
    fn unit_price(&self) -> Money {
        self.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl From<&CartLine> for LineItemDto {
    fn from(line: &CartLine) -> Self {
        Self {
            dish_id: line.dish_id.to_string(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            image: line.image.clone(),
            instructions: line.instructions.clone(),
        }
    }
}

/// The customer's cart.
#[derive(Debug)]
pub struct Cart<S: CartStore> {
    store: S,
    lines: Vec<CartLine>,
    loaded: bool,
}

impl<S: CartStore> Cart<S> {
    /// Empty, not yet loaded cart.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            lines: Vec::new(),
            loaded: false,
        }
    }

    /// Create a cart and load it straight away.
    pub fn open(store: S) -> Self {
        let mut cart = Self::new(store);
        cart.load();
        cart
    }

    /// Pull the stored lines in and enable write-through.
    ///
    /// An unreadable stored cart is logged and treated as empty; the next
    /// mutation replaces it.
    pub fn load(&mut self) {
        match self.store.load() {
            Ok(Some(lines)) => self.lines = lines,
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to load stored cart"),
        }
        self.loaded = true;
    }

    /// Whether [`Self::load`] has run.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current lines, in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `dish_id`, if present.
    pub fn line(&self, dish_id: &DishId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.dish_id == dish_id)
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ quantity.
    pub fn item_count(&self) -> u32 {
        PricingEngine::item_count(&self.lines)
    }

    /// Subtotal, tax and total.
    pub fn breakdown(&self) -> PriceBreakdown {
        PricingEngine::price(&self.lines)
    }

    /// Σ price × quantity.
    pub fn subtotal(&self) -> Money {
        self.breakdown().subtotal
    }

    /// Tax on the subtotal.
    pub fn tax(&self) -> Money {
        self.breakdown().tax
    }

    /// Subtotal plus tax.
    pub fn total(&self) -> Money {
        self.breakdown().total
    }

    /// Add `quantity` of `dish`. A dish already in the cart gets its
    /// quantity increased; its name, price and note stay as first added.
    pub fn add_item(
        &mut self,
        dish: &Dish,
        quantity: u32,
        instructions: Option<String>,
    ) -> Result<(), CartStorageError> {
        if quantity == 0 {
            return Ok(());
        }

        match self.lines.iter_mut().find(|line| line.dish_id == dish.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                dish_id: dish.id.clone(),
                name: dish.name.clone(),
                price: dish.price,
                quantity,
                image: dish.image.clone(),
                category: dish.category.clone(),
                instructions: instructions.filter(|note| !note.trim().is_empty()),
            }),
        }
        self.persist()
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn update_quantity(
        &mut self,
        dish_id: &DishId,
        quantity: i32,
    ) -> Result<(), CartStorageError> {
        if quantity <= 0 {
            return self.remove_item(dish_id);
        }

        if let Some(line) = self.lines.iter_mut().find(|line| &line.dish_id == dish_id) {
            line.quantity = quantity.unsigned_abs();
        }
        self.persist()
    }

    /// Replace a line's note. A blank note clears it.
    pub fn update_instructions(
        &mut self,
        dish_id: &DishId,
        instructions: Option<String>,
    ) -> Result<(), CartStorageError> {
        if let Some(line) = self.lines.iter_mut().find(|line| &line.dish_id == dish_id) {
            line.instructions = instructions.filter(|note| !note.trim().is_empty());
        }
        self.persist()
    }

    /// Drop the line for `dish_id`.
    pub fn remove_item(&mut self, dish_id: &DishId) -> Result<(), CartStorageError> {
        self.lines.retain(|line| &line.dish_id != dish_id);
        self.persist()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CartStorageError> {
        self.lines.clear();
        self.persist()
    }

    /// Build the checkout payload, carrying the cart's own totals as the
    /// display hint the server compares against.
    pub fn checkout_request(&self, details: CheckoutDetails) -> PlaceOrderDto {
        let totals = self.breakdown();
        let CheckoutDetails {
            customer,
            order_type,
            table_number,
            instructions,
        } = details;

        PlaceOrderDto {
            items: self.lines.iter().map(LineItemDto::from).collect(),
            customer: CustomerDto {
                name: customer.name.trim().to_string(),
                phone: customer.phone.trim().to_string(),
                address: customer.address,
            },
            order_type: order_type.to_string(),
            table_number,
            instructions,
            subtotal: Some(totals.subtotal),
            tax: Some(totals.tax),
            total: Some(totals.total),
        }
    }

    fn persist(&self) -> Result<(), CartStorageError> {
        if !self.loaded {
            return Ok(());
        }
        self.store.save(&self.lines)
    }
}
