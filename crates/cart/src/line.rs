//! Cart line records.
//!
//! The persisted JSON uses the storefront's field names (`productId`,
//! `price`, `artisanName`, ...) so carts written by earlier storefront
//! builds still load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use urithi_core::{ArtisanId, LineId, ProductId, Quantity};

/// One purchasable entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Generated at insertion time; stable for the lifetime of the line.
    pub id: LineId,
    /// Underlying product. Not unique across lines when variants differ.
    pub product_id: ProductId,
    /// Display name captured at add time.
    pub name: String,
    /// Unit price, currency-agnostic.
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    /// Image URL captured at add time.
    #[serde(default)]
    pub image: String,
    /// Always >= 1.
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artisan_id: Option<ArtisanId>,
    #[serde(default)]
    pub artisan_name: String,
    /// Free-form discriminator (size, colour, ...). Part of the merge key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl CartLine {
    /// Build a line from a candidate and a freshly generated id.
    #[must_use]
    pub fn from_input(id: LineId, input: CartLineInput) -> Self {
        Self {
            id,
            product_id: input.product_id,
            name: input.name,
            unit_price: input.unit_price,
            image: input.image,
            quantity: input.quantity,
            artisan_id: input.artisan_id,
            artisan_name: input.artisan_name,
            variant: input.variant,
        }
    }

    /// The (`product_id`, `variant`) pair that decides merging.
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            product_id: &self.product_id,
            variant: self.variant.as_deref(),
        }
    }

    /// `unit_price * quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// A candidate line: everything except the generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artisan_id: Option<ArtisanId>,
    #[serde(default)]
    pub artisan_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl CartLineInput {
    /// Create a candidate with no variant, artisan or image.
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: Quantity,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            image: String::new(),
            quantity,
            artisan_id: None,
            artisan_name: String::new(),
            variant: None,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    #[must_use]
    pub fn with_artisan(mut self, id: Option<ArtisanId>, name: impl Into<String>) -> Self {
        self.artisan_id = id;
        self.artisan_name = name.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// The (`product_id`, `variant`) pair that decides merging.
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            product_id: &self.product_id,
            variant: self.variant.as_deref(),
        }
    }
}

/// Merge key: at most one line exists per distinct key.
///
/// `None` and `Some("")` are different variants; the storefront compares
/// them strictly too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub product_id: &'a ProductId,
    pub variant: Option<&'a str>,
}
