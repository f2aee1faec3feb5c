//! Structured results of cart mutations.
//!
//! Every mutating operation returns the change it made instead of raising a
//! toast itself. Subscribers receive the same value and decide whether and
//! how to show it.

use serde::{Deserialize, Serialize};

use crate::line::CartLine;

/// Category of a cart change, as consumed by the notification UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
    Cleared,
    Synced,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Removed => "removed",
            Self::Cleared => "cleared",
            Self::Synced => "synced",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added { line: CartLine },
    /// An `add_item` merged into an existing line. `line` holds the new total.
    QuantityIncreased { line: CartLine, added: u32 },
    /// `update_quantity` replaced a line's quantity.
    QuantitySet { line: CartLine },
    /// A line was removed (directly or via a quantity below one).
    Removed { line: CartLine },
    /// Every line was removed.
    Cleared,
    /// The collection was re-read from storage.
    Synced { lines: usize },
}

impl CartChange {
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        match self {
            Self::Added { .. } => ChangeKind::Added,
            Self::QuantityIncreased { .. } | Self::QuantitySet { .. } => ChangeKind::Updated,
            Self::Removed { .. } => ChangeKind::Removed,
            Self::Cleared => ChangeKind::Cleared,
            Self::Synced { .. } => ChangeKind::Synced,
        }
    }

    /// The line affected, if the change concerns a single line.
    #[must_use]
    pub const fn line(&self) -> Option<&CartLine> {
        match self {
            Self::Added { line }
            | Self::QuantityIncreased { line, .. }
            | Self::QuantitySet { line }
            | Self::Removed { line } => Some(line),
            Self::Cleared | Self::Synced { .. } => None,
        }
    }

    /// Short toast title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Added { .. } => "Added to cart",
            Self::QuantityIncreased { .. } | Self::QuantitySet { .. } => "Updated cart",
            Self::Removed { .. } => "Removed from cart",
            Self::Cleared => "Cart cleared",
            Self::Synced { .. } => "Cart updated",
        }
    }

    /// Human-readable description naming the affected line.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added { line } => format!("{} added to your cart", line.name),
            Self::QuantityIncreased { line, .. } | Self::QuantitySet { line } => {
                format!("{} quantity updated", line.name)
            }
            Self::Removed { line } => format!("{} removed from your cart", line.name),
            Self::Cleared => "All items have been removed from your cart".to_string(),
            Self::Synced { lines } => match lines {
                1 => "Your cart now has 1 item line".to_string(),
                n => format!("Your cart now has {n} item lines"),
            },
        }
    }
}
