//! Drawer and modal visibility.

use kinetic_core::Product;

/// The side drawers. At most one is open; the overlay shows whenever one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    CartOpen,
    MenuOpen,
}

impl DrawerState {
    /// Open the cart drawer (closing the menu), or close it if open.
    pub fn toggle_cart(&mut self) {
        *self = match self {
            Self::CartOpen => Self::Closed,
            Self::Closed | Self::MenuOpen => Self::CartOpen,
        };
    }

    /// Open the menu drawer (closing the cart), or close it if open.
    pub fn toggle_menu(&mut self) {
        *self = match self {
            Self::MenuOpen => Self::Closed,
            Self::Closed | Self::CartOpen => Self::MenuOpen,
        };
    }

    /// Show the cart drawer regardless of the current state.
    pub fn open_cart(&mut self) {
        *self = Self::CartOpen;
    }

    pub fn close_all(&mut self) {
        *self = Self::Closed;
    }

    #[must_use]
    pub const fn cart_open(self) -> bool {
        matches!(self, Self::CartOpen)
    }

    #[must_use]
    pub const fn menu_open(self) -> bool {
        matches!(self, Self::MenuOpen)
    }

    /// Whether the dimming overlay is active.
    #[must_use]
    pub const fn overlay_active(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// The quick-view modal.
///
/// While open it holds the product the next add-to-cart applies to, plus the
/// rendered body. Closing drops both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open { product: Box<Product>, body: String },
}

impl ModalState {
    /// The pending selection, if the modal is open.
    #[must_use]
    pub fn current(&self) -> Option<&Product> {
        match self {
            Self::Open { product, .. } => Some(product.as_ref()),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Open { body, .. } => Some(body.as_str()),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}
