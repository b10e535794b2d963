//! UI controller: per-page state and the actions that change it.
//!
//! - `controller` - [`StorefrontController`], the stores and regions of one page
//! - `events` - [`UiAction`] and the [`EventTable`] that routes actions to the controller
//! - `overlay` - drawer and modal state machines
//! - `page` - the contents of the grid regions

pub mod controller;
pub mod events;
pub mod overlay;
pub mod page;

pub use controller::{ControllerError, ControllerOptions, StorefrontController};
pub use events::{ActionKind, Effect, EventTable, UiAction};
pub use overlay::{DrawerState, ModalState};
pub use page::PageRegions;
