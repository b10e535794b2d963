//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. A product id and a
//! cart entry id are both integers, but only one of them can remove a line
//! from the cart.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around an integer type with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `get()`
/// - `From<inner>` and `Into<inner>` implementations
/// - `FromStr` so ids can be read straight out of form fields
///
/// # Example
///
/// ```rust
/// # use kinetic_core::define_id;
/// define_id!(WidgetId: i32);
/// define_id!(GadgetId: u64);
///
/// let widget_id = WidgetId::new(1);
/// let gadget_id = GadgetId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget_id;
/// assert_eq!(widget_id.get(), 1);
/// assert_eq!("7".parse::<GadgetId>().unwrap().get(), 7);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident : $inner:ty) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Create a new ID from its raw value.
            #[must_use]
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Get the underlying raw value.
            #[must_use]
            pub const fn get(&self) -> $inner {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId: i32);
define_id!(CartId: u64);

impl CartId {
    /// The id handed out after this one.
    ///
    /// Cart ids only ever grow within a cart's lifetime, so a removed id is
    /// never reissued.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_serde_is_transparent() {
        let id: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(id, ProductId::new(42));
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn test_id_from_str_trims() {
        assert_eq!(" 12 ".parse::<CartId>().unwrap(), CartId::new(12));
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_cart_id_next_is_monotonic() {
        let first = CartId::new(1);
        assert!(first.next() > first);
        assert_eq!(CartId::new(u64::MAX).next(), CartId::new(u64::MAX));
    }
}
