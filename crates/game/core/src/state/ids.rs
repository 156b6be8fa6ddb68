//! Identity handles for layers and the fields they own.
//!
//! Handles are `Copy` and `const`-constructible so layers can export them as
//! constants and other layers can depend on them explicitly.

use core::fmt;

/// Identifier of a content layer (one per unlock day).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub &'static str);

impl LayerId {
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

macro_rules! field_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            pub layer: LayerId,
            pub key: &'static str,
        }

        impl $name {
            pub const fn new(layer: LayerId, key: &'static str) -> Self {
                Self { layer, key }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}", self.layer, self.key)
            }
        }
    };
}

field_id!(
    /// Handle to a stored or derived resource.
    ResourceId
);
field_id!(
    /// Handle to a repeatable buyable.
    BuyableId
);
field_id!(
    /// Handle to a one-shot upgrade.
    UpgradeId
);
field_id!(
    /// Handle to a milestone latch.
    MilestoneId
);
