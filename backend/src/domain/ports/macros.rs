//! `define_port_error!`: declares a port error enum whose variants each carry
//! one string field, with a thiserror display string and a snake_case
//! constructor per variant.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Closed { message } => "store closed: {message}",
//!     }
//! }
//! let err = StoreError::closed("shutting down");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    /// Adapter-specific detail.
                    $field: String,
                },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                        Self::$variant {
                            $field: $field.into(),
                        }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
