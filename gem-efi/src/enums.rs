// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tooling for C-style enums.
//!
//! UEFI enums cannot be modeled as Rust enums: the firmware is free to hand
//! back values outside the enumerated set, and merely constructing such a
//! Rust enum value is undefined behavior. Each C enum is therefore an
//! integer newtype with associated constants for the known variants.

/// Define a C enum as an integer newtype with associated constants.
///
/// The generated type derives the usual value traits and gets a `Debug`
/// impl that prints the variant name for known values and the raw integer
/// for everything else.
macro_rules! newtype_enum {
    (
        $(#[$type_attrs:meta])*
        $visibility:vis enum $type:ident : $base_integer:ty => {
            $(
                $(#[$variant_attrs:meta])*
                $variant:ident = $value:expr,
            )*
    } ) => {
        $(#[$type_attrs])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Eq, PartialEq)]
        $visibility struct $type(pub $base_integer);

        #[allow(unused)]
        impl $type {
            $(
                $(#[$variant_attrs])*
                pub const $variant: $type = $type($value);
            )*
        }

        impl core::fmt::Debug for $type {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match *self {
                    $($type::$variant => f.write_str(stringify!($variant)),)*
                    $type(unknown) => {
                        write!(f, "{}({:#x})", stringify!($type), unknown)
                    }
                }
            }
        }
    };
}
