pub use self::network::*;
pub use self::serde_helpers::*;

mod network;
mod serde_helpers;

/// Declares a fieldless enum with a fixed string representation for each variant.
///
/// Generates `as_str`, [`std::str::FromStr`] (case-insensitive) and [`std::fmt::Display`].
#[macro_export]
macro_rules! define_string_enum {
    ($(#[$outer:ident $($outer_args:tt)*])* $vis:vis enum $type:ident { $($(#[$inner:ident $($inner_args:tt)*])* $variant:ident => $name:literal),*$(,)? }) => {
        $(#[$outer $($outer_args)*])*
        $vis enum $type {
            $($(#[$inner $($inner_args)*])* $variant),*,
        }

        impl $type {
            #[inline(always)]
            $vis fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),*,
                }
            }
        }

        impl std::str::FromStr for $type {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($name) {
                    return Ok(Self::$variant);
                })*
                Err($crate::UnknownEnumVariant.into())
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &'_ mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(thiserror::Error, Debug, Copy, Clone)]
#[error("Unknown enum variant")]
pub struct UnknownEnumVariant;
