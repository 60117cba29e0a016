/// Adds conversions `from` and `into` integer to enums
///
/// Takes an enum that must have a `#[repr()]` as first meta field and assigns a
/// value to all enum variants.
///
/// Values without a variant are kept in the added `Unknown` variant.
///
/// ```
/// # use imgmeta_common::utils::convertible_enum;
/// convertible_enum!(
///     #[repr(u16)]
///     #[derive(Debug, PartialEq)]
///     pub enum Compression {
///         Uncompressed = 1,
///         Jpeg = 6,
///     }
/// );
/// let int: u16 = Compression::Jpeg.into();
/// assert_eq!(int, 6);
/// assert_eq!(Compression::from(1), Compression::Uncompressed);
/// assert_eq!(Compression::from(7), Compression::Unknown(7));
/// ```
#[macro_export]
macro_rules! convertible_enum {
    (#[repr($type:ty)]$(#[$meta:meta])* $visibility:vis enum $enum_name:ident {
        $($(#[$variant_meta:meta])* $variant_name:ident = $variant_value:expr,)*
    }) => {
        #[repr($type)]
        $(#[$meta])*
        $visibility enum $enum_name {
            $($(#[$variant_meta])* $variant_name = $variant_value,)*
            Unknown($type)
        }

        impl std::convert::From<$type> for $enum_name {
            fn from(v: $type) -> Self {
                match v {
                    $($variant_value => Self::$variant_name,)*
                    other => Self::Unknown(other),
                }
            }
        }

        impl std::convert::Into<$type> for $enum_name {
            fn into(self) -> $type {
                match self {
                    $(Self::$variant_name => $variant_value,)*
                    Self::Unknown(other) => other,
                }
            }
        }
    }
}

/// Adds conversions `try_from` and `into` integer to enums
///
/// Takes an enum that must have a `#[repr()]` as first meta field and assigns a
/// value to all enum variants.
///
/// Values without a variant are rejected with a generated
/// `Unknown<Enum>ValueError`.
///
/// ```
/// # use imgmeta_common::utils::maybe_convertible_enum;
/// maybe_convertible_enum!(
///     #[repr(u16)]
///     #[derive(Debug, PartialEq)]
///     pub enum ResolutionUnit {
///         Inch = 2,
///         Centimeter = 3,
///     }
/// );
/// let int: u16 = ResolutionUnit::Inch.into();
/// assert_eq!(int, 2);
/// assert_eq!(ResolutionUnit::try_from(3), Ok(ResolutionUnit::Centimeter));
/// assert_eq!(ResolutionUnit::try_from(4), Err(UnknownResolutionUnitValueError(4)));
/// ```
#[macro_export]
macro_rules! maybe_convertible_enum {
    (#[repr($type:ty)]$(#[$meta:meta])* $visibility:vis enum $enum_name:ident {
        $($(#[$variant_meta:meta])* $variant_name:ident = $variant_value:expr,)*
    }) => {
        #[repr($type)]
        $(#[$meta])*
        $visibility enum $enum_name {
            $($(#[$variant_meta])* $variant_name = $variant_value,)*
        }

        paste::paste! {
            #[derive(Debug, PartialEq, Eq)]
            pub struct [<Unknown $enum_name ValueError>]($type);

            impl std::fmt::Display for [<Unknown $enum_name ValueError>] {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!("Enum '", stringify!($enum_name), "' has no variant with value '{}'"), self.0)
                }
            }

            impl std::error::Error for [<Unknown $enum_name ValueError>] {}

            impl std::convert::TryFrom<$type> for $enum_name {
                type Error =  [<Unknown $enum_name ValueError>];
                fn try_from(v: $type) -> Result<Self, Self::Error> {
                    match v {
                        $($variant_value => Ok(Self::$variant_name),)*
                        other => Err([<Unknown $enum_name ValueError>](other)),
                    }
                }
            }
        }

        impl std::convert::Into<$type> for $enum_name {
            fn into(self) -> $type {
                match self {
                    $(Self::$variant_name => $variant_value,)*
                }
            }
        }
    }
}

pub use {convertible_enum, maybe_convertible_enum};
