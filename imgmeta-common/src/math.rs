//! Checked integer arithmetic
//!
//! Offsets and sizes in Exif data are computed with these helpers instead of
//! the plain operators, such that overflows surface as errors.

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Operation {0:?} + {1:?} failed")]
    AddFailed(Option<i128>, Option<i128>),
    #[error("Operation {0:?} - {1:?} failed")]
    SubFailed(Option<i128>, Option<i128>),
    #[error("Operation {0:?} * {1:?} failed")]
    MulFailed(Option<i128>, Option<i128>),
    #[error("Operation {0:?} / {1:?} failed")]
    DivFailed(Option<i128>, Option<i128>),
    #[error("Conversion failed for value {0:?}")]
    ConversionFailed(Option<i128>),
}

/// Same as `checked_add` functions but returns an error
///
/// ```
/// # use imgmeta_common::math::*;
/// assert_eq!(10_u32.safe_add(2), Ok(12));
/// assert!(u32::MAX.safe_add(1).is_err());
/// ```
pub trait SafeAdd: Sized {
    fn safe_add(self, rhs: Self) -> Result<Self, MathError>;
}

/// Same as `checked_sub` functions but returns an error
pub trait SafeSub: Sized {
    fn safe_sub(self, rhs: Self) -> Result<Self, MathError>;
}

/// Same as `checked_mul` functions but returns an error
pub trait SafeMul: Sized {
    fn safe_mul(self, rhs: Self) -> Result<Self, MathError>;
}

/// Same as `checked_div` functions but returns an error
pub trait SafeDiv: Sized {
    fn safe_div(self, rhs: Self) -> Result<Self, MathError>;
}

macro_rules! impl_operator {
    ($op:ident, $f:ident, $t:ty) => {
        paste::paste! {
            impl [< Safe $op >] for $t {
                fn [< safe_ $f >](self, rhs: $t) -> Result<$t, MathError> {
                    let err = || MathError:: [< $op Failed >] (self.try_into().ok(), rhs.try_into().ok());
                    self.[< checked_ $f >](rhs)
                        .ok_or_else(err)
                }
            }
        }
    };
}

macro_rules! impl_binary_operators {
    ($t:ty) => {
        impl_operator!(Add, add, $t);
        impl_operator!(Sub, sub, $t);
        impl_operator!(Mul, mul, $t);
        impl_operator!(Div, div, $t);
    };
}

impl_binary_operators!(u16);
impl_binary_operators!(u32);
impl_binary_operators!(u64);
impl_binary_operators!(usize);

macro_rules! conversion_trait {
    ($trait:ident, $f:ident, $target:ty, [$($source:ty),*]) => {
        #[doc = concat!("Fallible conversion into `", stringify!($target), "`")]
        pub trait $trait: Sized + TryInto<$target> + TryInto<i128> + Copy {
            fn $f(self) -> Result<$target, MathError> {
                self.try_into()
                    .map_err(|_| MathError::ConversionFailed(self.try_into().ok()))
            }
        }

        $(impl $trait for $source {})*
    };
}

conversion_trait!(ToU16, u16, u16, [u32, u64, usize]);
conversion_trait!(ToU32, u32, u32, [u16, u64, usize]);
conversion_trait!(ToU64, u64, u64, [u16, u32, usize]);
conversion_trait!(ToUsize, usize, usize, [u16, u32, u64]);
