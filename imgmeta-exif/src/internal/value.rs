use imgmeta_common::math::*;

use super::Type;
use crate::error::Result;

/// Components of an entry
///
/// Strings are stored as bytes including the terminating NUL.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Byte(Vec<u8>),
    Ascii(Vec<u8>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    Undefined(Vec<u8>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
}

impl Value {
    /// NUL terminated string
    pub fn ascii(s: &str) -> Self {
        let mut bytes = s.as_bytes().to_vec();
        bytes.push(0);
        Self::Ascii(bytes)
    }

    /// Value with `count` zero components of `data_type`
    ///
    /// Unknown types get 4 byte components and are filled with [`Value::Long`].
    pub fn zeroed(data_type: Type, count: u32) -> Result<Self> {
        let n = count.usize()?;
        Ok(match data_type {
            Type::Byte => Self::Byte(vec![0; n]),
            Type::Ascii | Type::Utf8 => Self::Ascii(vec![0; n]),
            Type::Short => Self::Short(vec![0; n]),
            Type::Long | Type::Unknown(_) => Self::Long(vec![0; n]),
            Type::Rational => Self::Rational(vec![(0, 0); n]),
            Type::Undefined => Self::Undefined(vec![0; n]),
            Type::SLong => Self::SLong(vec![0; n]),
            Type::SRational => Self::SRational(vec![(0, 0); n]),
        })
    }

    /// Number of components, bytes for strings
    pub fn count(&self) -> usize {
        match self {
            Self::Byte(v) | Self::Ascii(v) | Self::Undefined(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Rational(v) => v.len(),
            Self::SLong(v) => v.len(),
            Self::SRational(v) => v.len(),
        }
    }

    /// Data type matching the value
    pub fn data_type(&self) -> Type {
        match self {
            Self::Byte(_) => Type::Byte,
            Self::Ascii(_) => Type::Ascii,
            Self::Short(_) => Type::Short,
            Self::Long(_) => Type::Long,
            Self::Rational(_) => Type::Rational,
            Self::Undefined(_) => Type::Undefined,
            Self::SLong(_) => Type::SLong,
            Self::SRational(_) => Type::SRational,
        }
    }

    /// If the value can be written as `data_type`
    ///
    /// Entries of unknown types accept 4 byte integers.
    pub fn is_compatible(&self, data_type: Type) -> bool {
        match data_type {
            Type::Utf8 => matches!(self, Self::Ascii(_)),
            Type::Unknown(_) => matches!(self, Self::Long(_) | Self::SLong(_)),
            data_type => self.data_type() == data_type,
        }
    }

    /// Single unsigned integer
    pub fn u32(&self) -> Option<u32> {
        match self {
            Self::Short(v) if v.len() == 1 => v.first().copied().map(u32::from),
            Self::Long(v) if v.len() == 1 => v.first().copied(),
            _ => None,
        }
    }

    /// String without terminating NUL
    pub fn string(&self) -> Option<String> {
        if let Self::Ascii(bytes) = self {
            let bytes = bytes.split(|x| *x == 0).next().unwrap_or_default();
            Some(String::from_utf8_lossy(bytes).into_owned())
        } else {
            None
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn list<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
            values
                .into_iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }

        match self {
            Self::Ascii(_) => write!(f, "{:?}", self.string().unwrap_or_default()),
            Self::Byte(v) | Self::Undefined(v) if v.len() > 16 => {
                write!(f, "<{} bytes>", v.len())
            }
            Self::Byte(v) | Self::Undefined(v) => write!(f, "{v:02X?}"),
            Self::Short(v) => f.write_str(&list(v)),
            Self::Long(v) => f.write_str(&list(v)),
            Self::SLong(v) => f.write_str(&list(v)),
            Self::Rational(v) => f.write_str(&list(v.iter().map(|(n, d)| format!("{n}/{d}")))),
            Self::SRational(v) => f.write_str(&list(v.iter().map(|(n, d)| format!("{n}/{d}")))),
        }
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Short(vec![value])
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Long(vec![value])
    }
}

impl From<(u32, u32)> for Value {
    fn from(value: (u32, u32)) -> Self {
        Self::Rational(vec![value])
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::ascii(value)
    }
}
