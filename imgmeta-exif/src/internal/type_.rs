imgmeta_common::utils::convertible_enum!(
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Type {
        Byte = 1,
        Ascii = 2,
        Short = 3,
        Long = 4,
        Rational = 5,
        Undefined = 7,
        SLong = 9,
        SRational = 10,
        Utf8 = 129,
    }
);

impl Type {
    /// Size of a single component in bytes
    ///
    /// Unknown types are written as 4 byte components.
    pub fn size(self) -> u32 {
        match self {
            Self::Byte | Self::Ascii | Self::Undefined | Self::Utf8 => 1,
            Self::Short => 2,
            Self::Long | Self::SLong => 4,
            Self::Rational | Self::SRational => 8,
            Self::Unknown(code) => {
                tracing::warn!("Unknown data type {code}, assuming 4 byte components");
                4
            }
        }
    }

    pub fn u16(self) -> u16 {
        self.into()
    }

    pub fn is_string(self) -> bool {
        matches!(self, Self::Ascii | Self::Utf8)
    }
}
