#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagIfd {
    pub tag: Tag,
    pub ifd: Ifd,
}

impl TagIfd {
    pub fn new(tag: Tag, ifd: Ifd) -> Self {
        Self { tag, ifd }
    }
}

impl<T: Field> From<T> for TagIfd {
    fn from(_value: T) -> Self {
        TagIfd {
            tag: T::TAG,
            ifd: T::IFD,
        }
    }
}

impl std::fmt::Display for TagIfd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match lookup_tag_name(*self) {
            Some(name) => write!(f, "{name} ({:?})", self.ifd),
            None => write!(f, "{} ({:?})", self.tag, self.ifd),
        }
    }
}

pub trait Field {
    const NAME: &'static str;
    const TAG: Tag;
    const IFD: Ifd;
}

pub fn lookup_tag_name(tagifd: TagIfd) -> Option<&'static str> {
    crate::field::TAG_NAMES
        .get(&(tagifd.tag.0, tagifd.ifd))
        .copied()
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(pub u16);

impl Tag {
    pub const EXIF_IFD_POINTER: Self = Self(0x8769);
    pub const GPS_INFO_IFD_POINTER: Self = Self(0x8825);
    pub const INTEROPERABILITY_IFD_POINTER: Self = Self(0xA005);

    /// IFD the pointer tag refers to
    ///
    /// Interoperability IFDs are not modeled, their pointer yields `None`.
    /// See 4.6.3 in v3.0 standard
    pub fn exif_specific_ifd(&self) -> Option<Ifd> {
        match *self {
            Self::EXIF_IFD_POINTER => Some(Ifd::Exif),
            Self::GPS_INFO_IFD_POINTER => Some(Ifd::Gps),
            _ => None,
        }
    }

    pub fn is_ifd_pointer(&self) -> bool {
        self.exif_specific_ifd().is_some() || *self == Self::INTEROPERABILITY_IFD_POINTER
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Image file directory
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ifd {
    /// IFD0, describes the main image
    Primary,
    /// IFD1, linked from [`Ifd::Primary`] as next IFD
    Thumbnail,
    Exif,
    Gps,
}

impl Ifd {
    /// Pointer tag inside [`Ifd::Primary`] that links to this IFD
    pub fn pointer_tag(self) -> Option<Tag> {
        match self {
            Self::Exif => Some(Tag::EXIF_IFD_POINTER),
            Self::Gps => Some(Tag::GPS_INFO_IFD_POINTER),
            Self::Primary | Self::Thumbnail => None,
        }
    }
}
