use std::collections::{btree_map, BTreeMap};

use imgmeta_common::exif::{lookup_tag_name, Ifd, Tag, TagIfd};
use imgmeta_common::math::*;

use super::{Type, Value};
use crate::error::{Error, Result, ResultExt};

/// Single IFD entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub data_type: Type,
    /// Number of components, bytes including NUL for strings
    pub count: u32,
    pub value: Value,
}

impl Entry {
    /// Entry with data type and count taken from the value
    pub fn new(value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        Ok(Self {
            data_type: value.data_type(),
            count: value.count().u32()?,
            value,
        })
    }

    pub fn zeroed(data_type: Type, count: u32) -> Result<Self> {
        Ok(Self {
            data_type,
            count,
            value: Value::zeroed(data_type, count)?,
        })
    }

    /// Number of bytes the value occupies
    pub fn data_len(&self) -> Result<u32> {
        Ok(self.count.safe_mul(self.data_type.size())?)
    }

    pub fn u32(&self) -> Option<u32> {
        self.value.u32()
    }

    /// Sets a single unsigned integer
    ///
    /// Short entries that can't hold the value become Long entries.
    pub fn set_u32(&mut self, value: u32) -> Result<()> {
        self.value = match self.data_type {
            Type::Short => match u16::try_from(value) {
                Ok(short) => Value::Short(vec![short]),
                Err(_) => {
                    self.data_type = Type::Long;
                    Value::Long(vec![value])
                }
            },
            Type::Long | Type::Unknown(_) => Value::Long(vec![value]),
            Type::SLong => Value::SLong(vec![i32::try_from(value).e(Error::ValueOutOfRange {
                value,
                data_type: Type::SLong,
            })?]),
            data_type => {
                return Err(Error::ValueOutOfRange { value, data_type });
            }
        };
        self.count = 1;

        Ok(())
    }

    /// Checks that value, data type, and count agree
    pub fn validate(&self, tagifd: TagIfd) -> Result<()> {
        if !self.value.is_compatible(self.data_type) {
            return Err(Error::IncompatibleValue(tagifd));
        }

        let actual = self.value.count();
        if usize::try_from(self.count).ok() != Some(actual) {
            return Err(if self.data_type.is_string() {
                Error::StringLengthMismatch {
                    tagifd,
                    expected: self.count,
                    actual,
                }
            } else {
                Error::CountMismatch {
                    tagifd,
                    expected: self.count,
                    actual,
                }
            });
        }

        Ok(())
    }
}

/// Entries of one IFD, ordered by tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directory {
    entries: BTreeMap<Tag, Entry>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: Tag) -> Option<&Entry> {
        self.entries.get(&tag)
    }

    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut Entry> {
        self.entries.get_mut(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    pub fn insert(&mut self, tag: Tag, entry: Entry) -> Option<Entry> {
        self.entries.insert(tag, entry)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<Entry> {
        self.entries.remove(&tag)
    }

    pub fn retain(&mut self, mut f: impl FnMut(Tag, &Entry) -> bool) {
        self.entries.retain(|tag, entry| f(*tag, entry));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending tag order
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Entry)> {
        self.entries.iter().map(|(tag, entry)| (*tag, entry))
    }

    /// Returns the entry, creating a zeroed Short entry if missing
    pub fn find_or_create(&mut self, tag: Tag) -> &mut Entry {
        self.entries.entry(tag).or_insert_with(|| Entry {
            data_type: Type::Short,
            count: 1,
            value: Value::Short(vec![0]),
        })
    }

    /// Returns the entry, creating a zeroed one of the given type if missing
    ///
    /// Existing entries keep their data type and count.
    pub fn find_or_create_with(
        &mut self,
        tag: Tag,
        data_type: Type,
        count: u32,
    ) -> Result<&mut Entry> {
        Ok(match self.entries.entry(tag) {
            btree_map::Entry::Occupied(entry) => entry.into_mut(),
            btree_map::Entry::Vacant(entry) => entry.insert(Entry::zeroed(data_type, count)?),
        })
    }

    /// Human readable listing of all entries
    pub fn debug_dump(&self, ifd: Ifd) -> String {
        let mut out = String::new();

        for (tag, entry) in self.iter() {
            let name = lookup_tag_name(TagIfd::new(tag, ifd))
                .map(ToString::to_string)
                .unwrap_or_else(|| tag.to_string());

            out.push_str(&format!(
                "{name} {:?}({}): {}\n",
                entry.data_type, entry.count, entry.value
            ));
        }

        out
    }
}

impl FromIterator<(Tag, Entry)> for Directory {
    fn from_iter<T: IntoIterator<Item = (Tag, Entry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_u32_promotes_short() {
        let mut entry = Entry::new(5_u16).unwrap();
        entry.set_u32(70_000).unwrap();

        assert_eq!(entry.data_type, Type::Long);
        assert_eq!(entry.value, Value::Long(vec![70_000]));
        assert_eq!(entry.data_len().unwrap(), 4);
    }

    #[test]
    fn set_u32_rejects_strings() {
        let mut entry = Entry::new("abc").unwrap();
        assert!(matches!(
            entry.set_u32(1),
            Err(Error::ValueOutOfRange {
                data_type: Type::Ascii,
                ..
            })
        ));
    }

    #[test]
    fn validate() {
        let tagifd = TagIfd::new(Tag(0x10F), Ifd::Primary);

        let mut entry = Entry::new("Make").unwrap();
        entry.validate(tagifd).unwrap();

        entry.count = 3;
        assert!(matches!(
            entry.validate(tagifd),
            Err(Error::StringLengthMismatch {
                expected: 3,
                actual: 5,
                ..
            })
        ));

        entry.data_type = Type::Short;
        assert!(matches!(
            entry.validate(tagifd),
            Err(Error::IncompatibleValue(_))
        ));
    }

    #[test]
    fn find_or_create() {
        let mut directory = Directory::new();
        directory.find_or_create(Tag(0x112)).set_u32(6).unwrap();
        directory
            .find_or_create_with(Tag(0x8769), Type::Long, 1)
            .unwrap();

        // Existing entries are kept as they are
        let entry = directory
            .find_or_create_with(Tag(0x112), Type::Long, 1)
            .unwrap();
        assert_eq!(entry.data_type, Type::Short);
        assert_eq!(entry.u32(), Some(6));

        let tags: Vec<_> = directory.iter().map(|(tag, _)| tag.0).collect();
        assert_eq!(tags, [0x112, 0x8769]);
    }

    #[test]
    fn debug_dump() {
        let directory = Directory::from_iter([
            (Tag(0x110), Entry::new("X100").unwrap()),
            (Tag(0xC000), Entry::new(7_u32).unwrap()),
        ]);

        assert_eq!(
            directory.debug_dump(Ifd::Primary),
            "Model Ascii(5): \"X100\"\n0xC000 Long(1): 7\n"
        );
    }
}
