//! Product Tags
//!
//! A sorted, deduplicated collection of free-form tag strings. Tags only exist to widen the
//! free-text search, so the collection stays deliberately small.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess},
};
use smallvec::SmallVec;

/// Free-form product tags, kept sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductTags {
    tags: SmallVec<[String; 5]>,
}

impl ProductTags {
    /// Create a tag collection from owned strings.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut collection = Self { tags };

        collection.tags.sort();
        collection.tags.dedup();

        collection
    }

    /// Create a tag collection from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(
            tags.iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 5]>>(),
        )
    }

    /// Check whether the collection holds the exact tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.binary_search(&tag.to_string()).is_ok()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Lowercased fragment appended to a product's search text.
    pub(crate) fn search_fragment(&self) -> String {
        self.tags.join(" ").to_lowercase()
    }
}

impl Serialize for ProductTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tags.iter())
    }
}

/// Feeds carry tags either as an array of strings or as one free-form string; the latter is
/// split on whitespace.
impl<'de> Deserialize<'de> for ProductTags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagsVisitor;

        impl<'de> de::Visitor<'de> for TagsVisitor {
            type Value = ProductTags;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a list of tag strings or one free-form tag string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ProductTags::new(
                    value
                        .split_whitespace()
                        .map(ToString::to_string)
                        .collect::<SmallVec<[String; 5]>>(),
                ))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut tags: SmallVec<[String; 5]> = SmallVec::new();

                while let Some(tag) = seq.next_element::<String>()? {
                    tags.push(tag);
                }

                Ok(ProductTags::new(tags))
            }
        }

        deserializer.deserialize_any(TagsVisitor)
    }
}
