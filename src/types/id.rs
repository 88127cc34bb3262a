// ABOUTME: Phantom-typed resource names for compile-time type safety.
// ABOUTME: Prevents accidental swapping of bucket, object, and operation names.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for phantom type parameters.
pub enum BucketMarker {}
pub enum ObjectMarker {}
pub enum OperationMarker {}

/// A remote resource name tagged with the kind of resource it names.
///
/// A `BucketName` cannot be passed where an `ObjectName` is expected, even
/// though both are plain strings on the wire.
#[must_use = "names reference remote resources and should not be ignored"]
pub struct ResourceName<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> ResourceName<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }

    /// Percent-escaped form for use as a single URL path segment.
    pub fn escaped(&self) -> String {
        urlencoding::encode(&self.value).into_owned()
    }
}

// Manual impls: T is only a marker and implements nothing.

impl<T> std::fmt::Debug for ResourceName<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResourceName").field(&self.value).finish()
    }
}

impl<T> Clone for ResourceName<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for ResourceName<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for ResourceName<T> {}

impl<T> Hash for ResourceName<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for ResourceName<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Serialize for ResourceName<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for ResourceName<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

pub type BucketName = ResourceName<BucketMarker>;
pub type ObjectName = ResourceName<ObjectMarker>;
pub type OperationName = ResourceName<OperationMarker>;
