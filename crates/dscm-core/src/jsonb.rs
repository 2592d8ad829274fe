//! # Flexible Attribute Box
//!
//! [`Jsonb<T>`] wraps a structured value of arbitrary shape (tags, metadata,
//! free-form payloads) and stores it in a single JSON-typed column.
//!
//! ## Invariants
//!
//! - Encoding is transparent: `Jsonb<T>` marshals exactly as `T` does, with
//!   no wrapper object.
//! - Decoding `null` (or reading a NULL column) yields `T::default()`.
//! - [`Jsonb::validate`] succeeds for any value that can be represented as
//!   JSON, and for an empty `HashMap<String, String>` or an empty
//!   `Vec<HashMap<String, String>>` without encoding at all.
//!
//! ## Emptiness
//!
//! "Empty" is the zero value of `T`: empty map, empty list, empty string,
//! `0`, `false`, `None`. Types opt in through [`Emptiness`]; record types
//! whose zero is their `Default` can use [`impl_emptiness_by_default!`].

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::JsonbError;

/// A value that can report whether it is the zero value of its type.
pub trait Emptiness {
    /// True when `self` is the zero value.
    fn is_empty_value(&self) -> bool;
}

/// Implement [`Emptiness`] for types whose zero value is their `Default`.
///
/// ```
/// use dscm_core::{impl_emptiness_by_default, Emptiness};
///
/// #[derive(Default, PartialEq)]
/// struct Owner { id: String }
/// impl_emptiness_by_default!(Owner);
///
/// assert!(Owner::default().is_empty_value());
/// ```
#[macro_export]
macro_rules! impl_emptiness_by_default {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::jsonb::Emptiness for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == <$ty as ::core::default::Default>::default()
                }
            }
        )+
    };
}

macro_rules! zero_is_empty {
    ($($ty:ty => $zero:expr),+ $(,)?) => {
        $(
            impl Emptiness for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == $zero
                }
            }
        )+
    };
}

zero_is_empty! {
    bool => false,
    char => '\0',
    () => (),
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
}

macro_rules! collection_is_empty {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Emptiness for $ty {
                fn is_empty_value(&self) -> bool {
                    self.is_empty()
                }
            }
        )+
    };
}

collection_is_empty!(String, str, serde_json::Map<String, serde_json::Value>);

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for VecDeque<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Emptiness for [T; N] {
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<K, V, S> Emptiness for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Emptiness for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Emptiness for HashSet<T, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for BTreeSet<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Emptiness> Emptiness for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.as_ref().map_or(true, Emptiness::is_empty_value)
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Box<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Rc<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Arc<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl Emptiness for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        match self {
            serde_json::Value::Null => true,
            serde_json::Value::Bool(b) => !b,
            serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
            serde_json::Value::String(s) => s.is_empty(),
            serde_json::Value::Array(a) => a.is_empty(),
            serde_json::Value::Object(o) => o.is_empty(),
        }
    }
}

/// A JSON-backed flexible attribute holding exactly one value of type `T`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Jsonb<T> {
    pub data: T,
}

impl<T> Jsonb<T> {
    /// Column type this value is stored as.
    pub const SQL_TYPE: &'static str = "jsonb";

    /// Wrap `data`.
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Unwrap the owned value.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> From<T> for Jsonb<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T> std::ops::Deref for Jsonb<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::DerefMut for Jsonb<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T: Emptiness> Jsonb<T> {
    /// True when the owned value is the zero value of `T`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty_value()
    }
}

impl<T: Emptiness> Emptiness for Jsonb<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Serialize + 'static> Jsonb<T> {
    /// Check that the owned value can be represented as JSON.
    ///
    /// An empty `HashMap<String, String>` or an empty
    /// `Vec<HashMap<String, String>>` passes without encoding.
    pub fn validate(&self) -> Result<(), JsonbError> {
        if is_whitelisted_empty(&self.data) {
            return Ok(());
        }
        serde_json::to_vec(&self.data)
            .map(|_| ())
            .map_err(JsonbError::Encode)
    }
}

fn is_whitelisted_empty(data: &dyn Any) -> bool {
    if let Some(map) = data.downcast_ref::<HashMap<String, String>>() {
        return map.is_empty();
    }
    if let Some(list) = data.downcast_ref::<Vec<HashMap<String, String>>>() {
        return list.is_empty();
    }
    false
}

impl<T: Serialize> Jsonb<T> {
    /// Column representation: the JSON encoding of the owned value.
    pub fn to_column(&self) -> Result<Vec<u8>, JsonbError> {
        serde_json::to_vec(&self.data).map_err(JsonbError::Encode)
    }
}

impl<T: DeserializeOwned + Default> Jsonb<T> {
    /// Rebuild from a stored column value.
    ///
    /// A NULL column (`None`) or a JSON `null` yields the zero value.
    pub fn from_column(raw: Option<&[u8]>) -> Result<Self, JsonbError> {
        match raw {
            None => Ok(Self::default()),
            Some(bytes) => serde_json::from_slice(bytes).map_err(JsonbError::Decode),
        }
    }
}

impl<T: Serialize> Serialize for Jsonb<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for Jsonb<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = Option::<T>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Owner {
        id: String,
        name: String,
    }
    crate::impl_emptiness_by_default!(Owner);

    struct LiveChannel;

    impl Serialize for LiveChannel {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("channels cannot be encoded"))
        }
    }

    #[test]
    fn empty_values() {
        assert!(Jsonb::new(HashMap::<String, String>::new()).is_empty());
        assert!(Jsonb::new(Vec::<i32>::new()).is_empty());
        assert!(Jsonb::new(String::new()).is_empty());
        assert!(Jsonb::new(0i64).is_empty());
        assert!(Jsonb::new(false).is_empty());
        assert!(Jsonb::new(None::<String>).is_empty());
        assert!(Jsonb::new(Owner::default()).is_empty());
    }

    #[test]
    fn present_option_is_judged_by_its_contents() {
        assert!(Jsonb::new(Some(String::new())).is_empty());
        assert!(Jsonb::new(Some(0i32)).is_empty());
        assert!(Jsonb::new(Some(Vec::<u8>::new())).is_empty());
        assert!(Jsonb::new(Some(Some(false))).is_empty());
        assert!(!Jsonb::new(Some(vec![0u8])).is_empty());
    }

    #[test]
    fn non_empty_values() {
        let map: HashMap<String, String> = [("k".to_string(), "v".to_string())].into();
        assert!(!Jsonb::new(map).is_empty());
        assert!(!Jsonb::new(vec![1]).is_empty());
        assert!(!Jsonb::new("x".to_string()).is_empty());
        assert!(!Jsonb::new(3u8).is_empty());
        assert!(!Jsonb::new(Some("x".to_string())).is_empty());
        assert!(!Jsonb::new(Owner {
            id: "1".into(),
            name: String::new()
        })
        .is_empty());
    }

    #[test]
    fn validate_whitelisted_empty_shapes() {
        assert!(Jsonb::new(HashMap::<String, String>::new()).validate().is_ok());
        assert!(Jsonb::new(Vec::<HashMap<String, String>>::new())
            .validate()
            .is_ok());
    }

    #[test]
    fn validate_encodable_values() {
        assert!(Jsonb::new(json!({"a": [1, 2, {"b": null}]})).validate().is_ok());
        assert!(Jsonb::new(Owner::default()).validate().is_ok());
    }

    #[test]
    fn validate_rejects_unencodable_value() {
        let err = Jsonb::new(LiveChannel).validate().unwrap_err();
        assert!(matches!(err, JsonbError::Encode(_)));
        assert!(err.to_string().contains("channels cannot be encoded"));
    }

    #[test]
    fn validate_rejects_non_string_map_keys() {
        let mut map: HashMap<Vec<u8>, i32> = HashMap::new();
        map.insert(vec![1, 2], 3);
        assert!(Jsonb::new(map).validate().is_err());
    }

    #[test]
    fn serialization_is_transparent() {
        let owner = Owner {
            id: "42".into(),
            name: "Ada".into(),
        };
        let boxed = serde_json::to_value(Jsonb::new(owner.clone())).unwrap();
        assert_eq!(boxed, serde_json::to_value(owner).unwrap());
    }

    #[test]
    fn null_decodes_to_zero_value() {
        let v: Jsonb<HashMap<String, String>> = serde_json::from_str("null").unwrap();
        assert!(v.is_empty());
        let o: Jsonb<Owner> = serde_json::from_str("null").unwrap();
        assert_eq!(o.data, Owner::default());
    }

    #[test]
    fn column_round_trip() {
        let tags: Jsonb<Vec<HashMap<String, String>>> =
            Jsonb::new(vec![[("env".to_string(), "prod".to_string())].into()]);
        let bytes = tags.to_column().unwrap();
        let back = Jsonb::<Vec<HashMap<String, String>>>::from_column(Some(&bytes)).unwrap();
        assert_eq!(back, tags);
    }

    #[test]
    fn null_column_is_zero_value() {
        let v = Jsonb::<HashMap<String, String>>::from_column(None).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn garbage_column_is_decode_error() {
        let err = Jsonb::<Owner>::from_column(Some(b"{not json")).unwrap_err();
        assert!(matches!(err, JsonbError::Decode(_)));
    }

    #[test]
    fn sql_type() {
        assert_eq!(Jsonb::<Owner>::SQL_TYPE, "jsonb");
    }
}
