use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::Device;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Keys {
    One(Key),
    Many(Vec<Key>),
}

impl Keys {
    pub fn into_vec(self) -> Vec<Key> {
        match self {
            Keys::One(key) => vec![key],
            Keys::Many(keys) => keys,
        }
    }
}

impl From<&str> for Keys {
    fn from(name: &str) -> Self {
        Keys::One(Key::from(name))
    }
}

impl From<String> for Keys {
    fn from(name: String) -> Self {
        Keys::One(Key::from(name))
    }
}

impl From<Key> for Keys {
    fn from(key: Key) -> Self {
        Keys::One(key)
    }
}

impl<const N: usize> From<[&str; N]> for Keys {
    fn from(names: [&str; N]) -> Self {
        Keys::Many(names.into_iter().map(Key::from).collect())
    }
}

impl From<Vec<Key>> for Keys {
    fn from(keys: Vec<Key>) -> Self {
        Keys::Many(keys)
    }
}

impl From<Vec<&str>> for Keys {
    fn from(names: Vec<&str>) -> Self {
        Keys::Many(names.into_iter().map(Key::from).collect())
    }
}

/// Normalized bindings of one action: device to key list, in insertion order.
///
/// Iteration order decides which binding `find` reports first. A device that is
/// inserted again keeps its original position and takes the new keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    entries: Vec<(Device, Vec<Key>)>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: Device, keys: impl Into<Keys>) {
        let keys = keys.into().into_vec();
        match self.entries.iter_mut().find(|(existing, _)| *existing == device) {
            Some((_, slot)) => *slot = keys,
            None => self.entries.push((device, keys)),
        }
    }

    pub fn keys(&self, device: Device) -> Option<&[Key]> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == device)
            .map(|(_, keys)| keys.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Device, &[Key])> + '_ {
        self.entries
            .iter()
            .map(|(device, keys)| (*device, keys.as_slice()))
    }

    pub fn device_count(&self) -> usize {
        self.entries.len()
    }

    pub fn binding_count(&self) -> usize {
        self.entries.iter().map(|(_, keys)| keys.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Keys>> FromIterator<(Device, K)> for BindingTable {
    fn from_iter<I: IntoIterator<Item = (Device, K)>>(iter: I) -> Self {
        let mut table = BindingTable::new();
        for (device, keys) in iter {
            table.insert(device, keys);
        }
        table
    }
}

pub fn normalize<I, K>(map: I) -> BindingTable
where
    I: IntoIterator<Item = (Device, K)>,
    K: Into<Keys>,
{
    map.into_iter().collect()
}

impl<'de> Deserialize<'de> for BindingTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(BindingTableVisitor)
    }
}

struct BindingTableVisitor;

impl<'de> Visitor<'de> for BindingTableVisitor {
    type Value = BindingTable;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map from input device to a key or a list of keys")
    }

    // Walks the map by hand so device order follows the document.
    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = BindingTable::new();
        while let Some(name) = access.next_key::<String>()? {
            let device = name.parse::<Device>().map_err(de::Error::custom)?;
            let keys = access.next_value::<Keys>()?;
            table.insert(device, keys);
        }
        Ok(table)
    }
}

/// Builds the raw `(Device, Keys)` list accepted by [`Controls::define`](crate::Controls::define).
///
/// ```
/// let raw = maw::bindings! { Keyboard => "space", ControllerOne => ["a", "b"] };
/// assert_eq!(maw::normalize(raw).binding_count(), 3);
/// ```
#[macro_export]
macro_rules! bindings {
    ($($device:ident => $keys:expr),* $(,)?) => {
        ::std::vec![$(($crate::Device::$device, $crate::Keys::from($keys))),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_single_keys() {
        let table = normalize([(Device::Keyboard, Keys::from("w"))]);
        assert_eq!(table.keys(Device::Keyboard), Some(&[Key::from("w")][..]));
    }

    #[test]
    fn normalize_keeps_key_lists_and_duplicates() {
        let table = normalize([(Device::ControllerOne, Keys::from(["a", "b", "a"]))]);
        let keys = table.keys(Device::ControllerOne).expect("keys");
        assert_eq!(keys.len(), 3);
        assert_eq!(table.binding_count(), 3);
    }

    #[test]
    fn reinserting_a_device_replaces_keys_in_place() {
        let mut table = normalize(crate::bindings! {
            Keyboard => "w",
            Mouse => "click",
        });
        table.insert(Device::Keyboard, ["up", "w"]);

        let devices = table.iter().map(|(device, _)| device).collect::<Vec<_>>();
        assert_eq!(devices, vec![Device::Keyboard, Device::Mouse]);
        assert_eq!(table.keys(Device::Keyboard).map(<[Key]>::len), Some(2));
    }

    #[test]
    fn absent_device_has_no_keys() {
        let table = normalize(crate::bindings! { Keyboard => "w" });
        assert_eq!(table.keys(Device::Mouse), None);
    }

    #[test]
    fn empty_key_list_is_kept_as_an_empty_entry() {
        let table = normalize([(Device::Keyboard, Keys::from(Vec::<Key>::new()))]);
        assert_eq!(table.device_count(), 1);
        assert_eq!(table.binding_count(), 0);
        assert!(!table.is_empty());
    }

    #[test]
    fn deserialize_preserves_document_order() {
        let table: BindingTable = serde_json::from_str(
            r#"{ "mouse": "click", "keyboard": ["space", "w"], "controller_one": "a" }"#,
        )
        .expect("table");

        let devices = table.iter().map(|(device, _)| device).collect::<Vec<_>>();
        assert_eq!(
            devices,
            vec![Device::Mouse, Device::Keyboard, Device::ControllerOne]
        );
        assert_eq!(table.keys(Device::Keyboard).map(<[Key]>::len), Some(2));
    }

    #[test]
    fn deserialize_rejects_unknown_device() {
        let error = serde_json::from_str::<BindingTable>(r#"{ "joystick": "a" }"#)
            .expect_err("should reject");
        assert!(error.to_string().contains("unknown input device 'joystick'"));
    }
}
