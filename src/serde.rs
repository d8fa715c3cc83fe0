#![cfg(feature = "serde")]
#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

use core::fmt::{self, Formatter};
use core::marker::PhantomData;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::seq_map::SeqMap;

impl<K, V> Serialize for SeqMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct SeqMapVisitor<K, V> {
    marker: PhantomData<SeqMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for SeqMapVisitor<K, V>
where
    K: Deserialize<'de> + Clone + Ord,
    V: Deserialize<'de>,
{
    type Value = SeqMap<K, V>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut output = SeqMap::new();
        // Duplicate keys overwrite in place, exactly as with repeated `push`.
        while let Some((key, value)) = map.next_entry()? {
            output.push(key, value);
        }
        Ok(output)
    }
}

impl<'de, K, V> Deserialize<'de> for SeqMap<K, V>
where
    K: Deserialize<'de> + Clone + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SeqMapVisitor {
            marker: PhantomData,
        })
    }
}
