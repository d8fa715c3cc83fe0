//! An order-preserving map over a manipulable entry sequence.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::mem;
use core::ops::{Index, IndexMut};

use crate::arena::{Arena, NodeId};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

/// An associative container that maintains a manipulable linear order over
/// its entries, independent of key order.
///
/// `SeqMap` behaves like a hybrid of a doubly linked sequence and a lookup
/// index: entries can be inserted at arbitrary positions, reordered, sorted,
/// reversed, and sliced, while any key still resolves to its value in
/// O(log n). Iteration order is always the sequence order, which is the
/// insertion and manipulation order; it is never re-sorted implicitly.
///
/// Two structures cooperate under the hood: a stable-slot arena that owns the
/// entries and threads them into a doubly linked chain (the sequence), and a
/// key-ordered index mapping each key to its position in that chain. The
/// index holds position handles rather than values, so the two structures
/// always agree on entry identity. Inserting an existing key overwrites its
/// value in place and leaves its sequence position untouched.
///
/// `SeqMap` is single-threaded in spirit: it performs no internal
/// synchronization, and concurrent mutation requires external locking just as
/// with the standard library maps.
///
/// # Examples
///
/// ```rust
/// use seqmap::SeqMap;
///
/// let mut map = SeqMap::new();
/// map.push("a", 1);
/// map.push("b", 2);
/// map.unshift("c", 3);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["c", "a", "b"]);
/// assert_eq!(map.pop(), Some(("b", 2)));
///
/// map.sort_by_key();
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "c"]);
/// ```
#[derive(Clone)]
pub struct SeqMap<K, V> {
    arena: Arena<K, V>,
    index: BTreeMap<K, NodeId>,
}

impl<K, V> SeqMap<K, V> {
    pub const fn new() -> Self {
        SeqMap {
            arena: Arena::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// The first entry in sequence order, or `None` if the map is empty.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.arena.head().map(|id| self.arena.entry(id))
    }

    /// The last entry in sequence order, or `None` if the map is empty.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.arena.tail().map(|id| self.arena.entry(id))
    }

    /// Detaches every entry, restoring the empty map.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
    }

    /// Reverses the sequence order in place. O(n); the index is untouched.
    pub fn reverse(&mut self) {
        self.arena.reverse();
    }

    /// Reorders the sequence in place with the given comparator over entry
    /// pairs. The sort is stable: entries that compare equal keep their prior
    /// relative order. Index references stay valid, since only the sequence
    /// order changes and never entry identity.
    pub fn sort_by<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &V, &K, &V) -> Ordering,
    {
        let mut order = self.arena.order();
        order.sort_by(|&left, &right| {
            let (lk, lv) = self.arena.entry(left);
            let (rk, rv) = self.arena.entry(right);
            f(lk, lv, rk, rv)
        });
        self.arena.relink(&order);
    }

    /// A linear scan of the sequence. Unlike key lookup, value lookup is not
    /// indexed; this asymmetry is intentional.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|entry| entry == value)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena)
    }

    /// Iterates over entries in sequence order with mutable access to values.
    /// Keys are not mutable through any iterator: they participate in the
    /// lookup index.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.arena)
    }

    /// The keys in current sequence order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// The values in current sequence order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }
}

impl<K, V> SeqMap<K, V>
where
    K: Ord,
{
    /// An O(log n) existence check via the key index.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map(|&id| self.arena.entry(id).1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index
            .get(key)
            .copied()
            .map(|id| self.arena.value_mut(id))
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map(|&id| self.arena.entry(id))
    }

    /// A cursor over the entry with the given key, or `None` if absent.
    ///
    /// The cursor addresses the matched entry itself, so `find` followed by
    /// [`Cursor::next`] traverses from the match toward the back of the
    /// sequence.
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map(|&id| Cursor { map: self, id })
    }

    /// The value for the given key, or `V::default()` if the key is absent.
    /// Absence is not an error here; for reference semantics that fail on a
    /// missing key, index with `map[&key]` instead.
    pub fn value_at<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// The batch form of [`value_at`][`SeqMap::value_at`]: one value per
    /// requested key, in request order, each miss yielding an independent
    /// default.
    pub fn values_at<'q, Q, I>(&self, keys: I) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
        V: Clone + Default,
    {
        keys.into_iter().map(|key| self.value_at(key)).collect()
    }

    /// Removes the entry with the given key from both the sequence and the
    /// index. Removing a missing key is a no-op that returns `None`; the
    /// positions of all other entries are unaffected either way.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.index.remove(key)?;
        Some(self.arena.unlink(id))
    }

    /// Removes and returns the front entry, or `None` if the map is empty.
    pub fn shift(&mut self) -> Option<(K, V)> {
        let id = self.arena.head()?;
        let (key, value) = self.arena.unlink(id);
        self.index.remove(&key);
        Some((key, value))
    }

    /// Removes and returns the back entry, or `None` if the map is empty.
    pub fn pop(&mut self) -> Option<(K, V)> {
        let id = self.arena.tail()?;
        let (key, value) = self.arena.unlink(id);
        self.index.remove(&key);
        Some((key, value))
    }

    /// Stably sorts the sequence by key in ascending order.
    pub fn sort_by_key(&mut self) {
        self.sort_by(|lk, _, rk, _| lk.cmp(rk));
    }
}

impl<K, V> SeqMap<K, V>
where
    V: Ord,
{
    /// Stably sorts the sequence by value in ascending order.
    pub fn sort_by_value(&mut self) {
        self.sort_by(|_, lv, _, rv| lv.cmp(rv));
    }
}

impl<K, V> SeqMap<K, V>
where
    K: Clone + Ord,
{
    fn insert_before(&mut self, anchor: Option<NodeId>, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&id) => Some(mem::replace(self.arena.value_mut(id), value)),
            _ => {
                let id = self.arena.link_before(anchor, key.clone(), value);
                self.index.insert(key, id);
                None
            }
        }
    }

    /// Inserts the entry immediately before sequence position `at`, where
    /// `at` equal to the length is the end marker.
    ///
    /// If the key already exists, its value is overwritten in place, its
    /// sequence position and the position hint are both ignored, and the
    /// replaced value is returned. Update-on-duplicate is the defined
    /// semantics, not a failure.
    ///
    /// # Panics
    ///
    /// Panics if the key is new and `at > len()`.
    pub fn insert(&mut self, at: usize, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            return Some(mem::replace(self.arena.value_mut(id), value));
        }
        let anchor = match at.cmp(&self.len()) {
            Ordering::Less => self.arena.nth(at),
            Ordering::Equal => None,
            Ordering::Greater => {
                panic!(
                    "insertion index (is {at}) should be <= len (is {})",
                    self.len(),
                )
            }
        };
        let id = self.arena.link_before(anchor, key.clone(), value);
        self.index.insert(key, id);
        None
    }

    /// Inserts at the back of the sequence, or overwrites in place on a
    /// duplicate key.
    pub fn push(&mut self, key: K, value: V) -> Option<V> {
        self.insert_before(None, key, value)
    }

    /// Inserts at the front of the sequence, or overwrites in place on a
    /// duplicate key.
    pub fn unshift(&mut self, key: K, value: V) -> Option<V> {
        self.insert_before(self.arena.head(), key, value)
    }

    /// Pushes every entry of `other` in its sequence order, so `other`'s
    /// entries land at the back with their relative order preserved.
    pub fn append(&mut self, other: Self) {
        for (key, value) in other {
            self.push(key, value);
        }
    }

    /// Unshifts every entry of `other` in its sequence order. Each entry
    /// lands before the previous front, so `other`'s entries appear at the
    /// front of `self` in reverse.
    pub fn prepend(&mut self, other: Self) {
        for (key, value) in other {
            self.unshift(key, value);
        }
    }

    /// Inserts every entry of `other` immediately before sequence position
    /// `at`, preserving `other`'s relative order. Duplicate keys overwrite in
    /// place per [`insert`][`SeqMap::insert`].
    ///
    /// # Panics
    ///
    /// Panics if `at > len()`.
    pub fn splice(&mut self, at: usize, other: Self) {
        if at > self.len() {
            panic!(
                "insertion index (is {at}) should be <= len (is {})",
                self.len(),
            );
        }
        let anchor = self.arena.nth(at);
        for (key, value) in other {
            self.insert_before(anchor, key, value);
        }
    }
}

impl<K, V> SeqMap<K, V>
where
    K: Clone,
    V: Clone + Ord,
{
    /// A new map with the roles of key and value swapped for every entry,
    /// preserving sequence order.
    ///
    /// Key uniqueness applies to the inverted entries: duplicate values in
    /// `self` collapse with last-insertion-wins semantics, where later
    /// entries overwrite the value of earlier ones that share the new key
    /// (the collapsed entry keeps the earliest position).
    pub fn invert(&self) -> SeqMap<V, K> {
        let mut output = SeqMap::new();
        for (key, value) in self {
            output.push(value.clone(), key.clone());
        }
        output
    }
}

impl<K, V> SeqMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// A single-entry map of the first entry, or an empty map.
    pub fn head(&self) -> Self {
        let mut output = Self::new();
        if let Some((key, value)) = self.front() {
            output.push(key.clone(), value.clone());
        }
        output
    }

    /// A single-entry map of the last entry, or an empty map.
    pub fn last(&self) -> Self {
        let mut output = Self::new();
        if let Some((key, value)) = self.back() {
            output.push(key.clone(), value.clone());
        }
        output
    }

    /// The map without its last entry.
    pub fn lead(&self) -> Self {
        let mut output = self.clone();
        output.pop();
        output
    }

    /// The map without its first entry.
    pub fn tail(&self) -> Self {
        let mut output = self.clone();
        output.shift();
        output
    }

    /// The first and last entries combined, or the whole map if it has fewer
    /// than three entries.
    pub fn edge(&self) -> Self {
        if self.len() < 3 {
            return self.clone();
        }
        let mut output = self.head();
        output.append(self.last());
        output
    }

    /// The map with its first and last entries removed, or an empty map if it
    /// has fewer than three entries.
    pub fn bulk(&self) -> Self {
        if self.len() < 3 {
            return Self::new();
        }
        let mut output = self.clone();
        output.shift();
        output.pop();
        output
    }
}

impl<K, V> Debug for SeqMap<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for SeqMap<K, V> {
    fn default() -> Self {
        SeqMap::new()
    }
}

impl<K, V> Extend<(K, V)> for SeqMap<K, V>
where
    K: Clone + Ord,
{
    fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in items {
            self.push(key, value);
        }
    }
}

impl<'a, K, V> Extend<(&'a K, &'a V)> for SeqMap<K, V>
where
    K: Copy + Ord,
    V: Copy,
{
    fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        self.extend(items.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for SeqMap<K, V>
where
    K: Clone + Ord,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for SeqMap<K, V>
where
    K: Clone + Ord,
{
    fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut output = SeqMap::new();
        output.extend(items);
        output
    }
}

impl<K, V, Q> Index<&Q> for SeqMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is absent. This is the one accessor that treats a
    /// missing key as an error: it promises a live reference, which no
    /// default value can satisfy.
    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("key not found")
    }
}

impl<K, V, Q> IndexMut<&Q> for SeqMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    /// # Panics
    ///
    /// Panics if the key is absent.
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("key not found")
    }
}

impl<K, V> IntoIterator for SeqMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.arena)
    }
}

impl<'a, K, V> IntoIterator for &'a SeqMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut SeqMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> PartialEq for SeqMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for SeqMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> PartialOrd for SeqMap<K, V>
where
    K: PartialOrd,
    V: PartialOrd,
{
    /// Lexicographic comparison over the sequences: each entry is compared as
    /// a `(key, value)` pair and the first differing entry decides, with a
    /// shorter map that is a prefix of the other ordered first.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, V> Ord for SeqMap<K, V>
where
    K: Ord,
    V: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

#[cfg(feature = "arbitrary")]
#[cfg_attr(docsrs, doc(cfg(feature = "arbitrary")))]
impl<'a, K, V> arbitrary::Arbitrary<'a> for SeqMap<K, V>
where
    K: arbitrary::Arbitrary<'a> + Clone + Ord,
    V: arbitrary::Arbitrary<'a>,
{
    fn arbitrary(unstructured: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        unstructured.arbitrary_iter()?.collect()
    }
}

/// A position handle over an entry of a [`SeqMap`], for chained traversal in
/// sequence order.
pub struct Cursor<'a, K, V> {
    map: &'a SeqMap<K, V>,
    id: NodeId,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub fn key(&self) -> &'a K {
        self.map.arena.entry(self.id).0
    }

    pub fn value(&self) -> &'a V {
        self.map.arena.entry(self.id).1
    }

    /// A cursor over the next entry in sequence order, or `None` at the back.
    pub fn next(self) -> Option<Self> {
        self.map.arena.next(self.id).map(|id| Cursor {
            map: self.map,
            id,
        })
    }

    /// A cursor over the previous entry in sequence order, or `None` at the
    /// front.
    pub fn prev(self) -> Option<Self> {
        self.map.arena.prev(self.id).map(|id| Cursor {
            map: self.map,
            id,
        })
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> Debug for Cursor<'_, K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Cursor")
            .field(self.key())
            .field(self.value())
            .finish()
    }
}

/// Constructs a [`SeqMap`] from a sequence of `key => value` entries, in
/// order. Later duplicate keys overwrite the value of earlier ones in place.
#[macro_export]
macro_rules! seqmap {
    () => { $crate::seq_map::SeqMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::seq_map::SeqMap::new();
        $(
            map.push($key, $value);
        )+
        map
    }};
}


#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cmp::Ordering;
    use rstest::rstest;
    #[cfg(feature = "serde")]
    use serde_test::{assert_tokens, Token};

    use crate::seq_map::harness::{self, xs};
    use crate::seq_map::SeqMap;

    fn entries(xs: &SeqMap<u8, char>) -> Vec<(u8, char)> {
        xs.iter().map(|(&key, &value)| (key, value)).collect()
    }

    #[rstest]
    #[case::empty(0)]
    #[case::one(1)]
    #[case::many(4)]
    fn push_distinct_keys_then_keys_eq_push_order(#[case] end: u8) {
        let mut xs = SeqMap::new();
        for x in 0..end {
            assert_eq!(xs.push(x, char::from(b'a' + x)), None);
        }
        assert_eq!(xs.len(), usize::from(end));
        assert_eq!(
            xs.keys().copied().collect::<Vec<_>>(),
            (0..end).collect::<Vec<_>>(),
        );
    }

    #[rstest]
    fn push_existing_key_then_value_updated_and_order_unchanged(mut xs: SeqMap<u8, char>) {
        let keys: Vec<_> = xs.keys().copied().collect();
        let len = xs.len();
        assert_eq!(xs.push(1, 'z'), Some('b'));
        assert_eq!(xs.value_at(&1), 'z');
        assert_eq!(xs.len(), len);
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), keys);
    }

    #[rstest]
    #[case::front(0, [42, 0, 1, 2, 3])]
    #[case::middle(2, [0, 1, 42, 2, 3])]
    #[case::back(4, [0, 1, 2, 3, 42])]
    fn insert_new_key_at_position_then_entry_precedes_position(
        mut xs: SeqMap<u8, char>,
        #[case] at: usize,
        #[case] expected: [u8; 5],
    ) {
        assert_eq!(xs.insert(at, 42, 'z'), None);
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn insert_existing_key_then_position_hint_ignored(mut xs: SeqMap<u8, char>) {
        let keys: Vec<_> = xs.keys().copied().collect();
        assert_eq!(xs.insert(0, 3, 'z'), Some('d'));
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), keys);
        assert_eq!(xs.value_at(&3), 'z');
    }

    #[rstest]
    #[should_panic(expected = "insertion index (is 5) should be <= len (is 4)")]
    fn insert_new_key_out_of_bounds_then_panics(mut xs: SeqMap<u8, char>) {
        xs.insert(5, 42, 'z');
    }

    #[rstest]
    fn remove_key_then_contains_key_is_false(mut xs: SeqMap<u8, char>) {
        assert_eq!(xs.remove(&2), Some((2, 'c')));
        assert!(!xs.contains_key(&2));
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), [0, 1, 3]);
    }

    #[rstest]
    fn remove_missing_key_then_seq_map_unchanged(mut xs: SeqMap<u8, char>) {
        let before = entries(&xs);
        assert_eq!(xs.remove(&42), None);
        assert_eq!(entries(&xs), before);
    }

    #[rstest]
    #[case::empty(harness::xs(0))]
    #[case::one(harness::xs(1))]
    #[case::many(harness::xs(4))]
    fn shift_then_unshift_removed_entry_then_seq_map_unchanged(#[case] xs: SeqMap<u8, char>) {
        let mut ys = xs.clone();
        if let Some((key, value)) = ys.shift() {
            ys.unshift(key, value);
        }
        assert_eq!(ys, xs);
    }

    #[rstest]
    fn clear_then_seq_map_empty_and_reusable(mut xs: SeqMap<u8, char>) {
        xs.clear();
        assert!(xs.is_empty());
        assert!(!xs.contains_key(&0));
        xs.push(7, 'x');
        assert_eq!(entries(&xs), [(7, 'x')]);
    }

    #[test]
    fn push_push_unshift_pop_sort_by_key_then_sequences_eq() {
        let mut xs = SeqMap::new();
        xs.push("a", 1);
        xs.push("b", 2);
        xs.unshift("c", 3);
        let entries: Vec<_> = xs.iter().map(|(&key, &value)| (key, value)).collect();
        assert_eq!(entries, [("c", 3), ("a", 1), ("b", 2)]);
        assert_eq!(xs.pop(), Some(("b", 2)));
        xs.sort_by_key();
        let entries: Vec<_> = xs.iter().map(|(&key, &value)| (key, value)).collect();
        assert_eq!(entries, [("a", 1), ("c", 3)]);
    }

    #[rstest]
    fn sort_by_equal_comparator_then_order_unchanged(mut xs: SeqMap<u8, char>) {
        let before = entries(&xs);
        xs.sort_by(|_, _, _, _| Ordering::Equal);
        assert_eq!(entries(&xs), before);
    }

    #[test]
    fn sort_by_value_then_values_ascending_and_lookup_intact() {
        let mut xs = seqmap! { 0 => 'c', 1 => 'a', 2 => 'b' };
        xs.sort_by_value();
        assert_eq!(entries(&xs), [(1, 'a'), (2, 'b'), (0, 'c')]);
        assert_eq!(xs.value_at(&0), 'c');
    }

    #[rstest]
    fn reverse_then_iteration_order_reversed(mut xs: SeqMap<u8, char>) {
        let mut expected = entries(&xs);
        expected.reverse();
        xs.reverse();
        assert_eq!(entries(&xs), expected);
        assert_eq!(xs.value_at(&0), 'a');
    }

    #[rstest]
    fn invert_invert_with_unique_values_then_seq_map_unchanged(xs: SeqMap<u8, char>) {
        assert_eq!(xs.invert().invert(), xs);
    }

    #[test]
    fn invert_with_duplicate_values_then_last_insertion_wins() {
        let xs = seqmap! { 0u8 => 'x', 1 => 'y', 2 => 'x' };
        let inverted = xs.invert();
        assert_eq!(inverted.len(), 2);
        assert_eq!(inverted.keys().copied().collect::<Vec<_>>(), ['x', 'y']);
        assert_eq!(inverted.value_at(&'x'), 2);
    }

    #[rstest]
    #[case::empty(harness::xs(0))]
    #[case::one(harness::xs(1))]
    #[case::two(harness::xs(2))]
    #[case::many(harness::xs(5))]
    fn recombine_slices_then_seq_map_unchanged(#[case] xs: SeqMap<u8, char>) {
        let mut head_tail = xs.head();
        head_tail.append(xs.tail());
        assert_eq!(head_tail, xs);
        let mut lead_last = xs.lead();
        lead_last.append(xs.last());
        assert_eq!(lead_last, xs);
        let edge = xs.edge();
        let mut output = edge.head();
        output.append(xs.bulk());
        output.append(edge.last());
        assert_eq!(output, xs);
    }

    #[rstest]
    #[case::empty(harness::xs(0))]
    #[case::two(harness::xs(2))]
    fn edge_and_bulk_of_short_seq_map_then_whole_and_empty(#[case] xs: SeqMap<u8, char>) {
        assert_eq!(xs.edge(), xs);
        assert!(xs.bulk().is_empty());
    }

    #[test]
    fn append_then_source_order_preserved_and_duplicates_overwrite_in_place() {
        let mut xs = seqmap! { 0u8 => 'a' };
        xs.append(seqmap! { 1 => 'b', 0 => 'q' });
        assert_eq!(entries(&xs), [(0, 'q'), (1, 'b')]);
    }

    #[test]
    fn prepend_then_source_entries_reversed_at_front() {
        let mut xs = seqmap! { 9u8 => 'z' };
        xs.prepend(seqmap! { 0 => 'a', 1 => 'b' });
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), [1, 0, 9]);
    }

    #[test]
    fn splice_into_middle_then_source_order_preserved() {
        let mut xs = seqmap! { 0u8 => 'a', 1 => 'b' };
        xs.splice(1, seqmap! { 10 => 'x', 11 => 'y' });
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), [0, 10, 11, 1]);
    }

    #[test]
    fn splice_at_end_then_appends() {
        let mut xs = seqmap! { 0u8 => 'a' };
        xs.splice(1, seqmap! { 1 => 'b' });
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn contains_value_scans_sequence() {
        let xs = seqmap! { "x" => 5, "y" => 7 };
        assert!(xs.contains_value(&5));
        assert!(xs.contains_value(&7));
        assert!(!xs.contains_value(&6));
    }

    #[rstest]
    fn values_at_yields_one_value_per_key_in_request_order(xs: SeqMap<u8, char>) {
        assert_eq!(xs.values_at([&3, &42, &0]), ['d', '\0', 'a']);
    }

    #[rstest]
    fn index_with_present_key_then_reference_to_value(mut xs: SeqMap<u8, char>) {
        assert_eq!(xs[&2], 'c');
        xs[&2] = 'z';
        assert_eq!(xs[&2], 'z');
    }

    #[rstest]
    #[should_panic(expected = "key not found")]
    fn index_with_missing_key_then_panics(xs: SeqMap<u8, char>) {
        let _ = xs[&42];
    }

    #[rstest]
    fn find_key_then_cursor_over_matched_entry(xs: SeqMap<u8, char>) {
        let cursor = xs.find(&1).unwrap();
        assert_eq!((*cursor.key(), *cursor.value()), (1, 'b'));
        assert_eq!(*cursor.next().unwrap().key(), 2);
        assert_eq!(*cursor.prev().unwrap().key(), 0);
        assert!(xs.find(&42).is_none());
    }

    #[rstest]
    fn find_front_and_back_then_cursor_stops_at_ends(xs: SeqMap<u8, char>) {
        assert!(xs.find(&0).unwrap().prev().is_none());
        assert!(xs.find(&3).unwrap().next().is_none());
    }

    #[test]
    fn compare_seq_maps_then_first_differing_entry_decides() {
        let xs = seqmap! { "a" => 1, "b" => 2 };
        let ys = seqmap! { "a" => 1, "b" => 3 };
        assert!(xs < ys);
        let prefix = seqmap! { "a" => 1 };
        assert!(prefix < xs);
    }

    #[test]
    fn eq_is_sequence_sensitive() {
        let xs = seqmap! { 0u8 => 'a', 1 => 'b' };
        let mut ys = xs.clone();
        ys.reverse();
        assert_ne!(xs, ys);
        ys.reverse();
        assert_eq!(xs, ys);
    }

    #[rstest]
    fn iterate_forward_and_backward_then_orders_mirror(xs: SeqMap<u8, char>) {
        let forward = entries(&xs);
        let mut backward: Vec<_> = xs.iter().rev().map(|(&key, &value)| (key, value)).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn into_iter_then_entries_in_sequence_order(mut xs: SeqMap<u8, char>) {
        xs.reverse();
        let expected = entries(&xs);
        assert_eq!(xs.into_iter().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn iter_mut_then_values_mutable_in_place(mut xs: SeqMap<u8, char>) {
        for (_, value) in xs.iter_mut() {
            *value = 'z';
        }
        assert!(xs.values().all(|&value| value == 'z'));
        assert_eq!(xs.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 3]);
    }

    #[test]
    fn collect_with_duplicate_keys_then_later_values_overwrite_earlier() {
        let xs: SeqMap<u8, char> = [(0, 'a'), (1, 'b'), (0, 'c')].into_iter().collect();
        assert_eq!(entries(&xs), [(0, 'c'), (1, 'b')]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn de_serialize_seq_map_into_and_from_tokens_eq() {
        let xs = seqmap! { "b" => 1u8, "a" => 2 };
        assert_tokens(
            &xs,
            &[
                Token::Map { len: Some(2) },
                Token::BorrowedStr("b"),
                Token::U8(1),
                Token::BorrowedStr("a"),
                Token::U8(2),
                Token::MapEnd,
            ],
        );
    }
}
