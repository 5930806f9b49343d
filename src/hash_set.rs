use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::hash_table::Entry;
use crate::hash_table::RobinHoodTable;

/// A hash set implemented using the Robin Hood table as the underlying
/// storage.
///
/// `RobinHoodSet<T, S>` stores values of type `T` where `T` implements
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash values.
/// Values live in a single power-of-two array of slots; collisions are
/// resolved by linear probing with Robin Hood displacement, and removals
/// compact the probe run instead of leaving tombstones.
///
/// The set starts with 128 slots and doubles whenever an insertion would
/// bring occupancy to 80%. It never shrinks.
///
/// The set is a plain owned container. Sharing one across threads requires
/// external synchronization, and growth moves every element, so no reference
/// into the set survives an insertion.
///
/// # Performance Characteristics
///
/// - **Memory**: one u64 hash per slot, plus the size of `T`.
#[derive(Clone)]
pub struct RobinHoodSet<T, S = DefaultHashBuilder> {
    table: RobinHoodTable<T>,
    hash_builder: S,
}

impl<T, S> PartialEq for RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for RobinHoodSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.table.iter()).finish()
    }
}

impl<T, S> RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new, empty set with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::hash::RandomState;
    ///
    /// use rh_set::RobinHoodSet;
    ///
    /// let set: RobinHoodSet<i32, _> = RobinHoodSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 128);
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: RobinHoodTable::new(),
            hash_builder,
        }
    }

    /// Creates a new set that can hold at least `capacity` elements without
    /// growing, using the given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: RobinHoodTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Hashes `value` with the set's hasher builder.
    ///
    /// The table remaps a hash of zero, which marks empty slots, so any
    /// builder output is acceptable here.
    #[inline]
    fn make_hash(&self, value: &T) -> u64 {
        self.hash_builder.hash_one(value)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_set::RobinHoodSet;
    ///
    /// let mut set: RobinHoodSet<i32> = RobinHoodSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots backing the set.
    ///
    /// This is a power of two, at least 128, and the set grows once an
    /// insertion would fill 80% of it.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements from the set.
    ///
    /// This operation preserves the set's allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_set::RobinHoodSet;
    ///
    /// let mut set: RobinHoodSet<u32> = RobinHoodSet::new();
    /// set.reserve(500);
    /// let capacity = set.capacity();
    ///
    /// set.extend(0..500);
    /// assert_eq!(set.capacity(), capacity);
    /// # }
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain this value, `true` is returned.
    /// - If the set already contained this value, `false` is returned, the set
    ///   is left untouched and `value` is dropped.
    ///
    /// Inserting a value that is already present never grows the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_set::RobinHoodSet;
    ///
    /// let mut set: RobinHoodSet<i32> = RobinHoodSet::new();
    /// assert_eq!(set.insert(37), true);
    /// assert_eq!(set.insert(37), false);
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.make_hash(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Returns `true` if the set contains a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_set::RobinHoodSet;
    ///
    /// let mut set: RobinHoodSet<i32> = RobinHoodSet::new();
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// # }
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the stored value equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.make_hash(value);
        self.table.find(hash, |v| v == value)
    }

    /// Returns the stored value equal to `value`, inserting `value` first if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_set::RobinHoodSet;
    ///
    /// let mut set: RobinHoodSet<String> = RobinHoodSet::new();
    /// assert_eq!(set.get_or_insert("tick".to_string()), "tick");
    /// assert_eq!(set.get_or_insert("tick".to_string()), "tick");
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn get_or_insert(&mut self, value: T) -> &T {
        let hash = self.make_hash(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(value),
        }
    }

    /// Removes a value from the set. Returns whether the value was
    /// present in the set.
    ///
    /// The elements displaced behind the removed one are shifted back into
    /// the freed slot, so later lookups never probe further than before.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_set::RobinHoodSet;
    ///
    /// let mut set: RobinHoodSet<i32> = RobinHoodSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), true);
    /// assert_eq!(set.remove(&1), false);
    /// # }
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to the
    /// given one.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.make_hash(value);
        self.table.remove(hash, |v| v == value)
    }

    /// An iterator visiting all elements in storage order.
    ///
    /// The order is that of the underlying slots and changes whenever the set
    /// grows. Callers must not depend on it.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Prints every element, one per line, in storage order.
    ///
    /// Intended for debugging only; the output order is not stable.
    #[cfg(feature = "std")]
    pub fn print(&self)
    where
        T: core::fmt::Display,
    {
        for value in self.iter() {
            println!("{value}");
        }
    }

    /// Computes how many elements sit at each probe distance.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::hash_table::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Returns occupancy and probe-length statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<T, S> RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new, empty set with 128 slots using the default hasher
    /// builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_set::RobinHoodSet;
    ///
    /// let set: RobinHoodSet<i32> = RobinHoodSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 128);
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new set that can hold at least `capacity` elements without
    /// growing, using the default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the values of a `RobinHoodSet`.
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T, S> IntoIterator for &'a RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RobinHoodSet::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for RobinHoodSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
