use alloc::alloc::handle_alloc_error;
use core::alloc::Layout;
use core::fmt::Debug;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

/// Percentage of slots that may be occupied before the table doubles.
pub const LOAD_FACTOR: usize = 80;

/// Number of slots in a freshly constructed table.
pub const INITIAL_CAPACITY: usize = 128;

/// Stored hash value marking an empty slot. Real hashes of zero are remapped
/// by [`nonzero_hash`] so this value never identifies an element.
const EMPTY: u64 = 0;

#[inline(always)]
fn grow_threshold(slots: usize) -> usize {
    ((slots as u128 * LOAD_FACTOR as u128) / 100) as usize
}

/// Remaps a hash of zero to one so that zero stays reserved for empty slots.
#[inline(always)]
fn nonzero_hash(hash: u64) -> u64 {
    hash | (hash == EMPTY) as u64
}

#[inline(always)]
fn home_index(hash: u64, mask: usize) -> usize {
    hash as usize & mask
}

/// Distance of slot `index` from the home index of `hash`, following forward
/// probing with wraparound.
#[inline(always)]
fn probe_distance(hash: u64, index: usize, mask: usize) -> usize {
    index.wrapping_sub(home_index(hash, mask)) & mask
}

/// Smallest slot count at or above [`INITIAL_CAPACITY`] that holds `required`
/// elements without reaching the growth threshold.
fn slots_for(required: usize) -> usize {
    let mut slots = INITIAL_CAPACITY;
    while grow_threshold(slots) <= required {
        slots = slots.checked_mul(2).expect("capacity overflow");
    }
    slots
}

#[derive(Debug)]
struct DataLayout {
    layout: Layout,
    values_offset: usize,
}

impl DataLayout {
    fn new<V>(slots: usize) -> Self {
        let hashes_layout = Layout::array::<u64>(slots).expect("allocation size overflow");
        let values_layout =
            Layout::array::<MaybeUninit<V>>(slots).expect("allocation size overflow");

        let (layout, values_offset) = hashes_layout
            .extend(values_layout)
            .expect("allocation size overflow");

        DataLayout {
            layout: layout.pad_to_align(),
            values_offset,
        }
    }

    /// Allocates storage for `slots` slots with every hash set to [`EMPTY`].
    fn allocate(&self, slots: usize) -> NonNull<u8> {
        debug_assert!(self.layout.size() != 0);
        // SAFETY: The layout always contains at least `slots` u64 hashes and
        // `slots` is never zero, so its size is non-zero. Null returns are
        // routed to `handle_alloc_error`. The hashes occupy the first
        // `slots * 8` bytes, which we zero so every slot starts out empty.
        unsafe {
            let raw_alloc = alloc::alloc::alloc(self.layout);
            if raw_alloc.is_null() {
                handle_alloc_error(self.layout);
            }

            core::ptr::write_bytes(raw_alloc.cast::<u64>(), 0x0, slots);

            NonNull::new_unchecked(raw_alloc)
        }
    }
}

/// Statistics describing the shape of a [`RobinHoodTable`].
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Total number of slots allocated
    pub slots: usize,
    /// Number of elements the table accepts before doubling
    pub threshold: usize,
    /// Load factor (populated / slots)
    pub load_factor: f64,
    /// Largest probe distance of any element
    pub max_probe_distance: usize,
    /// Mean probe distance over all elements
    pub mean_probe_distance: f64,
    /// Total memory in bytes used by the table
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Robin Hood Table Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% load factor, grows at {})",
            self.populated,
            self.slots,
            self.load_factor * 100.0,
            self.threshold
        );
        println!(
            "Probe distance: max {}, mean {:.3}",
            self.max_probe_distance, self.mean_probe_distance
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// Count of elements at each probe distance.
///
/// `bins[d]` is the number of elements sitting `d` slots past their home
/// index.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    /// Element counts indexed by probe distance.
    pub bins: alloc::vec::Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Total number of elements counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = *self.bins.iter().max().unwrap_or(&0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.total());
        for (distance, &count) in self.bins.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", distance, "█".repeat(width), count);
        }
    }
}

/// An open-addressing hash table using Robin Hood displacement.
///
/// `RobinHoodTable<V>` stores values of type `V` in a power-of-two array of
/// `(hash, value)` slots. Callers provide the hash and an equality predicate
/// for each operation, which lets the typed collections built on top choose
/// their own hashing.
///
/// Elements are kept in linear-probing order with the Robin Hood rule: an
/// element being inserted takes over the slot of any resident that sits
/// closer to its own home index, and the resident continues probing instead.
/// Removal shifts the displaced tail of a run back by one slot, so no
/// tombstones are ever left behind.
///
/// The table holds at least [`INITIAL_CAPACITY`] slots and doubles once
/// [`LOAD_FACTOR`] percent of them would be occupied. It never shrinks.
///
/// ## Example
///
/// ```rust
/// use rh_set::hash_table::RobinHoodTable;
///
/// let mut table = RobinHoodTable::new();
/// table.insert_unique(7, "seven");
///
/// assert_eq!(table.find(7, |&v| v == "seven"), Some(&"seven"));
/// assert_eq!(table.remove(7, |&v| v == "seven"), Some("seven"));
/// assert!(table.is_empty());
/// ```
pub struct RobinHoodTable<V> {
    layout: DataLayout,
    alloc: NonNull<u8>,

    populated: usize,
    mask: usize,

    _phantom: core::marker::PhantomData<V>,
}

// SAFETY: The table owns its values exactly like `Vec<V>` does; the raw
// allocation is never shared between tables.
unsafe impl<V: Send> Send for RobinHoodTable<V> {}
// SAFETY: Shared references only permit reads of initialized slots.
unsafe impl<V: Sync> Sync for RobinHoodTable<V> {}

impl<V: Debug> Debug for RobinHoodTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Slot<'a, V> {
            index: usize,
            hash: u64,
            distance: usize,
            value: &'a V,
        }

        impl<V: Debug> Debug for Slot<'_, V> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(
                    f,
                    "[{:>4}] {:016x} +{} {:?}",
                    self.index, self.hash, self.distance, self.value
                )
            }
        }

        let mask = self.mask;
        let values = self.values();
        let slots = self
            .hashes()
            .iter()
            .enumerate()
            .filter(|(_, hash)| **hash != EMPTY)
            .map(|(index, &hash)| Slot {
                index,
                hash,
                distance: probe_distance(hash, index, mask),
                // SAFETY: The slot is occupied, so its value is initialized.
                value: unsafe { values[index].assume_init_ref() },
            });

        f.debug_struct("RobinHoodTable")
            .field("populated", &self.populated)
            .field("slots", &self.slots())
            .field("occupied", &DebugList(slots))
            .finish()
    }
}

struct DebugList<I>(I);

impl<I> Debug for DebugList<I>
where
    I: Iterator + Clone,
    I::Item: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

impl<V> Clone for RobinHoodTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut new_table = Self::with_slots(self.slots());

        let (dst_hashes, dst_values) = new_table.slots_mut();
        let mut cloned = 0;
        for (index, &hash) in self.hashes().iter().enumerate() {
            if hash == EMPTY {
                continue;
            }

            // SAFETY: The source slot is occupied, so its value is initialized.
            let value = unsafe { self.values()[index].assume_init_ref().clone() };
            // The value is written before its hash so that a panicking `clone`
            // leaves the new table dropping only what it actually holds.
            dst_values[index] = MaybeUninit::new(value);
            dst_hashes[index] = hash;
            cloned += 1;
        }
        new_table.populated = cloned;

        debug_assert_eq!(new_table.populated, self.populated);
        new_table
    }
}

impl<V> Drop for RobinHoodTable<V> {
    fn drop(&mut self) {
        self.drop_values();

        // SAFETY: `alloc` was produced by `DataLayout::allocate` with exactly
        // this layout and has not been freed.
        unsafe {
            alloc::alloc::dealloc(self.alloc.as_ptr(), self.layout.layout);
        }
    }
}

impl<V> Default for RobinHoodTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RobinHoodTable<V> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_slots(INITIAL_CAPACITY)
    }

    /// Creates an empty table that can hold at least `capacity` elements
    /// without growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_set::hash_table::RobinHoodTable;
    /// #
    /// let table: RobinHoodTable<u32> = RobinHoodTable::with_capacity(1000);
    /// assert_eq!(table.capacity(), 2048);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_slots(slots_for(capacity))
    }

    fn with_slots(slots: usize) -> Self {
        debug_assert!(slots.is_power_of_two());

        let layout = DataLayout::new::<V>(slots);
        let alloc = layout.allocate(slots);

        Self {
            layout,
            alloc,
            populated: 0,
            mask: slots - 1,
            _phantom: core::marker::PhantomData,
        }
    }

    #[inline(always)]
    fn slots(&self) -> usize {
        self.mask + 1
    }

    #[inline(always)]
    fn hashes(&self) -> &[u64] {
        // SAFETY: The allocation starts with `slots` hashes, all of which are
        // initialized at allocation time.
        unsafe { core::slice::from_raw_parts(self.alloc.as_ptr().cast::<u64>(), self.slots()) }
    }

    #[inline(always)]
    fn values(&self) -> &[MaybeUninit<V>] {
        // SAFETY: The value array lives at `values_offset` and holds `slots`
        // entries. `MaybeUninit` makes no claim about initialization.
        unsafe {
            core::slice::from_raw_parts(
                self.alloc.add(self.layout.values_offset).as_ptr().cast(),
                self.slots(),
            )
        }
    }

    /// Borrows the hash array and the value array mutably at the same time.
    #[inline(always)]
    fn slots_mut(&mut self) -> (&mut [u64], &mut [MaybeUninit<V>]) {
        let slots = self.slots();
        // SAFETY: The two arrays occupy disjoint regions of the allocation, so
        // handing out both mutable slices at once does not alias.
        unsafe {
            (
                core::slice::from_raw_parts_mut(self.alloc.as_ptr().cast::<u64>(), slots),
                core::slice::from_raw_parts_mut(
                    self.alloc.add(self.layout.values_offset).as_ptr().cast(),
                    slots,
                ),
            )
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots in the backing store.
    ///
    /// This is always a power of two. The table grows once inserting another
    /// element would bring occupancy to [`LOAD_FACTOR`] percent of it.
    pub fn capacity(&self) -> usize {
        self.slots()
    }

    /// Returns an iterator over all values in storage order.
    ///
    /// The order follows slot indexes and changes whenever the table grows;
    /// it carries no meaning beyond that.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            index: 0,
            remaining: self.populated,
        }
    }

    /// Removes all elements, keeping the allocated slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_set::hash_table::RobinHoodTable;
    /// #
    /// let mut table = RobinHoodTable::new();
    /// table.insert_unique(1, 1);
    /// table.insert_unique(2, 2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 128);
    /// ```
    pub fn clear(&mut self) {
        self.drop_values();
        self.slots_mut().0.fill(EMPTY);
        self.populated = 0;
    }

    fn drop_values(&mut self) {
        if !core::mem::needs_drop::<V>() {
            return;
        }

        let (hashes, values) = self.slots_mut();
        for (hash, value) in hashes.iter().zip(values.iter_mut()) {
            if *hash != EMPTY {
                // SAFETY: Occupied slots hold initialized values, and each is
                // dropped once before its slot is marked empty or freed.
                unsafe { value.assume_init_drop() };
            }
        }
    }

    /// Reserves room for at least `additional` more elements without growing.
    pub fn reserve(&mut self, additional: usize) {
        let required = self
            .populated
            .checked_add(additional)
            .expect("capacity overflow");
        if required >= grow_threshold(self.slots()) {
            self.resize(slots_for(required));
        }
    }

    /// Returns a reference to the value matching `hash` and `eq`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_set::hash_table::RobinHoodTable;
    /// #
    /// let mut table = RobinHoodTable::new();
    /// table.insert_unique(42, (42, "answer"));
    ///
    /// assert_eq!(table.find(42, |&(k, _)| k == 42), Some(&(42, "answer")));
    /// assert_eq!(table.find(43, |&(k, _)| k == 43), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = self.find_index(nonzero_hash(hash), eq)?;
        // SAFETY: `find_index` only returns occupied slots.
        Some(unsafe { self.values()[index].assume_init_ref() })
    }

    /// Probes for `hash`, stopping early once the walked distance exceeds the
    /// distance of the resident under the cursor.
    ///
    /// `hash` must already be passed through [`nonzero_hash`].
    #[inline]
    fn find_index(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        let mask = self.mask;
        let hashes = self.hashes();
        let values = self.values();

        let mut index = home_index(hash, mask);
        let mut distance = 0;
        loop {
            let resident = hashes[index];
            if resident == EMPTY || distance > probe_distance(resident, index, mask) {
                return None;
            }

            // SAFETY: The resident hash is non-empty, so the slot is occupied.
            if resident == hash && eq(unsafe { values[index].assume_init_ref() }) {
                return Some(index);
            }

            index = (index + 1) & mask;
            distance += 1;
            debug_assert!(distance <= self.slots(), "probe wrapped the whole table");
        }
    }

    /// Inserts `value` without checking for an equal element.
    ///
    /// The caller must guarantee that no value matching `value` is already
    /// stored; otherwise both copies are kept. Grows the table first if the
    /// new element would reach the load-factor threshold.
    ///
    /// Returns a reference to the inserted value.
    pub fn insert_unique(&mut self, hash: u64, value: V) -> &mut V {
        VacantEntry {
            table: self,
            hash: nonzero_hash(hash),
        }
        .insert(value)
    }

    /// Gets the entry for the value matching `hash` and `eq`.
    ///
    /// Looking up an entry never grows the table; growth happens only when a
    /// [`VacantEntry`] is actually filled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_set::hash_table::Entry;
    /// # use rh_set::hash_table::RobinHoodTable;
    /// #
    /// let mut table: RobinHoodTable<(u32, &str)> = RobinHoodTable::new();
    ///
    /// match table.entry(9, |&(k, _)| k == 9) {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert((9, "nine"));
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// let (_, name) = table.entry(9, |&(k, _)| k == 9).or_insert((9, "other"));
    /// assert_eq!(*name, "nine");
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        let hash = nonzero_hash(hash);
        match self.find_index(hash, eq) {
            Some(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Walks forward from the home index of `hash`, swapping the carried
    /// element into any slot whose resident is closer to home, until an empty
    /// slot takes whatever is being carried at that point.
    ///
    /// Returns the index where `value` itself ended up. Does not touch
    /// `populated`, and relies on at least one slot being empty.
    fn place(&mut self, mut hash: u64, value: V) -> usize {
        debug_assert_ne!(hash, EMPTY);
        debug_assert!(self.populated < self.slots());

        let mask = self.mask;
        let (hashes, values) = self.slots_mut();

        let mut carried = MaybeUninit::new(value);
        let mut index = home_index(hash, mask);
        let mut distance = 0;
        let mut landed = None;
        loop {
            let resident = hashes[index];
            if resident == EMPTY {
                hashes[index] = hash;
                values[index] = carried;
                return landed.unwrap_or(index);
            }

            let resident_distance = probe_distance(resident, index, mask);
            if resident_distance < distance {
                core::mem::swap(&mut hashes[index], &mut hash);
                core::mem::swap(&mut values[index], &mut carried);
                if landed.is_none() {
                    landed = Some(index);
                }
                distance = resident_distance;
            }

            index = (index + 1) & mask;
            distance += 1;
        }
    }

    /// Removes and returns the value matching `hash` and `eq`.
    ///
    /// The displaced elements following the removed one are shifted back by
    /// one slot, up to the first empty slot or the first element already at
    /// its home index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_set::hash_table::RobinHoodTable;
    /// #
    /// let mut table = RobinHoodTable::new();
    /// table.insert_unique(3, 'a');
    /// table.insert_unique(3, 'b');
    ///
    /// assert_eq!(table.remove(3, |&c| c == 'a'), Some('a'));
    /// assert_eq!(table.remove(3, |&c| c == 'a'), None);
    /// assert_eq!(table.find(3, |&c| c == 'b'), Some(&'b'));
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.find_index(nonzero_hash(hash), eq)?;
        Some(self.remove_at(index))
    }

    /// Moves the value out of the occupied slot `index` and closes the gap.
    fn remove_at(&mut self, index: usize) -> V {
        let mask = self.mask;
        let (hashes, values) = self.slots_mut();
        debug_assert_ne!(hashes[index], EMPTY);

        // SAFETY: Callers only pass occupied slots. The slot is treated as
        // uninitialized from here on: it is either overwritten by a shifted
        // element or marked empty below.
        let removed = unsafe { values[index].assume_init_read() };

        let mut gap = index;
        let mut next = (index + 1) & mask;
        loop {
            let hash = hashes[next];
            if hash == EMPTY || probe_distance(hash, next, mask) == 0 {
                break;
            }

            hashes[gap] = hash;
            values.swap(gap, next);
            gap = next;
            next = (next + 1) & mask;
        }
        hashes[gap] = EMPTY;

        self.populated -= 1;
        removed
    }

    #[inline(always)]
    fn maybe_grow(&mut self) {
        if self.populated + 1 >= grow_threshold(self.slots()) {
            self.grow();
        }
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        let slots = self.slots().checked_mul(2).expect("capacity overflow");
        self.resize(slots);
    }

    /// Moves every element into a freshly allocated store of `slots` slots.
    fn resize(&mut self, slots: usize) {
        debug_assert!(slots.is_power_of_two());
        debug_assert!(slots > self.slots());

        let old_slots = self.slots();
        let new_layout = DataLayout::new::<V>(slots);
        let new_alloc = new_layout.allocate(slots);
        let old_layout = core::mem::replace(&mut self.layout, new_layout);
        let old_alloc = core::mem::replace(&mut self.alloc, new_alloc);
        self.mask = slots - 1;

        // SAFETY: The old allocation stays valid until the dealloc below and
        // uses `old_layout`, so both arrays are in bounds. Each occupied value
        // is read exactly once and moved into the new store; the old memory is
        // then released without running destructors on the moved-out values.
        unsafe {
            let old_hashes: &[u64] =
                core::slice::from_raw_parts(old_alloc.as_ptr().cast(), old_slots);
            let old_values: &[MaybeUninit<V>] = core::slice::from_raw_parts(
                old_alloc.add(old_layout.values_offset).as_ptr().cast(),
                old_slots,
            );

            for (hash, value) in old_hashes.iter().zip(old_values) {
                if *hash != EMPTY {
                    self.place(*hash, value.assume_init_read());
                }
            }

            alloc::alloc::dealloc(old_alloc.as_ptr(), old_layout.layout);
        }
    }

    /// Computes how many elements sit at each probe distance.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mut bins = alloc::vec::Vec::new();
        for (index, &hash) in self.hashes().iter().enumerate() {
            if hash == EMPTY {
                continue;
            }

            let distance = probe_distance(hash, index, self.mask);
            if bins.len() <= distance {
                bins.resize(distance + 1, 0);
            }
            bins[distance] += 1;
        }

        ProbeHistogram { bins }
    }

    /// Returns occupancy and probe-length statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let histogram = self.probe_histogram();
        let total_distance: usize = histogram
            .bins
            .iter()
            .enumerate()
            .map(|(distance, count)| distance * count)
            .sum();

        DebugStats {
            populated: self.populated,
            slots: self.slots(),
            threshold: grow_threshold(self.slots()),
            load_factor: self.populated as f64 / self.slots() as f64,
            max_probe_distance: histogram.bins.len().saturating_sub(1),
            mean_probe_distance: if self.populated == 0 {
                0.0
            } else {
                total_distance as f64 / self.populated as f64
            },
            total_bytes: self.layout.layout.size(),
        }
    }
}

/// A view into a single entry in the table, which may be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`RobinHoodTable`].
///
/// [`entry`]: RobinHoodTable::entry
pub enum Entry<'a, V> {
    /// A matching value is stored in the table.
    Occupied(OccupiedEntry<'a, V>),
    /// No matching value is stored in the table.
    Vacant(VacantEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Returns the stored value, inserting `default` first if the entry is
    /// vacant.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Returns the stored value, inserting the result of `default` first if
    /// the entry is vacant.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }
}

/// A view into a vacant entry of a [`RobinHoodTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut RobinHoodTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts `value` under the entry's hash and returns a reference to it.
    ///
    /// Grows the table first if the new element would reach the load-factor
    /// threshold.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        table.maybe_grow();
        let index = table.place(self.hash, value);
        table.populated += 1;

        // SAFETY: `place` returns the slot it wrote `value` into.
        unsafe { table.slots_mut().1[index].assume_init_mut() }
    }
}

/// A view into an occupied entry of a [`RobinHoodTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut RobinHoodTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Returns a reference to the stored value.
    pub fn get(&self) -> &V {
        // SAFETY: An occupied entry always points at an occupied slot.
        unsafe { self.table.values()[self.index].assume_init_ref() }
    }

    /// Returns a mutable reference to the stored value.
    ///
    /// The value must keep the hash it was inserted under.
    pub fn get_mut(&mut self) -> &mut V {
        // SAFETY: An occupied entry always points at an occupied slot.
        unsafe { self.table.slots_mut().1[self.index].assume_init_mut() }
    }

    /// Converts the entry into a mutable reference tied to the table.
    pub fn into_mut(self) -> &'a mut V {
        let table = self.table;
        // SAFETY: An occupied entry always points at an occupied slot.
        unsafe { table.slots_mut().1[self.index].assume_init_mut() }
    }

    /// Removes the value from the table and returns it.
    pub fn remove(self) -> V {
        self.table.remove_at(self.index)
    }
}

/// An iterator over the values of a [`RobinHoodTable`] in storage order.
pub struct Iter<'a, V> {
    table: &'a RobinHoodTable<V>,
    index: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let hashes = self.table.hashes();
        while hashes[self.index] == EMPTY {
            self.index += 1;
        }

        let index = self.index;
        self.index += 1;
        self.remaining -= 1;
        // SAFETY: The slot is occupied, so its value is initialized.
        Some(unsafe { self.table.values()[index].assume_init_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            table: self.table,
            index: self.index,
            remaining: self.remaining,
        }
    }
}
