/// An owned position in the shared state vector.
///
/// Slots are handed out by [`SystemModel`](crate::SystemModel) at
/// reservation time and cannot be constructed otherwise. A slot's index is
/// stable for the life of the model: allocation is sequential and never
/// reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(pub(crate) usize);

impl Slot {
    /// The slot's 0-based index into the full state vector.
    ///
    /// Use this to *read* the slot out of a full state slice; writes to
    /// derivatives go through the restricted view a drift callback
    /// receives.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A contiguous block of owned slots.
///
/// The drift aggregator uses the range to carve out the sub-slice of the
/// derivative vector a callback may write, turning slot ownership from a
/// convention into a structural guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRange {
    pub(crate) start: usize,
    pub(crate) len: usize,
}

impl SlotRange {
    /// Number of slots in the range.
    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    /// Returns `true` if the range owns no slots.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The first owned index.
    #[must_use]
    pub fn start(self) -> usize {
        self.start
    }

    /// One past the last owned index.
    #[must_use]
    pub fn end(self) -> usize {
        self.start + self.len
    }

    /// Returns `true` if `slot` lies in this range.
    #[must_use]
    pub fn contains(self, slot: Slot) -> bool {
        slot.0 >= self.start && slot.0 < self.end()
    }

    /// Maps an owned slot to its position within the range's view.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not in this range.
    #[must_use]
    pub fn offset(self, slot: Slot) -> usize {
        assert!(self.contains(slot), "slot is not owned by this range");
        slot.0 - self.start
    }

    /// The slot at `offset` within the range.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.len()`.
    #[must_use]
    pub fn slot(self, offset: usize) -> Slot {
        assert!(offset < self.len, "offset out of range");
        Slot(self.start + offset)
    }
}

impl From<Slot> for SlotRange {
    fn from(slot: Slot) -> Self {
        Self {
            start: slot.0,
            len: 1,
        }
    }
}
