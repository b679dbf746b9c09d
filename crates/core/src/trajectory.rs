/// A decimated record of a simulation run.
///
/// Stores a strictly increasing time sequence and, for each state slot, a
/// value sequence of the same length (one column per slot). Solvers append
/// points as steps are accepted; downstream code reads the record through
/// one of two views:
///
/// - [`map`](Self::map) applies an observation function independently at
///   every recorded time, reconstructing the full state for each call —
///   suited to simple algebraic observables.
/// - [`map_trace`](Self::map_trace) hands the observation function the
///   entire column set and time slice in a single call — suited to
///   observables that read one column directly and have no use for
///   per-point reconstruction.
///
/// Both views exist so the shape of the observable, not performance,
/// decides which one a caller reaches for.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    times: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl Trajectory {
    /// Creates an empty trajectory for a system with `dim` state slots.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            times: Vec::new(),
            columns: vec![Vec::new(); dim],
        }
    }

    /// Number of state slots.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    /// Number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if no points have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The recorded times, strictly increasing.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The recorded values of one state slot, index-aligned with
    /// [`times`](Self::times).
    ///
    /// # Panics
    ///
    /// Panics if `slot >= self.dim()`.
    #[must_use]
    pub fn column(&self, slot: usize) -> &[f64] {
        &self.columns[slot]
    }

    /// All columns, one per state slot.
    #[must_use]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Appends a recorded point.
    ///
    /// # Panics
    ///
    /// Panics if `y` does not match the trajectory's dimension or if `t`
    /// does not strictly increase the time sequence. Both indicate a bug in
    /// the caller, not a numerical condition.
    pub fn push(&mut self, t: f64, y: &[f64]) {
        assert_eq!(
            y.len(),
            self.columns.len(),
            "recorded state has wrong dimension"
        );
        assert!(
            self.times.last().is_none_or(|&last| t > last),
            "recorded times must be strictly increasing"
        );

        self.times.push(t);
        for (column, &value) in self.columns.iter_mut().zip(y) {
            column.push(value);
        }
    }

    /// Reconstructs the full state at recorded index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn state_at(&self, index: usize) -> Vec<f64> {
        assert!(index < self.len(), "trajectory index out of range");
        self.columns.iter().map(|column| column[index]).collect()
    }

    /// Applies `observe(t, state)` at every recorded point.
    ///
    /// The full state is reconstructed for each call.
    pub fn map<F>(&self, mut observe: F) -> Vec<f64>
    where
        F: FnMut(f64, &[f64]) -> f64,
    {
        let mut state = vec![0.0; self.dim()];
        self.times
            .iter()
            .enumerate()
            .map(|(index, &t)| {
                for (value, column) in state.iter_mut().zip(&self.columns) {
                    *value = column[index];
                }
                observe(t, &state)
            })
            .collect()
    }

    /// Applies `observe(columns, times)` once over the whole record.
    ///
    /// `observe` is trusted to return one value per recorded index.
    pub fn map_trace<F>(&self, observe: F) -> Vec<f64>
    where
        F: FnOnce(&[Vec<f64>], &[f64]) -> Vec<f64>,
    {
        let out = observe(&self.columns, &self.times);
        debug_assert_eq!(out.len(), self.len(), "trace observable length mismatch");
        out
    }
}
