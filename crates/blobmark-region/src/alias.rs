//! Label alias table
//!
//! Maps every provisional label handed out during a labelling run to the
//! canonical label of its region. The table is kept flat: each slot holds a
//! canonical label directly, so [`AliasTable::resolve`] is a single lookup.
//! Flatness is maintained by [`AliasTable::merge`], which rewrites every slot
//! holding the absorbed label instead of linking one slot to another.
//! Merges cost O(labels allocated).

use crate::grid::Label;

/// Provisional-to-canonical label table
///
/// # Examples
///
/// ```
/// use blobmark_region::AliasTable;
///
/// let mut aliases = AliasTable::new();
/// let a = aliases.allocate_new();
/// let b = aliases.allocate_new();
/// assert_eq!(aliases.merge(b, a), a);
/// assert_eq!(aliases.resolve(b), a);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    /// `aliases[i - 1]` is the canonical label of provisional label `i`
    aliases: Vec<Label>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of provisional labels allocated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check whether no label has been allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Allocate a fresh label that is its own canonical label.
    pub fn allocate_new(&mut self) -> Label {
        let label = Label::try_from(self.aliases.len() + 1)
            .unwrap_or_else(|_| panic!("alias table exhausted at {} labels", self.aliases.len()));
        self.aliases.push(label);
        label
    }

    /// Get the canonical label of a provisional label.
    ///
    /// # Panics
    ///
    /// Panics if `label` is 0 or was never allocated.
    #[inline]
    pub fn resolve(&self, label: Label) -> Label {
        assert!(
            label > 0 && label as usize <= self.aliases.len(),
            "label {} was never allocated ({} labels in table)",
            label,
            self.aliases.len()
        );
        self.aliases[label as usize - 1]
    }

    /// Check whether `label` is currently canonical.
    #[inline]
    pub fn is_canonical(&self, label: Label) -> bool {
        self.resolve(label) == label
    }

    /// Merge the classes of two canonical labels into the lower one.
    ///
    /// Every slot holding the higher label is rewritten to the lower label.
    /// Returns the surviving label.
    ///
    /// # Panics
    ///
    /// Panics if either label was never allocated.
    pub fn merge(&mut self, a: Label, b: Label) -> Label {
        debug_assert!(self.is_canonical(a), "merge of non-canonical label {}", a);
        debug_assert!(self.is_canonical(b), "merge of non-canonical label {}", b);
        if a == b {
            return a;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let mut rewritten = 0usize;
        for slot in self.aliases.iter_mut().filter(|slot| **slot == hi) {
            *slot = lo;
            rewritten += 1;
        }
        log::trace!("merged label {} into {} ({} slots)", hi, lo, rewritten);

        lo
    }

    /// Highest canonical label present in the table, or 0 if empty.
    pub fn max_canonical(&self) -> Label {
        self.aliases.iter().copied().max().unwrap_or(0)
    }

    /// Iterate over the distinct canonical labels in increasing order.
    pub fn canonical_labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.aliases
            .iter()
            .enumerate()
            .filter(|&(i, &alias)| alias as usize == i + 1)
            .map(|(_, &alias)| alias)
    }

    /// Get the raw slots, indexed by `provisional - 1`.
    pub fn as_slice(&self) -> &[Label] {
        &self.aliases
    }
}
