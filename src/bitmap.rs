//! Bitmap cross-references between data elements and the quality, statistics
//! and substitution elements that annotate them.
//!
//! Each bitmap-defining sequence of a message produces one [BitmapEntry]: the
//! list of `(index_to, index_by)` pairs linking a bitmapped data element to the
//! "data present" element that controls it, plus side arrays locating the
//! auxiliary elements.
//!
//! Auxiliary elements sit at a fixed distance from their present element, the
//! same for every element of the sequence. An entry therefore stores one
//! anchor, the `index_by` of its first pair, and side-array values relative to
//! it. For a matched pair the absolute index of an auxiliary element is
//! `anchor + relative + (index_by - anchor)`, i.e. `index_by + relative`,
//! wrapping at `u32::MAX`.

use log::{debug, trace, warn};

use crate::{descriptor::Descriptor, errors::BitmapError};

/// Default maximum number of pairs per entry.
pub const DEFAULT_MAX_PAIRS: usize = 4096;
/// Default maximum length of each side array.
pub const DEFAULT_MAX_AUX: usize = 64;

/// Capacity limits applied to every entry of a [BitmapCollection].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapLimits {
    /// Pairs per entry.
    pub max_pairs: usize,
    /// Quality indices per entry.
    pub max_quality: usize,
    /// Statistics per family per entry.
    pub max_stats: usize,
}

impl Default for BitmapLimits {
    fn default() -> Self {
        Self {
            max_pairs: DEFAULT_MAX_PAIRS,
            max_quality: DEFAULT_MAX_AUX,
            max_stats: DEFAULT_MAX_AUX,
        }
    }
}

/// Link from a bitmapped element to the present element controlling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapPair {
    pub index_to: u32,
    pub index_by: u32,
}

/// A statistic element: its index and its own descriptor.
///
/// Inside a [BitmapEntry] the index is relative to the anchor; in a
/// [BitmapQueryResult] it is absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticRef {
    pub index: u32,
    pub descriptor: Descriptor,
}

/// One bitmap-defining sequence.
///
/// Pairs must be pushed in ascending `index_to` order; [BitmapCollection::resolve]
/// stops scanning an entry at the first pair past its target.
#[derive(Debug, Clone)]
pub struct BitmapEntry {
    limits: BitmapLimits,
    anchor: Option<u32>,
    pairs: Vec<BitmapPair>,
    quality: Vec<u32>,
    substituted: Option<u32>,
    retained: Option<u32>,
    stat1: Vec<StatisticRef>,
    dstat: Vec<StatisticRef>,
}

impl BitmapEntry {
    pub fn new(limits: BitmapLimits) -> Self {
        Self {
            limits,
            anchor: None,
            pairs: Vec::new(),
            quality: Vec::new(),
            substituted: None,
            retained: None,
            stat1: Vec::new(),
            dstat: Vec::new(),
        }
    }

    /// `index_by` of the first pair, once there is one.
    pub fn anchor(&self) -> Option<u32> {
        self.anchor
    }

    pub fn pairs(&self) -> &[BitmapPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends a pair. Fails once the entry holds [BitmapLimits::max_pairs] pairs.
    pub fn push_pair(&mut self, index_to: u32, index_by: u32) -> Result<(), BitmapError> {
        if self.pairs.len() >= self.limits.max_pairs {
            warn!(
                "bitmap entry full ({} pairs), dropping {index_to} -> {index_by}",
                self.limits.max_pairs
            );
            return Err(BitmapError::CapacityExceeded {
                limit: self.limits.max_pairs,
            });
        }

        trace!("bitmap pair {index_to} bitmapped by {index_by}");
        self.anchor.get_or_insert(index_by);
        self.pairs.push(BitmapPair { index_to, index_by });

        Ok(())
    }

    /// Adds a quality element, relative to the anchor.
    pub fn push_quality(&mut self, relative: u32) -> Result<(), BitmapError> {
        push_limited(&mut self.quality, relative, self.limits.max_quality)
    }

    /// Sets the substituted-value element, relative to the anchor.
    pub fn set_substituted(&mut self, relative: u32) {
        self.substituted = Some(relative);
    }

    /// Sets the retained-value element, relative to the anchor.
    pub fn set_retained(&mut self, relative: u32) {
        self.retained = Some(relative);
    }

    /// Adds a first-order statistic, relative to the anchor.
    pub fn push_stat1(&mut self, relative: u32, descriptor: Descriptor) -> Result<(), BitmapError> {
        let stat = StatisticRef {
            index: relative,
            descriptor,
        };
        push_limited(&mut self.stat1, stat, self.limits.max_stats)
    }

    /// Adds a difference statistic, relative to the anchor.
    pub fn push_dstat(&mut self, relative: u32, descriptor: Descriptor) -> Result<(), BitmapError> {
        let stat = StatisticRef {
            index: relative,
            descriptor,
        };
        push_limited(&mut self.dstat, stat, self.limits.max_stats)
    }

    /// Position of the pair mapping `target`, scanning in order and giving up
    /// at the first pair past it.
    fn position_of(&self, target: u32) -> Option<usize> {
        for (j, pair) in self.pairs.iter().enumerate() {
            if pair.index_to == target {
                return Some(j);
            } else if pair.index_to > target {
                break;
            }
        }

        None
    }
}

fn push_limited<T>(items: &mut Vec<T>, item: T, limit: usize) -> Result<(), BitmapError> {
    if items.len() >= limit {
        warn!("bitmap side array full ({limit} items)");
        return Err(BitmapError::CapacityExceeded { limit });
    }

    items.push(item);
    Ok(())
}

/// Absolute indices associated with a bitmapped element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitmapQueryResult {
    /// The queried element index.
    pub target: u32,
    /// Entry holding the match.
    pub entry: usize,
    /// Position of the matching pair within the entry.
    pub position: usize,
    /// Index of the present element controlling the target.
    pub bitmapped_by: u32,
    pub qualified_by: Vec<u32>,
    pub substituted: Option<u32>,
    pub retained: Option<u32>,
    pub stat1: Vec<StatisticRef>,
    pub dstat: Vec<StatisticRef>,
}

/// All bitmap entries of one message, in encounter order.
#[derive(Debug, Clone, Default)]
pub struct BitmapCollection {
    limits: BitmapLimits,
    entries: Vec<BitmapEntry>,
}

impl BitmapCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: BitmapLimits) -> Self {
        Self {
            limits,
            entries: Vec::new(),
        }
    }

    pub fn limits(&self) -> BitmapLimits {
        self.limits
    }

    /// Opens a new entry and returns it for filling.
    pub fn begin_entry(&mut self) -> &mut BitmapEntry {
        self.entries.push(BitmapEntry::new(self.limits));
        let n = self.entries.len();
        &mut self.entries[n - 1]
    }

    /// The entry being built, if any.
    pub fn current_mut(&mut self) -> Option<&mut BitmapEntry> {
        self.entries.last_mut()
    }

    pub fn entries(&self) -> &[BitmapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry, keeping the limits, before the next message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Finds the first entry mapping `target` and returns its associations as absolute indices.
    pub fn resolve(&self, target: u32) -> Result<BitmapQueryResult, BitmapError> {
        for (i, entry) in self.entries.iter().enumerate() {
            let Some(j) = entry.position_of(target) else {
                continue;
            };

            let bitmapped_by = entry.pairs[j].index_by;
            let shift = |relative: u32| bitmapped_by.wrapping_add(relative);

            return Ok(BitmapQueryResult {
                target,
                entry: i,
                position: j,
                bitmapped_by,
                qualified_by: entry.quality.iter().map(|&q| shift(q)).collect(),
                substituted: entry.substituted.map(shift),
                retained: entry.retained.map(shift),
                stat1: shift_stats(&entry.stat1, bitmapped_by),
                dstat: shift_stats(&entry.dstat, bitmapped_by),
            });
        }

        debug!("no bitmap entry maps index {target}");
        Err(BitmapError::NotFound(target))
    }
}

fn shift_stats(stats: &[StatisticRef], base: u32) -> Vec<StatisticRef> {
    stats
        .iter()
        .map(|s| StatisticRef {
            index: base.wrapping_add(s.index),
            descriptor: s.descriptor,
        })
        .collect()
}
