//! Seeded stratified downsampling.
//!
//! Shrinks a filtered view to a bounded number of records while keeping every
//! `(bedroom_category, year)` stratum represented. The only source of randomness is a
//! `DeterministicRng` built from the caller's seed inside each call, so identical
//! `(view, max_samples, seed)` always yield identical output, regardless of what other
//! threads are sampling concurrently.

use std::collections::BTreeMap;

use rand::seq::index;
use tracing::debug;

use crate::data::{RecordView, SaleRecord};
use crate::types::{Seed, Year};

#[derive(Debug, Clone)]
/// Small deterministic RNG (SplitMix64) used for reproducible sampling.
///
/// Ported from the `rust-triplets` batch sampler's `DeterministicRng` with the same constants.
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a generator whose whole output stream is fixed by `seed`.
    pub fn new(seed: Seed) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let bytes = self.next_u64_internal().to_le_bytes();
            let copy_len = (dest.len() - offset).min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Grouping key for proportional sampling; orders by category, then year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StratumKey<'a> {
    pub bedroom_category: &'a str,
    pub year: Year,
}

impl<'a> StratumKey<'a> {
    /// Key of the stratum `record` belongs to.
    pub fn of(record: &'a SaleRecord) -> Self {
        Self {
            bedroom_category: &record.bedroom_category,
            year: record.year,
        }
    }
}

/// Per-stratum draw size: `max(1, floor(max_samples / strata))`.
///
/// `strata == 0` is treated as `1`.
pub fn per_stratum_quota(max_samples: usize, strata: usize) -> usize {
    (max_samples / strata.max(1)).max(1)
}

/// Group `view` by stratum, ascending by key; members keep input order.
pub fn partition<'a>(view: &[&'a SaleRecord]) -> BTreeMap<StratumKey<'a>, RecordView<'a>> {
    let mut strata: BTreeMap<StratumKey<'a>, RecordView<'a>> = BTreeMap::new();
    for &record in view {
        strata.entry(StratumKey::of(record)).or_default().push(record);
    }
    strata
}

/// Reduce `view` to at most `max_samples` records, stratified by bedroom category and year.
///
/// Steps:
/// 1) `max_samples == 0` => empty; `view.len() <= max_samples` => `view` unchanged.
/// 2) Partition into strata and compute the per-stratum quota.
/// 3) Draw `min(size, quota)` records from each stratum without replacement, in ascending
///    stratum order.
/// 4) Every stratum contributes at least one record, so with many strata the pool can
///    overflow; in that case draw exactly `max_samples` from the pool.
/// 5) Strata smaller than the quota can leave the pool short; the gap is filled by a draw
///    over the records left behind, so a view larger than `max_samples` always yields
///    exactly `max_samples` records.
///
/// Drawn records keep their relative input order within each draw.
pub fn stratified_sample<'a>(
    view: &[&'a SaleRecord],
    max_samples: usize,
    seed: Seed,
) -> RecordView<'a> {
    if max_samples == 0 {
        return Vec::new();
    }
    if view.len() <= max_samples {
        return view.to_vec();
    }

    let strata = partition(view);
    let quota = per_stratum_quota(max_samples, strata.len());
    let mut rng = DeterministicRng::new(seed);

    let mut pool = Vec::with_capacity(max_samples.max(strata.len()));
    let mut leftover = Vec::new();
    for members in strata.values() {
        let (picked, rest) = draw(&mut rng, members, quota);
        pool.extend(picked);
        leftover.extend(rest);
    }

    debug!(
        input = view.len(),
        strata = strata.len(),
        quota,
        pooled = pool.len(),
        max_samples,
        "stratified draw completed"
    );

    if pool.len() > max_samples {
        let (picked, _) = draw(&mut rng, &pool, max_samples);
        pool = picked;
    } else if pool.len() < max_samples {
        let (fill, _) = draw(&mut rng, &leftover, max_samples - pool.len());
        pool.extend(fill);
    }
    pool
}

/// Draw `amount` members without replacement; returns `(picked, rest)`, both in input order.
fn draw<'a>(
    rng: &mut DeterministicRng,
    members: &[&'a SaleRecord],
    amount: usize,
) -> (RecordView<'a>, RecordView<'a>) {
    if amount >= members.len() {
        return (members.to_vec(), Vec::new());
    }
    let mut chosen = vec![false; members.len()];
    for idx in index::sample(rng, members.len(), amount).into_vec() {
        chosen[idx] = true;
    }
    let (picked, rest): (Vec<_>, Vec<_>) = members
        .iter()
        .zip(chosen)
        .partition(|(_, chosen)| *chosen);
    (
        picked.into_iter().map(|(record, _)| *record).collect(),
        rest.into_iter().map(|(record, _)| *record).collect(),
    )
}
