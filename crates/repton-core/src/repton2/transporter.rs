// crates/repton-core/src/repton2/transporter.rs

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::error::{MapError, Result};
use crate::repton2::Location;

/// Record layout: src_screen, src_x, src_y, dest_screen, dest_x, dest_y.
pub const TRANSPORTER_RECORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transporter {
    pub source: Location,
    pub destination: Location,
}

impl Transporter {
    pub fn to_record(&self) -> [u8; TRANSPORTER_RECORD_LEN] {
        let s = self.source.to_bytes();
        let d = self.destination.to_bytes();
        [s[0], s[1], s[2], d[0], d[1], d[2]]
    }

    pub fn from_record(r: &[u8]) -> Self {
        Transporter {
            source: Location::new(r[0], r[1], r[2]),
            destination: Location::new(r[3], r[4], r[5]),
        }
    }
}

/// Transporter edges plus the reverse index from destination to sources.
///
/// The edge list is authoritative and keeps insertion order; there is at most
/// one edge per source cell. The destination index is derived from it and
/// only changes through `insert`/`remove`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransporterGraph {
    edges: Vec<Transporter>,
    destinations: BTreeMap<Location, BTreeSet<Location>>,
}

impl TransporterGraph {
    pub fn new() -> Self {
        TransporterGraph::default()
    }

    /// Build from edges in order; a later edge for the same source replaces the
    /// earlier one in its position.
    pub fn from_edges<I: IntoIterator<Item = Transporter>>(edges: I) -> Self {
        let mut graph = TransporterGraph::new();
        for t in edges {
            graph.insert(t.source, t.destination);
        }
        graph
    }

    /// Add or retarget the transporter at `source`. Returns the previous
    /// destination, if any.
    pub fn insert(&mut self, source: Location, destination: Location) -> Option<Location> {
        let previous = match self.edges.iter_mut().find(|t| t.source == source) {
            Some(edge) => {
                let old = edge.destination;
                edge.destination = destination;
                Some(old)
            }
            None => {
                self.edges.push(Transporter { source, destination });
                None
            }
        };

        if let Some(old) = previous {
            self.unlink(old, source);
        }
        self.destinations.entry(destination).or_default().insert(source);
        previous
    }

    /// Remove the transporter at `source`. Returns its destination.
    pub fn remove(&mut self, source: Location) -> Option<Location> {
        let pos = self.edges.iter().position(|t| t.source == source)?;
        let edge = self.edges.remove(pos);
        self.unlink(edge.destination, source);
        Some(edge.destination)
    }

    fn unlink(&mut self, destination: Location, source: Location) {
        if let Some(sources) = self.destinations.get_mut(&destination) {
            sources.remove(&source);
            if sources.is_empty() {
                self.destinations.remove(&destination);
            }
        }
    }

    pub fn destination_of(&self, source: Location) -> Option<Location> {
        self.edges
            .iter()
            .find(|t| t.source == source)
            .map(|t| t.destination)
    }

    /// Sources of every transporter leading to `destination`.
    pub fn sources_of(&self, destination: Location) -> Option<&BTreeSet<Location>> {
        self.destinations.get(&destination)
    }

    pub fn edges(&self) -> &[Transporter] {
        &self.edges
    }

    pub fn destinations(&self) -> &BTreeMap<Location, BTreeSet<Location>> {
        &self.destinations
    }

    /// Transporters whose source lies on `screen`.
    pub fn on_screen(&self, screen: u8) -> impl Iterator<Item = &Transporter> {
        self.edges.iter().filter(move |t| t.source.screen == screen)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Recompute the destination index from the edges.
    pub fn rebuild_destinations(&mut self) {
        let mut destinations: BTreeMap<Location, BTreeSet<Location>> = BTreeMap::new();
        for t in &self.edges {
            destinations.entry(t.destination).or_default().insert(t.source);
        }
        self.destinations = destinations;
    }

    /// True when the destination index matches the edges exactly.
    pub fn is_consistent(&self) -> bool {
        let mut rebuilt = self.clone();
        rebuilt.rebuild_destinations();
        rebuilt.destinations == self.destinations
    }
}

/// Decode every record of the transporter region.
///
/// Records naming a screen at or above `screen_count`, or a cell off the
/// 32x32 grid, are dropped. Zero padding decodes as a transporter from screen 0
/// (0,0) to itself.
pub fn decode_transporters(region: &[u8], screen_count: usize) -> TransporterGraph {
    let mut graph = TransporterGraph::new();
    for record in region.chunks_exact(TRANSPORTER_RECORD_LEN) {
        let t = Transporter::from_record(record);
        if !t.source.is_within(screen_count) || !t.destination.is_within(screen_count) {
            warn!(record = ?record, "dropping transporter outside the screens");
            continue;
        }
        graph.insert(t.source, t.destination);
    }
    graph
}

/// Encode transporters in the given order, zero-padded to `region_len` bytes.
///
/// An empty list leaves the region all zero, which the game reads as a single
/// transporter at screen 0 (0,0).
pub fn encode_transporters<'a, I>(edges: I, region_len: usize) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Transporter>,
{
    let mut out = Vec::with_capacity(region_len);
    for t in edges {
        out.extend_from_slice(&t.to_record());
    }

    if out.len() > region_len {
        return Err(MapError::CapacityExceeded {
            what: "transporter",
            needed: out.len() / TRANSPORTER_RECORD_LEN,
            limit: region_len / TRANSPORTER_RECORD_LEN,
        });
    }

    out.resize(region_len, 0);
    Ok(out)
}
