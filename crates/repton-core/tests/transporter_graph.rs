// crates/repton-core/tests/transporter_graph.rs

use proptest::prelude::*;

use repton_core::repton2::puzzle::{decode_puzzle, encode_puzzle, PuzzleTable, PIECE_COUNT};
use repton_core::repton2::transporter::{encode_transporters, Transporter, TransporterGraph};
use repton_core::{Location, MapError};

fn loc(screen: u8, x: u8, y: u8) -> Location {
    Location::new(screen, x, y)
}

#[test]
fn insert_builds_reverse_index() {
    let mut g = TransporterGraph::new();
    assert_eq!(g.insert(loc(0, 1, 1), loc(2, 5, 5)), None);
    assert_eq!(g.insert(loc(1, 3, 3), loc(2, 5, 5)), None);

    let sources = g.sources_of(loc(2, 5, 5)).unwrap();
    assert!(sources.contains(&loc(0, 1, 1)));
    assert!(sources.contains(&loc(1, 3, 3)));
    assert!(g.is_consistent());
}

#[test]
fn retarget_keeps_position_and_moves_reverse_entry() {
    let mut g = TransporterGraph::new();
    g.insert(loc(0, 1, 1), loc(2, 5, 5));
    g.insert(loc(1, 3, 3), loc(2, 5, 5));

    assert_eq!(g.insert(loc(0, 1, 1), loc(4, 0, 0)), Some(loc(2, 5, 5)));
    assert_eq!(g.edges()[0].destination, loc(4, 0, 0));
    assert_eq!(g.len(), 2);
    assert_eq!(g.sources_of(loc(2, 5, 5)).unwrap().len(), 1);
    assert!(g.sources_of(loc(4, 0, 0)).unwrap().contains(&loc(0, 1, 1)));
    assert!(g.is_consistent());
}

#[test]
fn remove_drops_empty_destinations() {
    let mut g = TransporterGraph::new();
    g.insert(loc(3, 1, 1), loc(6, 2, 2));
    assert_eq!(g.remove(loc(3, 1, 1)), Some(loc(6, 2, 2)));
    assert_eq!(g.remove(loc(3, 1, 1)), None);
    assert!(g.is_empty());
    assert!(g.destinations().is_empty());
}

#[test]
fn on_screen_filters_by_source() {
    let g = TransporterGraph::from_edges([
        Transporter { source: loc(2, 0, 0), destination: loc(0, 0, 0) },
        Transporter { source: loc(3, 0, 0), destination: loc(2, 0, 0) },
        Transporter { source: loc(2, 9, 9), destination: loc(1, 0, 0) },
    ]);
    let here: Vec<_> = g.on_screen(2).map(|t| t.source).collect();
    assert_eq!(here, vec![loc(2, 0, 0), loc(2, 9, 9)]);
}

#[test]
fn encode_pads_and_limits() {
    let t = Transporter { source: loc(1, 2, 3), destination: loc(4, 5, 6) };
    let bytes = encode_transporters([t].iter(), 12).unwrap();
    assert_eq!(bytes, vec![1, 2, 3, 4, 5, 6, 0, 0, 0, 0, 0, 0]);

    let three = [t, t, t];
    assert!(matches!(
        encode_transporters(three.iter(), 12),
        Err(MapError::CapacityExceeded { what: "transporter", needed: 3, limit: 2 })
    ));
}

#[test]
fn puzzle_place_moves_and_displaces() {
    let mut p = PuzzleTable::new();
    assert_eq!(p.place(5, loc(1, 1, 1), 9).unwrap(), None);
    assert_eq!(p.place(5, loc(2, 2, 2), 9).unwrap(), Some(loc(1, 1, 1)));
    assert!(p.piece_at(loc(1, 1, 1)).is_none());

    // Another piece on the same cell displaces piece 5.
    p.place(6, loc(2, 2, 2), 3).unwrap();
    assert_eq!(p.location_of(5), None);
    assert_eq!(p.location_of(6), Some(loc(2, 2, 2)));
    assert_eq!(p.len(), 1);

    assert!(matches!(p.place(PIECE_COUNT as u8, loc(0, 0, 0), 0), Err(MapError::Validation(_))));
    assert!(matches!(p.place(1, loc(16, 0, 0), 0), Err(MapError::Validation(_))));
    assert!(matches!(p.place(1, loc(0, 32, 0), 0), Err(MapError::Validation(_))));
    assert_eq!(p.location_of(6), Some(loc(2, 2, 2)));
    assert_eq!(p.remove_at(loc(2, 2, 2)).map(|piece| piece.id), Some(6));
    assert!(p.numbering().is_empty());
}

#[test]
fn puzzle_records_follow_piece_ids() {
    let mut p = PuzzleTable::new();
    p.place(2, loc(7, 8, 9), 0x44).unwrap();
    let bytes = encode_puzzle(&p);
    assert_eq!(bytes.len(), PIECE_COUNT * 4 + 8);
    assert_eq!(&bytes[..8], &[0; 8]);
    assert_eq!(&bytes[8..12], &[7, 8, 9, 0x44]);
    assert_eq!(decode_puzzle(&bytes[..PIECE_COUNT * 4], 16), p);
}

#[derive(Debug, Clone)]
enum Op {
    Insert(Location, Location),
    Remove(Location),
}

fn small_loc() -> impl Strategy<Value = Location> {
    (0u8..3, 0u8..3, 0u8..2).prop_map(|(s, x, y)| Location::new(s, x, y))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (small_loc(), small_loc()).prop_map(|(a, b)| Op::Insert(a, b)),
        small_loc().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn reverse_index_stays_consistent(ops in proptest::collection::vec(op(), 0..64)) {
        let mut g = TransporterGraph::new();
        for op in ops {
            match op {
                Op::Insert(s, d) => { g.insert(s, d); }
                Op::Remove(s) => { g.remove(s); }
            }
            prop_assert!(g.is_consistent());
        }

        let mut sources: Vec<_> = g.edges().iter().map(|t| t.source).collect();
        sources.sort();
        sources.dedup();
        prop_assert_eq!(sources.len(), g.len());
    }
}
