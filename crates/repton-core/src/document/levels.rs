// crates/repton-core/src/document/levels.rs
//
// Mapping between decoded game content and the interchange document.
//
// Keys:
//   levels         [ [ [int x32] x32 ] ... ]
//   transporters   { screen: { (x, y): (dest_screen, (dest_x, dest_y)) } }
//   destinations   { screen: { (x, y): set{ (src_screen, (src_x, src_y)) } } }
//   puzzle         { screen: { (x, y): (piece, destination) } }
//   piece numbers  { piece: (screen, (x, y)) }
//   totals         (diamonds, earth, monsters, transporters, pieces)
//
// Destinations and piece numbers are written for readers of the document and
// rebuilt from transporters and puzzle on import. Transporters and pieces off
// the sixteen 32x32 screens are dropped on import, as they are on decode.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{MapError, Result};
use crate::grid::{LevelCollection, TileGrid, GRID_COLUMNS};
use crate::repton2::puzzle::PuzzleTable;
use crate::repton2::totals::Totals;
use crate::repton2::transporter::TransporterGraph;
use crate::repton2::{Location, Repton2Content, SCREEN_COUNT};

use super::Value;

const LEVELS: &str = "levels";
const TRANSPORTERS: &str = "transporters";
const DESTINATIONS: &str = "destinations";
const PUZZLE: &str = "puzzle";
const PIECE_NUMBERS: &str = "piece numbers";
const TOTALS: &str = "totals";

fn bad(msg: impl Into<String>) -> MapError {
    MapError::DocumentFormat(msg.into())
}

fn cell(x: u8, y: u8) -> Value {
    Value::Tuple(vec![Value::int(x), Value::int(y)])
}

fn place(loc: Location) -> Value {
    Value::Tuple(vec![Value::int(loc.screen), cell(loc.x, loc.y)])
}

fn byte(v: &Value, what: &str) -> Result<u8> {
    let n = v.as_int().ok_or_else(|| bad(format!("{what}: expected int")))?;
    u8::try_from(n).map_err(|_| bad(format!("{what}: {n} out of range")))
}

fn pair<'a>(v: &'a Value, what: &str) -> Result<(&'a Value, &'a Value)> {
    match v.items() {
        Some([a, b]) => Ok((a, b)),
        _ => Err(bad(format!("{what}: expected a pair"))),
    }
}

fn read_cell(v: &Value, what: &str) -> Result<(u8, u8)> {
    let (x, y) = pair(v, what)?;
    Ok((byte(x, what)?, byte(y, what)?))
}

fn read_place(v: &Value, what: &str) -> Result<Location> {
    let (screen, xy) = pair(v, what)?;
    let (x, y) = read_cell(xy, what)?;
    Ok(Location::new(byte(screen, what)?, x, y))
}

/// Nested `{ screen: { (x, y): value } }` map, screens in ascending order.
fn by_screen<T>(rows: impl IntoIterator<Item = (Location, T)>, f: impl Fn(T) -> Value) -> Value {
    let mut screens: BTreeMap<u8, Vec<(Value, Value)>> = BTreeMap::new();
    for (loc, v) in rows {
        screens.entry(loc.screen).or_default().push((cell(loc.x, loc.y), f(v)));
    }
    Value::Map(
        screens
            .into_iter()
            .map(|(s, cells)| (Value::int(s), Value::Map(cells)))
            .collect(),
    )
}

fn each_by_screen<'a>(
    v: &'a Value,
    what: &str,
) -> Result<Vec<(Location, &'a Value)>> {
    let screens = v.entries().ok_or_else(|| bad(format!("{what}: expected a map")))?;
    let mut out = Vec::new();
    for (screen, cells) in screens {
        let screen = byte(screen, what)?;
        let cells = cells.entries().ok_or_else(|| bad(format!("{what}: expected a map")))?;
        for (xy, value) in cells {
            let (x, y) = read_cell(xy, what)?;
            out.push((Location::new(screen, x, y), value));
        }
    }
    Ok(out)
}

pub fn levels_to_value(levels: &[TileGrid]) -> Value {
    Value::List(
        levels
            .iter()
            .map(|grid| {
                Value::List(
                    (0..grid.rows())
                        .map(|y| Value::List(grid.row(y).iter().map(|&t| Value::int(t)).collect()))
                        .collect(),
                )
            })
            .collect(),
    )
}

pub fn levels_from_value(v: &Value) -> Result<LevelCollection> {
    let levels = v.items().ok_or_else(|| bad("levels: expected a list"))?;
    levels
        .iter()
        .enumerate()
        .map(|(n, level)| {
            let rows = level.items().ok_or_else(|| bad(format!("level {n}: expected rows")))?;
            let mut cells = Vec::with_capacity(rows.len() * GRID_COLUMNS);
            for row in rows {
                let row = row.items().ok_or_else(|| bad(format!("level {n}: expected a row")))?;
                if row.len() != GRID_COLUMNS {
                    return Err(bad(format!("level {n}: row of {} cells", row.len())));
                }
                for t in row {
                    cells.push(byte(t, "tile")?);
                }
            }
            TileGrid::from_cells(cells)
        })
        .collect()
}

/// Document for the first game: levels only.
pub fn repton_document(levels: &[TileGrid]) -> Value {
    Value::Map(vec![(Value::text(LEVELS), levels_to_value(levels))])
}

pub fn repton_from_document(doc: &Value) -> Result<LevelCollection> {
    levels_from_value(doc.field(LEVELS).ok_or_else(|| bad("missing levels"))?)
}

pub fn repton2_document(content: &Repton2Content) -> Value {
    let transporters = by_screen(
        content.transporters.edges().iter().map(|t| (t.source, t.destination)),
        place,
    );
    let destinations = by_screen(
        content
            .transporters
            .destinations()
            .iter()
            .map(|(dest, sources)| (*dest, sources)),
        |sources| Value::Set(sources.iter().map(|&s| place(s)).collect()),
    );
    let puzzle = by_screen(
        content.puzzle.placements().iter().map(|(loc, p)| (*loc, *p)),
        |p| Value::Tuple(vec![Value::int(p.id), Value::int(p.destination)]),
    );
    let numbers = Value::Map(
        content
            .puzzle
            .numbering()
            .iter()
            .map(|(&id, &loc)| (Value::int(id), place(loc)))
            .collect(),
    );
    let t = &content.totals;
    let totals = Value::Tuple(vec![
        Value::int(t.diamonds),
        Value::int(t.earth),
        Value::int(t.monsters),
        Value::int(t.transporters),
        Value::int(t.pieces),
    ]);

    Value::Map(vec![
        (Value::text(LEVELS), levels_to_value(&content.levels)),
        (Value::text(TRANSPORTERS), transporters),
        (Value::text(DESTINATIONS), destinations),
        (Value::text(PUZZLE), puzzle),
        (Value::text(PIECE_NUMBERS), numbers),
        (Value::text(TOTALS), totals),
    ])
}

pub fn repton2_from_document(doc: &Value) -> Result<Repton2Content> {
    let field = |name: &str| doc.field(name).ok_or_else(|| bad(format!("missing {name}")));

    let levels = levels_from_value(field(LEVELS)?)?;

    let mut transporters = TransporterGraph::new();
    for (source, dest) in each_by_screen(field(TRANSPORTERS)?, TRANSPORTERS)? {
        let dest = read_place(dest, TRANSPORTERS)?;
        if !source.is_within(SCREEN_COUNT) || !dest.is_within(SCREEN_COUNT) {
            warn!(%source, destination = %dest, "dropping transporter outside the screens");
            continue;
        }
        transporters.insert(source, dest);
    }

    let mut puzzle = PuzzleTable::new();
    for (loc, piece) in each_by_screen(field(PUZZLE)?, PUZZLE)? {
        let (id, destination) = pair(piece, PUZZLE)?;
        let id = byte(id, PUZZLE)?;
        if !loc.is_within(SCREEN_COUNT) {
            warn!(id, location = %loc, "dropping puzzle piece outside the screens");
            continue;
        }
        puzzle.place(id, loc, byte(destination, PUZZLE)?)?;
    }

    let totals = match field(TOTALS)?.items() {
        Some([d, e, m, t, p]) => {
            let n = |v: &Value| -> Result<u16> {
                let n = v.as_int().ok_or_else(|| bad("totals: expected int"))?;
                u16::try_from(n).map_err(|_| bad(format!("totals: {n} out of range")))
            };
            Totals {
                diamonds: n(d)?,
                earth: n(e)?,
                monsters: n(m)?,
                transporters: n(t)?,
                pieces: n(p)?,
            }
        }
        _ => return Err(bad("totals: expected five counters")),
    };

    Ok(Repton2Content {
        levels,
        transporters,
        puzzle,
        totals,
    })
}
