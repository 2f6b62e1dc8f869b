// src/specs/usa.rs
//
// USA Swimming motivational standards. Each page is an age group; each row
// reads `girls times | event | boys times`, e.g.
//
//   B      BB     A      AA     AAA    AAAA  | 50 FR SCY | AAAA  AAA …
//   40.39  36.69  33.09  31.49  29.89  28.29 |           | 28.19 29.79 …

use std::sync::LazyLock;

use regex::Regex;

use crate::config::sources::UsaMeta;
use crate::core::sanitize::{norm_course, usa_stroke};
use crate::core::time::parse_time_to_seconds;
use crate::extract::RawTable;
use crate::model::UsaStandard;

static EVENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(FR|BK|BR|FLY|IM)\s*(SCY|SCM|LCM)").unwrap()
});
static COURSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(SCY|SCM|LCM)\b").unwrap());
// pandas-style duplicate headers come back as "B.1", "AA.2"
static LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(A{1,4}|B{1,2})(?:\.\d+)?$").unwrap());
static AGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*(?:&|AND)\s*(UNDER|U|OVER|O)\b|\b(\d{1,2})\s*-\s*(\d{1,2})\b").unwrap()
});

/// Levels from slowest to fastest.
pub const LEVELS: [&str; 6] = ["B", "BB", "A", "AA", "AAA", "AAAA"];

/// Read every qualifying table into rows.
/// The age group carries over from table to table until a new one is seen,
/// since a page's heading is often extracted as its own table.
pub fn parse_usa_tables(tables: &[RawTable], meta: &UsaMeta) -> Vec<UsaStandard> {
    let mut rows = Vec::new();
    let mut age: Option<String> = meta.edad.map(str::to_string);

    for t in tables {
        if meta.edad.is_none() {
            if let Some(a) = t.headers.iter().find_map(|h| age_group(h)) {
                age = Some(a);
            }
        }
        // A headers-only table still counts: its header can be an event row.
        if !qualifies(t) {
            continue;
        }

        let mut levels = levels_in(&t.headers);

        // Blocks from the text extractor can open straight on an event row.
        for cells in std::iter::once(&t.headers).chain(&t.rows) {
            if let Some(ev) = read_row(cells, &levels) {
                emit(&ev, age.as_deref(), meta, &mut rows);
                continue;
            }
            // Lattice often puts a title above the level row; adopt the
            // level row when it shows up inside the body.
            let row_levels = levels_in(cells);
            if row_levels.iter().flatten().count() >= 2 {
                levels = row_levels;
            }
            if meta.edad.is_none() {
                if let Some(a) = cells.iter().find_map(|c| age_group(c)) {
                    age = Some(a);
                }
            }
        }
    }
    rows
}

/// A table is worth reading when it names events or mentions a course.
fn qualifies(t: &RawTable) -> bool {
    t.headers.iter().any(|h| h.to_uppercase().contains("EVENT"))
        || t.all_cells().any(|c| COURSE_RE.is_match(c))
}

fn levels_in(cells: &[String]) -> Vec<Option<&'static str>> {
    cells.iter().map(|c| level_of(c)).collect()
}

pub fn level_of(header: &str) -> Option<&'static str> {
    let up = header.trim().to_uppercase();
    let caps = LEVEL_RE.captures(&up)?;
    let lvl = caps.get(1)?.as_str();
    LEVELS.iter().copied().find(|l| *l == lvl)
}

/// "10 & Under" → "10&U", "11-12" → "11-12", "15 & Over" → "15&O".
pub fn age_group(text: &str) -> Option<String> {
    let caps = AGE_RE.captures(text)?;
    if let (Some(n), Some(side)) = (caps.get(1), caps.get(2)) {
        let suffix = if side.as_str().to_uppercase().starts_with('U') { "U" } else { "O" };
        return Some(format!("{}&{suffix}", n.as_str()));
    }
    let lo: u32 = caps.get(3)?.as_str().parse().ok()?;
    let hi: u32 = caps.get(4)?.as_str().parse().ok()?;
    (lo < hi).then(|| format!("{lo}-{hi}"))
}

/// One time cell; `level` is the header level of its column when known.
#[derive(Debug, Clone, PartialEq)]
struct TimeCell {
    level: Option<&'static str>,
    secs: f64,
}

#[derive(Debug)]
struct EventRow {
    distance: u32,
    stroke: String,
    course: String,
    left: Vec<TimeCell>,
    right: Vec<TimeCell>,
}

fn read_row(cells: &[String], levels: &[Option<&'static str>]) -> Option<EventRow> {
    // Join with single spaces, remembering where each cell landed.
    let mut line = String::new();
    let mut spans = Vec::with_capacity(cells.len());
    for c in cells {
        if !line.is_empty() { line.push(' '); }
        let start = line.len();
        line.push_str(c);
        spans.push((start, line.len()));
    }

    let caps = EVENT_RE.captures(&line)?;
    let whole = caps.get(0)?;
    let distance: u32 = caps.get(1)?.as_str().parse().ok()?;
    let stroke = usa_stroke(caps.get(2)?.as_str());
    let course = norm_course(caps.get(3)?.as_str());

    let mut left = Vec::new();
    let mut right = Vec::new();
    for (i, (cell, (s, e))) in cells.iter().zip(spans).enumerate() {
        let side = if e <= whole.start() {
            &mut left
        } else if s >= whole.end() {
            &mut right
        } else {
            continue; // part of the event label
        };
        side.extend(times_in(cell, levels.get(i).copied().flatten()));
    }

    Some(EventRow { distance, stroke, course, left, right })
}

/// Times in one cell. Stream mode sometimes merges neighbouring columns
/// ("33.09 31.49"); those tokens lose their column level.
fn times_in(cell: &str, level: Option<&'static str>) -> Vec<TimeCell> {
    if let Some(secs) = parse_time_to_seconds(cell) {
        return vec![TimeCell { level, secs }];
    }
    let tokens: Vec<_> = cell.split_whitespace().map(parse_time_to_seconds).collect();
    if tokens.len() > 1 && tokens.iter().all(Option::is_some) {
        return tokens.into_iter().flatten().map(|secs| TimeCell { level: None, secs }).collect();
    }
    Vec::new()
}

/// Pair each time with its level. Header levels win when every time on the
/// side has one; otherwise levels go by speed (slowest is B), which holds
/// whether a side is printed B→AAAA or mirrored.
fn assign_levels(side: &[TimeCell]) -> Vec<(&'static str, f64)> {
    if side.iter().all(|t| t.level.is_some()) {
        return side.iter().filter_map(|t| t.level.map(|l| (l, t.secs))).collect();
    }
    let mut by_speed: Vec<f64> = side.iter().map(|t| t.secs).collect();
    by_speed.sort_by(|a, b| b.total_cmp(a));
    LEVELS.iter().copied().zip(by_speed).collect()
}

fn emit(ev: &EventRow, age: Option<&str>, meta: &UsaMeta, out: &mut Vec<UsaStandard>) {
    let split = !ev.left.is_empty() && !ev.right.is_empty();
    let sides = [
        (&ev.left, if split { Some("F") } else { meta.genero }),
        (&ev.right, if split { Some("M") } else { meta.genero }),
    ];

    for (times, genero) in sides {
        for (nivel, secs) in assign_levels(times) {
            out.push(UsaStandard {
                ciclo: meta.ciclo.to_string(),
                genero: genero.map(str::to_string),
                edad: age.map(str::to_string),
                estilo: ev.stroke.clone(),
                distancia_m: ev.distance,
                curso: ev.course.clone(),
                nivel: nivel.to_string(),
                tiempo_s: secs,
                season_year: meta.season_year.to_string(),
                standard_type: meta.standard_type.to_string(),
            });
        }
    }
}
