// src/core/sanitize.rs

/// Collapse runs of whitespace (including newlines inside PDF cells) to a
/// single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Canonical pool course: SCY, SCM or LCM.
/// Unknown values come back trimmed and upper-cased.
pub fn norm_course(raw: &str) -> String {
    let s = normalize_ws(raw).to_uppercase();
    match s.as_str() {
        "SCY" | "SCM" | "LCM" => s,
        "MTS" | "METROS" | "25M" | "PILETA 25" | "PILETA 25M" => "SCM".into(),
        "50M" | "PILETA 50" | "PILETA 50M" => "LCM".into(),
        _ => s,
    }
}

/// USA stroke abbreviations as printed in the standards tables.
pub fn usa_stroke(abbr: &str) -> String {
    let up = abbr.trim().to_uppercase();
    match up.as_str() {
        "FR" | "FREE" => "Freestyle".into(),
        "BK" | "BACK" => "Backstroke".into(),
        "BR" | "BREAST" => "Breaststroke".into(),
        "FLY" => "Butterfly".into(),
        "IM" | "MEDLEY" => "IM".into(),
        _ => up,
    }
}

const CADDA_STROKES: [(&str, &str); 5] = [
    ("LIBRE", "LIBRE"),
    ("ESPALDA", "ESPALDA"),
    ("PECHO", "PECHO"),
    ("MARIP", "MARIPOSA"),
    ("COMBINADO", "COMBINADO"),
];

/// Canonical CADDA stroke named anywhere in `cell` ("50 mts. Mariposa" → MARIPOSA).
pub fn cadda_stroke(cell: &str) -> Option<&'static str> {
    let up = cell.to_uppercase();
    CADDA_STROKES
        .iter()
        .find(|(needle, _)| up.contains(needle))
        .map(|(_, canon)| *canon)
}
