// src/specs/cadda.rs
//
// CADDA "Marcas Mínimas": one column per category, one row per event.
//
//   PRUEBA            CADETE 1   CADETE 2   JUVENIL 1 …
//   50 mts. Libre     29"10      28"40      27"50

use std::sync::LazyLock;

use regex::Regex;

use crate::config::sources::CaddaMeta;
use crate::core::sanitize::{cadda_stroke, norm_course, normalize_ws};
use crate::core::time::parse_time_to_seconds;
use crate::extract::RawTable;
use crate::model::CaddaStandard;

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(INFANTIL|MENOR|CADETE|JUVENIL|JUNIOR|MAYORES|MASTER)").unwrap()
});
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{2,4})\b").unwrap());

/// Pool event distances; keeps "04" out of "1:04.00" from passing as one.
const DISTANCES: [u32; 7] = [25, 50, 100, 200, 400, 800, 1500];

pub fn parse_cadda_tables(tables: &[RawTable], meta: &CaddaMeta) -> Vec<CaddaStandard> {
    let curso = norm_course(meta.curso);
    let mut rows = Vec::new();

    for t in tables {
        if t.is_empty() {
            continue;
        }
        let categories: Vec<(usize, String)> = t
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| CATEGORY_RE.is_match(h))
            .map(|(i, h)| (i, normalize_ws(h).to_uppercase()))
            .collect();
        if categories.is_empty() {
            continue;
        }

        let mut genero = gender_in(&t.headers.join(" "));

        for cells in &t.rows {
            let Some((si, estilo)) = cells
                .iter()
                .enumerate()
                .find_map(|(i, c)| cadda_stroke(c).map(|s| (i, s)))
            else {
                // "DAMAS" / "VARONES" banner rows switch the gender below them.
                if let Some(g) = gender_in(&cells.join(" ")) {
                    genero = Some(g);
                }
                continue;
            };

            let Some(distancia_m) = distance_in(&cells[si])
                .or_else(|| cells.iter().find_map(|c| distance_in(c)))
            else {
                continue;
            };

            for (ci, categoria) in &categories {
                if *ci == si {
                    continue;
                }
                let Some(tiempo_s) = cells.get(*ci).and_then(|v| parse_time_to_seconds(v)) else {
                    continue;
                };
                rows.push(CaddaStandard {
                    genero: genero.map(str::to_string),
                    categoria: categoria.clone(),
                    estilo: estilo.to_string(),
                    distancia_m,
                    curso: curso.clone(),
                    tipo_marca: meta.tipo_marca.to_string(),
                    tiempo_s,
                    anio: meta.anio.to_string(),
                    target_meet: meta.target_meet.to_string(),
                });
            }
        }
    }
    rows
}

pub fn gender_in(text: &str) -> Option<&'static str> {
    let up = text.to_uppercase();
    if up.contains("DAMAS") {
        Some("F")
    } else if up.contains("VARONES") || up.contains("CABALLEROS") {
        Some("M")
    } else {
        None
    }
}

fn distance_in(cell: &str) -> Option<u32> {
    NUMBER_RE
        .captures_iter(cell)
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .find(|d| DISTANCES.contains(d))
}
