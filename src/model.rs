// src/model.rs
//
// Output rows, shaped like the destination table columns.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Destination tables (schema `public`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    StandardsUsa,
    StandardsCadda,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::StandardsUsa => "standards_usa",
            Table::StandardsCadda => "standards_cadda",
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("public.{}", self.name())
    }

    /// Columns of the UNIQUE constraint the upsert merges on.
    pub fn conflict_columns(&self) -> &'static [&'static str] {
        match self {
            Table::StandardsUsa => &[
                "standard_type", "season_year", "genero", "edad",
                "estilo", "distancia_m", "curso", "nivel",
            ],
            Table::StandardsCadda => &[
                "genero", "categoria", "estilo", "distancia_m",
                "curso", "tipo_marca", "año", "target_meet",
            ],
        }
    }

    pub fn on_conflict(&self) -> String {
        self.conflict_columns().join(",")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsaStandard {
    pub ciclo: String,
    pub genero: Option<String>,
    pub edad: Option<String>,
    pub estilo: String,
    pub distancia_m: u32,
    pub curso: String,
    pub nivel: String,
    pub tiempo_s: f64,
    pub season_year: String,
    pub standard_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaddaStandard {
    pub genero: Option<String>,
    pub categoria: String,
    pub estilo: String,
    pub distancia_m: u32,
    pub curso: String,
    pub tipo_marca: String,
    pub tiempo_s: f64,
    #[serde(rename = "año")]
    pub anio: String,
    pub target_meet: String,
}

/// Rows that carry the natural key of their table.
pub trait Keyed {
    /// Values of `Table::conflict_columns`, in order. `None` maps to "".
    fn dedup_key(&self) -> Vec<String>;
}

fn opt(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

impl Keyed for UsaStandard {
    fn dedup_key(&self) -> Vec<String> {
        vec![
            self.standard_type.clone(),
            self.season_year.clone(),
            opt(&self.genero),
            opt(&self.edad),
            self.estilo.clone(),
            self.distancia_m.to_string(),
            self.curso.clone(),
            self.nivel.clone(),
        ]
    }
}

impl Keyed for CaddaStandard {
    fn dedup_key(&self) -> Vec<String> {
        vec![
            opt(&self.genero),
            self.categoria.clone(),
            self.estilo.clone(),
            self.distancia_m.to_string(),
            self.curso.clone(),
            self.tipo_marca.clone(),
            self.anio.clone(),
            self.target_meet.clone(),
        ]
    }
}

/// Keep the first row per key, preserving input order.
/// Does not replace the table's UNIQUE constraint; it only keeps one upsert
/// batch from carrying the same key twice.
pub fn dedup<T: Keyed>(rows: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect()
}

/// Rows of one run, split per table.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParsedRows {
    pub usa: Vec<UsaStandard>,
    pub cadda: Vec<CaddaStandard>,
}

impl ParsedRows {
    pub fn len(&self, table: Table) -> usize {
        match table {
            Table::StandardsUsa => self.usa.len(),
            Table::StandardsCadda => self.cadda.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.usa.is_empty() && self.cadda.is_empty()
    }

    pub fn deduped(self) -> Self {
        Self { usa: dedup(self.usa), cadda: dedup(self.cadda) }
    }
}
