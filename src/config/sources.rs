// src/config/sources.rs
//
// Registry of the OPEN (publicly downloadable) PDF sources.

use std::fmt;

use crate::model::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Usa,
    Cadda,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Usa => "usa",
            SourceKind::Cadda => "cadda",
        }
    }

    pub fn table(&self) -> Table {
        match self {
            SourceKind::Usa => Table::StandardsUsa,
            SourceKind::Cadda => Table::StandardsCadda,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constants stamped onto every USA row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsaMeta {
    pub ciclo: &'static str,
    pub season_year: &'static str,
    pub standard_type: &'static str,
    /// Fixed gender when the document is gender-specific.
    pub genero: Option<&'static str>,
    /// Fixed age group when the document is age-specific.
    pub edad: Option<&'static str>,
}

/// Constants stamped onto every CADDA row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaddaMeta {
    pub anio: &'static str,
    pub tipo_marca: &'static str,
    pub target_meet: &'static str,
    pub curso: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceMeta {
    Usa(UsaMeta),
    Cadda(CaddaMeta),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub key: &'static str,
    pub url: &'static str,
    pub out_name: &'static str,
    pub meta: SourceMeta,
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self.meta {
            SourceMeta::Usa(_) => SourceKind::Usa,
            SourceMeta::Cadda(_) => SourceKind::Cadda,
        }
    }
}

pub const USA_2024_2028_AGE_GROUP: &str = "usa_2024_2028_age_group";
pub const CADDA_MINIMAS_2023_2024: &str = "cadda_minimas_2023_2024";

static SOURCES: [Source; 2] = [
    // USA Swimming motivational standards 2024-2028 (age group)
    Source {
        key: USA_2024_2028_AGE_GROUP,
        url: "https://websitedevsa.blob.core.windows.net/sitefinity/docs/default-source/timesdocuments/time-standards/2025/2028-motivational-standards-age-group.pdf",
        out_name: "usa_2024_2028_age_group.pdf",
        meta: SourceMeta::Usa(UsaMeta {
            ciclo: "2024-2028",
            season_year: "2024-2028",
            standard_type: "AGE_GROUP",
            genero: None,
            edad: None,
        }),
    },
    // CADDA marcas mínimas 2023/2024
    Source {
        key: CADDA_MINIMAS_2023_2024,
        url: "https://cadda.org.ar/wp-content/uploads/2022/12/Marcas-Minimas-2023-y-2024.pdf",
        out_name: "cadda_marcas_minimas_2023_2024.pdf",
        meta: SourceMeta::Cadda(CaddaMeta {
            anio: "2023/2024",
            tipo_marca: "MINIMA",
            target_meet: "NACIONAL",
            curso: "SCM",
        }),
    },
];

/// All sources, in run order.
pub fn all() -> &'static [Source] {
    &SOURCES
}

pub fn by_key(key: &str) -> Option<&'static Source> {
    SOURCES.iter().find(|s| s.key == key)
}

pub fn keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = SOURCES.iter().map(|s| s.key).collect();
    keys.sort_unstable();
    keys
}
