// tests/parse_usa.rs
use standards_scrape::config::sources::UsaMeta;
use standards_scrape::extract::RawTable;
use standards_scrape::extract::text::tables_from_text;
use standards_scrape::model::{ParsedRows, UsaStandard};
use standards_scrape::specs::usa::parse_usa_tables;

const META: UsaMeta = UsaMeta {
    ciclo: "2024-2028",
    season_year: "2024-2028",
    standard_type: "AGE_GROUP",
    genero: None,
    edad: None,
};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable { page: None, headers: row(headers), rows: rows.iter().map(|r| row(r)).collect() }
}

fn find<'a>(rows: &'a [UsaStandard], genero: &str, nivel: &str, distancia: u32) -> &'a UsaStandard {
    rows.iter()
        .find(|r| r.genero.as_deref() == Some(genero) && r.nivel == nivel && r.distancia_m == distancia)
        .unwrap_or_else(|| panic!("no {genero} {nivel} {distancia} row"))
}

#[test]
fn lattice_table_with_level_headers() {
    let t = table(
        &["B", "BB", "A", "AA", "AAA", "AAAA", "10 & Under Events", "AAAA", "AAA", "AA", "A", "BB", "B"],
        &[&[
            "40.39", "36.69", "33.09", "31.49", "29.89", "28.29", "50 FR SCY",
            "27.99", "29.59", "31.19", "32.79", "36.39", "39.99",
        ]],
    );
    let rows = parse_usa_tables(&[t], &META);
    assert_eq!(rows.len(), 12);

    let g = find(&rows, "F", "B", 50);
    assert_eq!(g.tiempo_s, 40.39);
    assert_eq!(g.edad.as_deref(), Some("10&U"));
    assert_eq!((g.estilo.as_str(), g.curso.as_str()), ("Freestyle", "SCY"));
    assert_eq!(g.ciclo, "2024-2028");
    assert_eq!(g.standard_type, "AGE_GROUP");

    assert_eq!(find(&rows, "M", "AAAA", 50).tiempo_s, 27.99);
    assert_eq!(find(&rows, "M", "B", 50).tiempo_s, 39.99);
}

#[test]
fn age_group_carries_over_from_heading_tables() {
    let heading = table(&["11-12 Girls / Boys"], &[]);
    // stream-style: no level headers, one merged cell on the girls side
    let body = table(&["Motivational"], &[&["35.00 32.00", "100 BK SCM", "34.00"]]);

    let rows = parse_usa_tables(&[heading, body], &META);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.edad.as_deref() == Some("11-12")));
    assert!(rows.iter().all(|r| r.estilo == "Backstroke" && r.curso == "SCM" && r.distancia_m == 100));

    assert_eq!(find(&rows, "F", "B", 100).tiempo_s, 35.0);
    assert_eq!(find(&rows, "F", "BB", 100).tiempo_s, 32.0);
    assert_eq!(find(&rows, "M", "B", 100).tiempo_s, 34.0);
}

#[test]
fn level_row_inside_body_and_minute_times() {
    let t = table(
        &["15 & Over Events"],
        &[
            &["B", "A", "EVENT", "A", "B"],
            &["1:20.19", "1:10.09", "100 FLY LCM", "1:05.29", "1:15.39"],
        ],
    );
    let rows = parse_usa_tables(&[t], &META);
    assert_eq!(rows.len(), 4);
    assert_eq!(find(&rows, "F", "A", 100).tiempo_s, 70.09);
    assert_eq!(find(&rows, "M", "B", 100).tiempo_s, 75.39);
    assert!(rows.iter().all(|r| r.edad.as_deref() == Some("15&O") && r.estilo == "Butterfly"));
}

#[test]
fn one_sided_rows_use_document_gender() {
    let meta = UsaMeta { genero: Some("M"), edad: Some("13-14"), ..META };
    let t = table(&["Event", "B", "BB"], &[&["200 IM SCY", "2:40.00", "2:30.00"]]);
    let rows = parse_usa_tables(&[t], &meta);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.genero.as_deref() == Some("M") && r.edad.as_deref() == Some("13-14")));
    assert_eq!(find(&rows, "M", "BB", 200).tiempo_s, 150.0);
}

#[test]
fn unrelated_tables_and_rows_are_skipped() {
    let cover = table(&["2024-2028 Motivational Standards"], &[&["Published by USA Swimming"]]);
    let noisy = table(&["Event", "B"], &[&["Footnote: times in yards", ""], &["50 FR SCY", "-"]]);
    assert!(parse_usa_tables(&[cover, noisy], &META).is_empty());
}

#[test]
fn duplicate_pages_collapse_on_dedup() {
    let t = table(&["10 & Under Events", "B"], &[&["50 FR SCY", "40.39"]]);
    let rows = parse_usa_tables(&[t.clone(), t], &META);
    assert_eq!(rows.len(), 2);

    let parsed = ParsedRows { usa: rows, cadda: Vec::new() }.deduped();
    assert_eq!(parsed.usa.len(), 1);
}

#[test]
fn header_row_naming_an_event_is_data() {
    let t = table(&["40.39", "50 FR SCY", "39.99"], &[&["36.69", "100 FR SCY", "35.99"]]);
    let rows = parse_usa_tables(&[t], &META);
    assert_eq!(rows.len(), 4);
    assert_eq!(find(&rows, "F", "B", 50).tiempo_s, 40.39);
    assert_eq!(find(&rows, "M", "B", 50).tiempo_s, 39.99);
    assert_eq!(find(&rows, "F", "B", 100).tiempo_s, 36.69);
    assert_eq!(find(&rows, "M", "B", 100).tiempo_s, 35.99);

    let lone = table(&["40.39", "50 FR SCY", "39.99"], &[]);
    assert_eq!(parse_usa_tables(&[lone], &META).len(), 2);
}

#[test]
fn text_layout_blocks_parse() {
    let text = "10 & Under Motivational Times\n\n\
                B       BB      EVENT        BB      B\n\
                40.39   36.69   50 FR SCY    35.99   39.99\n\
                1:28.19  1:20.09  100 BK SCY   1:19.29  1:27.39\n\
                \n\
                40.39   50 FR LCM   39.99\n\
                36.69   100 FR LCM  35.99\n";
    let tables = tables_from_text(text);
    assert_eq!(tables.len(), 2);

    let rows = parse_usa_tables(&tables, &META);
    assert_eq!(rows.len(), 12);
    assert_eq!(find(&rows, "F", "BB", 50).tiempo_s, 36.69);
    assert_eq!(find(&rows, "M", "B", 100).tiempo_s, 87.39);
    assert_eq!(rows.iter().filter(|r| r.curso == "LCM").count(), 4);
}
