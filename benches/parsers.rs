// benches/parsers.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use standards_scrape::config::sources::{CaddaMeta, UsaMeta};
use standards_scrape::core::time::parse_time_to_seconds;
use standards_scrape::extract::RawTable;
use standards_scrape::extract::text::tables_from_text;
use standards_scrape::specs::{cadda::parse_cadda_tables, usa::parse_usa_tables};

const USA_META: UsaMeta = UsaMeta {
    ciclo: "2024-2028",
    season_year: "2024-2028",
    standard_type: "AGE_GROUP",
    genero: None,
    edad: None,
};

const CADDA_META: CaddaMeta = CaddaMeta {
    anio: "2023/2024",
    tipo_marca: "MINIMA",
    target_meet: "NACIONAL",
    curso: "SCM",
};

/// One page per age group, every stroke/distance/course combination.
fn usa_tables() -> Vec<RawTable> {
    let mut headers: Vec<String> = ["B", "BB", "A", "AA", "AAA", "AAAA"].iter().map(|s| s.to_string()).collect();
    headers.push("Events".into());
    headers.extend(["AAAA", "AAA", "AA", "A", "BB", "B"].iter().map(|s| s.to_string()));

    ["10 & Under", "11-12", "13-14", "15-16", "17-18"]
        .iter()
        .map(|age| {
            let mut rows = Vec::new();
            for stroke in ["FR", "BK", "BR", "FLY", "IM"] {
                for dist in [50, 100, 200] {
                    for course in ["SCY", "LCM"] {
                        let mut r: Vec<String> = (0..6).map(|i| format!("{}.{:02}", 40 - i, i * 7)).collect();
                        r.push(format!("{dist} {stroke} {course}"));
                        r.extend((0..6).map(|i| format!("{}.{:02}", 34 + i, i * 5)));
                        rows.push(r);
                    }
                }
            }
            let mut h = headers.clone();
            h[6] = format!("{age} Events");
            RawTable { page: None, headers: h, rows }
        })
        .collect()
}

fn cadda_tables() -> Vec<RawTable> {
    let headers = ["PRUEBA", "INFANTIL", "MENOR", "CADETE 1", "CADETE 2", "JUVENIL 1", "JUVENIL 2", "MAYORES"];
    let mut rows = Vec::new();
    for banner in ["DAMAS", "VARONES"] {
        rows.push(vec![banner.to_string()]);
        for stroke in ["Libre", "Espalda", "Pecho", "Mariposa", "Combinado"] {
            for dist in [50, 100, 200, 400] {
                let mut r = vec![format!("{dist} mts. {stroke}")];
                r.extend((0..7).map(|i| format!("1'{:02}\"{:02}", 10 + i, i * 3)));
                rows.push(r);
            }
        }
    }
    vec![RawTable { page: Some(1), headers: headers.iter().map(|s| s.to_string()).collect(), rows }]
}

fn bench_parsers(c: &mut Criterion) {
    let usa = usa_tables();
    let cadda = cadda_tables();

    c.bench_function("usa_tables", |b| {
        b.iter(|| black_box(parse_usa_tables(black_box(&usa), &USA_META).len()))
    });

    c.bench_function("cadda_tables", |b| {
        b.iter(|| black_box(parse_cadda_tables(black_box(&cadda), &CADDA_META).len()))
    });

    let times = ["27.80", "1:08.79", "2:15,5", "38\"51", "1'05\"32", "36'00\"", "-", "50 FR SCY"];
    c.bench_function("parse_time_to_seconds", |b| {
        b.iter(|| {
            times
                .iter()
                .filter_map(|t| parse_time_to_seconds(black_box(t)))
                .sum::<f64>()
        })
    });

    let text: String = (0..40)
        .map(|i| format!("PRUEBA    CADETE 1    JUVENIL 1\n{i}0 Libre    29.10    27.50\n\n"))
        .collect();
    c.bench_function("text_layout_tables", |b| {
        b.iter(|| black_box(tables_from_text(black_box(&text)).len()))
    });
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
