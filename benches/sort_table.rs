// benches/sort_table.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use war_report::extract::{extract, Schema};
use war_report::sort::{sort_by_column, Direction};
use war_report::table::parse_document;

/// Synthetic war page with `n` players.
fn sample_page(n: usize) -> String {
    let mut html = String::from(
        "<table><thead><tr>\
         <th data-column=\"name\">Nome do Jogador</th>\
         <th data-column=\"decks\">Decks Usados</th>\
         <th data-column=\"fame\">Fama</th>\
         <th data-column=\"status\">Status</th>\
         </tr></thead><tbody id=\"player-table-body\">",
    );
    for i in 0..n {
        html.push_str(&format!(
            "<tr><td>Jogador {}</td><td>{}</td><td>{}</td><td><span class=\"status\">OK</span></td></tr>",
            (i * 7919) % n,
            i % 17,
            (i * 31) % 3000
        ));
    }
    html.push_str("</tbody></table>");
    html
}

fn bench_sort(c: &mut Criterion) {
    let doc = sample_page(500);

    c.bench_function("parse_500", |b| {
        b.iter(|| black_box(parse_document(black_box(&doc)).map(|t| t.nrows()).unwrap_or(0)))
    });

    let table = parse_document(&doc).expect("sample page parses");

    c.bench_function("extract_500", |b| {
        b.iter(|| black_box(extract(black_box(&table), Schema::Full).len()))
    });

    c.bench_function("sort_name_500", |b| {
        b.iter_batched(
            || parse_document(&doc).expect("sample page parses"),
            |mut t| {
                sort_by_column(&mut t, "name", Direction::Ascending);
                black_box(t.nrows())
            },
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("sort_decks_toggle_500", |b| {
        let mut t = parse_document(&doc).expect("sample page parses");
        let mut dir = Direction::Ascending;
        b.iter(|| {
            sort_by_column(&mut t, "decks", dir);
            dir = dir.flipped();
        })
    });
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
