use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reportcraft_parser::{parse_text_outline, IDGenerator, OutlineParser};

fn parse_small_outline(c: &mut Criterion) {
    let source = r#"
1. Introduction
  1.1 Background
  1.2 Problem Statement
2. Methodology
3. Conclusion
"#;

    c.bench_function("parse_small_outline", |b| {
        b.iter(|| parse_text_outline(black_box(source)))
    });
}

fn parse_large_outline(c: &mut Criterion) {
    let mut source = String::new();
    for chapter in 1..=40 {
        source.push_str(&format!("- Chapter {}\n", chapter));
        for section in 1..=8 {
            source.push_str(&format!("    - {}.{} Section\n", chapter, section));
            for figure in 1..=3 {
                source.push_str(&format!("        * Figure {}: Diagram\n", figure));
            }
        }
    }

    c.bench_function("parse_large_outline", |b| {
        b.iter(|| {
            let mut ids = IDGenerator::new("bench");
            OutlineParser::new(black_box(&source)).parse(&mut ids)
        })
    });
}

criterion_group!(benches, parse_small_outline, parse_large_outline);
criterion_main!(benches);
