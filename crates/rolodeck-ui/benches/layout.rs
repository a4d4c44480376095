use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rolodeck_ui::DeckGeometry;

fn layer_for_full_deck(c: &mut Criterion) {
    let geometry = DeckGeometry::default();

    c.bench_function("layer_for_full_deck", |b| {
        b.iter(|| {
            for index in 0..geometry.card_count {
                black_box(geometry.layer_for(
                    black_box(index),
                    black_box(137.5),
                    black_box(900.0),
                ));
            }
        });
    });
}

fn layer_for_scroll_sweep(c: &mut Criterion) {
    let geometry = DeckGeometry::default();

    c.bench_function("layer_for_scroll_sweep", |b| {
        b.iter(|| {
            let mut offset = -400.0f32;
            while offset < 2400.0 {
                for index in 0..geometry.card_count {
                    black_box(geometry.layer_for(index, black_box(offset), 900.0));
                }
                offset += 16.0;
            }
        });
    });
}

criterion_group!(benches, layer_for_full_deck, layer_for_scroll_sweep);
criterion_main!(benches);
