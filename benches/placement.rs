use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use popup_place::host::{ComputedStyle, Overflow};
use popup_place::{
    Anchor, Corner, Element, NodeId, PlaceOptions, Placer, Point, PositionName, Rect,
    StaticDocument, parse_scenario, run_scenario,
};
use std::hint::black_box;

/// A popup inside a chain of `depth` scrolling containers, each a little
/// smaller than its parent, with the anchor at the bottom.
fn nested_scrollers(depth: usize) -> (StaticDocument, NodeId, NodeId) {
    let mut doc = StaticDocument::new(Rect::new(0.0, 0.0, 1280.0, 800.0));
    let mut parent = NodeId::BODY;
    for level in 0..depth {
        let inset = level as f32 * 4.0;
        parent = doc.insert(
            Element::new(Rect::new(inset, inset, 1200.0 - 2.0 * inset, 760.0 - 2.0 * inset))
                .with_parent(parent)
                .with_computed(ComputedStyle {
                    overflow: Overflow::Auto,
                    ..Default::default()
                }),
        );
    }
    let anchor = doc.insert(Element::new(Rect::new(600.0, 700.0, 90.0, 28.0)).with_parent(parent));
    let popup = doc.insert(Element::new(Rect::new(0.0, 0.0, 240.0, 320.0)).with_parent(NodeId::BODY));
    (doc, anchor, popup)
}

fn fixture(name: &str) -> &'static str {
    match name {
        "dropdown_below" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/dropdown_below.json"
        )),
        "dropdown_flips_above" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/dropdown_flips_above.json"
        )),
        "scrolled_list" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/scrolled_list.json"
        )),
        "dialog_center" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/dialog_center.json5"
        )),
        other => panic!("unknown fixture {other}"),
    }
}

fn bench_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("at");
    let corners = [
        Corner::TL,
        Corner::TR,
        Corner::BL,
        Corner::BR,
        Corner::TM,
        Corner::BM,
        Corner::ML,
        Corner::MR,
    ];
    for count in [1usize, 4, 8] {
        let (mut doc, _, popup) = nested_scrollers(0);
        // bottom-right corner: nothing but the last candidates fit
        let point = Point::new(1270.0, 790.0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let result = Placer::new(&mut doc)
                    .at(&popup, black_box(point), &corners[..count], None, None)
                    .expect("at failed");
                black_box(result.overflow);
            });
        });
    }
    group.finish();
}

fn bench_around(c: &mut Criterion) {
    let mut group = c.benchmark_group("around");
    let positions = [PositionName::Below, PositionName::Above, PositionName::After];
    for depth in [0usize, 8, 64] {
        let (mut doc, anchor, popup) = nested_scrollers(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                let result = Placer::new(&mut doc)
                    .around(&popup, &Anchor::Node(anchor), &positions, true, None)
                    .expect("around failed");
                black_box(result.anchor_rect);
            });
        });
    }
    group.finish();
}

fn bench_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario");
    let options = PlaceOptions::default();
    for name in ["dropdown_below", "dropdown_flips_above", "scrolled_list", "dialog_center"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let mut scenario = parse_scenario(black_box(data)).expect("parse failed");
                let dump = run_scenario(&mut scenario, &options).expect("placement failed");
                black_box(dump.node_style);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_at, bench_around, bench_scenario);
criterion_main!(benches);
