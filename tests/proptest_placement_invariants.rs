use popup_place::{
    Corner, Element, NodeId, Placer, Point, PositionName, Rect, StaticDocument,
};
use proptest::prelude::*;

const ALL_CORNERS: [Corner; 8] = [
    Corner::TL,
    Corner::TR,
    Corner::BL,
    Corner::BR,
    Corner::TM,
    Corner::BM,
    Corner::ML,
    Corner::MR,
];

const ALL_POSITIONS: [PositionName; 10] = [
    PositionName::Before,
    PositionName::After,
    PositionName::BeforeCentered,
    PositionName::AfterCentered,
    PositionName::Above,
    PositionName::AboveAlt,
    PositionName::AboveCentered,
    PositionName::Below,
    PositionName::BelowAlt,
    PositionName::BelowCentered,
];

fn corner() -> impl Strategy<Value = Corner> {
    prop::sample::select(ALL_CORNERS.to_vec())
}

fn position_name() -> impl Strategy<Value = PositionName> {
    prop::sample::select(ALL_POSITIONS.to_vec())
}

fn document(view: Rect, w: u16, h: u16) -> (StaticDocument, NodeId) {
    let mut doc = StaticDocument::new(view);
    let popup = doc.insert(
        Element::new(Rect::new(0.0, 0.0, f32::from(w), f32::from(h))).with_parent(NodeId::BODY),
    );
    (doc, popup)
}

fn viewport() -> impl Strategy<Value = Rect> {
    (0u16..500, 0u16..2000, 100u16..1500, 100u16..1000).prop_map(|(x, y, w, h)| {
        Rect::new(f32::from(x), f32::from(y), f32::from(w), f32::from(h))
    })
}

proptest! {
    #[test]
    fn placement_is_deterministic(
        view in viewport(),
        w in 1u16..600,
        h in 1u16..600,
        px in 0u16..2500,
        py in 0u16..3000,
        corners in prop::collection::vec(corner(), 1..8),
    ) {
        let point = Point::new(f32::from(px), f32::from(py));
        let (mut a, popup) = document(view, w, h);
        let mut b = a.clone();
        let first = Placer::new(&mut a).at(&popup, point, &corners, None, None).unwrap();
        let second = Placer::new(&mut b).at(&popup, point, &corners, None, None).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn winner_is_earliest_minimum(
        view in viewport(),
        w in 1u16..600,
        h in 1u16..600,
        px in 0u16..2500,
        py in 0u16..3000,
        corners in prop::collection::vec(corner(), 1..8),
    ) {
        let point = Point::new(f32::from(px), f32::from(py));
        let singles: Vec<f32> = corners
            .iter()
            .map(|corner| {
                let (mut doc, popup) = document(view, w, h);
                Placer::new(&mut doc)
                    .at(&popup, point, &[*corner], None, None)
                    .unwrap()
                    .overflow
            })
            .collect();
        let min = singles.iter().copied().fold(f32::INFINITY, f32::min);
        let expected = singles.iter().position(|overflow| *overflow == min).unwrap();

        let (mut doc, popup) = document(view, w, h);
        let result = Placer::new(&mut doc).at(&popup, point, &corners, None, None).unwrap();
        prop_assert!(result.overflow >= 0.0);
        prop_assert_eq!(result.overflow, min);
        prop_assert_eq!(result.node_corner, corners[expected]);
    }

    #[test]
    fn contained_popup_has_zero_overflow(
        w in 1u16..400,
        h in 1u16..400,
        dx in 0u16..600,
        dy in 0u16..600,
    ) {
        let view = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let (mut doc, popup) = document(view, w, h);
        let point = Point::new(f32::from(dx), f32::from(dy));
        let result = Placer::new(&mut doc).at(&popup, point, &[Corner::TL], None, None).unwrap();
        prop_assert_eq!(result.overflow, 0.0);
        prop_assert_eq!(result.rect(), Rect::new(point.x, point.y, f32::from(w), f32::from(h)));
    }

    #[test]
    fn rtl_is_the_mirror_of_ltr(position in position_name()) {
        let ltr = position.corner_pairs(true);
        let rtl = position.corner_pairs(false);
        let mirrored: Vec<(Corner, Corner)> = ltr
            .iter()
            .map(|(anchor, node)| (anchor.mirrored(), node.mirrored()))
            .collect();
        prop_assert_eq!(rtl, mirrored);
    }
}

#[test]
fn before_ltr_matches_after_rtl() {
    assert_eq!(
        PositionName::Before.corner_pairs(true),
        PositionName::After.corner_pairs(false)
    );
    assert_eq!(
        PositionName::After.corner_pairs(true),
        PositionName::Before.corner_pairs(false)
    );
}
