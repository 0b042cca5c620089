use super::*;

#[test]
fn default_margins_on_vertical_canvas() {
    let area = safe_area(1080, 1920).unwrap();
    assert_eq!(
        area,
        SafeArea {
            left: 80,
            top: 200,
            right: 880,
            bottom: 1500,
        }
    );
    assert_eq!(area.width(), 800);
    assert_eq!(area.height(), 1300);
}

#[test]
fn every_canvas_larger_than_the_margins_is_well_formed() {
    for width in (281..2000).step_by(37) {
        for height in (621..3000).step_by(53) {
            let area = safe_area(width, height).unwrap();
            assert!(area.left < area.right);
            assert!(area.top < area.bottom);
            assert!(area.right <= width);
            assert!(area.bottom <= height);
        }
    }
}

#[test]
fn degenerate_canvases_are_rejected() {
    assert!(safe_area(280, 1920).is_err());
    assert!(safe_area(1080, 620).is_err());
    assert!(safe_area(10, 10).is_err());

    let huge = SafeMargins {
        top: u32::MAX,
        ..SafeMargins::default()
    };
    assert!(SafeArea::compute(Canvas { width: 1080, height: 1920 }, huge).is_err());
}

#[test]
fn custom_margins_apply_verbatim() {
    let margins = SafeMargins {
        top: 10,
        bottom: 20,
        left: 30,
        right: 40,
    };
    let area = SafeArea::compute(Canvas { width: 100, height: 100 }, margins).unwrap();
    assert_eq!((area.left, area.top, area.right, area.bottom), (30, 10, 60, 80));
    assert_eq!((area.width(), area.height()), (30, 70));
}
