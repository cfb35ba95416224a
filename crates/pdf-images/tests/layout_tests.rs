use pdf_images::*;

const A4: (f32, f32) = (210.0, 297.0);

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}

#[test]
fn test_landscape_image_spans_page_width() {
    let layout = PageLayout::compute(800, 600, A4.0, A4.1);

    assert_eq!(layout.width, 210.0);
    assert!(approx(layout.height, 157.5));
    assert!(approx(layout.x, 0.0));
    assert!(approx(layout.y, 69.75));
    assert!(!layout.overflows());
}

#[test]
fn test_portrait_image_spans_page_height() {
    let layout = PageLayout::compute(600, 800, A4.0, A4.1);

    assert_eq!(layout.height, 297.0);
    assert!(approx(layout.width, 222.75));
    assert!(approx(layout.y, 0.0));
    // Unclamped: the image is wider than the page and spills over both edges
    assert!(approx(layout.x, -6.375));
    assert!(layout.overflows());
}

#[test]
fn test_contain_keeps_portrait_image_on_page() {
    let layout = PageLayout::compute_with(FitMode::Contain, 600, 800, A4.0, A4.1);

    assert!(approx(layout.width, 210.0));
    assert!(approx(layout.height, 280.0));
    assert!(approx(layout.x, 0.0));
    assert!(approx(layout.y, 8.5));
}

#[test]
fn test_layout_records_inputs() {
    let layout = PageLayout::compute(1024, 768, 215.9, 279.4);

    assert_eq!(layout.image_width, 1024);
    assert_eq!(layout.image_height, 768);
    assert_eq!(layout.page_width, 215.9);
    assert_eq!(layout.page_height, 279.4);
}

#[test]
fn test_landscape_page_orientation() {
    let options = ConvertOptions {
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    let (w, h) = options.page_dimensions_mm();
    assert_eq!((w, h), (297.0, 210.0));

    // 4:3 is squarer than landscape A4, so spanning the width overflows vertically
    let layout = PageLayout::compute(800, 600, w, h);
    assert_eq!(layout.width, 297.0);
    assert!(approx(layout.height, 222.75));
    assert!(approx(layout.y, -6.375));
}
