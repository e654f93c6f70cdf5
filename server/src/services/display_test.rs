use super::*;

use painter::{Color, Point, Size, Surface};

fn frame(color: Color) -> Framebuffer {
    let mut fb = Framebuffer::new(Size::new(4, 4)).unwrap();
    let bounds = fb.bounds();
    fb.fill(bounds, color);
    fb
}

#[test]
fn empty_store_has_no_frame() {
    let store = FrameStore::new();
    assert!(store.latest().is_none());
    assert!(store.latest_size().is_none());
    assert_eq!(store.published(), 0);
}

#[test]
fn publish_copies_the_frame() {
    let mut store = FrameStore::new();
    let mut source = frame(Color::WHITE);
    store.publish(&source);

    // Later writes to the lent surface must not reach the stored copy.
    let bounds = source.bounds();
    source.fill(bounds, Color::BLACK);

    let stored = store.latest().unwrap();
    assert_eq!(stored.pixel(Point::new(1, 1)), Some(Color::WHITE));
    assert_eq!(store.published(), 1);
}

#[test]
fn latest_frame_replaces_previous() {
    let mut store = FrameStore::new();
    store.publish(&frame(Color::WHITE));
    store.publish(&frame(Color::GREEN));

    assert_eq!(store.latest().unwrap().pixel(Point::new(0, 0)), Some(Color::GREEN));
    assert_eq!(store.published(), 2);
}

#[test]
fn clones_share_storage() {
    let reader = FrameStore::new();
    let mut writer = reader.clone();
    writer.publish(&frame(Color::BLUE));
    assert_eq!(reader.published(), 1);
    assert_eq!(reader.latest().unwrap().pixel(Point::new(3, 3)), Some(Color::BLUE));
}

#[test]
fn latest_size_tracks_published_frame() {
    let mut store = FrameStore::new();
    store.publish(&frame(Color::WHITE));
    assert_eq!(store.latest_size(), Some(Size::new(4, 4)));
}
