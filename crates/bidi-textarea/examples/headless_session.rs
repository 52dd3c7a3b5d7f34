//! Headless session example
//!
//! Replays a short editing session against the in-memory surface and prints what the host
//! would render. Run with `RUST_LOG=bidi_textarea=debug` to see the widget's log events.

use bidi_textarea::{
    BidiTextArea, Document, HeadlessSurface, Key, SurfaceEvent, SurfaceNode, TextAreaOptions,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = TextAreaOptions::from_json(r#"{"placeholder": "Type here"}"#).unwrap_or_default();
    let mut area = BidiTextArea::new(HeadlessSurface::new(), options);

    // Assigned before the widget is attached; applied on connect.
    area.set_value("Hello\nשלום עולם");
    area.connect();
    tracing::info!(version = area.version(), "text area ready");

    area.subscribe(|change| {
        println!(
            "  change v{}: {:?} -> {:?}",
            change.version, change.old_value, change.new_value
        );
    });

    println!("1. Initial paragraphs:");
    print_paragraphs(&area);

    println!("\n2. Type at the end of the first line, then press Enter:");
    area.set_selection_range(5, 5);
    area.surface_mut().type_text(", world");
    area.handle_event(SurfaceEvent::ContentChanged);
    area.handle_event(SurfaceEvent::Key(Key::Enter));
    area.surface_mut().type_text("مرحبا");
    area.handle_event(SurfaceEvent::ContentChanged);
    print_paragraphs(&area);

    println!("\n3. Select all, delete and type into the bare root:");
    area.select();
    println!(
        "  selection: {}..{}",
        area.selection_start(),
        area.selection_end()
    );
    area.surface_mut().delete_all();
    area.surface_mut().type_text("fresh start");
    area.handle_event(SurfaceEvent::ContentChanged);
    print_paragraphs(&area);

    println!("\n4. Clear:");
    area.clear();
    println!(
        "  empty: {}, placeholder shown: {}",
        area.is_empty(),
        area.surface().shows_placeholder()
    );
    println!("  value: {:?}", area.value());
}

fn print_paragraphs(area: &BidiTextArea<HeadlessSurface>) {
    for (index, node) in area.surface().nodes().iter().enumerate() {
        if let SurfaceNode::Paragraph { text, direction } = node {
            println!("  [{index}] {direction}: {text:?}");
        }
    }
    let len = area.document().map_or(0, Document::linear_len);
    println!("  value: {:?} ({len} linear chars)", area.value());
}
