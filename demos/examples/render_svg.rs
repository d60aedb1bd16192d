// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walk through an explorable decision tree, written out as SVG.
//!
//! This example shows how to:
//! - load a tree from JSON into a `TreeView` over an `SvgSurface`,
//! - drive it with pointer events and host commands,
//! - advance transitions from a frame clock.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p canopy_demos --example render_svg > tree.svg`

use canopy_interaction::{Command, HostCapabilities, InputEvent, TreeView, ViewerConfig};
use canopy_render::SvgSurface;
use kurbo::{Point, Size, Vec2};

const TREE: &str = r#"{
    "feature": "Outlook",
    "entropy": 0.940,
    "all_gains": { "Outlook": 0.2467, "Humidity": 0.1518, "Wind": 0.0481, "Temperature": 0.0292 },
    "children": {
        "Sunny": {
            "feature": "Humidity",
            "entropy": 0.971,
            "all_gains": { "Humidity": 0.971, "Temperature": 0.571, "Wind": 0.020 },
            "children": {
                "High": { "type": "leaf", "majority_class": "No", "entropy": 0.0 },
                "Normal": { "type": "leaf", "majority_class": "Yes", "entropy": 0.0 }
            }
        },
        "Overcast": { "type": "leaf", "majority_class": "Yes", "entropy": 0.0 },
        "Rain": {
            "feature": "Wind",
            "entropy": 0.971,
            "all_gains": { "Wind": 0.971, "Humidity": 0.020, "Temperature": 0.020 },
            "children": {
                "Strong": { "type": "leaf", "majority_class": "No", "entropy": 0.0 },
                "Weak": { "type": "leaf", "majority_class": "Yes", "entropy": 0.0 }
            }
        }
    }
}"#;

/// Frame interval of the simulated host clock, in milliseconds.
const FRAME: u64 = 16;

fn settle(view: &mut TreeView<SvgSurface>, clock: &mut u64) {
    while view.tick(*clock as f64) {
        *clock += FRAME;
    }
}

fn main() {
    env_logger::init();

    let Some(mut view) = TreeView::from_json_str(
        TREE,
        SvgSurface::new(Size::new(960.0, 600.0)),
        HostCapabilities::all(),
        ViewerConfig::default(),
    ) else {
        log::error!("nothing to draw");
        return;
    };
    let mut clock = 0;
    settle(&mut view, &mut clock);

    // Click "Sunny" through the pointer, the way a host would.
    let tree = view.hierarchy();
    let sunny = tree.children_of(tree.root())[0];
    if let Some(at) = view.layout().position(sunny) {
        let position = view.transform().to_surface(at);
        view.handle(&InputEvent::PointerDown { position, time: clock });
        view.handle(&InputEvent::PointerUp {
            position,
            time: clock + 60,
        });
        clock += 60;
    }
    settle(&mut view, &mut clock);

    // Reveal everything, then nudge the view and hover the root.
    view.command(Command::ExpandAll, clock as f64);
    settle(&mut view, &mut clock);
    view.pan_by(Vec2::new(0.0, 20.0));
    let root = view.hierarchy().root();
    if let Some(at) = view.layout().position(root) {
        let pointer = view.transform().to_surface(at);
        view.hover_node(root, pointer + Vec2::new(0.0, 10.0));
    }
    view.zoom_at(Point::new(480.0, 50.0), 0.9);

    log::info!("{} nodes visible after {clock} ms", view.layout().len());
    print!("{}", view.into_surface().to_svg());
}
