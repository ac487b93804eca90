//! Step the window through repeated wheel zooms.

use clipdeck_timeline_model::{format_duration, MediaDuration, TimelineWindow, ZoomDirection};

use crate::Direction;

pub fn run(duration: f64, at: f64, direction: Direction, steps: u32) -> anyhow::Result<()> {
    let mut window = TimelineWindow::new(MediaDuration::new(duration)?);
    let direction = match direction {
        Direction::In => ZoomDirection::In,
        Direction::Out => ZoomDirection::Out,
    };
    if direction == ZoomDirection::Out {
        // Start narrow so there is room to widen.
        window.update(0.0, 0.0);
    }
    let at = at.clamp(0.0, 1.0);

    println!("Zooming {direction:?} at {:.0}% across the track", at * 100.0);
    print_window(0, &window);

    for step in 1..=steps {
        if !window.zoom(at, direction) {
            println!("  Zoom limit reached after {} step(s)", step - 1);
            break;
        }
        print_window(step, &window);
    }

    Ok(())
}

fn print_window(step: u32, window: &TimelineWindow) {
    println!(
        "  [{step:>3}] {} - {}  ({:.2}s, ticks every {}s)",
        format_duration(window.start()),
        format_duration(window.end()),
        window.duration(),
        window.tick_interval()
    );
}
