//! Print the tick layout for a visible window.

use clipdeck_timeline_model::{format_duration, MediaDuration, TickLayout, TimelineWindow};

pub fn run(
    duration: f64,
    start: f64,
    end: Option<f64>,
    width: f64,
    json: bool,
) -> anyhow::Result<()> {
    let mut window = TimelineWindow::new(MediaDuration::new(duration)?);
    window.update(start, end.unwrap_or(duration));

    let ticks = TickLayout::new(&window, width);

    if json {
        for tick in ticks {
            println!("{}", serde_json::to_string(&tick)?);
        }
        return Ok(());
    }

    let granularity = window.granularity();
    println!(
        "Window: {} - {} ({:.1}s of {})",
        format_duration(window.start()),
        format_duration(window.end()),
        window.duration(),
        format_duration(window.media_duration())
    );
    println!(
        "  Interval: {}s (sub {}s), default clip {}s",
        granularity.tick_interval, granularity.tick_sub_interval, granularity.default_clip_length
    );
    println!("  Ticks: {}", ticks.len());
    println!();

    for tick in ticks {
        match tick.label {
            Some(label) => println!("  {:>9.1}px  |  {label}", tick.pixel_x),
            None => println!("  {:>9.1}px  '", tick.pixel_x),
        }
    }

    Ok(())
}
