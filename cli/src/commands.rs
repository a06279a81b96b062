use std::path::Path;

use auragrid_core::context::AppConfigExt;
use auragrid_core::layout::GridMetrics;
use auragrid_core::{
    AppConfig, DataMode, GridLayout, GridSpec, GrowDirection, OverlayConfig, OverlayController,
    OverlayKind, StaticSource,
};

use crate::TextSink;

fn load_config(path: Option<&Path>) -> Result<AppConfig, String> {
    match path {
        Some(path) => AppConfig::load_from(path).map_err(|e| e.to_string()),
        None => Ok(AppConfig::load()),
    }
}

/// Drive one overlay with preview data and print every tick
pub fn preview(
    kind: OverlayKind,
    ticks: u32,
    step_secs: f32,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config = load_config(config_path)?;
    let mut controller = OverlayController::from_app_config(kind, &config);
    controller.set_data_mode(DataMode::Preview);
    controller.set_preview_step(step_secs);

    // Preview mode never reads the live source
    let mut source = StaticSource::default();
    let mut sink = TextSink::new();

    println!("{} preview ({} ticks, {:.2}s/tick)", kind.label(), ticks, step_secs);
    for tick in 1..=ticks {
        let report = controller.tick(&mut source, &mut sink);
        let calls = sink.reset_calls();
        println!(
            "tick {:>3}: {} shown of {} fetched, {} slot changes, {} sink calls{}",
            tick,
            report.displayed,
            report.fetched,
            report.slot_changes,
            calls,
            if report.layout_recomputed { ", layout" } else { "" }
        );
        print_slots(&sink);
    }
    Ok(())
}

fn print_slots(sink: &TextSink) {
    let options = sink.options();
    for (handle, view) in sink.visible() {
        let Some(record) = &view.record else {
            continue;
        };
        let remaining = if options.show_countdown {
            record.format_remaining()
        } else {
            String::new()
        };
        let stacks = if options.show_stacks && record.stacks > 1 {
            format!("x{}", record.stacks)
        } else {
            String::new()
        };
        println!(
            "    slot {:>2} ({:>6.1}, {:>6.1})  {:<24} {:>5} {:>4}  {}",
            handle.index(),
            view.position.x,
            view.position.y,
            record.display_label(),
            remaining,
            stacks,
            record.category.label()
        );
    }
}

pub fn show_config(config_path: Option<&Path>) -> Result<(), String> {
    let config = load_config(config_path)?;
    match config_path {
        Some(path) => println!("# {}", path.display()),
        None => {
            if let Ok(path) = AppConfig::config_path() {
                println!("# {}", path.display());
            }
        }
    }
    let text = toml::to_string_pretty(&config).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

/// Print the computed grid for a standalone spec
pub fn layout(max_items: u32, items_per_line: u32, columns: bool, grow: GrowDirection) {
    let spec = GridSpec {
        max_items,
        items_per_line,
        fill_rows_first: !columns,
        grow_direction: grow,
        ..OverlayConfig::default().grid
    };
    let layout = GridLayout::compute(&spec);
    let size = layout.size();

    match GridMetrics::from_spec(&spec) {
        Some(metrics) => println!(
            "{} per line, {} lines, {} on the last line",
            metrics.per_line, metrics.lines, metrics.last_line
        ),
        None => println!("empty grid"),
    }
    println!("size {:.1} x {:.1} ({})", size.width, size.height, grow.label());
    for (rank, point) in layout.positions().iter().enumerate() {
        println!("  #{:<3} ({:>7.1}, {:>7.1})", rank, point.x, point.y);
    }
}

pub fn exit() {
    println!("quitting...");
}
