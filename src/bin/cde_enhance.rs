use contrast_division::config::enhance::{self, ChannelMode};
use contrast_division::diagnostics::{CurvePlotSink, CurveSink, EnhancementReport};
use contrast_division::image::io::{
    load_grayscale_image, load_rgb_image, save_grayscale_u8, save_rgb_u8, write_json_file,
};
use contrast_division::ContrastEnhancer;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = enhance::load_config(Path::new(&config_path))?;

    let enhancer = ContrastEnhancer::new(config.params.clone());
    let mut plot_sink = config.output.curve_plot.clone().map(CurvePlotSink::new);
    let sink = plot_sink.as_mut().map(|s| s as &mut dyn CurveSink);

    let report = match config.mode {
        ChannelMode::Color => {
            let rgb = load_rgb_image(&config.input)?;
            let out = enhancer
                .enhance_rgb_with_sink(&rgb, sink)
                .map_err(|e| e.to_string())?;
            save_rgb_u8(&out.image, &config.output.image)?;
            out.report
        }
        ChannelMode::Gray => {
            let gray = load_grayscale_image(&config.input)?;
            let view = gray.as_view();
            let out = match sink {
                Some(sink) => enhancer.enhance_with_sink(&view, sink),
                None => enhancer.enhance_with_diagnostics(&view),
            }
            .map_err(|e| e.to_string())?;
            save_grayscale_u8(&out.image, &config.output.image)?;
            out.report
        }
    };

    print_summary(&report);
    println!("Saved enhanced image to {}", config.output.image.display());
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &EnhancementReport) {
    for line in report.summary_lines() {
        println!("{line}");
    }
}

fn usage() -> String {
    "Usage: cde_enhance <config.json>".to_string()
}
