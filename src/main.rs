use contrast_division::image::ImageU8;
use contrast_division::{ContrastEnhancer, EnhanceParams};

fn main() {
    env_logger::init();

    // Demo stub: a low-contrast horizontal ramp with a brighter square in the middle
    let w = 320usize;
    let h = 240usize;
    let mut gray: Vec<u8> = (0..w * h).map(|i| 90 + ((i % w) * 40 / w) as u8).collect();
    for y in h / 3..2 * h / 3 {
        for x in w / 3..2 * w / 3 {
            gray[y * w + x] = 150;
        }
    }
    let img = ImageU8::gray(w, h, &gray);

    let enhancer = ContrastEnhancer::new(EnhanceParams::default());
    match enhancer.enhance_with_diagnostics(&img) {
        Ok(out) => {
            for line in out.report.summary_lines() {
                println!("{line}");
            }
            let (lo, hi) = out
                .image
                .data()
                .iter()
                .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            println!("output range {lo}..={hi}");
        }
        Err(err) => eprintln!("enhancement failed: {err}"),
    }
}
