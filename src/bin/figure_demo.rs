//! Renders the reference figures to PNG.
//!
//! Usage: trueno-figure-demo [OUTPUT_DIR] [--show]
//!
//! Set `RUST_LOG=trueno_figure=trace` to see render timing.

use log::info;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use trueno_figure::prelude::*;

fn lines_and_markers() -> Result<Figure> {
    let mut fig = Figure::new(640, 480)?;
    let xs: Vec<f64> = (0..=100).map(|i| f64::from(i) * 0.1).collect();
    let sin: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let cos: Vec<f64> = xs.iter().map(|x| 0.5 * x.cos()).collect();
    let samples: Vec<f64> = (0..=10).map(f64::from).collect();
    let noisy: Vec<f64> = samples.iter().map(|x| (x * 0.7).sin() + 0.1 * (x * 5.0).cos()).collect();

    fig.plot(xs.clone(), sin, Color::BLUE, 2.0, "sin(x)");
    fig.plot(xs, cos, Color::MAGENTA, 1.0, "cos(x) / 2");
    fig.scatter(samples, noisy, Color::RED, 4.0, "samples");
    fig.grid(true);
    fig.title("Lines and markers");
    fig.xlabel("x");
    fig.ylabel("amplitude");
    fig.legend(true, "northEast");
    Ok(fig)
}

fn filled_shapes() -> Result<Figure> {
    let mut fig = Figure::new(640, 480)?;
    fig.rect_ltrb(0.0, 0.0, 4.0, 3.0, ShapeStyle::filled(Color::CYAN, 1.0).stroke_width(1.0), "opaque");
    fig.circle(4.0, 3.0, 1.5, ShapeStyle::filled(Color::RED, 0.5).stroke(Color::BLUE).stroke_width(2.0), "half");
    fig.polygon(
        vec![5.0, 7.0, 6.0],
        vec![0.0, 0.5, 2.5],
        ShapeStyle::filled(Color::GREEN, 0.3).stroke_width(1.0),
        "triangle",
    );
    fig.rect_xywh(1.0, 3.5, 2.0, 1.0, ShapeStyle::outline(Color::BLACK, 3.0), "outline");
    fig.text(6.0, 4.5, "alpha = 0.3", TextStyle::new().align(HAlign::Center, VAlign::Center), "");
    fig.title("Filled shapes");
    fig.legend(true, "southWest");
    Ok(fig)
}

fn equal_scale() -> Result<Figure> {
    let mut fig = Figure::new(640, 480)?;
    let theta: Vec<f64> = (0..=64).map(|i| f64::from(i) * 2.0 * PI / 64.0).collect();
    let xs: Vec<f64> = theta.iter().map(|t| t.cos()).collect();
    let ys: Vec<f64> = theta.iter().map(|t| t.sin()).collect();

    fig.plot(xs, ys, Color::BLACK, 1.0, "unit circle");
    fig.ellipse(0.0, 0.0, 2.0, 1.0, 30.0, ShapeStyle::filled(Color::YELLOW, 0.6).stroke_width(1.0), "ellipse");
    fig.rotated_rect(0.0, 0.0, 1.0, 0.5, 45.0, ShapeStyle::outline(Color::RED, 2.0), "rotated");
    fig.equal_scale(true);
    fig.grid(true);
    fig.title("Equal scale");
    fig.legend(true, "east");
    Ok(fig)
}

fn run(out_dir: &Path, show: bool) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;

    let demos: [(&str, fn() -> Result<Figure>); 3] = [
        ("lines", lines_and_markers),
        ("shapes", filled_shapes),
        ("equal", equal_scale),
    ];

    for (name, build) in demos {
        let mut fig = build()?;
        let path = out_dir.join(format!("{name}.png"));
        fig.save(&path)?;
        info!("wrote {}", path.display());
        if show {
            fig.show(name)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let mut out_dir = PathBuf::from(".");
    let mut show = false;
    for arg in std::env::args().skip(1) {
        if arg == "--show" {
            show = true;
        } else {
            out_dir = PathBuf::from(arg);
        }
    }

    if let Err(e) = run(&out_dir, show) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
