extern crate clap;
extern crate failure;
extern crate image;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use mandelbrot::{CanvasSize, Explorer, Frame, RenderObserver, Viewport};
use num::Complex;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
        (Ok(l), Ok(r)) => Some((l, r)),
        _ => None,
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

/// A click is `X,Y` in display pixels, optionally followed by
/// `,shift` to zoom out instead of in.
fn parse_click(s: &str) -> Option<(u32, u32, bool)> {
    let (position, zoom_out) = match s.rfind(',') {
        Some(index) if &s[index + 1..] == "shift" => (&s[..index], true),
        _ => (s, false),
    };
    parse_pair(position, ',').map(|(x, y)| (x, y, zoom_out))
}

// Adapts one of the parsers above into a clap validator.
fn parses<T>(parsed: Option<T>, err: &str) -> Result<(), String> {
    parsed.map(|_| ()).ok_or_else(|| err.to_string())
}

fn validate_threads(s: &str, max_threads: usize) -> Result<(), String> {
    let threads = usize::from_str(s).map_err(|_| "Could not parse thread count".to_string())?;
    if threads >= 1 && threads <= max_threads {
        Ok(())
    } else {
        Err(format!("Thread count must be between 1 and {}", max_threads))
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const CLICK: &str = "click";

fn args<'a>(max_threads: usize, default_threads: &'a str) -> ArgMatches<'a> {
    App::new("explore")
        .version("0.1.0")
        .about("Renders a view of the Mandelbrot set, optionally after a series of zoom clicks")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("400x300")
                .validator(|s| parses(parse_pair::<u32>(&s, 'x'), "Could not parse display size"))
                .help("Size of the display; the image is oversampled from this"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,-1.3")
                .validator(|s| parses(parse_complex(&s), "Could not parse left lower corner"))
                .help("Left lower corner of the viewport"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1,1.3")
                .validator(|s| parses(parse_complex(&s), "Could not parse right upper corner"))
                .help("Right upper corner of the viewport"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(move |s| validate_threads(&s, max_threads))
                .help("Number of worker threads per render phase"),
        )
        .arg(
            Arg::with_name(CLICK)
                .required(false)
                .long(CLICK)
                .short("c")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| {
                    parses(parse_click(&s), "Could not parse click; expected X,Y or X,Y,shift")
                })
                .help("Zoom in on a display pixel before rendering; X,Y,shift zooms out"),
        )
        .get_matches()
}

/// Writes each finished frame to a PNG.
struct PngSurface {
    path: PathBuf,
    written: Result<(), String>,
}

impl RenderObserver for PngSurface {
    fn rendering(&mut self) {
        info!(path = %self.path.display(), "working...");
    }

    fn rendered(&mut self, frame: &Frame) {
        self.written = write_image(&self.path, frame).map_err(|e| e.to_string());
    }
}

fn write_image(path: &Path, frame: &Frame) -> Result<(), Error> {
    image::save_buffer(
        path,
        frame.as_bytes(),
        frame.width(),
        frame.height(),
        image::ColorType::RGBA(8),
    )?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = parse_pair::<u32>(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing display size"))?;
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("Error parsing left lower point"))?;
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("Error parsing right upper point"))?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or_default())?;

    let mut explorer = Explorer::for_display(width, height)
        .with_threads(threads)
        .with_viewport(Viewport::from_corners(leftlower, rightupper)?);
    let canvas: CanvasSize = explorer.canvas();
    debug!(width = canvas.width, height = canvas.height, threads, "explorer ready");

    for click in matches.values_of(CLICK).into_iter().flatten() {
        let (x, y, zoom_out) =
            parse_click(click).ok_or_else(|| failure::err_msg("Error parsing click"))?;
        let pixel = explorer.display_to_raster(x, y);
        explorer.zoom(pixel.0, pixel.1, zoom_out)?;
    }

    let mut surface = PngSurface {
        path: PathBuf::from(matches.value_of(OUTPUT).unwrap_or_default()),
        written: Ok(()),
    };
    explorer.render(&mut surface)?;
    surface.written.map_err(failure::err_msg)?;

    let viewport = explorer.viewport();
    println!(
        "{} {} {} {}",
        viewport.left(),
        viewport.right(),
        viewport.top(),
        viewport.bottom()
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let max_threads = num_cpus::get();
    let default_threads = max_threads.to_string();
    let matches = args(max_threads, &default_threads);

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
