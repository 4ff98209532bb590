//! Command-line driver for the thermal recovery pipeline

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, warn};

use thermascan::{
    BitDepth, Bitmap, Interpolation, Locator, Model, PaletteKind, Quantization, Thermal,
    CROSSHAIR_BORDER, CROSSHAIR_FILL,
};

#[derive(Parser)]
#[command(name = "thermascan", version, about = "Recover thermal data from TG-series screenshots")]
struct Args {
    /// Input screenshot (174x220 BMP at 16, 24 or 32 bpp)
    input: PathBuf,

    /// Output BMP path for the re-rendered image
    output: PathBuf,

    /// Palette to render the output with
    #[arg(long, value_enum, default_value = "iron")]
    palette: PaletteArg,

    /// Policy for filling the crosshair-occluded pixels
    #[arg(long, value_enum, default_value = "square-weight")]
    interpolation: InterpolationArg,

    /// How uncertain intensity intervals collapse to a single value
    #[arg(long, value_enum, default_value = "median-low")]
    quantization: QuantizationArg,

    /// Restamp the crosshair onto the rendered output
    #[arg(long)]
    crosshair: bool,

    /// Output bit depth
    #[arg(long, value_enum, default_value = "16")]
    depth: DepthArg,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaletteArg {
    Iron,
    Grayscale,
    Rainbow,
}

impl From<PaletteArg> for PaletteKind {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Iron => PaletteKind::Iron,
            PaletteArg::Grayscale => PaletteKind::Grayscale,
            PaletteArg::Rainbow => PaletteKind::Rainbow,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum InterpolationArg {
    Zero,
    Min,
    Max,
    Med,
    SquareSmall,
    SquareWeight,
    SquareLarge,
}

impl From<InterpolationArg> for Interpolation {
    fn from(arg: InterpolationArg) -> Self {
        match arg {
            InterpolationArg::Zero => Interpolation::Zero,
            InterpolationArg::Min => Interpolation::Min,
            InterpolationArg::Max => Interpolation::Max,
            InterpolationArg::Med => Interpolation::Med,
            InterpolationArg::SquareSmall => Interpolation::SquareSmall,
            InterpolationArg::SquareWeight => Interpolation::SquareWeight,
            InterpolationArg::SquareLarge => Interpolation::SquareLarge,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum QuantizationArg {
    Exact,
    Floor,
    Ceiling,
    MedianLow,
    MedianHigh,
}

impl From<QuantizationArg> for Quantization {
    fn from(arg: QuantizationArg) -> Self {
        match arg {
            QuantizationArg::Exact => Quantization::Exact,
            QuantizationArg::Floor => Quantization::Floor,
            QuantizationArg::Ceiling => Quantization::Ceiling,
            QuantizationArg::MedianLow => Quantization::MedianLow,
            QuantizationArg::MedianHigh => Quantization::MedianHigh,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DepthArg {
    #[value(name = "16")]
    Bpp16,
    #[value(name = "24")]
    Bpp24,
    #[value(name = "32")]
    Bpp32,
}

impl From<DepthArg> for BitDepth {
    fn from(arg: DepthArg) -> Self {
        match arg {
            DepthArg::Bpp16 => BitDepth::Bpp16,
            DepthArg::Bpp24 => BitDepth::Bpp24,
            DepthArg::Bpp32 => BitDepth::Bpp32,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let bitmap = thermascan::read_bitmap(&args.input)
        .with_context(|| format!("cannot load {}", args.input.display()))?;
    let screenshot = bitmap
        .to_canvas(0, 0, bitmap.width(), bitmap.height())
        .context("cannot decode the screenshot")?;

    let mut locator = Locator::new(&screenshot).context("not a device screenshot")?;
    match locator.process() {
        Model::Unknown => warn!("no crosshair found; treating the whole image as data"),
        model => info!("device model: {model}"),
    }

    let mut thermal = Thermal::new(locator);
    match thermal.ocr() {
        Ok(()) => {
            let tenths = thermal.temperature_spot().unwrap_or(0);
            info!(
                "spot temperature {}.{} degC, emissivity 0.{:02}",
                tenths / 10,
                (tenths % 10).abs(),
                thermal.emissivity().unwrap_or(0)
            );
        }
        Err(err) => warn!("OSD readout not recognized: {err}"),
    }

    thermal
        .process(args.interpolation.into(), args.quantization.into())
        .context("palette inversion failed")?;
    info!("source palette: {}", thermal.palette());

    let mut rendered = thermal
        .export(args.palette.into())
        .context("cannot render the output image")?;
    if args.crosshair {
        thermal
            .stamp_crosshair(CROSSHAIR_BORDER, CROSSHAIR_FILL, &mut rendered)
            .context("cannot restamp the crosshair")?;
    }

    let mut out = Bitmap::new(rendered.width(), rendered.height(), args.depth.into())?;
    out.blit_canvas(&rendered, 0, 0)?;
    thermascan::write_bitmap(&out, &args.output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    Ok(())
}
