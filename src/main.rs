use clap::{Parser, ValueEnum};
use engrave_tools::engrave::{DitherMode, EngravingSettings, Material, engrave_image};
use std::fs;
use std::process;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Threshold,
    ErrorDiffusion,
    Ordered,
    Halftone,
    PopArt,
    Grunge,
    LineEngraving,
    PencilSketch,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MaterialArg {
    Wood,
    Acrylic,
    Leather,
    AnodizedMetal,
    Glass,
    Custom,
}

impl From<MaterialArg> for Material {
    fn from(arg: MaterialArg) -> Self {
        match arg {
            MaterialArg::Wood => Material::Wood,
            MaterialArg::Acrylic => Material::Acrylic,
            MaterialArg::Leather => Material::Leather,
            MaterialArg::AnodizedMetal => Material::AnodizedMetal,
            MaterialArg::Glass => Material::Glass,
            MaterialArg::Custom => Material::Custom,
        }
    }
}

/// Prepare a raster image for laser engraving
#[derive(Parser)]
#[command(name = "engrave-tools", version, about)]
struct Cli {
    /// Input image (PNG, JPEG, BMP or GIF)
    input: String,

    /// Output PNG path
    output: String,

    /// Dithering algorithm (defaults to the material preset, or
    /// error-diffusion without one)
    #[arg(long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Material preset providing resolution/algorithm defaults
    #[arg(long, value_enum)]
    material: Option<MaterialArg>,

    /// Output resolution in dpi-equivalent (96-1000)
    #[arg(long)]
    resolution: Option<u32>,

    /// Brightness offset (-100 to 100)
    #[arg(long, default_value_t = 0)]
    brightness: i32,

    /// Contrast offset (-100 to 100)
    #[arg(long, default_value_t = 0)]
    contrast: i32,

    /// Invert intensity before dithering
    #[arg(long)]
    invert: bool,

    /// Cut point for the threshold algorithm
    #[arg(long, default_value_t = 128)]
    threshold_value: u8,

    /// Gray levels for error diffusion (2-16)
    #[arg(long, default_value_t = 2)]
    palette_levels: u8,

    /// Bayer matrix size for ordered dithering: 2, 4 or 8
    #[arg(long, default_value_t = 4)]
    matrix_size: u32,

    /// Dot block size for halftone (2-20)
    #[arg(long, default_value_t = 5)]
    dot_size: u32,

    /// Dot spacing for pop-art (2-20)
    #[arg(long, default_value_t = 8)]
    spacing: u32,

    /// Noise intensity for grunge (1-20)
    #[arg(long, default_value_t = 10)]
    grunge_intensity: u32,

    /// Band height for line engraving (1-10)
    #[arg(long, default_value_t = 4)]
    line_spacing: u32,

    /// Blur radius for pencil sketch (2-20)
    #[arg(long, default_value_t = 8)]
    blur_radius: u32,

    /// Stroke weight for pencil sketch (0.5-3.0)
    #[arg(long, default_value_t = 1.5)]
    stroke_weight: f32,
}

fn build_mode(algorithm: Algorithm, cli: &Cli) -> DitherMode {
    match algorithm {
        Algorithm::Threshold => DitherMode::Threshold {
            threshold: cli.threshold_value,
        },
        Algorithm::ErrorDiffusion => DitherMode::ErrorDiffusion {
            palette_levels: cli.palette_levels,
        },
        Algorithm::Ordered => DitherMode::Ordered {
            matrix_size: cli.matrix_size,
        },
        Algorithm::Halftone => DitherMode::Halftone {
            dot_size: cli.dot_size,
        },
        Algorithm::PopArt => DitherMode::PopArt {
            spacing: cli.spacing,
        },
        Algorithm::Grunge => DitherMode::Grunge {
            intensity: cli.grunge_intensity,
        },
        Algorithm::LineEngraving => DitherMode::LineEngraving {
            line_spacing: cli.line_spacing,
        },
        Algorithm::PencilSketch => DitherMode::PencilSketch {
            blur_radius: cli.blur_radius,
            stroke_weight: cli.stroke_weight,
        },
    }
}

fn build_settings(cli: &Cli) -> EngravingSettings {
    let base = cli
        .material
        .map(|m| Material::from(m).preset())
        .unwrap_or_default();

    EngravingSettings {
        mode: match cli.algorithm {
            Some(algorithm) => build_mode(algorithm, cli),
            None => base.mode,
        },
        resolution: cli.resolution.unwrap_or(base.resolution),
        brightness: cli.brightness,
        contrast: cli.contrast,
        invert: cli.invert || base.invert,
    }
}

fn main() {
    let cli = Cli::parse();

    let image_bytes = match fs::read(&cli.input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading input file '{}': {}", cli.input, e);
            process::exit(2);
        }
    };

    let settings = build_settings(&cli);

    let result = match engrave_image(&image_bytes, &settings) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error processing image: {}", e);
            process::exit(3);
        }
    };

    match fs::write(&cli.output, &result.png) {
        Ok(_) => {
            println!(
                "Successfully engraved '{}' to '{}' ({}x{})",
                cli.input, cli.output, result.width, result.height
            );
        }
        Err(e) => {
            eprintln!("Error writing output file '{}': {}", cli.output, e);
            process::exit(4);
        }
    }
}
