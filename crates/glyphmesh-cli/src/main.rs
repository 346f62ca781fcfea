//! `glyphmesh` CLI: rasterize a character set into a `registerFont` atlas.

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use glyphmesh::{
    AtlasError, AtlasResult, BuildReport, CharacterSet, FontAtlasBuilder, MalformedPolygonPolicy,
    NormalizeOptions, OutlineRasterizer, StyleOptions, write_atlas,
};
use glyphmesh::text::FontDatabase;
use glyphmesh_core::{logging, profiling};

#[derive(Parser)]
#[command(version, about = "Build a glyph mesh atlas from a font")]
struct Cli {
    /// Font name used in the output's registerFont call
    #[arg(short, long)]
    name: String,

    /// Characters to include
    #[arg(short, long, conflicts_with = "chars_file")]
    chars: Option<String>,

    /// Read the characters to include from a UTF-8 file
    #[arg(long, value_name = "PATH")]
    chars_file: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Style config file (JSON, camelCase keys); flags override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Font file; defaults to the first installed font with the padding glyphs
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Additional directories to search for default fonts (.otf, .ttf)
    #[arg(long = "font-dir", value_name = "DIR")]
    font_dirs: Vec<PathBuf>,

    /// Line segments per curve segment
    #[arg(long)]
    resolution: Option<u32>,

    /// Outline offset in em; negative thins
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<f32>,

    /// Extrusion half-depth in em
    #[arg(long)]
    extrude: Option<f32>,

    /// Bevel size in em
    #[arg(long)]
    bevel_depth: Option<f32>,

    /// Extra bevel segments
    #[arg(long)]
    bevel_resolution: Option<u32>,

    /// Glyph scale in em
    #[arg(long)]
    size: Option<f32>,

    /// Horizontal slant factor
    #[arg(long, allow_negative_numbers = true)]
    shear: Option<f32>,

    /// Glyphs placed around each character when measuring widths
    #[arg(long, value_name = "GLYPHS")]
    padding: Option<String>,

    /// Attach flat normals to every vertex
    #[arg(long)]
    normals: bool,

    /// Attach planar UVs to every vertex
    #[arg(long)]
    uvs: bool,

    /// Drop faces that are not triangles instead of keeping them
    #[arg(long)]
    strict: bool,

    /// Serve puffin profiling data on 0.0.0.0:8585
    #[arg(long)]
    profile: bool,
}

/// The step a fatal error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Arguments,
    Configure,
    ReadCharacters,
    Build,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Arguments => write!(f, "checking arguments"),
            Stage::Configure => write!(f, "reading style config"),
            Stage::ReadCharacters => write!(f, "reading character set"),
            Stage::Build => write!(f, "building atlas"),
            Stage::Write => write!(f, "writing output"),
        }
    }
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, (Stage, AtlasError)>;
}

impl<T> AtStage<T> for AtlasResult<T> {
    fn at(self, stage: Stage) -> Result<T, (Stage, AtlasError)> {
        self.map_err(|err| (stage, err))
    }
}

fn main() {
    logging::init(logging::DEFAULT_FILTER);
    let cli = Cli::parse();

    if cli.profile {
        profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp);
    }

    if let Err((stage, err)) = run(&cli) {
        eprintln!("Error {stage}: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), (Stage, AtlasError)> {
    glyphmesh::validate_font_name(&cli.name).at(Stage::Arguments)?;
    let style = style_from_cli(cli).at(Stage::Configure)?;

    let characters = match (&cli.chars, &cli.chars_file) {
        (Some(text), _) => CharacterSet::from_text(text.as_str()),
        (None, Some(path)) => CharacterSet::from_file(path).at(Stage::ReadCharacters)?,
        (None, None) => CharacterSet::ascii(),
    };
    tracing::info!(
        "Building {} characters ({} distinct)",
        characters.len(),
        characters.unique_len()
    );

    let options = NormalizeOptions {
        normals: cli.normals,
        uvs: cli.uvs,
        malformed: if cli.strict {
            MalformedPolygonPolicy::Discard
        } else {
            MalformedPolygonPolicy::Warn
        },
    };
    let builder = FontAtlasBuilder::new(rasterizer(cli, &style)).with_normalize_options(options);

    let (atlas, report) = builder
        .build_with_report(&characters, &style)
        .at(Stage::Build)?;
    profiling::finish_frame();
    summarize(&report);

    write_atlas(&cli.output, &atlas, &cli.name).at(Stage::Write)
}

fn style_from_cli(cli: &Cli) -> AtlasResult<StyleOptions> {
    let mut style = match &cli.config {
        Some(path) => StyleOptions::from_file(path)?,
        None => StyleOptions::default(),
    };

    if let Some(font) = &cli.font {
        style.font = Some(font.clone());
    }
    if let Some(resolution) = cli.resolution {
        style.resolution = resolution;
    }
    if let Some(offset) = cli.offset {
        style.offset = offset;
    }
    if let Some(extrude) = cli.extrude {
        style.extrude = extrude;
    }
    if let Some(depth) = cli.bevel_depth {
        style.bevel_depth = depth;
    }
    if let Some(resolution) = cli.bevel_resolution {
        style.bevel_resolution = resolution;
    }
    if let Some(size) = cli.size {
        style.size = size;
    }
    if let Some(shear) = cli.shear {
        style.shear = shear;
    }
    if let Some(padding) = &cli.padding {
        style.width_padding_glyphs = padding.clone();
    }

    Ok(style)
}

fn rasterizer(cli: &Cli, style: &StyleOptions) -> OutlineRasterizer {
    // An explicit font file never consults the database.
    if style.font.is_some() {
        return OutlineRasterizer::with_database(FontDatabase::empty());
    }

    let mut rasterizer = OutlineRasterizer::new();
    for dir in &cli.font_dirs {
        if !dir.is_dir() {
            tracing::warn!("Font directory {} does not exist", dir.display());
            continue;
        }
        rasterizer.load_fonts_dir(dir);
    }
    rasterizer
}

fn summarize(report: &BuildReport) {
    let unprintable: String = report.unprintable().collect();
    if !unprintable.is_empty() {
        tracing::info!("Unprintable characters: {:?}", unprintable);
    }
    let unmeasured: String = report.unmeasured().collect();
    if !unmeasured.is_empty() {
        tracing::warn!("Widths recorded as zero for {:?}", unmeasured);
    }
    let malformed = report.malformed_faces();
    if malformed > 0 {
        tracing::warn!("{} faces were not triangles", malformed);
    }
}
