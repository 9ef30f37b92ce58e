//! Softraster command line: render an OBJ mesh to a BMP file

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use softraster::rasterizer::{BandedGradient, Color, FlatShader, PolygonMode, RenderConfig, Texture, TextureShader, Vec3};
use softraster::{load_config, save_config, RenderError, RenderSession, VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShaderKind {
    /// Horizontal banded gradient
    Banded,
    /// Draw color lit by face intensity
    Flat,
    /// Texture lit by face intensity (checkerboard without --texture)
    Texture,
}

#[derive(Parser)]
#[command(version, about = "Render an OBJ mesh to a 24-bit BMP")]
struct Args {
    /// Mesh to render
    mesh: PathBuf,
    #[arg(short, long, default_value = "out.bmp")]
    output: PathBuf,
    /// RON render config; command line flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Added to every vertex, as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    translate: Option<Vec3>,
    /// Applied after translation, as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    scale: Option<Vec3>,
    #[arg(long, value_enum, default_value_t = ShaderKind::Banded)]
    shader: ShaderKind,
    /// Image for the texture shader
    #[arg(long)]
    texture: Option<PathBuf>,
    /// Fan-triangulate faces with more than three vertices
    #[arg(long)]
    fan: bool,
    /// Write the effective config as RON
    #[arg(long)]
    save_config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("'{}': {}", p, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got '{}'", s)),
    }
}

/// Prints log records to stderr as `[LEVEL] message`
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool) {
    if let Err(e) = log::set_logger(&LOGGER) {
        eprintln!("Logger already set: {}", e);
        return;
    }
    log::set_max_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info });
}

fn build_config(args: &Args) -> Result<RenderConfig, RenderError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(translate) = args.translate {
        config.translate = translate;
    }
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if args.fan {
        config.polygon_mode = PolygonMode::Fan;
    }

    Ok(config)
}

fn load_texture(args: &Args) -> Result<Texture, RenderError> {
    match &args.texture {
        Some(path) => Texture::from_file(path),
        None => {
            log::info!("No --texture given, using checkerboard");
            Ok(Texture::checkerboard(64, 64, Color::WHITE, Color::new(128, 128, 128)))
        }
    }
}

fn run(args: &Args) -> Result<(), RenderError> {
    let config = build_config(args)?;
    if let Some(path) = &args.save_config {
        save_config(&config, path)?;
        println!("Saved config to {}", path.display());
    }

    let mut session = RenderSession::new(config)?;

    let stats = match args.shader {
        ShaderKind::Texture => {
            let texture = load_texture(args)?;
            session.load_obj(&args.mesh, &TextureShader { texture: &texture })?
        }
        ShaderKind::Flat => {
            let shader = FlatShader(session.draw_color());
            session.load_obj(&args.mesh, &shader)?
        }
        ShaderKind::Banded => session.load_obj(&args.mesh, &BandedGradient)?,
    };

    println!(
        "Drew {} faces ({} culled), {} pixels",
        stats.faces_drawn, stats.faces_culled, stats.pixels_written
    );

    session.finish(&args.output)?;
    println!("Saved {}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("=== Softraster v{} ===", VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1,-2.5, 3"), Ok(Vec3::new(1.0, -2.5, 3.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,a,3").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "softraster", "mesh.obj", "--width", "100", "--translate", "-1,0,0", "--fan",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 480);
        assert_eq!(config.translate, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(config.polygon_mode, PolygonMode::Fan);
    }

    #[test]
    fn test_texture_falls_back_to_checkerboard() {
        let args = Args::parse_from(["softraster", "m.obj", "--shader", "texture"]);
        let texture = load_texture(&args).unwrap();
        assert_eq!((texture.width, texture.height), (64, 64));
        assert_eq!(texture.sample(0.0, 0.0), Color::WHITE);
        assert_eq!(texture.sample(4.5 / 64.0, 0.0), Color::new(128, 128, 128));
    }

    #[test]
    fn test_missing_texture_file_is_error() {
        let args = Args::parse_from(["softraster", "m.obj", "--shader", "texture", "--texture", "/nonexistent/t.png"]);
        assert!(matches!(load_texture(&args), Err(RenderError::ImageError(_))));
    }
}
