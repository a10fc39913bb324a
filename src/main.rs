use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::IVec2;

use conquest::assets::{load_image, save_image};
use conquest::camera::{clamp_camera, visible_cells};
use conquest::config::GameConfig;
use conquest::manifest::SheetManifest;
use conquest::slicer::{SliceOptions, extract_regions_with_options};
use conquest::{DEFAULT_CONFIG_FILE, DEFAULT_REGION_PREFIX, SpriteSheet};

/// Sprite-sheet slicing and tile-map camera tools.
#[derive(Parser)]
#[command(name = "conquest", version, about)]
struct Cli {
    /// Config file (JSON). Missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find every opaque region of a sheet
    Slice {
        image: PathBuf,

        /// Write a named manifest here
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Name prefix for regions
        #[arg(long, default_value = DEFAULT_REGION_PREFIX)]
        prefix: String,

        /// Alpha at or below this counts as transparent
        #[arg(long, default_value_t = 0)]
        alpha_threshold: u8,
    },

    /// Cut one named sprite out of a sheet
    Crop {
        image: PathBuf,
        manifest: PathBuf,
        name: String,

        #[arg(short, long)]
        out: PathBuf,
    },

    /// Slice every sheet under the configured assets directory
    Scan {
        /// Write `<sheet>.json` manifests next to each sheet
        #[arg(long)]
        write_manifests: bool,
    },

    /// Clamp a camera position against the configured map
    Camera {
        #[arg(long, allow_negative_numbers = true)]
        x: i32,
        #[arg(long, allow_negative_numbers = true)]
        y: i32,

        /// Overrides the configured tile size
        #[arg(long)]
        tile_size: Option<i32>,

        /// Viewport as WIDTHxHEIGHT; overrides the configured viewport
        #[arg(long, value_parser = parse_size)]
        viewport: Option<IVec2>,
    },
}

fn parse_size(s: &str) -> Result<IVec2, String> {
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<i32>().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse::<i32>().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(IVec2::new(w, h))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .parse_default_env()
        .init();

    let config = GameConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Slice { image, out, prefix, alpha_threshold } => {
            let sheet = load_image(&image)?;
            let options = SliceOptions::default().with_alpha_threshold(alpha_threshold);
            let rects = extract_regions_with_options(&sheet, options);

            for (i, r) in rects.iter().enumerate() {
                println!("{prefix}_{i}\t{}\t{}x{}", r, r.width(), r.height());
            }
            log::info!("{}: {} regions", image.display(), rects.len());

            if let Some(out) = out {
                let name = image.file_name().map(|n| n.to_string_lossy().into_owned());
                SheetManifest::from_rects(name, &rects, &prefix).save(&out)?;
                log::info!("wrote {}", out.display());
            }
        }

        Command::Crop { image, manifest, name, out } => {
            let manifest = SheetManifest::load(&manifest)?;
            let sheet = SpriteSheet::from_manifest(load_image(&image)?, &manifest)?;
            let sprite = sheet.get_sprite(&name)?;
            save_image(&sprite, &out)?;
            log::info!("wrote '{name}' ({}x{}) to {}", sprite.width(), sprite.height(), out.display());
        }

        Command::Scan { write_manifests } => {
            let resolver = config.resolver()?;
            let sheets = resolver.find_sheets();
            log::info!("scanning {} sheets under {}", sheets.len(), resolver.assets_dir().display());

            for path in sheets {
                let img = match load_image(&path) {
                    Ok(img) => img,
                    Err(e) => {
                        log::warn!("{e}");
                        continue;
                    }
                };
                let rects = extract_regions_with_options(&img, SliceOptions::default());
                println!("{}\t{}", path.display(), rects.len());

                if write_manifests {
                    let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                    SheetManifest::from_rects(name, &rects, DEFAULT_REGION_PREFIX)
                        .save(path.with_extension("json"))?;
                }
            }
        }

        Command::Camera { x, y, tile_size, viewport } => {
            let mut map = config.map_geometry();
            if let Some(ts) = tile_size {
                map.tile_size = ts;
            }
            let viewport = viewport
                .unwrap_or(IVec2::new(config.view.viewport_width, config.view.viewport_height));

            let camera = clamp_camera(IVec2::new(x, y), viewport, &map);
            let cells = visible_cells(camera, viewport, &map);
            println!("camera {} {}", camera.x, camera.y);
            println!("cells {} ({} in map)", cells.len(), cells.iter().filter(|c| c.in_map).count());
        }
    }

    Ok(())
}
