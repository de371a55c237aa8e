//! Spongegen CLI - procedural Menger sponge and terrain meshes.
//!
//! Builds a mesh with one of the generators and writes it to disk as OBJ,
//! raw GPU buffers, or (for terrain) a 16-bit PNG heightmap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use spongegen::export::{
    export_heightfield_png, export_mesh_obj, export_mesh_raw, expected_file_sizes,
    PngExportOptions,
};
use spongegen::mesh::MeshBuffer;
use spongegen::noise::NoiseSeed;
use spongegen::pipeline::{MeshGenerator, MeshSource};
use spongegen::sponge::{self, SpongeBuilder, SpongeConfig};
use spongegen::terrain::{self, TerrainBuilder, TerrainConfig, TerrainNormals};

/// Highest sponge level the CLI accepts.
const MAX_LEVEL: u32 = 7;
/// Accepted terrain grid sizes.
const SIZE_RANGE: std::ops::RangeInclusive<u32> = 2..=8192;

/// Procedural Menger sponge and heightfield terrain generator.
#[derive(Parser)]
#[command(name = "spongegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Menger sponge mesh.
    Sponge {
        /// Subdivision level (levels 0 and 1 are a single cube).
        #[arg(short, long, default_value = "3")]
        level: u32,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "sponge")]
        name: String,

        /// Export format.
        #[arg(short, long, default_value = "obj")]
        format: MeshFormat,

        /// Build on a single thread.
        #[arg(long)]
        sequential: bool,

        /// JSON file with a sponge configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a noise-driven terrain mesh or heightmap.
    Terrain {
        /// Grid resolution along each axis.
        #[arg(short, long, default_value = "64")]
        size: u32,

        /// Lattice seed for reproducible generation (random if omitted).
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "terrain")]
        name: String,

        /// Export format.
        #[arg(short, long, default_value = "obj")]
        format: TerrainFormat,

        /// Number of fBm octaves.
        #[arg(long)]
        octaves: Option<u32>,

        /// Amplitude of the first octave.
        #[arg(long)]
        amplitude: Option<f32>,

        /// Frequency of the first octave.
        #[arg(long)]
        frequency: Option<f32>,

        /// Amplitude decay per octave.
        #[arg(long)]
        persistence: Option<f32>,

        /// Frequency multiplier per octave.
        #[arg(long)]
        lacunarity: Option<f32>,

        /// Vertical offset added to every height.
        #[arg(long, allow_hyphen_values = true)]
        base_height: Option<f32>,

        /// Normal generation mode.
        #[arg(long)]
        normals: Option<NormalsMode>,

        /// Sample heights on a single thread.
        #[arg(long)]
        sequential: bool,

        /// JSON file with a terrain configuration; flags override it.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Display vertex, index and byte counts for a level and size.
    Info {
        /// Sponge subdivision level.
        #[arg(short, long, default_value = "4")]
        level: u32,

        /// Terrain grid size.
        #[arg(short, long, default_value = "256")]
        size: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MeshFormat {
    /// Wavefront OBJ text.
    Obj,
    /// Little-endian position, normal and index buffers.
    Raw,
}

#[derive(Clone, Copy, ValueEnum)]
enum TerrainFormat {
    /// Wavefront OBJ text.
    Obj,
    /// Little-endian position, normal and index buffers.
    Raw,
    /// 16-bit grayscale heightmap.
    Png,
}

#[derive(Clone, Copy, ValueEnum)]
enum NormalsMode {
    /// Normals from the height gradient.
    Slope,
    /// Constant +X normals.
    Placeholder,
}

impl From<NormalsMode> for TerrainNormals {
    fn from(mode: NormalsMode) -> Self {
        match mode {
            NormalsMode::Slope => TerrainNormals::Slope,
            NormalsMode::Placeholder => TerrainNormals::Placeholder,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sponge {
            level,
            output,
            name,
            format,
            sequential,
            config,
        } => {
            run_sponge(level, output, name, format, sequential, config);
        }
        Commands::Terrain {
            size,
            seed,
            output,
            name,
            format,
            octaves,
            amplitude,
            frequency,
            persistence,
            lacunarity,
            base_height,
            normals,
            sequential,
            config,
        } => {
            let mut terrain_config = match config {
                Some(path) => TerrainConfig::from_json_file(&path).unwrap_or_else(|e| {
                    fail(&format!("Error loading config {}: {}", path.display(), e))
                }),
                None => TerrainConfig::default(),
            };
            if let Some(seed) = seed {
                terrain_config.seed = NoiseSeed::Fixed(seed);
            }
            if let Some(octaves) = octaves {
                terrain_config.fbm.octaves = octaves;
            }
            if let Some(amplitude) = amplitude {
                terrain_config.fbm.amplitude = amplitude;
            }
            if let Some(frequency) = frequency {
                terrain_config.fbm.frequency = frequency;
            }
            if let Some(persistence) = persistence {
                terrain_config.fbm.persistence = persistence;
            }
            if let Some(lacunarity) = lacunarity {
                terrain_config.fbm.lacunarity = lacunarity;
            }
            if let Some(base_height) = base_height {
                terrain_config.base_height = base_height;
            }
            if let Some(normals) = normals {
                terrain_config.normals = normals.into();
            }
            if sequential {
                terrain_config.parallel = false;
            }
            run_terrain(size, terrain_config, output, name, format);
        }
        Commands::Info { level, size } => {
            run_info(level, size);
        }
    }
}

/// Prints `message` to stderr and exits with status 1.
fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn run_sponge(
    level: u32,
    output: PathBuf,
    name: String,
    format: MeshFormat,
    sequential: bool,
    config: Option<PathBuf>,
) {
    if level > MAX_LEVEL {
        fail(&format!("Error: Level must be at most {}", MAX_LEVEL));
    }

    let mut sponge_config = match config {
        Some(path) => SpongeConfig::from_json_file(&path).unwrap_or_else(|e| {
            fail(&format!("Error loading config {}: {}", path.display(), e))
        }),
        None => SpongeConfig::default(),
    };
    if sequential {
        sponge_config.parallel = false;
    }

    println!("Spongegen - Menger Sponge");
    println!("=========================");
    println!("Level: {}", level);
    println!("Cubes: {}", sponge::cube_count(level));
    println!("Output: {}", output.display());

    let start = Instant::now();
    let mut source = MeshSource::new(SpongeBuilder::new(sponge_config));
    let snapshot = source.rebuild(level);
    println!(
        "Generated {} vertices, {} triangles in {:.2?}",
        snapshot.mesh.vertex_count(),
        snapshot.mesh.triangle_count(),
        start.elapsed()
    );

    export_mesh(&snapshot.mesh, &output, &name, format);
    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
}

fn run_terrain(
    size: u32,
    mut config: TerrainConfig,
    output: PathBuf,
    name: String,
    format: TerrainFormat,
) {
    if !SIZE_RANGE.contains(&size) {
        fail(&format!(
            "Error: Size must be between {} and {}",
            SIZE_RANGE.start(),
            SIZE_RANGE.end()
        ));
    }

    // Pin a random seed up front so it can be reported and replayed.
    let seed = config.seed.resolve();
    config.seed = NoiseSeed::Fixed(seed);

    println!("Spongegen - Heightfield Terrain");
    println!("===============================");
    println!("Size: {}x{}", size, size);
    println!("Seed: {}", seed);
    println!("Octaves: {}", config.fbm.octaves);
    println!("Output: {}", output.display());

    let start = Instant::now();
    let builder = TerrainBuilder::new(config);

    match format {
        TerrainFormat::Png => {
            let field = builder.build_heightfield(size);
            if let Some((min_h, max_h)) = field.height_range() {
                println!("Height range: [{:.4}, {:.4}]", min_h, max_h);
            }
            println!("Generated heightfield in {:.2?}", start.elapsed());

            create_output_dir(&output);
            let path = output.join(format!("{}.png", name));
            let options = PngExportOptions::auto_range(&field);
            if let Err(e) = export_heightfield_png(&field, &path, &options) {
                fail(&format!("Error exporting PNG: {}", e));
            }
            println!("  Exported heightmap: {}", path.display());
        }
        TerrainFormat::Obj | TerrainFormat::Raw => {
            let mut source = MeshSource::new(builder);
            let snapshot = source.rebuild(size);
            println!(
                "Generated {} vertices, {} triangles in {:.2?}",
                snapshot.mesh.vertex_count(),
                snapshot.mesh.triangle_count(),
                start.elapsed()
            );
            let mesh_format = match format {
                TerrainFormat::Raw => MeshFormat::Raw,
                _ => MeshFormat::Obj,
            };
            export_mesh(&snapshot.mesh, &output, &name, mesh_format);
        }
    }

    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
}

fn create_output_dir(output: &Path) {
    if let Err(e) = std::fs::create_dir_all(output) {
        fail(&format!("Error creating output directory: {}", e));
    }
}

fn export_mesh(mesh: &MeshBuffer, output: &Path, name: &str, format: MeshFormat) {
    println!("\nExporting mesh...");
    let export_start = Instant::now();
    create_output_dir(output);

    match format {
        MeshFormat::Obj => {
            let path = output.join(format!("{}.obj", name));
            if let Err(e) = export_mesh_obj(mesh, &path) {
                fail(&format!("Error exporting OBJ: {}", e));
            }
            println!("  Exported OBJ: {}", path.display());
        }
        MeshFormat::Raw => match export_mesh_raw(mesh, output, name) {
            Ok(files) => {
                println!("  Exported positions: {}", files.positions.display());
                println!("  Exported normals:   {}", files.normals.display());
                println!("  Exported indices:   {}", files.indices.display());
            }
            Err(e) => fail(&format!("Error exporting RAW: {}", e)),
        },
    }

    println!("Export completed in {:.2?}", export_start.elapsed());
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

fn print_counts(generator: &dyn MeshGenerator, param: u32) {
    let (vertices, indices) = generator.expected_counts(param);
    let (positions, normals, index_bytes) = expected_file_sizes(vertices, indices);
    let total = positions + normals + index_bytes;

    println!("{} ({}={})", generator.name(), generator.id().parameter_name(), param);
    println!("  Vertices:  {:>14}", vertices);
    println!("  Indices:   {:>14}", indices);
    println!("  Triangles: {:>14}", indices / 3);
    println!("  Positions: {:>14} bytes ({:.2} MB)", positions, megabytes(positions));
    println!("  Normals:   {:>14} bytes ({:.2} MB)", normals, megabytes(normals));
    println!("  Indices:   {:>14} bytes ({:.2} MB)", index_bytes, megabytes(index_bytes));
    println!("  Total:     {:>14} bytes ({:.2} MB)", total, megabytes(total));
}

fn run_info(level: u32, size: u32) {
    println!("Spongegen - Mesh Size Info");
    println!("==========================");
    println!();

    print_counts(&SpongeBuilder::default(), level);
    println!("  Cubes:     {:>14}", sponge::cube_count(level));
    println!("  Growth:    36 * 20^(level-1) vertices");
    if level > MAX_LEVEL {
        println!("  Note:      above the CLI build limit of {}", MAX_LEVEL);
    }
    println!();

    print_counts(&TerrainBuilder::default(), size);
    println!("  Quads:     {:>14}", terrain::triangle_count(size) / 2);
    println!("  Growth:    size^2 vertices, 6 (size-1)^2 indices");
    if !SIZE_RANGE.contains(&size) {
        println!(
            "  Note:      outside the CLI size range {}..={}",
            SIZE_RANGE.start(),
            SIZE_RANGE.end()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sponge() {
        let cli = Cli::try_parse_from([
            "spongegen", "sponge", "-l", "4", "--format", "raw", "--sequential", "-n", "menger",
        ])
        .unwrap();
        match cli.command {
            Commands::Sponge {
                level,
                name,
                format,
                sequential,
                config,
                ..
            } => {
                assert_eq!(level, 4);
                assert_eq!(name, "menger");
                assert!(matches!(format, MeshFormat::Raw));
                assert!(sequential);
                assert!(config.is_none());
            }
            _ => panic!("Expected the sponge subcommand"),
        }
    }

    #[test]
    fn test_parse_terrain_with_seed_and_negative_base_height() {
        let cli = Cli::try_parse_from([
            "spongegen",
            "terrain",
            "-s",
            "8",
            "--seed",
            "3",
            "--base-height",
            "-2.5",
            "--normals",
            "placeholder",
            "--format",
            "png",
            "--octaves",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Terrain {
                size,
                seed,
                base_height,
                normals,
                format,
                octaves,
                amplitude,
                ..
            } => {
                assert_eq!(size, 8);
                assert_eq!(seed, Some(3));
                assert_eq!(base_height, Some(-2.5));
                assert!(matches!(normals, Some(NormalsMode::Placeholder)));
                assert!(matches!(format, TerrainFormat::Png));
                assert_eq!(octaves, Some(2));
                assert_eq!(amplitude, None);
            }
            _ => panic!("Expected the terrain subcommand"),
        }
    }

    #[test]
    fn test_parse_terrain_defaults() {
        let cli = Cli::try_parse_from(["spongegen", "terrain"]).unwrap();
        match cli.command {
            Commands::Terrain {
                size,
                seed,
                format,
                sequential,
                ..
            } => {
                assert_eq!(size, 64);
                assert_eq!(seed, None);
                assert!(matches!(format, TerrainFormat::Obj));
                assert!(!sequential);
            }
            _ => panic!("Expected the terrain subcommand"),
        }
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["spongegen", "info", "-l", "6", "-s", "1024"]).unwrap();
        match cli.command {
            Commands::Info { level, size } => {
                assert_eq!(level, 6);
                assert_eq!(size, 1024);
            }
            _ => panic!("Expected the info subcommand"),
        }
    }

    #[test]
    fn test_normals_mode_conversion() {
        assert_eq!(TerrainNormals::from(NormalsMode::Slope), TerrainNormals::Slope);
        assert_eq!(TerrainNormals::from(NormalsMode::Placeholder), TerrainNormals::Placeholder);
    }
}
