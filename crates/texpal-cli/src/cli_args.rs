//! CLI argument definitions for the texpal command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};

use texpal_spec::GridConfig;

/// Texpal - pack simple PBR materials into palette textures
#[derive(Parser)]
#[command(name = "texpal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Validate a palette document (and optionally mesh documents)
    Validate {
        /// Path to the palette JSON file
        #[arg(short, long)]
        palette: String,

        /// Mesh JSON files to validate alongside the palette
        #[arg(short, long)]
        mesh: Vec<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Build the three palette textures and their metadata
    Build {
        /// Path to the palette JSON file
        #[arg(short, long)]
        palette: String,

        /// Output directory (default: the palette file's directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Move mesh faces into the cell of a sub-material
    Assign {
        /// Path to the palette JSON file
        #[arg(short, long)]
        palette: String,

        /// Path to the mesh JSON file
        #[arg(short, long)]
        mesh: String,

        /// Target sub-material slot
        #[arg(short, long)]
        slot: usize,

        /// Faces to assign (default: the mesh's selected faces)
        #[arg(short, long, value_delimiter = ',')]
        faces: Option<Vec<usize>>,

        /// Where to write the updated mesh (default: overwrite the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Select the mesh faces that sit in a sub-material's cell
    Select {
        /// Path to the palette JSON file
        #[arg(short, long)]
        palette: String,

        /// Path to the mesh JSON file
        #[arg(short, long)]
        mesh: String,

        /// Sub-material slot
        #[arg(short, long)]
        slot: usize,

        /// Where to write the updated mesh (default: overwrite the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Merge the materials of several meshes into one palette
    Combine {
        /// Mesh JSON files to combine
        #[arg(short, long, required = true)]
        mesh: Vec<String>,

        /// Name of the new palette
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        grid: GridArgs,

        /// Output directory for the palette, meshes and textures
        #[arg(short, long, default_value = ".")]
        out_dir: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Edit a palette's sub-material list
    Submat {
        #[command(subcommand)]
        action: SubmatAction,
    },

    /// Show a palette's grid capacity, texture size and cell layout
    Inspect {
        /// Path to the palette JSON file
        #[arg(short, long)]
        palette: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Grid layout options for a new palette.
#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct GridArgs {
    /// Number of cell rows
    #[arg(long, default_value_t = 4)]
    pub rows: u32,

    /// Number of cell columns
    #[arg(long, default_value_t = 4)]
    pub columns: u32,

    /// Cell edge length in pixels
    #[arg(long, default_value_t = 4)]
    pub cell_size: u32,

    /// Emission strength stored as emissive alpha 1.0
    #[arg(long, default_value_t = 1.0)]
    pub max_emission: f64,

    /// Fraction of a cell left empty around first-time UV assignments
    #[arg(long, default_value_t = 0.0)]
    pub uv_margin: f64,
}

impl GridArgs {
    pub fn to_grid(&self) -> GridConfig {
        GridConfig::new(self.rows, self.columns, self.cell_size)
            .with_max_emission(self.max_emission)
            .with_uv_margin(self.uv_margin)
    }
}

impl Commands {
    /// Subcommand name used in JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Validate { .. } => "validate",
            Commands::Build { .. } => "build",
            Commands::Assign { .. } => "assign",
            Commands::Select { .. } => "select",
            Commands::Combine { .. } => "combine",
            Commands::Submat { .. } => "submat",
            Commands::Inspect { .. } => "inspect",
        }
    }

    /// Whether `--json` was given.
    pub fn json_output(&self) -> bool {
        match self {
            Commands::Validate { json, .. }
            | Commands::Build { json, .. }
            | Commands::Assign { json, .. }
            | Commands::Select { json, .. }
            | Commands::Combine { json, .. }
            | Commands::Inspect { json, .. } => *json,
            Commands::Submat { action } => match action {
                SubmatAction::Add { json, .. } => *json,
                SubmatAction::Remove(args)
                | SubmatAction::MoveUp(args)
                | SubmatAction::MoveDown(args) => args.json,
            },
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum SubmatAction {
    /// Append a sub-material with default parameters
    Add {
        /// Path to the palette JSON file
        #[arg(short, long)]
        palette: String,

        /// Sub-material name (default: "Mat N")
        #[arg(short, long)]
        name: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Remove a sub-material; later slots shift down
    Remove(SlotEditArgs),

    /// Swap a sub-material with the one before it
    MoveUp(SlotEditArgs),

    /// Swap a sub-material with the one after it
    MoveDown(SlotEditArgs),
}

/// Arguments shared by slot-changing sub-material edits.
#[derive(Args)]
pub(crate) struct SlotEditArgs {
    /// Path to the palette JSON file
    #[arg(short, long)]
    pub palette: String,

    /// Slot to edit
    #[arg(short, long)]
    pub slot: usize,

    /// Mesh JSON files whose placed faces follow the edit
    #[arg(short, long)]
    pub mesh: Vec<String>,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,
}
