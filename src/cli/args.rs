//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--json`: Machine-readable output
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::projection::Vec3;

/// Linlab - central projection, Hamming codes, and DCT compression
#[derive(Parser, Debug)]
#[command(name = "linlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND the config
    ///   default (when present) or a stdin TTY check allows it
    pub fn interactive(&self, config_default: Option<bool>) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else if let Some(default) = config_default {
            default
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Parse an 'x,y,z' triple into a [`Vec3`].
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected 'x,y,z', got '{}'", s));
    }
    let mut values = [0.0f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid number '{}' in '{}'", part, s))?;
    }
    Ok(Vec3::from(values))
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project a parallelepiped onto the xy-plane
    #[command(
        name = "project",
        long_about = "Project a parallelepiped onto the xy-plane through a projection \
            center.\n\n\
            The solid is given by a support vector and three spanning vectors, either \
            inline or via a TOML scene file, and must lie strictly inside the first \
            octant. Each projection center must sit above the solid so the solid lies \
            between the center and the image plane z = 0. The projected corners are \
            printed per center, and --svg renders a drawing with direction-coded edges.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Project the classic demo solid through one center
    linlab project --support 1,1,1 --a 1,2,3 --b 3,1,3 --c 3,2,1 --center 10,5,20

    # Compare two centers and render drawings
    linlab project --support 1,1,1 --a 1,2,3 --b 3,1,3 --c 3,2,1 \\
        --center 10,5,20 --center 1,4,20 --svg projection.svg

    # Everything from a scene file
    linlab project --scene scene.toml --svg out.svg"
    )]
    Project {
        /// Scene file (TOML) describing the solid and its centers
        #[arg(long, value_name = "FILE")]
        scene: Option<PathBuf>,

        /// Support vector as 'x,y,z'
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3)]
        support: Option<Vec3>,

        /// Spanning vector a as 'x,y,z'
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3)]
        a: Option<Vec3>,

        /// Spanning vector b as 'x,y,z'
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3)]
        b: Option<Vec3>,

        /// Spanning vector c as 'x,y,z'
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3)]
        c: Option<Vec3>,

        /// Projection center as 'x,y,z'; may be given several times
        #[arg(long = "center", value_name = "X,Y,Z", value_parser = parse_vec3)]
        centers: Vec<Vec3>,

        /// Write an SVG drawing here (indexed when several centers are given)
        #[arg(long, value_name = "PATH")]
        svg: Option<PathBuf>,

        /// Skip corner labels in the SVG
        #[arg(long)]
        no_labels: bool,
    },

    /// Hamming code operations
    Hamming {
        #[command(subcommand)]
        action: HammingAction,
    },

    /// Discrete cosine transform operations
    Dct {
        #[command(subcommand)]
        action: DctAction,
    },

    /// Get, set, or list configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Hamming code subcommands.
#[derive(Subcommand, Debug)]
pub enum HammingAction {
    /// Encode a data word
    #[command(after_help = "\
WORKFLOW EXAMPLES:
    # Encode four data bits with the (7, 4) code
    linlab hamming encode -m 3 --data 1011

    # Let the tool prompt for the data word
    linlab hamming encode -m 3")]
    Encode {
        /// Number of parity bits m; the code is (2^m - 1, 2^m - 1 - m)
        #[arg(short = 'm', long, value_name = "M")]
        parity_bits: usize,

        /// Data word (prompted for when omitted in interactive mode)
        #[arg(long, value_name = "BITS")]
        data: Option<String>,
    },

    /// Decode a received word, correcting a single flipped bit
    #[command(after_help = "\
WORKFLOW EXAMPLES:
    # Decode a clean codeword
    linlab hamming decode -m 3 --word 1010101

    # Flip a bit first to watch the correction
    linlab hamming decode -m 3 --word 1010101 --flip 2")]
    Decode {
        /// Number of parity bits m
        #[arg(short = 'm', long, value_name = "M")]
        parity_bits: usize,

        /// Received word (prompted for when omitted in interactive mode)
        #[arg(long, value_name = "BITS")]
        word: Option<String>,

        /// Flip the bit at this index (0-based from the left) before decoding
        #[arg(long, value_name = "INDEX")]
        flip: Option<usize>,
    },

    /// Check whether a word is a valid codeword
    Check {
        /// Number of parity bits m
        #[arg(short = 'm', long, value_name = "M")]
        parity_bits: usize,

        /// Word to check (prompted for when omitted in interactive mode)
        #[arg(long, value_name = "BITS")]
        word: Option<String>,
    },

    /// Show code parameters and the generator/check matrices
    Info {
        /// Number of parity bits m
        #[arg(short = 'm', long, value_name = "M")]
        parity_bits: usize,
    },
}

/// DCT subcommands.
#[derive(Subcommand, Debug)]
pub enum DctAction {
    /// Transform a sample vector and reconstruct it
    #[command(after_help = "\
WORKFLOW EXAMPLES:
    # Transform a vector
    linlab dct vector --values 0,10,20,30,40,50,60,70

    # Run the built-in demonstration vectors, showing the matrix
    linlab dct vector --demo --matrix")]
    Vector {
        /// Comma-separated samples
        #[arg(long, value_name = "V1,V2,...", conflicts_with = "demo")]
        values: Option<String>,

        /// Transform the built-in demonstration vectors instead
        #[arg(long)]
        demo: bool,

        /// Print the transformation matrix
        #[arg(long)]
        matrix: bool,
    },

    /// Compress a grayscale PGM image via coefficient truncation
    #[command(after_help = "\
WORKFLOW EXAMPLES:
    # Keep half the coefficients
    linlab dct image photo.pgm --keep 50

    # Also write the difference image and the log-scaled spectrum
    linlab dct image photo.pgm --keep 25 --output small.pgm \\
        --diff diff.pgm --coefficients spectrum.pgm")]
    Image {
        /// Input PGM image (plain P2 or binary P5)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Percentage of coefficients to keep (0-100)
        #[arg(long, value_name = "PERCENT")]
        keep: Option<f64>,

        /// Write the reconstructed image here
        /// (default: '<input>-reconstructed.pgm')
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Write the absolute difference image here
        #[arg(long, value_name = "PATH")]
        diff: Option<PathBuf>,

        /// Write the log-scaled coefficient image here
        #[arg(long, value_name = "PATH")]
        coefficients: Option<PathBuf>,

        /// Write plain-text (P2) PGM output instead of binary (P5)
        #[arg(long)]
        ascii: bool,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print a configuration value
    Get {
        /// Key, e.g. 'default-keep-ratio' or 'svg.width'
        key: String,
    },

    /// Set a configuration value in the user config file
    Set {
        /// Key, e.g. 'default-keep-ratio' or 'svg.width'
        key: String,
        /// New value
        value: String,
    },

    /// List all configuration values
    List,
}

/// Supported completion shells.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
