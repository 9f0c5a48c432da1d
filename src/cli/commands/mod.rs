//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments, prompting for missing values in
//!    interactive mode
//! 2. Calls the domain modules to do the actual work
//! 3. Formats and displays output (human text or JSON)

mod completion;
mod config_cmd;
mod dct;
mod hamming;
mod project;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use dct::{image as dct_image, vector as dct_vector};
pub use hamming::{check as hamming_check, decode as hamming_decode, encode as hamming_encode, info as hamming_info};
pub use project::project;

use super::args::{Command, ConfigAction, DctAction, HammingAction};
use super::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Project {
            scene,
            support,
            a,
            b,
            c,
            centers,
            svg,
            no_labels,
        } => project::project(ctx, scene, support, a, b, c, centers, svg, no_labels),

        Command::Hamming { action } => match action {
            HammingAction::Encode { parity_bits, data } => {
                hamming::encode(ctx, parity_bits, data)
            }
            HammingAction::Decode {
                parity_bits,
                word,
                flip,
            } => hamming::decode(ctx, parity_bits, word, flip),
            HammingAction::Check { parity_bits, word } => hamming::check(ctx, parity_bits, word),
            HammingAction::Info { parity_bits } => hamming::info(ctx, parity_bits),
        },

        Command::Dct { action } => match action {
            DctAction::Vector {
                values,
                demo,
                matrix,
            } => dct::vector(ctx, values, demo, matrix),
            DctAction::Image {
                input,
                keep,
                output,
                diff,
                coefficients,
                ascii,
            } => dct::image(ctx, input, keep, output, diff, coefficients, ascii),
        },

        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },

        Command::Completion { shell } => completion::completion(shell),
    }
}
