//! hamming command - Hamming code encoding, decoding, and inspection

use anyhow::{Context as _, Result};
use serde_json::json;

use crate::cli::Context;
use crate::coding::HammingCode;
use crate::core::types::Bits;
use crate::ui::{output, prompts};

/// Label column width for the aligned human-readable output.
const LABEL_WIDTH: usize = 25;

/// Encode a data word.
pub fn encode(ctx: &Context, parity_bits: usize, data: Option<String>) -> Result<()> {
    let code = HammingCode::new(parity_bits)?;
    output::print(format!("constructed {}", code), ctx.verbosity());

    let data = resolve_bits(
        ctx,
        data,
        &format!("Enter a data word with {} bits", code.data_length()),
        code.data_length(),
    )?;
    let encoded = code.encode(&data)?;

    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "code": code_json(&code),
                "data": data,
                "encoded": encoded,
            }))?
        );
    } else {
        output::print(
            format!("{:<LABEL_WIDTH$} {}", "Data word:", data),
            ctx.verbosity(),
        );
        println!("{}", encoded);
    }
    Ok(())
}

/// Decode a received word, optionally flipping a bit first.
pub fn decode(
    ctx: &Context,
    parity_bits: usize,
    word: Option<String>,
    flip: Option<usize>,
) -> Result<()> {
    let code = HammingCode::new(parity_bits)?;
    output::print(format!("constructed {}", code), ctx.verbosity());

    let mut received = resolve_bits(
        ctx,
        word,
        &format!("Enter a received word with {} bits", code.codeword_length()),
        code.codeword_length(),
    )?;

    let flip = match flip {
        Some(index) => Some(index),
        // Mirror the interactive flow: offer to break the word first.
        None if ctx.interactive => ask_for_error_index(ctx, code.codeword_length())?,
        None => None,
    };

    if let Some(index) = flip {
        received
            .flip(index)
            .with_context(|| format!("cannot flip bit {}", index))?;
        output::print(
            format!("{:<LABEL_WIDTH$} {}", "After injected error:", received),
            ctx.verbosity(),
        );
    }

    let decoded = code.decode(&received)?;

    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "code": code_json(&code),
                "received": received,
                "decoded": decoded,
            }))?
        );
        return Ok(());
    }

    output::print(
        format!("{:<LABEL_WIDTH$} {}", "Received codeword:", received),
        ctx.verbosity(),
    );
    output::print(
        format!("{:<LABEL_WIDTH$} {}", "Corrected codeword:", decoded.codeword),
        ctx.verbosity(),
    );
    if let Some(position) = decoded.corrected {
        let index = code.codeword_length() - position;
        // Caret marks the corrected bit under the codeword column.
        output::print(
            format!("{:<LABEL_WIDTH$} {}^", "", " ".repeat(index)),
            ctx.verbosity(),
        );
        output::print(
            format!(
                "corrected position {} (bit index {} from the left)",
                position, index
            ),
            ctx.verbosity(),
        );
    } else {
        output::print("no error detected", ctx.verbosity());
    }
    println!("{}", decoded.data);
    Ok(())
}

/// Check whether a word is a valid codeword.
pub fn check(ctx: &Context, parity_bits: usize, word: Option<String>) -> Result<()> {
    let code = HammingCode::new(parity_bits)?;
    let word = resolve_bits(
        ctx,
        word,
        &format!("Enter a word with {} bits", code.codeword_length()),
        code.codeword_length(),
    )?;

    let syndrome = code.syndrome(&word)?;
    let valid = syndrome == 0;

    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "code": code_json(&code),
                "word": word,
                "valid": valid,
                "syndrome": syndrome,
            }))?
        );
    } else if valid {
        println!("{} is a valid codeword", word);
    } else {
        println!("{} is not a valid codeword (syndrome {})", word, syndrome);
    }
    Ok(())
}

/// Show code parameters and matrices.
pub fn info(ctx: &Context, parity_bits: usize) -> Result<()> {
    let code = HammingCode::new(parity_bits)?;

    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "code": code_json(&code),
                "check_matrix": code.check_matrix(),
                "generator_matrix": code.generator_matrix(),
            }))?
        );
        return Ok(());
    }

    println!("{}", code);
    println!();
    println!("Check matrix:");
    println!("{}", output::format_bit_matrix(code.check_matrix()));
    println!();
    println!("Generator matrix:");
    println!("{}", output::format_bit_matrix(&code.generator_matrix()));
    Ok(())
}

/// Interactively offer to flip a bit before decoding.
fn ask_for_error_index(ctx: &Context, codeword_length: usize) -> Result<Option<usize>> {
    if !prompts::confirm("Introduce an error before decoding?", false, ctx.interactive)? {
        return Ok(None);
    }
    loop {
        let raw = prompts::input(
            &format!("Bit index to flip (0 to {})", codeword_length - 1),
            None,
            ctx.interactive,
        )?;
        match raw.parse::<usize>() {
            Ok(index) if index < codeword_length => return Ok(Some(index)),
            Ok(index) => output::error(format!(
                "index {} out of range, choose 0 to {}",
                index,
                codeword_length - 1
            )),
            Err(_) => output::error(format!("invalid index '{}'", raw)),
        }
    }
}

/// Resolve a bit-string argument, prompting in interactive mode.
fn resolve_bits(
    ctx: &Context,
    value: Option<String>,
    message: &str,
    expected_len: usize,
) -> Result<Bits> {
    if let Some(raw) = value {
        return Ok(Bits::parse(&raw)?);
    }
    loop {
        let raw = prompts::input(message, None, ctx.interactive)
            .context("missing word; pass it as a flag or run interactively")?;
        match Bits::parse(&raw) {
            Ok(bits) if bits.len() == expected_len => return Ok(bits),
            Ok(bits) => output::error(format!(
                "expected {} bits, got {}",
                expected_len,
                bits.len()
            )),
            Err(err) => output::error(err),
        }
    }
}

fn code_json(code: &HammingCode) -> serde_json::Value {
    json!({
        "parity_bits": code.parity_bits(),
        "codeword_length": code.codeword_length(),
        "data_length": code.data_length(),
    })
}
