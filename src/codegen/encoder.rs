//! Fixed-length base-62 rendering of identifiers.
//!
//! Digits are emitted least-significant first and the result is then
//! left-padded with the zero character (`q`) up to [`CODE_LEN`]. The order is
//! part of the stored format and must not change:
//!
//! ```text
//! 0   -> qqqqqqqqqq
//! 10  -> qqqqqqqqqa
//! 987 -> qqqqqqqq5h   (987 = 15 * 62 + 57, digits "5" then "h")
//! ```
//!
//! Because padding is prepended, an identifier whose lowest digit is zero
//! renders exactly like that identifier divided by 62. [`decode`] resolves the
//! ambiguity towards the smaller value and the code generator never mints the
//! larger one; see [`crate::codegen::SequentialCodeGenerator`].

use super::CodegenError;

/// Code alphabet; the character at index `i` is digit `i`.
pub const ALPHABET: &[u8; 62] = b"qwertyuiopasdfghjklzxcvbnmQWERTYUIOPASDFGHJKLZXCVBNM0123456789";

/// Length of every short code.
pub const CODE_LEN: usize = 10;

const BASE: u64 = ALPHABET.len() as u64;

/// Largest identifier that fits in [`CODE_LEN`] characters (`62^10 - 1`).
pub const MAX_ID: u64 = 839_299_365_868_340_223;

/// Renders `id` as a short code.
///
/// # Errors
///
/// Returns [`CodegenError::Overflow`] if `id` is greater than [`MAX_ID`].
pub fn encode(id: u64) -> Result<String, CodegenError> {
    if id > MAX_ID {
        return Err(CodegenError::Overflow { id });
    }

    let mut digits = Vec::with_capacity(CODE_LEN);
    let mut rest = id;
    while rest > 0 {
        digits.push(ALPHABET[(rest % BASE) as usize]);
        rest /= BASE;
    }

    let mut code = Vec::with_capacity(CODE_LEN);
    code.resize(CODE_LEN - digits.len(), ALPHABET[0]);
    code.extend_from_slice(&digits);

    // Every byte comes from the ASCII alphabet.
    Ok(code.into_iter().map(char::from).collect())
}

/// Recovers the identifier a short code was minted from.
///
/// Leading zero characters are treated as padding, so for identifiers that
/// are multiples of 62 this returns the quotient instead.
///
/// # Errors
///
/// Returns [`CodegenError::InvalidCode`] if `code` has the wrong length or
/// contains characters outside [`ALPHABET`].
pub fn decode(code: &str) -> Result<u64, CodegenError> {
    if code.len() != CODE_LEN {
        return Err(CodegenError::InvalidCode {
            code: code.to_string(),
            reason: "wrong length",
        });
    }

    let significant = code.trim_start_matches(char::from(ALPHABET[0]));

    significant
        .bytes()
        .rev()
        .try_fold(0u64, |acc, byte| {
            let digit = digit_of(byte).ok_or_else(|| CodegenError::InvalidCode {
                code: code.to_string(),
                reason: "character outside the code alphabet",
            })?;
            Ok(acc * BASE + digit)
        })
}

/// Largest identifier behind any of `codes`, or zero when there are none.
///
/// # Errors
///
/// Returns the first [`CodegenError::InvalidCode`] hit by [`decode`].
pub fn max_decoded<I>(codes: I) -> Result<u64, CodegenError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    codes
        .into_iter()
        .try_fold(0, |max, code| -> Result<u64, CodegenError> {
            Ok(max.max(decode(code.as_ref())?))
        })
}

fn digit_of(byte: u8) -> Option<u64> {
    ALPHABET
        .iter()
        .position(|&c| c == byte)
        .map(|index| index as u64)
}
