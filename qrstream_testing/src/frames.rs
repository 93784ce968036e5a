//! Deterministic reorderings of a frame sequence.
//!
//! A scanner sees an animation from whatever frame happens to be on screen,
//! misses some frames on the first pass and reads others twice. These
//! helpers reproduce those delivery orders without randomness so failures
//! replay exactly.

/// Frames in reverse order.
#[must_use]
pub fn reversed<S: AsRef<str>>(frames: &[S]) -> Vec<String> {
    frames.iter().rev().map(|frame| frame.as_ref().to_owned()).collect()
}

/// Frames starting at position `by`, wrapping around like an animation
/// joined mid-cycle.
#[must_use]
pub fn rotated<S: AsRef<str>>(frames: &[S], by: usize) -> Vec<String> {
    let mut out: Vec<String> = frames.iter().map(|frame| frame.as_ref().to_owned()).collect();
    if !out.is_empty() {
        let shift = by % out.len();
        out.rotate_left(shift);
    }
    out
}

/// Frames with every `every`-th frame delivered twice in a row.
///
/// # Panics
///
/// Panics if `every` is zero.
#[must_use]
pub fn with_duplicates<S: AsRef<str>>(frames: &[S], every: usize) -> Vec<String> {
    assert!(every > 0, "duplicate interval must be non-zero");
    let mut out = Vec::with_capacity(frames.len() + frames.len() / every);
    for (position, frame) in frames.iter().enumerate() {
        out.push(frame.as_ref().to_owned());
        if position % every == 0 {
            out.push(frame.as_ref().to_owned());
        }
    }
    out
}

/// Every frame exactly once in a scrambled order derived from `seed`,
/// followed by a second pass that repeats the first half.
///
/// Frames are visited with a stride coprime to their count, so each one
/// appears in the first pass.
#[must_use]
pub fn scanner_order<S: AsRef<str>>(frames: &[S], seed: usize) -> Vec<String> {
    let count = frames.len();
    if count == 0 {
        return Vec::new();
    }
    let stride = (seed.max(1)..)
        .find(|candidate| gcd(*candidate, count) == 1)
        .unwrap_or(1);
    let start = seed % count;
    let first_pass: Vec<String> = (0..count)
        .map(|step| frames[(start + step * stride) % count].as_ref().to_owned())
        .collect();
    let repeats = first_pass[..count / 2].to_vec();
    first_pass.into_iter().chain(repeats).collect()
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
