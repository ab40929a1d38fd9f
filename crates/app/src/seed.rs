//! Run seed selection. `--seed` pins the world for the whole session;
//! without it the seed is rolled from process entropy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunSeed {
    Pinned(u64),
    Rolled(u64),
}

impl RunSeed {
    pub fn value(self) -> u64 {
        match self {
            Self::Pinned(seed) | Self::Rolled(seed) => seed,
        }
    }
}

static ROLL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Entropy sources: wall clock, pid, and a per-process counter so two
/// rolls inside the same clock tick still differ.
pub fn roll_seed() -> u64 {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |d| d.as_nanos());
    let count = ROLL_COUNTER.fetch_add(1, Ordering::Relaxed);
    let raw = (nanos as u64)
        ^ ((nanos >> 64) as u64)
        ^ u64::from(std::process::id()).rotate_left(23)
        ^ count.rotate_left(5);
    scramble(raw)
}

/// Hand-rolled flag scan: accepts `--seed <n>` and `--seed=<n>`, rejects
/// duplicates and non-numeric values, and falls back to `rolled` when the
/// flag is absent. Unknown arguments are left for the windowing layer.
pub fn pick_seed(args: &[String], rolled: u64) -> Result<RunSeed, String> {
    let mut pinned: Option<u64> = None;
    let mut remaining = args.iter().skip(1);

    while let Some(argument) = remaining.next() {
        let raw = if argument == "--seed" {
            match remaining.next() {
                Some(value) => value.as_str(),
                None => return Err("missing value for --seed".to_string()),
            }
        } else if let Some(value) = argument.strip_prefix("--seed=") {
            value
        } else {
            continue;
        };

        if pinned.is_some() {
            return Err("seed provided more than once".to_string());
        }
        let parsed =
            raw.parse::<u64>().map_err(|_| format!("seed value '{raw}' must be a number"))?;
        pinned = Some(parsed);
    }

    Ok(pinned.map_or(RunSeed::Rolled(rolled), RunSeed::Pinned))
}

fn scramble(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
