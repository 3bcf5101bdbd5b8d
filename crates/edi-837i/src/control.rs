//! Interchange, group, and transaction control numbers.
//!
//! The default source draws random numbers, which tolerates collision risk
//! per the trading-partner agreement. Callers needing guaranteed
//! uniqueness within a process plug in [`SequentialControlNumbers`].

use rand::Rng;

/// Control numbers for one document: 9-digit ISA and GS, 4-digit ST, all
/// zero-padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlNumbers {
    pub isa: String,
    pub gs: String,
    pub st: String,
}

/// Strategy for drawing control numbers, one set per document.
pub trait ControlNumberSource {
    fn next(&mut self) -> ControlNumbers;
}

/// Uniform random draws, no persistence or cross-run uniqueness guarantee.
#[derive(Debug, Default)]
pub struct RandomControlNumbers;

impl ControlNumberSource for RandomControlNumbers {
    fn next(&mut self) -> ControlNumbers {
        let mut rng = rand::thread_rng();
        ControlNumbers {
            isa: format!("{:09}", rng.gen_range(1..=999_999u32)),
            gs: format!("{:09}", rng.gen_range(1..=999_999u32)),
            st: format!("{:04}", rng.gen_range(1..=9_999u32)),
        }
    }
}

/// Monotonic counter source: collision-free within a process.
#[derive(Debug)]
pub struct SequentialControlNumbers {
    next: u32,
}

impl SequentialControlNumbers {
    pub fn starting_at(first: u32) -> Self {
        Self { next: first.max(1) }
    }
}

impl Default for SequentialControlNumbers {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl ControlNumberSource for SequentialControlNumbers {
    fn next(&mut self) -> ControlNumbers {
        let n = self.next;
        self.next += 1;
        ControlNumbers {
            isa: format!("{n:09}"),
            gs: format!("{n:09}"),
            // ST numbers are four digits; wrap rather than overflow the width.
            st: format!("{:04}", (n - 1) % 9_999 + 1),
        }
    }
}
