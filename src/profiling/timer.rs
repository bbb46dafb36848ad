//! Nanosecond monotonic clocks.
//!
//! Two strategies sit behind the [`Clock`] trait:
//! - [`MonotonicClock`]: the OS monotonic clock via `std::time::Instant`.
//! - [`TscClock`] (x86_64, feature `tsc`): the raw Time Stamp Counter read
//!   with RDTSCP and converted to nanoseconds by a [`Timebase`] ratio that
//!   is computed once per process.
//!
//! [`PlatformClock`] picks one at build time.

use std::sync::OnceLock;
use std::time::Instant;

/// Source of monotonic nanosecond timestamps.
pub trait Clock {
    /// Nanoseconds since an arbitrary per-clock origin. Never decreases.
    fn now_ns(&self) -> u64;

    fn name(&self) -> &'static str;
}

/// OS monotonic clock measured from the instant the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    fn name(&self) -> &'static str {
        "monotonic"
    }
}

/// Tick-to-nanosecond conversion ratio: `ns = ticks * numer / denom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timebase {
    pub numer: u64,
    pub denom: u64,
}

impl Timebase {
    /// Timebase for a counter ticking at `freq_hz`.
    pub fn from_frequency(freq_hz: u64) -> Self {
        Self { numer: 1_000_000_000, denom: freq_hz.max(1) }
    }

    #[inline(always)]
    pub fn ticks_to_ns(&self, ticks: u64) -> u64 {
        (ticks as u128 * self.numer as u128 / self.denom as u128) as u64
    }
}

#[cfg(target_arch = "x86_64")]
mod tsc {
    use super::{Clock, Timebase};
    use std::sync::OnceLock;

    /// Read the Time Stamp Counter with RDTSCP, which waits for all prior
    /// instructions to retire before sampling.
    #[inline(always)]
    pub fn rdtsc() -> u64 {
        let lo: u32;
        let hi: u32;
        // SAFETY: RDTSCP has no memory effects; ecx (processor id) is discarded.
        unsafe {
            core::arch::asm!(
                "rdtscp",
                out("eax") lo,
                out("edx") hi,
                out("ecx") _,
                options(nostack, nomem),
            );
        }
        ((hi as u64) << 32) | (lo as u64)
    }

    static TIMEBASE: OnceLock<Timebase> = OnceLock::new();

    /// Process-wide TSC timebase, detected on first use.
    pub fn timebase() -> Timebase {
        *TIMEBASE.get_or_init(|| {
            let freq = detect_tsc_cpuid().unwrap_or_else(calibrate_tsc_sleep);
            log::info!("TSC frequency: {:.3} GHz", freq as f64 / 1e9);
            Timebase::from_frequency(freq)
        })
    }

    fn detect_tsc_cpuid() -> Option<u64> {
        // Leaf 0x15: eax = denominator, ebx = numerator, ecx = crystal Hz.
        // SAFETY: CPUID is available on every x86_64 CPU.
        let info = unsafe { core::arch::x86_64::__cpuid(0x15) };
        let (denom, numer, crystal) = (info.eax as u64, info.ebx as u64, info.ecx as u64);
        if denom == 0 || numer == 0 {
            return None;
        }
        if crystal != 0 {
            return Some(crystal * numer / denom);
        }
        // Crystal not reported: leaf 0x16 carries the base frequency in MHz.
        let info16 = unsafe { core::arch::x86_64::__cpuid(0x16) };
        let base_mhz = info16.eax as u64 & 0xFFFF;
        (base_mhz > 0).then_some(base_mhz * 1_000_000)
    }

    fn calibrate_tsc_sleep() -> u64 {
        let start = rdtsc();
        let t0 = std::time::Instant::now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let end = rdtsc();
        let secs = t0.elapsed().as_secs_f64();
        if secs > 0.0 {
            (end.wrapping_sub(start) as f64 / secs) as u64
        } else {
            3_000_000_000
        }
    }

    /// TSC-backed clock. Readings are relative to the tick at construction.
    #[derive(Debug, Clone, Copy)]
    pub struct TscClock {
        origin: u64,
        timebase: Timebase,
    }

    impl TscClock {
        pub fn new() -> Self {
            let timebase = timebase();
            Self { origin: rdtsc(), timebase }
        }
    }

    impl Default for TscClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for TscClock {
        #[inline(always)]
        fn now_ns(&self) -> u64 {
            self.timebase.ticks_to_ns(rdtsc().saturating_sub(self.origin))
        }

        fn name(&self) -> &'static str {
            "tsc"
        }
    }
}

#[cfg(target_arch = "x86_64")]
pub use tsc::{rdtsc, TscClock};

/// Build-time selected clock.
#[cfg(all(target_arch = "x86_64", feature = "tsc"))]
pub type PlatformClock = TscClock;

/// Build-time selected clock.
#[cfg(not(all(target_arch = "x86_64", feature = "tsc")))]
pub type PlatformClock = MonotonicClock;

static PROCESS_CLOCK: OnceLock<PlatformClock> = OnceLock::new();

/// Process-wide clock of the platform strategy.
pub fn process_clock() -> &'static PlatformClock {
    PROCESS_CLOCK.get_or_init(PlatformClock::default)
}

/// Start/stop interval timer over any clock.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: u64,
    stop: u64,
}

impl Stopwatch {
    #[inline(always)]
    pub fn start<C: Clock>(clock: &C) -> Self {
        let start = clock.now_ns();
        Self { start, stop: start }
    }

    #[inline(always)]
    pub fn stop<C: Clock>(&mut self, clock: &C) {
        self.stop = clock.now_ns();
    }

    #[inline(always)]
    pub fn elapsed_ns(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    #[inline(always)]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ns() as f64 / 1e9
    }
}
