use std::time::{Duration, Instant};

use log::{debug, info};

/// Timer that tracks elapsed time when timing is enabled.
pub struct Timer(Instant);

impl Timer {
    #[inline]
    pub fn start() -> Self {
        Self(Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Phase-level timings for one distributed run, as seen by the root.
#[derive(Debug, Clone)]
pub struct PhaseTimings {
    pub total: Duration,
    pub distribute: Duration,
    pub local: Duration,
    pub gather: Duration,
    pub merge: Duration,
}

impl PhaseTimings {
    pub fn report(&self, n: usize, workers: usize) {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        let pct = |d: Duration| {
            if self.total.as_nanos() == 0 {
                0.0
            } else {
                d.as_secs_f64() / self.total.as_secs_f64() * 100.0
            }
        };

        debug!("timing n={} workers={}", n, workers);
        debug!("  distribute: {:7.2}ms ({:4.1}%)", ms(self.distribute), pct(self.distribute));
        debug!("  local:      {:7.2}ms ({:4.1}%)", ms(self.local), pct(self.local));
        debug!("  gather:     {:7.2}ms ({:4.1}%)", ms(self.gather), pct(self.gather));
        debug!("  merge:      {:7.2}ms ({:4.1}%)", ms(self.merge), pct(self.merge));
        debug!("  total:      {:7.2}ms", ms(self.total));

        if std::env::var_os("PLANAR_HULL_TIMING_KV").is_some() {
            info!(
                "TIMING_KV n={n} workers={w} total_ms={total:.3} distribute_ms={d:.3} local_ms={l:.3} gather_ms={g:.3} merge_ms={m:.3}",
                n = n,
                w = workers,
                total = ms(self.total),
                d = ms(self.distribute),
                l = ms(self.local),
                g = ms(self.gather),
                m = ms(self.merge),
            );
        }
    }
}

/// Builder for collecting phase timings.
pub struct TimingBuilder {
    t_start: Instant,
    distribute: Duration,
    local: Duration,
    gather: Duration,
    merge: Duration,
}

impl TimingBuilder {
    pub fn new() -> Self {
        Self {
            t_start: Instant::now(),
            distribute: Duration::ZERO,
            local: Duration::ZERO,
            gather: Duration::ZERO,
            merge: Duration::ZERO,
        }
    }

    pub fn set_distribute(&mut self, d: Duration) {
        self.distribute = d;
    }

    pub fn set_local(&mut self, d: Duration) {
        self.local = d;
    }

    pub fn set_gather(&mut self, d: Duration) {
        self.gather = d;
    }

    pub fn set_merge(&mut self, d: Duration) {
        self.merge = d;
    }

    pub fn finish(self) -> PhaseTimings {
        PhaseTimings {
            total: self.t_start.elapsed(),
            distribute: self.distribute,
            local: self.local,
            gather: self.gather,
            merge: self.merge,
        }
    }
}
