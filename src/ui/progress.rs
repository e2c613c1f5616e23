use std::io::{self, Write};
use std::time::Instant;

const BAR_WIDTH: usize = 40;

/// Single-line progress bar for one overwrite pass. Rendering is cosmetic:
/// it never feeds back into the write loop.
pub struct PassProgress {
    label: String,
    total: u64,
    start: Instant,
}

impl PassProgress {
    pub fn new(label: impl Into<String>, total: u64) -> Self {
        Self {
            label: label.into(),
            total,
            start: Instant::now(),
        }
    }

    /// Redraw the bar for the bytes written so far.
    pub fn update(&mut self, written: u64) {
        self.render(written, false);
    }

    /// Final redraw plus newline once the pass is done.
    pub fn finish(&mut self, written: u64) {
        self.render(written, true);
    }

    fn render(&self, written: u64, done: bool) {
        let pct = if self.total == 0 {
            100.0
        } else {
            (written as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
        };
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH.saturating_sub(filled))
        );

        let elapsed = self.start.elapsed().as_secs_f64().max(1e-4);
        let speed = written as f64 / elapsed;
        let eta_secs = if speed > 0.0 && self.total > written {
            ((self.total - written) as f64 / speed).round() as u64
        } else {
            0
        };

        print!(
            "\r\x1b[2K{} [{}] {:5.1}%  {}/s  ETA {}",
            self.label,
            bar,
            pct,
            human_bytes(speed),
            format_eta(eta_secs)
        );
        if done {
            println!();
        }
        io::stdout().flush().ok();
    }
}

/// Readable byte count, used for throughput display.
pub(crate) fn human_bytes(value: f64) -> String {
    let units = ["B", "KB", "MB", "GB", "TB"];
    if value <= 0.0 {
        return "0B".to_string();
    }
    let mut val = value;
    let mut i = 0usize;
    while val >= 1024.0 && i + 1 < units.len() {
        val /= 1024.0;
        i += 1;
    }
    format!("{:.2}{}", val, units[i])
}

/// Seconds to H:MM:SS or M:SS.
pub(crate) fn format_eta(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
