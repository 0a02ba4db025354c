use std::path::PathBuf;

use clap::Parser;

use crate::settings::Settings;

/// flip-clock - an always-on-top flip-card clock with 5PM/6PM countdowns
#[derive(Parser, Debug, Clone)]
#[command(name = "flip-clock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file to use instead of the one in the config directory
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Flip changed digits in current-time mode
    #[arg(long = "flip")]
    pub flip: bool,

    /// Do not chime when a countdown reaches zero
    #[arg(long = "no-chime")]
    pub no_chime: bool,

    /// Render without GPU acceleration
    #[arg(long = "disable-hw-accel")]
    pub disable_hw_accel: bool,

    /// Log process memory usage every 30 seconds
    #[arg(long = "dev")]
    pub dev: bool,

    /// Debug verbosity level (0=warn, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    pub debug: u8,
}

impl Cli {
    /// Default `env_logger` filter; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.debug {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Command-line flags only ever switch things on or off relative to the file.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if self.flip {
            settings.animate_now = true;
        }
        if self.no_chime {
            settings.chime = false;
        }
        if self.disable_hw_accel {
            settings.disable_hardware_acceleration = true;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_settings_alone() {
        let cli = Cli::try_parse_from(["flip-clock"]).expect("parse");
        assert_eq!(cli.apply(Settings::default()), Settings::default());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "flip-clock",
            "--flip",
            "--no-chime",
            "--disable-hw-accel",
            "-d",
            "2",
        ])
        .expect("parse");
        let settings = cli.apply(Settings::default());
        assert!(settings.animate_now);
        assert!(!settings.chime);
        assert!(settings.disable_hardware_acceleration);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn config_path_is_taken_verbatim() {
        let cli = Cli::try_parse_from(["flip-clock", "--config", "/tmp/clock.json"]).expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/clock.json")));
    }
}
