use std::time::Duration;

use eframe::egui::{self, Pos2, Vec2};
use log::{info, warn};
use tokio::{task, time};

use crate::settings::Settings;

pub const WINDOW_SIZE: [f32; 2] = [380.0, 270.0];

/// Gap between the window and the top-right corner of the screen.
const SCREEN_MARGIN: f32 = 20.0;

/// Where the window goes when the monitor size is unknown.
const FALLBACK_POSITION: Pos2 = Pos2::new(100.0, 100.0);

const MEMORY_LOG_INTERVAL: Duration = Duration::from_secs(30);

/// Env var forcing software rendering, for machines with broken GL drivers.
pub const DISABLE_HW_ACCEL_ENV: &str = "FLIP_CLOCK_DISABLE_HW_ACCEL";

/// Frameless, fixed-size, always-on-top window hidden from the taskbar.
pub fn native_options(settings: &Settings) -> eframe::NativeOptions {
    let mut viewport = egui::ViewportBuilder::default()
        .with_title("flip clock")
        .with_inner_size(WINDOW_SIZE)
        .with_decorations(false)
        .with_resizable(false)
        .with_taskbar(false);
    if settings.window.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(position) = settings.window.position() {
        viewport = viewport.with_position(position);
    }

    let hardware_acceleration = if hardware_acceleration_disabled(settings) {
        info!("Hardware acceleration disabled");
        eframe::HardwareAcceleration::Off
    } else {
        eframe::HardwareAcceleration::Preferred
    };

    eframe::NativeOptions {
        viewport,
        hardware_acceleration,
        ..Default::default()
    }
}

/// Top-right corner of a monitor of `monitor_size`, or a fixed fallback.
pub fn top_right_position(monitor_size: Option<Vec2>) -> Pos2 {
    match monitor_size {
        Some(size) if size.x > WINDOW_SIZE[0] => {
            Pos2::new(size.x - WINDOW_SIZE[0] - SCREEN_MARGIN, SCREEN_MARGIN)
        }
        _ => FALLBACK_POSITION,
    }
}

pub fn hardware_acceleration_disabled(settings: &Settings) -> bool {
    settings.disable_hardware_acceleration
        || std::env::var(DISABLE_HW_ACCEL_ENV).is_ok_and(|v| v == "1")
        || is_wsl()
}

/// Whether we are running under the Windows Subsystem for Linux.
pub fn is_wsl() -> bool {
    if !cfg!(target_os = "linux") {
        return false;
    }
    let release = std::fs::read_to_string("/proc/sys/kernel/osrelease").unwrap_or_default();
    detect_wsl(&release, |key| std::env::var(key).ok())
}

fn detect_wsl(kernel_release: &str, env: impl Fn(&str) -> Option<String>) -> bool {
    let set = |key: &str| env(key).is_some_and(|v| !v.is_empty());
    kernel_release.to_lowercase().contains("microsoft")
        || set("WSL_DISTRO_NAME")
        || set("WSL_INTEROP")
        || env("SHELL").is_some_and(|shell| shell.contains("wsl"))
}

/// Logs resident and virtual memory of this process every 30 seconds.
pub fn spawn_memory_monitor() {
    task::spawn(async {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                warn!("Memory monitor unavailable: {}", e);
                return;
            }
        };
        let mut system = sysinfo::System::new();
        let mut interval = time::interval(MEMORY_LOG_INTERVAL);

        loop {
            interval.tick().await;
            if !system.refresh_process(pid) {
                continue;
            }
            if let Some(process) = system.process(pid) {
                info!(
                    "Memory usage: {} MiB resident, {} MiB virtual",
                    process.memory() / 1024 / 1024,
                    process.virtual_memory() / 1024 / 1024
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn wsl_detected_from_kernel_release() {
        assert!(detect_wsl("5.15.153.1-microsoft-standard-WSL2", env_of(&[])));
        assert!(detect_wsl("4.4.0-19041-Microsoft", env_of(&[])));
        assert!(!detect_wsl("6.8.0-45-generic", env_of(&[])));
    }

    #[test]
    fn wsl_detected_from_environment() {
        assert!(detect_wsl("6.8.0", env_of(&[("WSL_DISTRO_NAME", "Ubuntu")])));
        assert!(detect_wsl("6.8.0", env_of(&[("WSL_INTEROP", "/run/WSL/1_interop")])));
        assert!(detect_wsl("6.8.0", env_of(&[("SHELL", "/usr/bin/wsl-bash")])));
        assert!(!detect_wsl("6.8.0", env_of(&[("WSL_DISTRO_NAME", ""), ("SHELL", "/bin/zsh")])));
    }

    #[test]
    fn window_goes_to_top_right_of_monitor() {
        let pos = top_right_position(Some(Vec2::new(1920.0, 1080.0)));
        assert_eq!(pos, Pos2::new(1520.0, 20.0));
        assert_eq!(top_right_position(None), FALLBACK_POSITION);
        assert_eq!(top_right_position(Some(Vec2::new(200.0, 200.0))), FALLBACK_POSITION);
    }
}
