use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};
use log::info;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleSource {
    Button,
    Shortcut,
    Signal,
}

/// Ctrl+Shift+D while the widget has focus, on every platform. egui has no
/// Super modifier, so Super+Shift+D is left to a desktop binding that sends
/// SIGUSR1 (see [`spawn_signal_relay`]).
pub fn toggle_shortcut() -> KeyboardShortcut {
    KeyboardShortcut::new(Modifiers::CTRL | Modifiers::SHIFT, Key::D)
}

/// Hands toggle requests from background listeners to the UI thread.
#[derive(Debug)]
pub struct ToggleRelay {
    tx: UnboundedSender<ToggleSource>,
    rx: UnboundedReceiver<ToggleSource>,
}

impl ToggleRelay {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> UnboundedSender<ToggleSource> {
        self.tx.clone()
    }

    /// Requests received since the last call, oldest first.
    pub fn pending(&mut self) -> Vec<ToggleSource> {
        let mut pending = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(source) => pending.push(source),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        pending
    }
}

impl Default for ToggleRelay {
    fn default() -> Self {
        Self::new()
    }
}

/// Listens for SIGUSR1 and forwards each one as a toggle. Bind a desktop
/// shortcut to `pkill -USR1 flip-clock` to toggle without focus. Failure to
/// install the handler is logged and the in-window paths keep working.
#[cfg(unix)]
pub fn spawn_signal_relay(tx: UnboundedSender<ToggleSource>, ctx: egui::Context) {
    use log::{debug, warn};
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut stream = match signal(SignalKind::user_defined1()) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Could not listen for SIGUSR1 toggles: {}", e);
                return;
            }
        };
        info!("Send SIGUSR1 to pid {} to toggle the clock mode", std::process::id());

        while stream.recv().await.is_some() {
            debug!("SIGUSR1 received");
            if tx.send(ToggleSource::Signal).is_err() {
                break;
            }
            ctx.request_repaint();
        }
    });
}

#[cfg(not(unix))]
pub fn spawn_signal_relay(_tx: UnboundedSender<ToggleSource>, _ctx: egui::Context) {
    info!("No host toggle relay on this platform; use the button or Ctrl+Shift+D");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_delivers_in_order_and_drains() {
        let mut relay = ToggleRelay::new();
        let tx = relay.sender();
        tx.send(ToggleSource::Signal).unwrap();
        tx.send(ToggleSource::Shortcut).unwrap();

        assert_eq!(
            relay.pending(),
            vec![ToggleSource::Signal, ToggleSource::Shortcut]
        );
        assert!(relay.pending().is_empty());
    }

    #[test]
    fn shortcut_is_ctrl_shift_d() {
        assert_eq!(
            toggle_shortcut(),
            KeyboardShortcut::new(Modifiers::SHIFT | Modifiers::CTRL, Key::D)
        );
        assert_ne!(toggle_shortcut(), KeyboardShortcut::new(Modifiers::SHIFT, Key::D));
    }
}
