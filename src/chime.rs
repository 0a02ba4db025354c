use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use thiserror::Error;
use tokio::task;

/// Length of one chime note.
const NOTE: Duration = Duration::from_millis(250);

const G5: f32 = 783.9;
const F5: f32 = 698.4;

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("no audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("could not start playback: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Plays the deadline chime without blocking the UI. Audio failures are only logged.
pub fn play_chime() {
    // sleep_until_end blocks, so the whole playback lives on a blocking thread.
    task::spawn_blocking(|| {
        if let Err(e) = play_blocking() {
            log::warn!("Chime failed: {}", e);
        }
    });
}

fn play_blocking() -> Result<(), ChimeError> {
    let (_stream, stream_handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&stream_handle)?;

    let g5 = SineWave::new(G5).take_duration(NOTE);
    let f5 = SineWave::new(F5).take_duration(NOTE);
    let phrase = g5
        .clone()
        .mix(f5.delay(NOTE))
        .mix(g5.delay(NOTE * 2));
    sink.append(phrase.clone().mix(phrase.delay(NOTE * 4)));
    sink.sleep_until_end();
    Ok(())
}
