//! Bird Volley entry point
//!
//! Runs the game loop headless: nothing is drawn, audio cues are logged and
//! the loop quits after the configured number of frames. Windowed hosts
//! supply their own `Renderer`, `AudioBackend` and `InputSource`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bird Volley (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), bird_volley::SimError> {
    use bird_volley::audio::{AudioManager, LogAudio};
    use bird_volley::platform::{FrameClock, IdleInput};
    use bird_volley::renderer::NullRenderer;
    use bird_volley::sim::GameState;
    use bird_volley::{GameLoop, Settings};

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("Using seed {}", seed);

    let mut audio = AudioManager::new(LogAudio);
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    audio.set_muted(settings.muted);

    let mut game = GameLoop::new(
        GameState::new(seed)?,
        NullRenderer,
        audio,
        IdleInput::new(settings.headless_frames),
        FrameClock::paced(),
    );
    game.run()
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `GameLoop::run_frame` themselves
}
