//! Key and window changes on the control thread.

use super::*;
use std::sync::{Arc, Mutex};

/// Everything the control thread can change about note generation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct GeneratorSettings {
    pub key: KeyConfiguration,
    pub window: GenerationWindow,
}

/// The control thread's half of a [`NoteGenerator`]: owns key resolution and
/// publishes the results to the audio thread.
pub struct KeyController {
    store: Arc<ScaleTableStore>,
    window: triple_buffer::Input<GenerationWindow>,

    applied: Option<GeneratorSettings>,
}

impl KeyController {
    pub fn new(
        store: Arc<ScaleTableStore>,
        window: triple_buffer::Input<GenerationWindow>,
    ) -> Self {
        Self { store, window, applied: None }
    }

    /// Applies `settings` in full: publishes the window, then rebuilds and
    /// publishes the scale table for the key (or disables snapping if no key
    /// is selected).
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedMode`] if the key's mode has no table.
    /// The window is still applied, but the previously published key stays
    /// live.
    pub fn recompute(
        &mut self,
        settings: GeneratorSettings,
    ) -> Result<(), KeyError> {
        self.window.write(settings.window);
        self.applied = Some(settings);

        match settings.key.build_table() {
            Ok(Some(table)) => {
                self.store.publish(table);
                log::debug!(
                    target: "cvgen::control",
                    "key set to {} (table root {})",
                    settings.key,
                    table.root()
                );
                Ok(())
            }
            Ok(None) => {
                self.store.disable();
                log::debug!(target: "cvgen::control", "key snapping disabled");
                Ok(())
            }
            Err(e) => {
                log::warn!(
                    target: "cvgen::control",
                    "keeping previous key for {}: {e}",
                    settings.key
                );
                Err(e)
            }
        }
    }

    /// The settings passed to the last call to
    /// [`recompute()`](Self::recompute), whether or not the key could be
    /// applied.
    pub const fn applied(&self) -> Option<GeneratorSettings> {
        self.applied
    }

    /// The root of the key currently live on the audio thread.
    pub fn active_key(&self) -> Option<PitchClass> {
        self.store.active_key()
    }
}

/// Polls the module parameters and recomputes whenever they change.
struct ConfigUpdater {
    params: Arc<ModuleParams>,
    controller: KeyController,
}

impl ConfigUpdater {
    /// Returns `None` if nothing changed since the last update.
    fn update(&mut self) -> Option<Result<(), KeyError>> {
        let settings = self.params.settings();

        if self.controller.applied() == Some(settings) {
            return None;
        }

        Some(self.controller.recompute(settings))
    }
}

/// Runs a [`KeyController`] at [`PARAM_UPDATE_RATE`] on its own thread,
/// driven by a shared [`ModuleParams`] block.
pub struct ControlHandler {
    update_thread: TimerThread,
    updater: Arc<Mutex<ConfigUpdater>>,
}

impl ControlHandler {
    pub fn new(params: Arc<ModuleParams>, controller: KeyController) -> Self {
        let updater = Arc::new(Mutex::new(ConfigUpdater { params, controller }));

        let thread_updater = Arc::clone(&updater);
        let update_thread = TimerThread::new("cvgen-control", move || {
            if let Ok(mut guard) = thread_updater.lock() {
                // errors are already logged by the controller
                _ = guard.update();
            }
        });

        Self { update_thread, updater }
    }

    /// Starts polling the parameters in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread could not be spawned.
    pub fn start_update(&mut self) -> std::io::Result<()> {
        self.update_thread.start_hz(PARAM_UPDATE_RATE)
    }

    pub fn stop_update(&mut self) {
        self.update_thread.stop();
    }

    pub const fn is_running(&self) -> bool {
        self.update_thread.is_running()
    }

    /// Applies any parameter changes immediately, on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedMode`] if the parameters changed to a
    /// mode with no table.
    pub fn update_now(&self) -> Result<(), KeyError> {
        match self.updater.lock() {
            Ok(mut guard) => guard.update().unwrap_or(Ok(())),
            Err(_) => Ok(()),
        }
    }

    /// The root of the key currently live on the audio thread.
    pub fn active_key(&self) -> Option<PitchClass> {
        self.updater.lock().ok().and_then(|g| g.controller.active_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::Lfsr;
    use std::time::{Duration, Instant};

    #[test]
    fn recompute_publishes_window_and_key() {
        let (mut ctrl, mut gen) = build_generator(Lfsr::default());
        let settings = GeneratorSettings {
            key: KeyConfiguration::new(
                KeyRoot::E,
                Accidental::Flat,
                ScaleMode::Major,
            ),
            window: GenerationWindow::new(30, 10),
        };

        ctrl.recompute(settings).unwrap();

        assert_eq!(ctrl.active_key(), Some(PitchClass::wrapping(3)));
        assert_eq!(ctrl.applied(), Some(settings));
        assert_eq!(gen.window(), GenerationWindow::new(30, 10));

        ctrl.recompute(GeneratorSettings::default()).unwrap();
        assert_eq!(ctrl.active_key(), None);
    }

    #[test]
    fn unsupported_mode_still_applies_window() {
        let (mut ctrl, mut gen) = build_generator(Lfsr::default());
        ctrl.recompute(GeneratorSettings {
            key: KeyConfiguration::new(
                KeyRoot::G,
                Accidental::Natural,
                ScaleMode::Major,
            ),
            window: GenerationWindow::default(),
        })
        .unwrap();

        let pentatonic = GeneratorSettings {
            key: KeyConfiguration::new(
                KeyRoot::C,
                Accidental::Natural,
                ScaleMode::MajorPentatonic,
            ),
            window: GenerationWindow::new(90, 20),
        };

        assert_eq!(
            ctrl.recompute(pentatonic),
            Err(KeyError::UnsupportedMode(ScaleMode::MajorPentatonic))
        );
        assert_eq!(ctrl.active_key(), Some(PitchClass::wrapping(7)));
        assert_eq!(gen.window(), GenerationWindow::new(90, 20));
    }

    #[test]
    fn update_only_recomputes_on_change() {
        let params = Arc::new(ModuleParams::new());
        let (ctrl, _gen) = build_generator(Lfsr::default());
        let handler = ControlHandler::new(Arc::clone(&params), ctrl);

        params.key_root.sr(KeyRoot::D);
        params.mode.sr(ScaleMode::Major);
        handler.update_now().unwrap();
        assert_eq!(handler.active_key(), Some(PitchClass::wrapping(2)));

        params.mode.sr(ScaleMode::MinorPentatonic);
        assert!(handler.update_now().is_err());
        // unchanged params are not re-applied, so the error isn't repeated
        assert!(handler.update_now().is_ok());
        assert_eq!(handler.active_key(), Some(PitchClass::wrapping(2)));
    }

    #[test]
    fn background_thread_picks_up_changes() {
        let params = Arc::new(ModuleParams::new());
        let (ctrl, _gen) = build_generator(Lfsr::default());
        let mut handler = ControlHandler::new(Arc::clone(&params), ctrl);

        params.key_root.sr(KeyRoot::NoKey);
        handler.start_update().unwrap();
        assert!(handler.is_running());

        params.key_root.sr(KeyRoot::B);
        params.mode.sr(ScaleMode::Major);

        let start = Instant::now();
        while handler.active_key().is_none()
            && start.elapsed() < Duration::from_secs(2)
        {
            std::thread::sleep(Duration::from_millis(5));
        }

        handler.stop_update();

        assert!(!handler.is_running());
        assert_eq!(handler.active_key(), Some(PitchClass::wrapping(11)));
    }
}
