use std::io::{self, Write};

use tracing::warn;

use crate::engine::GameObserver;

/// ASCII BEL, the one sound every terminal can make.
const BELL: &[u8] = b"\x07";

/// Sound-effect collaborator: chimes when a token is collected.
///
/// Playback failures are logged and swallowed; they never reach the engine.
#[derive(Debug)]
pub struct SoundEffects<W: Write> {
    output: W,
    enabled: bool,
}

impl SoundEffects<io::Stdout> {
    /// Rings the terminal bell on stdout.
    #[must_use]
    pub fn terminal_bell(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> SoundEffects<W> {
    #[must_use]
    pub fn new(output: W, enabled: bool) -> Self {
        Self { output, enabled }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns sound effects on or off. Returns the new setting.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Plays the token pickup chime when sound is enabled.
    pub fn play_token_pickup(&mut self) {
        if !self.enabled {
            return;
        }

        if let Err(error) = self
            .output
            .write_all(BELL)
            .and_then(|()| self.output.flush())
        {
            warn!(%error, "sound effect could not be played");
        }
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.output
    }
}

impl<W: Write> GameObserver for SoundEffects<W> {
    fn token_collected(&mut self) {
        self.play_token_pickup();
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use crate::engine::GameObserver;

    use super::SoundEffects;

    struct BrokenSpeaker;

    impl Write for BrokenSpeaker {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "no audio device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn collected_token_rings_once() {
        let mut sound = SoundEffects::new(Vec::new(), true);

        sound.token_collected();

        assert_eq!(sound.output().as_slice(), b"\x07");
    }

    #[test]
    fn muted_effects_stay_silent() {
        let mut sound = SoundEffects::new(Vec::new(), false);

        sound.token_collected();

        assert!(sound.output().is_empty());
    }

    #[test]
    fn toggle_flips_the_setting() {
        let mut sound = SoundEffects::new(Vec::new(), true);

        assert!(!sound.toggle());
        assert!(!sound.is_enabled());
        assert!(sound.toggle());
    }

    #[test]
    fn playback_failure_is_absorbed() {
        let mut sound = SoundEffects::new(BrokenSpeaker, true);

        sound.token_collected();

        assert!(sound.is_enabled());
    }
}
