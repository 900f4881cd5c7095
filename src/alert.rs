use notify_rust::{Notification, Urgency};
use std::{error::Error, io::Write};

/// The end-of-countdown pulse. Best-effort: callers log failures and move on.
pub trait HapticTrigger {
    fn fire(&mut self) -> Result<(), Box<dyn Error>>;
}

/// Does nothing; for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptic;

impl HapticTrigger for NoHaptic {
    fn fire(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DesktopAlert {
    pub notify: bool,
    pub sound: bool,
    pub bell: bool,
}

impl Default for DesktopAlert {
    fn default() -> Self {
        Self { notify: true, sound: true, bell: true }
    }
}

impl HapticTrigger for DesktopAlert {
    fn fire(&mut self) -> Result<(), Box<dyn Error>> {
        if self.bell {
            let mut out = std::io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }

        if self.sound {
            play_sound();
        }

        if self.notify {
            Notification::new()
                .summary("Time's up! ⏰")
                .body("Your countdown has finished.")
                .appname("rcountdown")
                .icon("alarm-clock")
                .urgency(Urgency::Critical)
                .show()?;
        }
        Ok(())
    }
}

fn play_sound() {
    std::thread::spawn(|| {
        for (cmd, file) in [
            ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
            ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
            ("aplay", "/usr/share/sounds/generic.wav"),
        ] {
            if std::path::Path::new(file).exists() {
                let _ = std::process::Command::new(cmd)
                    .arg(file)
                    .stdout(std::process::Stdio::null())
                    .stderr(std::process::Stdio::null())
                    .spawn();
                break;
            }
        }
    });
}
