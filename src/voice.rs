use log::debug;
use tokio::process::Command;

/// Host TTS commands tried in order; the first that spawns wins.
const TTS_COMMANDS: [(&str, &[&str]); 3] = [
    ("say", &[]),
    ("espeak-ng", &[]),
    ("spd-say", &["--wait"]),
];

/// Fire-and-forget voice-out. Nothing here affects state: spawn
/// failures are logged and swallowed.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    enabled: bool,
}

impl Voice {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn speak(&self, text: &str) {
        if !self.enabled || text.is_empty() {
            return;
        }
        let text = text.to_string();
        tokio::spawn(async move {
            for (program, args) in TTS_COMMANDS {
                let spawned = Command::new(program)
                    .args(args)
                    .arg(&text)
                    .stdout(std::process::Stdio::null())
                    .stderr(std::process::Stdio::null())
                    .spawn();
                match spawned {
                    Ok(mut child) => {
                        let _ = child.wait().await;
                        return;
                    }
                    Err(e) => debug!("tts {program} unavailable: {e}"),
                }
            }
            debug!("no host tts command available");
        });
    }
}
