use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use hookwork_core::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;

use crate::{Host, RunError};

/// Terminal runner settings.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub title: String,
    /// Print every repainted frame; otherwise frames print on `show`.
    pub echo_frames: bool,
    /// Read commands from stdin. Without it (or once stdin closes) the
    /// runner exits after `idle_timeout` without invalidation.
    pub interactive: bool,
    pub idle_timeout: Duration,
    /// Append the inspector HUD line to every frame.
    pub inspector: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            title: "Hookwork".to_string(),
            echo_frames: true,
            interactive: true,
            idle_timeout: Duration::from_secs(5),
            inspector: false,
        }
    }
}

impl RunConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn echo_frames(mut self, echo: bool) -> Self {
        self.echo_frames = echo;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn inspector(mut self, enabled: bool) -> Self {
        self.inspector = enabled;
        self
    }
}

/// One stdin line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `click <n>`
    Click(usize),
    /// `type <n> <text>`
    Type(usize, String),
    /// `focus <n>`
    Focus(usize),
    /// `backspace <n>`
    Backspace(usize),
    /// `ok`: acknowledge the pending alert.
    Ok,
    /// `show`: print the current frame.
    Show,
    Quit,
}

impl FromStr for Command {
    type Err = RunError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let index = |s: &str| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| RunError::UnknownCommand(line.to_string()))
        };
        match word {
            "click" | "c" => Ok(Command::Click(index(rest)?)),
            "focus" | "f" => Ok(Command::Focus(index(rest)?)),
            "backspace" | "b" => Ok(Command::Backspace(index(rest)?)),
            "type" | "t" => {
                let (n, text) = rest.trim_start().split_once(' ').unwrap_or((rest, ""));
                Ok(Command::Type(index(n)?, text.to_string()))
            }
            "ok" => Ok(Command::Ok),
            "show" | "s" => Ok(Command::Show),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(RunError::UnknownCommand(line.to_string())),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

fn apply(host: &mut Host, cmd: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
    let paints = host.paints();
    match cmd {
        Command::Click(n) => host.click(n)?,
        Command::Type(n, text) => host.type_into(n, &text)?,
        Command::Focus(n) => host.focus_field(n)?,
        Command::Backspace(n) => host.backspace(n)?,
        Command::Ok => {
            let msg = host.acknowledge_alert().ok_or(RunError::NoAlert)?;
            log::debug!("alert acknowledged: {msg}");
        }
        Command::Show => present(host, out)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    if host.paints() != paints {
        log::trace!("repainted without recomposition");
    }
    Ok(Flow::Continue)
}

fn present(host: &Host, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "---- frame {} ----", host.compositions())?;
    write!(out, "{}", host.text())?;
    if let Some(msg) = host.pending_alert() {
        writeln!(out, "!! {msg}  (type `ok`)")?;
    }
    out.flush()
}

/// Runs `root` in the terminal until `quit`, or until stdin is closed and the
/// app has been idle for `config.idle_timeout`.
///
/// Everything runs on the calling thread: a current-thread tokio runtime
/// drives a `LocalSet`, so views can spawn `!Send` work.
pub fn run_terminal_app(
    config: RunConfig,
    root: impl FnMut(&mut Scheduler) -> View + 'static,
) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();
    local.block_on(&rt, run_loop(config, root))
}

async fn run_loop(
    config: RunConfig,
    root: impl FnMut(&mut Scheduler) -> View + 'static,
) -> anyhow::Result<()> {
    let mut out = std::io::stdout();
    let mut host = Host::new(root);
    host.inspector_mut().hud.inspector_enabled = config.inspector;

    log::info!("starting {}", config.title);
    writeln!(out, "== {} ==", config.title)?;
    if config.interactive {
        writeln!(
            out,
            "commands: click <n> | type <n> <text> | backspace <n> | focus <n> | ok | show | quit"
        )?;
    }
    host.compose();
    present(&host, &mut out)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = config.interactive;
    let mut last_alert = host.pending_alert();

    loop {
        let paints = host.paints();
        tokio::select! {
            _ = invalidated() => {
                if take_recompose_request() {
                    host.compose();
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => {
                        let flow = line
                            .parse::<Command>()
                            .map_err(anyhow::Error::from)
                            .and_then(|cmd| apply(&mut host, cmd, &mut out));
                        match flow {
                            Ok(Flow::Quit) => break,
                            Ok(Flow::Continue) => {}
                            Err(e) => writeln!(out, "! {e}")?,
                        }
                    }
                    None => {
                        log::debug!("stdin closed");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::time::sleep(config.idle_timeout), if !stdin_open => {
                log::info!("idle for {:?}, exiting", config.idle_timeout);
                break;
            }
        }

        let alert = host.pending_alert();
        if config.echo_frames && (host.paints() != paints || alert != last_alert) {
            present(&host, &mut out)?;
        }
        last_alert = alert;
    }

    log::info!("{} exited after {} compositions", config.title, host.compositions());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("click 2".parse::<Command>(), Ok(Command::Click(2)));
        assert_eq!(" c 1 ".parse::<Command>(), Ok(Command::Click(1)));
        assert_eq!(
            "type 1 hello world".parse::<Command>(),
            Ok(Command::Type(1, "hello world".to_string()))
        );
        assert_eq!("type 3".parse::<Command>(), Ok(Command::Type(3, String::new())));
        assert_eq!("focus 1".parse::<Command>(), Ok(Command::Focus(1)));
        assert_eq!("backspace 2".parse::<Command>(), Ok(Command::Backspace(2)));
        assert_eq!("b 1".parse::<Command>(), Ok(Command::Backspace(1)));
        assert_eq!("ok".parse::<Command>(), Ok(Command::Ok));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            "click two".parse::<Command>(),
            Err(RunError::UnknownCommand("click two".to_string()))
        );
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_apply_requires_alert_acknowledgement() {
        let mut host = Host::new(|_| {
            hookwork_ui::Button("boom", || alert("Something went wrong..."))
        });
        host.compose();
        let mut out = Vec::new();

        assert!(matches!(
            apply(&mut host, Command::Click(1), &mut out),
            Ok(Flow::Continue)
        ));
        assert_eq!(host.pending_alert().as_deref(), Some("Something went wrong..."));

        let blocked = apply(&mut host, Command::Click(1), &mut out);
        let err = blocked.err().and_then(|e| e.downcast::<RunError>().ok());
        assert!(matches!(err, Some(RunError::AlertPending(_))));

        assert!(matches!(apply(&mut host, Command::Ok, &mut out), Ok(Flow::Continue)));
        assert_eq!(host.pending_alert(), None);
        assert!(matches!(apply(&mut host, Command::Quit, &mut out), Ok(Flow::Quit)));
    }

    #[test]
    fn test_backspace_command_edits_field() {
        let mut host = Host::new(|_| hookwork_ui::TextField("", |_| {}));
        host.compose();
        let mut out = Vec::new();

        assert!(apply(&mut host, Command::Type(1, "ok!".into()), &mut out).is_ok());
        assert!(apply(&mut host, Command::Backspace(1), &mut out).is_ok());
        assert!(host.text().starts_with("<1> ok_"));

        let missing = apply(&mut host, Command::Backspace(2), &mut out);
        let err = missing.err().and_then(|e| e.downcast::<RunError>().ok());
        assert!(matches!(err, Some(RunError::NoSuchField(2))));
    }

    #[test]
    fn test_show_prints_frame() {
        let mut host = Host::new(|_| hookwork_ui::Text("hello"));
        host.compose();
        let mut out = Vec::new();
        assert!(apply(&mut host, Command::Show, &mut out).is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), "---- frame 1 ----\nhello\n");
    }
}
