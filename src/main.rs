use anyhow::{Context, Result};
use bar_progress::{BarProgressBar, BarProgressConfig, Color, ProgressCommand};
use rand::Rng;
use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Parses one stdin line into a widget command.
///
/// `42` animates to 42, `=42` jumps there, `spin` / `stop` toggle the
/// spinner, `label on|off`, `bars N`, `spacing X`, `duration MS` and
/// `colors #rrggbb #rrggbb` change the look.
fn parse_command(line: &str) -> Option<ProgressCommand> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let arg = words.next();

    if let Some(value) = head.strip_prefix('=') {
        return value.parse().ok().map(ProgressCommand::SetProgress);
    }
    if let Ok(value) = head.parse::<i32>() {
        return Some(ProgressCommand::AnimateProgress(value));
    }

    match head {
        "spin" => Some(ProgressCommand::SetIndeterminate(true)),
        "stop" => Some(ProgressCommand::SetIndeterminate(false)),
        "label" => match arg? {
            "on" => Some(ProgressCommand::SetShowProgress(true)),
            "off" => Some(ProgressCommand::SetShowProgress(false)),
            _ => None,
        },
        "bars" => arg?.parse().ok().map(ProgressCommand::SetBarCount),
        "spacing" => arg?.parse().ok().map(ProgressCommand::SetSpacing),
        "duration" => arg?
            .parse()
            .ok()
            .map(ProgressCommand::SetIndeterminateDuration),
        "colors" => {
            let fg = Color::from_hex(arg?)?;
            let bg = Color::from_hex(words.next()?)?;
            Some(ProgressCommand::SetColors(fg, bg))
        }
        _ => None,
    }
}

fn spawn_stdin_reader(sender: Sender<ProgressCommand>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(|line| line.ok()) {
            match parse_command(&line) {
                Some(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!("unrecognized command: {}", line.trim()),
            }
        }
    });
}

fn spawn_random_walk(sender: Sender<ProgressCommand>) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let command = if rng.random_range(0.0..1.0) < 0.2 {
                ProgressCommand::SetIndeterminate(true)
            } else {
                ProgressCommand::AnimateProgress(rng.random_range(0..=100))
            };
            if sender.send(command).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(1500));
        }
    });
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut bar_count = None;
    let mut spacing = None;
    let mut duration = None;
    let mut font_data = None;
    let mut indeterminate = false;
    let mut random = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bar-count" => bar_count = args.next().and_then(|v| v.parse::<i32>().ok()),
            "--spacing" => spacing = args.next().and_then(|v| v.parse::<f32>().ok()),
            "--duration" => duration = args.next().and_then(|v| v.parse::<i64>().ok()),
            "--font" => {
                if let Some(path) = args.next() {
                    let data = std::fs::read(&path)
                        .with_context(|| format!("reading font {}", path))?;
                    font_data = Some(data);
                }
            }
            "--indeterminate" => indeterminate = true,
            "--random" => random = true,
            other => warn!("ignoring argument {}", other),
        }
    }

    let config = BarProgressConfig::builder()
        .title("Bar Progress".to_string())
        .background(Color::WHITE)
        .indeterminate(indeterminate)
        .maybe_bar_count(bar_count)
        .maybe_spacing(spacing)
        .maybe_indeterminate_duration_ms(duration)
        .maybe_font_data(font_data)
        .build();

    let mut bar = BarProgressBar::new(config)?;

    let (sender, receiver) = mpsc::channel();
    if random {
        spawn_random_walk(sender.clone());
    }
    spawn_stdin_reader(sender);

    info!("type a number to animate to it, `=N` to jump, `spin` / `stop` for the spinner");
    bar.show_with_commands(receiver)?;
    Ok(())
}
