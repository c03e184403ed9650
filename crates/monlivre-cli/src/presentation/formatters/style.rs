use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Attention,
    Bad,
    Muted,
    Strong,
}

fn color_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}

/// Color `text` when stdout is a terminal, return it unchanged otherwise
pub fn paint(text: &str, tone: Tone) -> String {
    if !color_enabled() {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().to_string(),
        Tone::Attention => text.yellow().to_string(),
        Tone::Bad => text.red().to_string(),
        Tone::Muted => text.dimmed().to_string(),
        Tone::Strong => text.bold().to_string(),
    }
}
