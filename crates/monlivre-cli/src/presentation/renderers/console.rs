use anyhow::Result;
use monlivre_engine::Severity;
use serde::Serialize;

use super::traits::Renderer;
use crate::presentation::formatters::{Tone, paint};
use crate::presentation::view_models::{CommandResultViewModel, CreateView, ViewMode};
use crate::types::OutputFormat;

pub struct ConsoleRenderer {
    format: OutputFormat,
    mode: ViewMode,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat, mode: ViewMode) -> Self {
        Self { format, mode }
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView + Send + Sync,
    {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        // Minimal output is meant for scripts: content only
        if self.mode == ViewMode::Minimal {
            print!("{}", result.content.create_view(self.mode));
            return Ok(());
        }

        let badge_repeats_notification = match (&result.badge, result.notifications.as_slice()) {
            (Some(badge), [only]) => badge.echoes(only),
            _ => false,
        };

        if let Some(badge) = &result.badge {
            println!("{} {}", badge.icon(), paint(&badge.label, Tone::Strong));
            println!();
        }

        print!("{}", result.content.create_view(self.mode));

        if !badge_repeats_notification {
            for note in &result.notifications {
                let tone = match note.severity {
                    Severity::Success => Tone::Good,
                    Severity::Info => Tone::Muted,
                    Severity::Warning => Tone::Attention,
                    Severity::Error => Tone::Bad,
                };
                println!("{} {}", note.severity.icon(), paint(&note.message, tone));
            }
        }

        if !result.suggestions.is_empty() && self.mode != ViewMode::Compact {
            println!("\n{}", paint("💡 Tips:", Tone::Attention));
            for tip in &result.suggestions {
                print!("  • {}", tip.description);
                if let Some(cmd) = &tip.command {
                    print!(": {}", paint(cmd, Tone::Strong));
                }
                println!();
            }
        }

        Ok(())
    }
}
