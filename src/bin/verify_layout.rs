use sharpline::app::{action::Action, reducer, state::AppState, ui};
use sharpline::config::{PaletteConfig, PaletteVariant};
use sharpline::domain::registry::CommandRegistry;
use sharpline::infrastructure::{catalog, feed::SeededOddsFeed};
use sharpline::theme::Theme;
use ratatui::{backend::TestBackend, Terminal};
use std::collections::BTreeMap;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let registry = CommandRegistry::new(catalog::default_commands(
        Arc::new(SeededOddsFeed::new(42)),
        &[],
        &BTreeMap::new(),
    ))?;
    let theme = Theme::default();

    for variant in [PaletteVariant::Default, PaletteVariant::Compact] {
        let config = PaletteConfig {
            variant,
            ..PaletteConfig::default()
        };
        let mut app_state = AppState::new(&config);

        // Closed, open with every command, open with no results.
        let steps = [
            None,
            Some(Action::OpenPalette),
            Some(Action::SetQuery("zzzz".to_string())),
        ];
        for step in steps {
            if let Some(action) = step {
                reducer::update(&mut app_state, &registry, action);
            }
            for width in 0..100 {
                for height in 0..50 {
                    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
                    terminal.draw(|f| ui::draw(f, &app_state, &registry, &theme))?;
                }
            }
        }
    }

    println!("Layout verification completed successfully!");
    Ok(())
}
