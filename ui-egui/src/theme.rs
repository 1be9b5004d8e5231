// SPDX-License-Identifier: MIT OR Apache-2.0

//! Theme provider: derives the board theme from egui visuals

use egui::{Color32, Visuals};
use gridmark_core::ThemeMode;

/// Supplies the current [`ThemeMode`]
///
/// Follows `Visuals::dark_mode` unless a mode is forced, in which case the
/// matching egui visuals are installed as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeProvider {
    forced: Option<ThemeMode>,
}

impl ThemeProvider {
    pub fn new(forced: Option<ThemeMode>) -> Self {
        Self { forced }
    }

    /// Install forced visuals on the context, if any
    pub fn apply(&self, ctx: &egui::Context) {
        if let Some(mode) = self.forced {
            if ctx.style().visuals.dark_mode != mode.is_dark() {
                ctx.set_visuals(visuals_for(mode));
            }
        }
    }

    pub fn current(&self, visuals: &Visuals) -> ThemeMode {
        self.forced.unwrap_or_else(|| theme_mode(visuals))
    }
}

pub fn theme_mode(visuals: &Visuals) -> ThemeMode {
    ThemeMode::from_dark(visuals.dark_mode)
}

pub fn visuals_for(mode: ThemeMode) -> Visuals {
    match mode {
        ThemeMode::Dark => Visuals::dark(),
        ThemeMode::Light => Visuals::light(),
    }
}

/// Board background for a theme
pub fn board_background(visuals: &Visuals) -> Color32 {
    visuals.extreme_bg_color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_visuals_unless_forced() {
        let auto = ThemeProvider::default();
        assert_eq!(auto.current(&Visuals::dark()), ThemeMode::Dark);
        assert_eq!(auto.current(&Visuals::light()), ThemeMode::Light);

        let forced = ThemeProvider::new(Some(ThemeMode::Light));
        assert_eq!(forced.current(&Visuals::dark()), ThemeMode::Light);
    }

    #[test]
    fn apply_installs_forced_visuals() {
        let ctx = egui::Context::default();
        ctx.set_visuals(Visuals::light());
        ThemeProvider::new(Some(ThemeMode::Dark)).apply(&ctx);
        assert!(ctx.style().visuals.dark_mode);
    }
}
