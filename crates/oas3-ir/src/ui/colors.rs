use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy)]
pub enum Theme {
  Dark,
  Light,
}

#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

/// RGB pair for dark and light backgrounds.
type Swatch = ((u8, u8, u8), (u8, u8, u8));

const TIMESTAMP: Swatch = ((118, 166, 166), (92, 62, 38));
const PRIMARY: Swatch = ((191, 126, 4), (70, 42, 25));
const ACCENT: Swatch = ((166, 84, 55), (211, 99, 70));
const SUCCESS: Swatch = ((118, 166, 166), (34, 142, 90));
const LABEL: Swatch = ((217, 164, 4), (176, 103, 66));
const VALUE: Swatch = ((242, 211, 56), (199, 146, 76));

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, swatch: Swatch) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = match self.theme {
      Theme::Dark => swatch.0,
      Theme::Light => swatch.1,
    };
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(TIMESTAMP)
  }

  pub const fn primary(&self) -> Color {
    self.pick(PRIMARY)
  }

  pub const fn accent(&self) -> Color {
    self.pick(ACCENT)
  }

  pub const fn success(&self) -> Color {
    self.pick(SUCCESS)
  }

  pub const fn label(&self) -> Color {
    self.pick(LABEL)
  }

  pub const fn value(&self) -> Color {
    self.pick(VALUE)
  }

  pub fn cell(color: Color) -> ComfyColor {
    match color {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      _ => ComfyColor::Reset,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, RgbColor, Style, Styles};

    const fn rgb(swatch: Swatch) -> Option<ClapColor> {
      let (r, g, b) = swatch.0;
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(rgb(LABEL)))
      .usage(Style::new().bold().fg_color(rgb(LABEL)))
      .literal(Style::new().fg_color(rgb(SUCCESS)))
      .placeholder(Style::new().fg_color(rgb(TIMESTAMP)))
      .error(Style::new().bold().fg_color(rgb(ACCENT)))
      .valid(Style::new().fg_color(rgb(SUCCESS)))
      .invalid(Style::new().bold().fg_color(rgb(ACCENT)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(bg) = colorfgbg.split(';').next_back()
    && let Ok(bg_num) = bg.parse::<u8>()
  {
    return if bg_num >= 8 { Theme::Light } else { Theme::Dark };
  }
  Theme::Dark
}
