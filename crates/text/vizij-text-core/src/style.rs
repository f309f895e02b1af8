//! Responsive styling for the animated label.

use serde::{Deserialize, Serialize};

use crate::config::ResponsiveConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

/// CSS `white-space` mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    Normal,
    Nowrap,
}

impl WhiteSpace {
    pub fn as_css(self) -> &'static str {
        match self {
            WhiteSpace::Normal => "normal",
            WhiteSpace::Nowrap => "nowrap",
        }
    }
}

/// CSS `word-break` mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordBreak {
    Normal,
    BreakWord,
}

impl WordBreak {
    pub fn as_css(self) -> &'static str {
        match self {
            WordBreak::Normal => "normal",
            WordBreak::BreakWord => "break-word",
        }
    }
}

/// Caret visibility written alongside the text content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaretState {
    /// Blinking caret while characters are being typed or deleted.
    Active,
    Hidden,
}

impl CaretState {
    pub fn is_active(self) -> bool {
        matches!(self, CaretState::Active)
    }
}

/// Style record applied to the text sink for one viewport class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveStyle {
    pub viewport: ViewportClass,
    pub font_size: String,
    pub white_space: WhiteSpace,
    pub word_break: WordBreak,
    pub color: String,
    pub font_family: String,
    pub overflow: String,
    pub display: String,
}

/// Pure mapping from viewport width to the label style.
pub fn apply_responsive_style(width: f64, cfg: &ResponsiveConfig) -> ResponsiveStyle {
    let viewport = ViewportClass::for_width(width, cfg.breakpoint);
    let (font_size, white_space, word_break) = match viewport {
        ViewportClass::Mobile => (
            cfg.mobile_font_size.clone(),
            WhiteSpace::Normal,
            WordBreak::BreakWord,
        ),
        ViewportClass::Desktop => (
            cfg.desktop_font_size.clone(),
            WhiteSpace::Nowrap,
            WordBreak::Normal,
        ),
    };
    ResponsiveStyle {
        viewport,
        font_size,
        white_space,
        word_break,
        color: cfg.color.clone(),
        font_family: cfg.font_family.clone(),
        overflow: "hidden".to_string(),
        display: "inline-block".to_string(),
    }
}
