use serde::{Deserialize, Serialize};

use crate::raster::Color;

/// The mutually-exclusive drawing tools. Exactly one is current at a time;
/// the selection is passed into canvas operations per call rather than read
/// from shared widget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMode {
    Select,
    Pen,
    Highlighter,
    Eraser,
    Oval,
    Rectangle,
    Line,
    Bucket,
    Pick,
    Text,
}

impl ToolMode {
    pub const ALL: [ToolMode; 10] = [
        ToolMode::Select,
        ToolMode::Pen,
        ToolMode::Highlighter,
        ToolMode::Eraser,
        ToolMode::Oval,
        ToolMode::Rectangle,
        ToolMode::Line,
        ToolMode::Bucket,
        ToolMode::Pick,
        ToolMode::Text,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolMode::Select => "Select",
            ToolMode::Pen => "Pen",
            ToolMode::Highlighter => "Highlighter",
            ToolMode::Eraser => "Eraser",
            ToolMode::Oval => "Oval",
            ToolMode::Rectangle => "Rectangle",
            ToolMode::Line => "Line",
            ToolMode::Bucket => "Bucket",
            ToolMode::Pick => "Pick Color",
            ToolMode::Text => "Text",
        }
    }
}

/// How the eraser removes ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraserMode {
    /// Rubs out the touched part of a stroke, splitting it.
    Partial,
    /// Removes the whole touched stroke.
    WholeStroke,
}

/// The highlighter's restricted palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlighterColor {
    Yellow,
    Cyan,
    Magenta,
}

impl HighlighterColor {
    pub fn color(&self) -> Color {
        match self {
            HighlighterColor::Yellow => Color::YELLOW,
            HighlighterColor::Cyan => Color::CYAN,
            HighlighterColor::Magenta => Color::MAGENTA,
        }
    }
}

/// Current tool selection plus pen attributes. This is the state the app
/// persists across runs; the document itself is not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub mode: ToolMode,
    /// Outline and ink color; the color picker drives this.
    pub pen_color: Color,
    /// Color the bucket pours. Follows the picker and the Pick tool.
    pub fill_color: Color,
    pub highlighter_color: HighlighterColor,
    pub eraser_mode: EraserMode,
    /// Pen diameter in pixels, from the thickness slider.
    pub thickness: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            mode: ToolMode::Select,
            pen_color: Color::BLACK,
            fill_color: Color::BLACK,
            highlighter_color: HighlighterColor::Yellow,
            eraser_mode: EraserMode::Partial,
            thickness: 2.0,
        }
    }
}

impl ToolState {
    pub fn pen_radius(&self) -> f32 {
        (self.thickness / 2.0).max(0.5)
    }

    /// The highlighter draws five times wider than the pen.
    pub fn highlighter_radius(&self) -> f32 {
        (self.thickness * 5.0 / 2.0).max(1.0)
    }

    pub fn eraser_radius(&self) -> f32 {
        (self.thickness * 2.0).max(6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_session() {
        let state = ToolState::default();
        assert_eq!(state.mode, ToolMode::Select);
        assert_eq!(state.pen_color, Color::BLACK);
        assert_eq!(state.fill_color, Color::BLACK);
        assert_eq!(state.thickness, 2.0);
    }

    #[test]
    fn radii_scale_with_thickness() {
        let mut state = ToolState::default();
        state.thickness = 10.0;
        assert_eq!(state.pen_radius(), 5.0);
        assert_eq!(state.highlighter_radius(), 25.0);
    }
}
