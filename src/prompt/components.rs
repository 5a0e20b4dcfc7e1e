// src/prompt/components.rs
//
// Marker components and layout settings for the prompt box UI.

use bevy::prelude::*;

/// Root node of the prompt box.
#[derive(Component, Debug)]
pub struct PromptBox;

/// Text node showing the current line.
#[derive(Component, Debug)]
pub struct PromptBoxText;

/// Image node showing the current line's picture, if any.
#[derive(Component, Debug)]
pub struct PromptBoxImage;

/// Resource containing layout settings for the prompt box.
#[derive(Resource, Debug)]
pub struct PromptBoxSettings {
    /// Box width (pixels).
    pub width: f32,

    /// Offset from bottom edge of screen (pixels).
    pub bottom_offset: f32,

    /// Padding inside the box (pixels).
    pub padding: f32,

    /// Edge length of the square prompt image (pixels).
    pub image_size: f32,

    /// Font size for the prompt text (points).
    pub font_size: f32,
}

impl Default for PromptBoxSettings {
    fn default() -> Self {
        Self {
            width: 560.0,
            bottom_offset: 24.0,
            padding: 12.0,
            image_size: 64.0,
            font_size: 18.0,
        }
    }
}
