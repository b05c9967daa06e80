use egui::{Color32, Vec2};

// Buttons
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(76, 154, 255);
pub const LOADING_BUTTON_BG: Color32 = Color32::from_rgb(140, 180, 230);
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255);

// Upload box
pub const UPLOAD_BG: Color32 = Color32::from_rgb(250, 250, 250);
pub const UPLOAD_BG_DRAG: Color32 = Color32::from_rgb(232, 242, 255);
pub const UPLOAD_BORDER: Color32 = Color32::from_rgb(200, 200, 200);
pub const UPLOAD_BORDER_DRAG: Color32 = PRIMARY_BUTTON_BG;

// Text
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(138, 138, 143);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(231, 76, 60);
pub const TEXT_SUCCESS: Color32 = Color32::from_rgb(46, 204, 113);

// Hints
pub const HINT_ACTIVE_BG: Color32 = PRIMARY_BUTTON_BG;
pub const HINT_ACTIVE_TEXT: Color32 = BUTTON_MAIN_TEXT;

// Sizing & Spacing
pub const ROUNDING_FRAME: f32 = 8.0;
pub const ROUNDING_BUTTON: f32 = 6.0;
pub const MIN_SIZE_BUTTON: Vec2 = Vec2::new(200.0, 44.0);
pub const UPLOAD_BOX_HEIGHT: f32 = 120.0;
pub const BUTTON_FONT_SIZE: f32 = 16.0;
