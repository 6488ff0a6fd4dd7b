//! Page-level configuration constants.

// Page hooks
pub const MOUNT_ID: &str = "cropsense-form";
pub const MODE_ATTR: &str = "data-mode";
pub const ACTION_ATTR: &str = "data-action";
pub const RESET_BUTTON_ID: &str = "reset-btn";
pub const SUBMIT_BUTTON_CLASS: &str = "submit-btn";
pub const CROP_SELECT_ID: &str = "label-select";

// Slider feedback
pub const ACTIVE_OPACITY: &str = "1";
pub const RESTING_OPACITY: &str = "0.7";
pub const PRESSED_TRANSFORM: &str = "scale(0.95)";

// Text
pub const RESET_LABEL: &str = "Reset Values";
pub const INVALID_RANGE_ALERT: &str = "Please ensure all values are within the specified ranges.";
