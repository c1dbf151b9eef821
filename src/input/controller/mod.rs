mod dispatch;
mod state;

pub use state::{
    DEFAULT_BACKSPACE_REPEAT, KeyboardController, KeyboardState, VisibilityListener,
};
