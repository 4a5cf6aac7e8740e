pub mod badge;
pub mod category;
pub mod classifier;
pub mod progress;
pub mod reducer;
pub mod word;
