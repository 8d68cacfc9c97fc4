pub mod image_loader;

pub use image_loader::{guess_image_mime, ImageData};
