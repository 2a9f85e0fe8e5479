mod ycbcr;

pub use ycbcr::{rgb_from_ycbcr, ycbcr_from_rgb, Quantization};
