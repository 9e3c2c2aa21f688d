#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use edgecam_image as image;

#[doc(inline)]
pub use edgecam_imgproc as imgproc;

#[doc(inline)]
pub use edgecam_io as io;
