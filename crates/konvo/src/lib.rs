#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use konvo_image as image;

#[doc(inline)]
pub use konvo_imgproc as imgproc;
