#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use gaussblur_plane as plane;

#[doc(inline)]
pub use gaussblur_engine as engine;
