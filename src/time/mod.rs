//! Virtual time: the override context, the wire codec, and the
//! override-aware clock.

pub mod clock;
pub mod codec;
pub mod context;
pub mod virtual_clock;
pub mod zone;
