//! Hardware bindings for the nRF52840 build.
//!
//! Everything in here is a thin synchronous wrapper the interface
//! controller drives through the traits in `measure`, `history`, and
//! `interface`: the SAADC cell/current measurements, the character
//! LCD, the cooling fan, the load stepper, and the flash-backed
//! history store.

pub mod analyzer;
pub mod fan;
pub mod flash;
pub mod lcd;
pub mod stepper;
