#![no_std]

extern crate alloc;

pub mod glyph;
pub mod msp;
