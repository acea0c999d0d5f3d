#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod config;
pub mod logger;
pub mod model;
pub mod osd;
pub mod preview;
pub mod protocol;
pub mod session;
pub mod version;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
#[cfg(test)]
#[macro_use]
extern crate serial_test;
