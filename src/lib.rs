extern crate cblas;
extern crate conv;
extern crate fnv;
extern crate lapacke;
#[macro_use]
extern crate log;
#[cfg(test)]
extern crate netlib_src;
extern crate num;
#[macro_use]
extern crate quick_error;
extern crate rayon;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;

#[macro_use]
mod macros;

pub mod error;
pub mod group;
pub mod half;
pub mod index_converter;
pub mod lex_cache;
pub mod linalg;
pub mod matrix;
pub mod matrix_builder;
pub mod model;
pub mod operator;
pub mod space;
pub mod spectrum;
pub mod term;
pub mod transform;
pub mod utils;
