//! Error type shared by the reduction engine.
use std::io;
use serde_yaml;

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        /// The caller supplied a malformed or inconsistent input (e.g. a
        /// permutation that maps centers of different multiplicity).
        InvalidArgument(msg: String) {
            display("invalid argument: {}", msg)
        }
        /// The requested combination of transforms is not supported.
        Unsupported(msg: String) {
            display("unsupported operation: {}", msg)
        }
        /// The total dimension was not conserved by a reduction step.  This
        /// is always an internal-consistency fault.
        DimensionMismatch { expected: u64, found: u64 } {
            display("dimension mismatch: expected {}, found {}",
                    expected, found)
        }
        /// LAPACK returned a nonzero `info`.
        Lapack(info: i32) {
            display("LAPACK failed with info = {}", info)
        }
        Io(err: io::Error) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
        Yaml(err: serde_yaml::Error) {
            from()
            source(err)
            display("YAML error: {}", err)
        }
    }
}

pub fn invalid_argument<S: Into<String>>(msg: S) -> Error {
    Error::InvalidArgument(msg.into())
}

pub fn unsupported<S: Into<String>>(msg: S) -> Error {
    Error::Unsupported(msg.into())
}
