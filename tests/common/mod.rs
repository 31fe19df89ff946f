//! Common test utilities and mock implementations


pub use mock_interface::{MockError, MockInterface, Operation};
pub use test_utils::{MockAudio, MockDelay, assert_float_eq, create_mock_codec};
