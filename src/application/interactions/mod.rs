//! Interaction handling - verification, classification, dispatch, and reply formatting

pub mod dispatcher;
pub mod parser;
pub mod response;
pub mod verifier;

pub use dispatcher::CommandDispatcher;
pub use parser::InteractionParser;
pub use response::InteractionResponse;
pub use verifier::{RawRequest, SignatureVerifier, VerifiedPayload, SIGNATURE_HEADER, TIMESTAMP_HEADER};
