//! Token Flows
//!
//! The client-credentials grant used to obtain bearer tokens.

pub mod client_credentials;

pub use client_credentials::{
    mock_token_response, ClientCredentialsFlow, ClientCredentialsFlowImpl,
    MockClientCredentialsFlow, TOKEN_PATH,
};
