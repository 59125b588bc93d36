//! # Wicket
//!
//! Wicket creates tickets in [osTicket](https://osticket.com/) through the
//! web API. It turns a flat parameter document into one authenticated
//! `POST /api/tickets.json` request and reports a single success/failure
//! result record, making it easy to open tickets from automation.
//!
//! ## Features
//!
//! - **Payload encoding**: message bodies and attachments become data URIs
//!   the way the osTicket API expects them
//! - **Custom fields**: extra ticket-form fields merge straight into the
//!   payload
//! - **Check mode**: build and validate the request without sending it
//! - **Security**: API keys are never logged or exposed in error messages
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Environment fallback for the endpoint and API key
//! - [`error`] - Error types with security-conscious message sanitization
//! - [`params`] - The ticket parameter document and its validation
//! - [`payload`] - Pure payload assembly (data URIs, optional fields,
//!   custom-field merge)
//! - [`osticket_client`] - HTTP client for the ticket endpoint
//! - [`outcome`] - The terminal result record
//!
//! ## Usage
//!
//! Wicket is primarily used as a binary:
//!
//! ```bash
//! # Secret and endpoint can come from the environment
//! export OSTICKET_URL=https://osticket.example.com
//! export OSTICKET_API_KEY=your-api-key
//!
//! # Create a ticket from a parameter document
//! wicket ticket.json
//!
//! # Validate without sending
//! wicket --check ticket.json
//! ```
//!
//! A minimal parameter document:
//!
//! ```json
//! {
//!   "name": "Jane Doe",
//!   "email": "jane.doe@example.com",
//!   "subject": "Printer might be out of ink.",
//!   "message": "Screen flashes an error about a squid."
//! }
//! ```
//!
//! ## Security Considerations
//!
//! The API key is stored only in memory and is:
//! - Never logged at any log level
//! - Sanitized from all error messages and the result record
//! - Sent only in the `X-API-Key` header, never in the request body
//!
//! ## Example
//!
//! Using the [`OsTicketClient`](osticket_client::OsTicketClient) directly:
//!
//! ```ignore
//! use wicket::config::Config;
//! use wicket::osticket_client::OsTicketClient;
//! use wicket::params::TicketParams;
//!
//! async fn example(params: TicketParams) -> Result<(), wicket::error::WicketError> {
//!     let params = params.sanitize().resolve(&Config::from_env()?);
//!     let client = OsTicketClient::from_params(&params)?;
//!     let outcome = client.submit(&params, false).await?;
//!     println!("{}", outcome.message);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod osticket_client;
pub mod outcome;
pub mod params;
pub mod payload;
