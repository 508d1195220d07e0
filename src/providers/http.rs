// font-locate/src/providers/http.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The default transport of the remote provider, a blocking HTTPS client.

use std::io::Read;

use crate::error::TransportError;

use super::remote::Transport;

/// Performs GET requests with `ureq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpTransport;

impl HttpTransport {
    /// Creates the transport.
    #[inline]
    pub fn new() -> HttpTransport {
        HttpTransport
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = match ureq::get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(status)) => return Err(TransportError::Status(status)),
            Err(error) => return Err(TransportError::Request(error.to_string())),
        };
        check_status(response.status().as_u16())?;
        let mut body = vec![];
        response
            .into_body()
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|error| TransportError::Request(error.to_string()))?;
        debug!("fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Only a plain 200 counts as success; redirects are followed before this is checked.
pub(crate) fn check_status(status: u16) -> Result<(), TransportError> {
    if status == 200 {
        Ok(())
    } else {
        Err(TransportError::Status(status))
    }
}
