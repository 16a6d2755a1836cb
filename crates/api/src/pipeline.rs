// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::session::SessionAccessor;
use crate::transport::{AUTHORIZATION, Request, Response, Transport};

/// Sends requests with the current session attached.
///
/// Every request gets `Authorization: Bearer <token>` when a session is
/// live. A 401 from the backend triggers [`SessionAccessor::on_unauthorized`]
/// before the error is returned.
#[derive(Debug)]
pub struct RequestPipeline<T, A> {
    transport: T,
    session: A,
}

impl<T, A> RequestPipeline<T, A>
where
    T: Transport,
    A: SessionAccessor,
{
    #[must_use]
    pub const fn new(transport: T, session: A) -> Self {
        Self { transport, session }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn session(&self) -> &A {
        &self.session
    }

    /// Sends `request` and returns the 2xx response.
    ///
    /// # Errors
    ///
    /// - `ApiError::Unauthorized` on 401, after the session was cleared
    /// - `ApiError::Remote` on any other non-2xx status
    /// - whatever the transport reports if no response arrived
    pub async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let request: Request = match self.session.token() {
            Some(token) => request.with_header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        };
        let method = request.method;
        let path: String = request.path.clone();

        let response: Response = self.transport.send(request).await?;
        debug!(%method, path = %path, status = response.status, "Backend responded");

        match response.status {
            200..=299 => Ok(response),
            401 => {
                warn!(%method, path = %path, "Backend rejected session token");
                self.session.on_unauthorized();
                Err(ApiError::Unauthorized)
            }
            status => Err(ApiError::Remote {
                status,
                message: response.message(),
            }),
        }
    }

    /// Sends `request` and decodes the 2xx body.
    ///
    /// # Errors
    ///
    /// Everything [`RequestPipeline::send`] returns, plus `ApiError::Decode`.
    pub async fn fetch<R: DeserializeOwned>(&self, request: Request) -> Result<R, ApiError> {
        self.send(request).await?.json()
    }
}
