//! Mapping from transport-native errors into [`Error`].

// self
use crate::{_prelude::*, error::TransportError, request::RequestDescriptor};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Maps transport-specific errors into the client's [`Error`] type.
///
/// Implementations get the descriptor of the failed request so the resulting error can name
/// the method and URL that were attempted.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts a transport failure for `request` into an [`Error`].
	fn map_transport_error(&self, request: &RequestDescriptor, err: E) -> Error;
}

/// Mapper that reports every transport failure as [`TransportError::Network`].
///
/// Suitable for custom transports whose errors carry no further classification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkErrorMapper;
impl<E> TransportErrorMapper<E> for NetworkErrorMapper
where
	E: 'static + Send + Sync + StdError,
{
	fn map_transport_error(&self, request: &RequestDescriptor, err: E) -> Error {
		TransportError::network(request.method, request.url_with_query(), err).into()
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, request: &RequestDescriptor, err: ReqwestError) -> Error {
		if err.is_builder() {
			return ConfigError::from(err).into();
		}
		if err.is_timeout() {
			return TransportError::timeout(request.method, request.url_with_query(), err).into();
		}

		TransportError::network(request.method, request.url_with_query(), err).into()
	}
}
