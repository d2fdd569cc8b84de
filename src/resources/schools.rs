//! School (building) operations.

// crates.io
use serde_json::Value;
// self
use super::{parse_id, require_payload};
use crate::{
	_prelude::*,
	auth::SchoolId,
	client::{ApiResponse, Client, TransportErrorMapper},
	request::Method,
	transport::ApiHttpClient,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the schools visible to the consumer.
	pub async fn list_schools(&self) -> Result<ApiResponse> {
		self.get("schools").await
	}

	/// Fetches one school.
	pub async fn get_school(&self, id: impl AsRef<str>) -> Result<ApiResponse> {
		let id = parse_id::<SchoolId>("get_school", Method::Get, id.as_ref())?;

		self.get(&format!("schools/{id}")).await
	}

	/// Creates a school from a JSON document.
	pub async fn create_school(&self, body: Value) -> Result<ApiResponse> {
		let body = require_payload("create_school", Method::Post, body)?;

		self.post("schools", body).await
	}

	/// Replaces the fields given in `body` on an existing school.
	pub async fn update_school(&self, id: impl AsRef<str>, body: Value) -> Result<ApiResponse> {
		let id = parse_id::<SchoolId>("update_school", Method::Put, id.as_ref())?;
		let body = require_payload("update_school", Method::Put, body)?;

		self.put(&format!("schools/{id}"), body).await
	}

	/// Deletes a school.
	pub async fn delete_school(&self, id: impl AsRef<str>) -> Result<ApiResponse> {
		let id = parse_id::<SchoolId>("delete_school", Method::Delete, id.as_ref())?;

		self.delete(&format!("schools/{id}")).await
	}
}
