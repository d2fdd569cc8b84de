//! User operations.

// crates.io
use serde_json::Value;
// self
use super::{parse_id, require_payload};
use crate::{
	_prelude::*,
	auth::UserId,
	client::{ApiResponse, Client, TransportErrorMapper},
	request::Method,
	transport::ApiHttpClient,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists users; `query` carries filters such as `role_ids` or `start`/`limit`.
	pub async fn list_users(&self, query: BTreeMap<String, String>) -> Result<ApiResponse> {
		self.get_with_query("users", query).await
	}

	/// Fetches one user.
	pub async fn get_user(&self, id: impl AsRef<str>) -> Result<ApiResponse> {
		let id = parse_id::<UserId>("get_user", Method::Get, id.as_ref())?;

		self.get(&format!("users/{id}")).await
	}

	/// Creates a user from a JSON document.
	pub async fn create_user(&self, body: Value) -> Result<ApiResponse> {
		let body = require_payload("create_user", Method::Post, body)?;

		self.post("users", body).await
	}

	/// Updates an existing user.
	pub async fn update_user(&self, id: impl AsRef<str>, body: Value) -> Result<ApiResponse> {
		let id = parse_id::<UserId>("update_user", Method::Put, id.as_ref())?;
		let body = require_payload("update_user", Method::Put, body)?;

		self.put(&format!("users/{id}"), body).await
	}

	/// Deletes a user.
	pub async fn delete_user(&self, id: impl AsRef<str>) -> Result<ApiResponse> {
		let id = parse_id::<UserId>("delete_user", Method::Delete, id.as_ref())?;

		self.delete(&format!("users/{id}")).await
	}
}
