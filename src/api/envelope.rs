//! Response envelopes shared by every QuoteHub endpoint.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::TransportError};

/// Single-entity envelope: `{success, data?, message?}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEnvelope<T> {
	/// Server-side success flag.
	pub success: bool,
	/// Requested or affected entity, when present.
	pub data: Option<T>,
	/// Server-supplied message accompanying failures or confirmations.
	pub message: Option<String>,
}
impl<T> DataEnvelope<T> {
	/// Converts the envelope into the carried entity, surfacing business failures with the
	/// server message verbatim.
	pub fn into_result(self, status: Option<u16>) -> Result<T> {
		if !self.success {
			return Err(Error::api(
				self.message.unwrap_or_else(|| "Request failed.".into()),
				status,
			));
		}

		self.data.ok_or_else(|| Error::api("Response carried no entity.", status))
	}

	/// Converts the envelope into a bare acknowledgment, for endpoints that return only the
	/// success flag.
	pub fn into_ack(self, status: Option<u16>) -> Result<()> {
		if self.success {
			Ok(())
		} else {
			Err(Error::api(self.message.unwrap_or_else(|| "Request failed.".into()), status))
		}
	}
}

/// Collection envelope: `{success, data, currentPage, totalPages, pageSize, totalItems,
/// message?}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
	/// Server-side success flag.
	pub success: bool,
	/// Items carried by this page, in server order.
	#[serde(default = "Vec::new")]
	pub data: Vec<T>,
	/// 1-based index of the returned page.
	pub current_page: u32,
	/// Total number of pages for the collection.
	pub total_pages: u32,
	/// Page size the server actually applied.
	pub page_size: u32,
	/// Total number of items across all pages.
	pub total_items: u64,
	/// Server-supplied message accompanying failures.
	pub message: Option<String>,
}
impl<T> PageEnvelope<T> {
	/// Converts the envelope into a [`Page`], surfacing business failures with the server
	/// message verbatim.
	pub fn into_page(self, status: Option<u16>) -> Result<Page<T>> {
		if !self.success {
			return Err(Error::api(
				self.message.unwrap_or_else(|| "Page fetch failed.".into()),
				status,
			));
		}

		Ok(Page {
			items: self.data,
			current_page: self.current_page,
			total_pages: self.total_pages,
			page_size: self.page_size,
			total_items: self.total_items,
		})
	}
}

/// One successfully fetched page of a collection endpoint.
#[derive(Clone, Debug)]
pub struct Page<T> {
	/// Items carried by this page, in server order.
	pub items: Vec<T>,
	/// 1-based index of the returned page.
	pub current_page: u32,
	/// Total number of pages for the collection.
	pub total_pages: u32,
	/// Page size the server actually applied.
	pub page_size: u32,
	/// Total number of items across all pages.
	pub total_items: u64,
}
impl<T> Page<T> {
	/// Returns `true` when the server reports this page as the final one.
	///
	/// Last-page detection always derives from the server-reported counters, never from
	/// local item counting.
	pub fn is_last(&self) -> bool {
		self.current_page >= self.total_pages
	}
}

/// Decodes a JSON body with path-aware diagnostics; malformed payloads surface as
/// transport-class failures.
pub(crate) fn decode_json<T>(body: &[u8], status: Option<u16>) -> Result<T, TransportError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| TransportError::Decode { source, status })
}
