//! Course section and enrollment lookups.

// self
use super::parse_id;
use crate::{
	_prelude::*,
	auth::{CourseId, EnrollmentId, SectionId},
	client::{ApiResponse, Client, TransportErrorMapper},
	request::Method,
	transport::ApiHttpClient,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the sections of a course.
	pub async fn list_course_sections(&self, course: impl AsRef<str>) -> Result<ApiResponse> {
		let course = parse_id::<CourseId>("list_course_sections", Method::Get, course.as_ref())?;

		self.get(&format!("courses/{course}/sections")).await
	}

	/// Fetches one section.
	pub async fn get_section(&self, id: impl AsRef<str>) -> Result<ApiResponse> {
		let id = parse_id::<SectionId>("get_section", Method::Get, id.as_ref())?;

		self.get(&format!("sections/{id}")).await
	}

	/// Lists enrollments of a section.
	pub async fn list_section_enrollments(&self, section: impl AsRef<str>) -> Result<ApiResponse> {
		let section =
			parse_id::<SectionId>("list_section_enrollments", Method::Get, section.as_ref())?;

		self.get(&format!("sections/{section}/enrollments")).await
	}

	/// Fetches one enrollment of a section.
	pub async fn get_section_enrollment(
		&self,
		section: impl AsRef<str>,
		enrollment: impl AsRef<str>,
	) -> Result<ApiResponse> {
		let section = parse_id::<SectionId>("get_section_enrollment", Method::Get, section.as_ref())?;
		let enrollment =
			parse_id::<EnrollmentId>("get_section_enrollment", Method::Get, enrollment.as_ref())?;

		self.get(&format!("sections/{section}/enrollments/{enrollment}")).await
	}
}
